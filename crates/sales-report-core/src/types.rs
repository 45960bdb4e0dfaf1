use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages expressed on a 0-100 scale (15 = 15%).
pub type Percent = Decimal;

/// Decimal places kept in every reported monetary figure.
pub const REPORT_DECIMAL_PLACES: u32 = 2;

/// Round a reported figure to cents, half away from zero. Trailing zeros
/// are dropped so equal figures always render the same text.
pub fn round_money(value: Money) -> Money {
    value
        .round_dp_with_strategy(REPORT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(2.675)), dec!(2.68));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_money(dec!(7.5)), dec!(7.5));
    }

    #[test]
    fn test_round_money_canonical_text() {
        assert_eq!(round_money(dec!(7.500)).to_string(), "7.5");
        assert_eq!(round_money(dec!(50) * dec!(15) / dec!(100)).to_string(), "7.5");
        assert_eq!(round_money(dec!(100.00)).to_string(), "100");
        assert_eq!(round_money(dec!(9.995)).to_string(), "10");
        assert_eq!(round_money(dec!(-0.001)).to_string(), "0");
    }

    #[test]
    fn test_round_money_truncates_long_fractions() {
        assert_eq!(round_money(dec!(33.333333)), dec!(33.33));
        assert_eq!(round_money(dec!(0.004)), dec!(0));
    }

    #[test]
    fn test_with_metadata_envelope() {
        let out = with_metadata(
            "test",
            &serde_json::json!({"k": 1}),
            vec!["w".into()],
            12,
            dec!(1),
        );
        assert_eq!(out.result, dec!(1));
        assert_eq!(out.methodology, "test");
        assert_eq!(out.warnings, vec!["w".to_string()]);
        assert_eq!(out.metadata.computation_time_us, 12);
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
        assert!(!out.metadata.version.is_empty());
    }
}
