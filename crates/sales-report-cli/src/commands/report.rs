use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use sales_report_core::analysis::{
    analyze_sales_data, bonus_for_profit, bonus_percent, calculate_simple_revenue,
    run_sales_analysis, AnalysisOptions, LineItem, SalesData,
};
use sales_report_core::round_money;

use crate::input;

/// Arguments for the sales report
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to a JSON document with sellers, products and purchase_records
    #[arg(long)]
    pub input: Option<String>,

    /// Print only the ranked seller entries, without summary and metadata
    #[arg(long)]
    pub report_only: bool,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let document = input::load_json(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for analyze")?;
    let data = SalesData::from_value(&document)?;
    let options = AnalysisOptions::standard();

    if args.report_only {
        let report = analyze_sales_data(&data, &options)?;
        return Ok(serde_json::to_value(report)?);
    }

    let result = run_sales_analysis(&data, &options)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for single line item revenue
#[derive(Args)]
pub struct RevenueArgs {
    /// Path to a JSON line item (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Product sku, informational
    #[arg(long, default_value = "-")]
    pub sku: String,

    /// Units sold
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Unit sale price before discount
    #[arg(long)]
    pub sale_price: Option<Decimal>,

    /// Discount percentage, 0-100
    #[arg(long, default_value = "0")]
    pub discount: Decimal,
}

pub fn run_revenue(args: RevenueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let item: LineItem = if args.input.is_some() || args.sale_price.is_none() {
        let document = input::load_json(args.input.as_deref())?
            .ok_or("--sale-price and --quantity are required (or provide --input)")?;
        serde_json::from_value(document)?
    } else {
        LineItem {
            sku: args.sku,
            quantity: args.quantity.ok_or("--quantity is required (or provide --input)")?,
            sale_price: args.sale_price.ok_or("--sale-price is required")?,
            discount: args.discount,
        }
    };

    if item.discount < Decimal::ZERO || item.discount > Decimal::ONE_HUNDRED {
        return Err(format!("--discount must be between 0 and 100, got {}", item.discount).into());
    }

    let revenue = calculate_simple_revenue(&item);
    Ok(json!({
        "result": {
            "sku": item.sku,
            "quantity": item.quantity,
            "sale_price": item.sale_price,
            "discount": item.discount,
            "revenue": round_money(revenue),
            "revenue_unrounded": revenue,
        }
    }))
}

/// Arguments for the profit-rank bonus
#[derive(Args)]
pub struct BonusArgs {
    /// Zero-based rank in the profit-descending order
    #[arg(long)]
    pub index: usize,

    /// Number of ranked sellers
    #[arg(long)]
    pub total: usize,

    /// Seller profit
    #[arg(long, allow_hyphen_values = true)]
    pub profit: Decimal,
}

pub fn run_bonus(args: BonusArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.total == 0 {
        return Err("--total must be at least 1".into());
    }
    if args.index >= args.total {
        return Err(format!(
            "--index {} is out of range for --total {}",
            args.index, args.total
        )
        .into());
    }

    let bonus = bonus_for_profit(args.index, args.total, args.profit);
    Ok(json!({
        "result": {
            "index": args.index,
            "total": args.total,
            "profit": args.profit,
            "bonus_percent": bonus_percent(args.index, args.total),
            "bonus": round_money(bonus),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;

    #[test]
    fn test_revenue_from_flags() {
        let value = run_revenue(RevenueArgs {
            input: None,
            sku: "SKU_001".into(),
            quantity: Some(3),
            sale_price: Some(dec!(19.99)),
            discount: dec!(15),
        })
        .unwrap();
        assert_eq!(value["result"]["revenue"], "50.97");
        assert_eq!(value["result"]["revenue_unrounded"], "50.9745");
    }

    #[test]
    fn test_revenue_rejects_bad_discount() {
        let err = run_revenue(RevenueArgs {
            input: None,
            sku: "-".into(),
            quantity: Some(1),
            sale_price: Some(dec!(10)),
            discount: dec!(150),
        })
        .unwrap_err();
        assert!(err.to_string().contains("between 0 and 100"));
    }

    #[test]
    fn test_bonus_single_seller_is_top() {
        let value = run_bonus(BonusArgs {
            index: 0,
            total: 1,
            profit: dec!(50),
        })
        .unwrap();
        assert_eq!(value["result"]["bonus"], "7.5");
        assert_eq!(value["result"]["bonus_percent"], "15");
    }

    #[test]
    fn test_bonus_index_out_of_range() {
        let err = run_bonus(BonusArgs {
            index: 3,
            total: 3,
            profit: dec!(50),
        })
        .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_analyze_from_file() {
        let path = std::env::temp_dir().join("salesrep_analyze_cmd_test.json");
        fs::write(
            &path,
            r#"{
                "sellers": [{"id": "s1", "first_name": "A", "last_name": "B"}],
                "products": [{"sku": "p1", "purchase_price": 10}],
                "purchase_records": [{"seller_id": "s1", "total_amount": 100,
                    "items": [{"sku": "p1", "quantity": 5, "sale_price": 20, "discount": 0}]}]
            }"#,
        )
        .unwrap();

        let value = run_analyze(AnalyzeArgs {
            input: Some(path.to_str().unwrap().to_string()),
            report_only: false,
        })
        .unwrap();
        assert_eq!(value["result"]["sellers"][0]["bonus"], "7.5");
        assert_eq!(value["result"]["summary"]["seller_count"], 1);

        let report = run_analyze(AnalyzeArgs {
            input: Some(path.to_str().unwrap().to_string()),
            report_only: true,
        })
        .unwrap();
        assert_eq!(report[0]["name"], "A B");
        let _ = fs::remove_file(&path);
    }
}
