use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::model::LineItem;
use crate::types::Money;

/// Computes the net revenue of one purchased line item.
///
/// Only the line item is needed; product cost is applied separately by the
/// analyzer when it derives profit.
pub trait RevenueStrategy {
    fn calculate(&self, item: &LineItem) -> Money;
}

impl<F> RevenueStrategy for F
where
    F: Fn(&LineItem) -> Money,
{
    fn calculate(&self, item: &LineItem) -> Money {
        self(item)
    }
}

/// `sale_price * quantity * (1 - discount / 100)`, unrounded.
pub fn calculate_simple_revenue(item: &LineItem) -> Money {
    let gross = item.sale_price * Decimal::from(item.quantity);
    gross * (Decimal::ONE - item.discount / dec!(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32, sale_price: Decimal, discount: Decimal) -> LineItem {
        LineItem {
            sku: "SKU_001".into(),
            quantity,
            sale_price,
            discount,
        }
    }

    #[test]
    fn test_no_discount_is_full_price() {
        assert_eq!(calculate_simple_revenue(&item(5, dec!(20), dec!(0))), dec!(100));
    }

    #[test]
    fn test_partial_discount() {
        // 3 * 19.99 = 59.97, less 15% = 50.9745
        let revenue = calculate_simple_revenue(&item(3, dec!(19.99), dec!(15)));
        assert_eq!(revenue, dec!(50.9745));
    }

    #[test]
    fn test_full_discount_is_zero() {
        assert_eq!(calculate_simple_revenue(&item(7, dec!(12.5), dec!(100))), Decimal::ZERO);
    }

    #[test]
    fn test_zero_quantity_is_zero() {
        assert_eq!(calculate_simple_revenue(&item(0, dec!(12.5), dec!(10))), Decimal::ZERO);
    }

    #[test]
    fn test_no_intermediate_rounding() {
        // 1 * 0.333 * 0.9 = 0.2997
        assert_eq!(calculate_simple_revenue(&item(1, dec!(0.333), dec!(10))), dec!(0.2997));
    }

    #[test]
    fn test_closure_is_a_strategy() {
        let flat = |_: &LineItem| dec!(42);
        assert_eq!(flat.calculate(&item(1, dec!(1), dec!(0))), dec!(42));
        let simple: &dyn RevenueStrategy = &calculate_simple_revenue;
        assert_eq!(simple.calculate(&item(2, dec!(10), dec!(50))), dec!(10));
    }
}
