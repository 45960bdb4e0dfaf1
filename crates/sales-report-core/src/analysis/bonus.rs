use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::model::SellerStat;
use crate::types::{Money, Percent};

/// Computes a seller's bonus from its rank in the profit-descending order.
///
/// `index` is the zero-based rank and `total` the number of ranked sellers.
pub trait BonusStrategy {
    fn calculate(&self, index: usize, total: usize, seller: &SellerStat) -> Money;
}

impl<F> BonusStrategy for F
where
    F: Fn(usize, usize, &SellerStat) -> Money,
{
    fn calculate(&self, index: usize, total: usize, seller: &SellerStat) -> Money {
        self(index, total, seller)
    }
}

/// Bonus percentage for a rank. Rules are checked in order: top seller,
/// second and third place, last place, everyone else. A single seller is
/// therefore rank 0, not last.
pub fn bonus_percent(index: usize, total: usize) -> Percent {
    if index == 0 {
        dec!(15)
    } else if index == 1 || index == 2 {
        dec!(10)
    } else if index + 1 == total {
        Decimal::ZERO
    } else {
        dec!(5)
    }
}

/// Bonus amount for a profit figure at a given rank. The rate is applied as
/// a fraction so the product never exceeds the profit in magnitude.
pub fn bonus_for_profit(index: usize, total: usize, profit: Money) -> Money {
    profit * (bonus_percent(index, total) / dec!(100))
}

/// Default bonus strategy: 15% / 10% / 10% / 5%... / 0 for the last place.
pub fn calculate_bonus_by_profit(index: usize, total: usize, seller: &SellerStat) -> Money {
    bonus_for_profit(index, total, seller.profit)
}
