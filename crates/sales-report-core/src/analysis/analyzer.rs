use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::Instant;

use super::bonus::{calculate_bonus_by_profit, BonusStrategy};
use super::model::{Product, SalesData, SellerReport, SellerStat};
use super::revenue::{calculate_simple_revenue, RevenueStrategy};
use crate::error::SalesReportError;
use crate::types::{round_money, with_metadata, ComputationOutput, Money};
use crate::SalesReportResult;

/// Maximum number of entries in a seller's top products list.
pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// Receipts whose stated total differs from the line revenue by more than
/// this amount are reported as divergent.
const TOTAL_AMOUNT_TOLERANCE: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Strategies injected into an analysis run. Both are required.
#[derive(Default)]
pub struct AnalysisOptions {
    pub calculate_revenue: Option<Box<dyn RevenueStrategy>>,
    pub calculate_bonus: Option<Box<dyn BonusStrategy>>,
}

impl AnalysisOptions {
    pub fn new<R, B>(revenue: R, bonus: B) -> Self
    where
        R: RevenueStrategy + 'static,
        B: BonusStrategy + 'static,
    {
        Self {
            calculate_revenue: Some(Box::new(revenue)),
            calculate_bonus: Some(Box::new(bonus)),
        }
    }

    /// Simple discounted revenue and the profit-rank bonus schedule.
    pub fn standard() -> Self {
        Self::new(calculate_simple_revenue, calculate_bonus_by_profit)
    }

    pub fn with_revenue<R: RevenueStrategy + 'static>(mut self, revenue: R) -> Self {
        self.calculate_revenue = Some(Box::new(revenue));
        self
    }

    pub fn with_bonus<B: BonusStrategy + 'static>(mut self, bonus: B) -> Self {
        self.calculate_bonus = Some(Box::new(bonus));
        self
    }
}

impl fmt::Debug for AnalysisOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisOptions")
            .field("calculate_revenue", &self.calculate_revenue.is_some())
            .field("calculate_bonus", &self.calculate_bonus.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Totals across all sellers, summed from the rounded report figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesSummary {
    pub seller_count: usize,
    pub receipt_count: usize,
    pub total_revenue: Money,
    pub total_profit: Money,
    pub total_bonus: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesAnalysisOutput {
    pub sellers: Vec<SellerReport>,
    pub summary: SalesSummary,
}

/// A receipt whose `total_amount` does not match its line revenue.
#[derive(Debug, Clone)]
struct ReceiptDivergence {
    receipt: String,
    total_amount: Money,
    line_revenue: Money,
}

struct Aggregation {
    stats: Vec<SellerStat>,
    divergences: Vec<ReceiptDivergence>,
}

impl From<&SellerStat> for SellerReport {
    fn from(stat: &SellerStat) -> Self {
        SellerReport {
            seller_id: stat.id.clone(),
            name: stat.name.clone(),
            revenue: round_money(stat.revenue),
            profit: round_money(stat.profit),
            sales_count: stat.sales_count,
            top_products: stat.top_products.clone(),
            bonus: round_money(stat.bonus),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_data(data: &SalesData) -> SalesReportResult<()> {
    let collections = [
        ("sellers", data.sellers.is_empty()),
        ("products", data.products.is_empty()),
        ("purchase_records", data.purchase_records.is_empty()),
    ];
    for (field, empty) in collections {
        if empty {
            return Err(SalesReportError::InvalidInputData {
                field: field.into(),
                reason: "At least one entry is required".into(),
            });
        }
    }

    let mut seller_ids = HashSet::new();
    for seller in &data.sellers {
        if !seller_ids.insert(seller.id.as_str()) {
            return Err(SalesReportError::InvalidInputData {
                field: "sellers".into(),
                reason: format!("Duplicate seller id '{}'", seller.id),
            });
        }
    }

    let mut skus = HashSet::new();
    for product in &data.products {
        if !skus.insert(product.sku.as_str()) {
            return Err(SalesReportError::InvalidInputData {
                field: "products".into(),
                reason: format!("Duplicate sku '{}'", product.sku),
            });
        }
    }

    for (r, record) in data.purchase_records.iter().enumerate() {
        for (i, item) in record.items.iter().enumerate() {
            if item.discount < Decimal::ZERO || item.discount > dec!(100) {
                return Err(SalesReportError::InvalidInputData {
                    field: format!("purchase_records[{r}].items[{i}].discount"),
                    reason: format!("Discount must be between 0 and 100, got {}", item.discount),
                });
            }
        }
    }

    Ok(())
}

fn resolve_strategies(
    options: &AnalysisOptions,
) -> SalesReportResult<(&dyn RevenueStrategy, &dyn BonusStrategy)> {
    match (&options.calculate_revenue, &options.calculate_bonus) {
        (Some(revenue), Some(bonus)) => Ok((&**revenue, &**bonus)),
        (revenue, bonus) => {
            let mut missing = Vec::new();
            if revenue.is_none() {
                missing.push("calculate_revenue");
            }
            if bonus.is_none() {
                missing.push("calculate_bonus");
            }
            Err(SalesReportError::MissingStrategies(missing.join(", ")))
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

fn aggregate(data: &SalesData, options: &AnalysisOptions) -> SalesReportResult<Aggregation> {
    validate_data(data)?;
    let (revenue_strategy, bonus_strategy) = resolve_strategies(options)?;

    tracing::debug!(
        sellers = data.sellers.len(),
        products = data.products.len(),
        purchase_records = data.purchase_records.len(),
        "starting sales analysis"
    );

    let mut stats: Vec<SellerStat> = data.sellers.iter().map(SellerStat::new).collect();
    let seller_index: HashMap<&str, usize> = data
        .sellers
        .iter()
        .enumerate()
        .map(|(slot, seller)| (seller.id.as_str(), slot))
        .collect();
    let product_index: HashMap<&str, &Product> = data
        .products
        .iter()
        .map(|product| (product.sku.as_str(), product))
        .collect();

    let mut divergences = Vec::new();

    for (position, record) in data.purchase_records.iter().enumerate() {
        let overflow = |what: &str| SalesReportError::ArithmeticOverflow {
            context: format!("{} on receipt {}", what, record.label(position)),
        };

        let slot = *seller_index
            .get(record.seller_id.as_str())
            .ok_or_else(|| SalesReportError::UnknownReference {
                entity: "seller".into(),
                id: record.seller_id.clone(),
            })?;
        let stat = &mut stats[slot];
        stat.sales_count += 1;
        stat.revenue = stat
            .revenue
            .checked_add(record.total_amount)
            .ok_or_else(|| overflow("seller revenue"))?;

        let mut line_revenue = Decimal::ZERO;
        for item in &record.items {
            let product = product_index.get(item.sku.as_str()).ok_or_else(|| {
                SalesReportError::UnknownReference {
                    entity: "product".into(),
                    id: item.sku.clone(),
                }
            })?;
            let quantity = Decimal::from(item.quantity);
            let cost = product
                .purchase_price
                .checked_mul(quantity)
                .ok_or_else(|| overflow("line cost"))?;
            // Gross must fit before the strategy sees the item.
            item.sale_price
                .checked_mul(quantity)
                .ok_or_else(|| overflow("line revenue"))?;
            let revenue = revenue_strategy.calculate(item);
            let profit = revenue
                .checked_sub(cost)
                .ok_or_else(|| overflow("line profit"))?;
            stat.profit = stat
                .profit
                .checked_add(profit)
                .ok_or_else(|| overflow("seller profit"))?;
            stat.record_sold(&item.sku, item.quantity);
            line_revenue = line_revenue
                .checked_add(revenue)
                .ok_or_else(|| overflow("receipt line revenue"))?;
        }

        let diverges = record
            .total_amount
            .checked_sub(line_revenue)
            .map_or(true, |gap| gap.abs() > TOTAL_AMOUNT_TOLERANCE);
        if diverges {
            let receipt = record.label(position);
            tracing::warn!(
                receipt = %receipt,
                total_amount = %record.total_amount,
                line_revenue = %line_revenue,
                "receipt total differs from line revenue"
            );
            divergences.push(ReceiptDivergence {
                receipt,
                total_amount: record.total_amount,
                line_revenue,
            });
        }
    }

    // Stable: equal profit keeps the input order of sellers.
    stats.sort_by(|a, b| b.profit.cmp(&a.profit));

    let total = stats.len();
    for (index, stat) in stats.iter_mut().enumerate() {
        stat.bonus = bonus_strategy.calculate(index, total, stat);

        let mut ranked = stat.products_sold.clone();
        ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        ranked.truncate(TOP_PRODUCTS_LIMIT);
        stat.top_products = ranked;
    }

    tracing::debug!(sellers = total, divergent_receipts = divergences.len(), "sales analysis complete");

    Ok(Aggregation { stats, divergences })
}

fn checked_total(
    sellers: &[SellerReport],
    context: &str,
    field: impl Fn(&SellerReport) -> Money,
) -> SalesReportResult<Money> {
    sellers
        .iter()
        .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(field(s)))
        .ok_or_else(|| SalesReportError::ArithmeticOverflow {
            context: context.into(),
        })
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Build the per-seller sales report.
///
/// Entries come out in profit-descending order, with revenue, profit and
/// bonus rounded to cents. Fails with `InvalidInputData` or
/// `MissingStrategies` before any aggregation, with `UnknownReference`
/// if a receipt names a seller or sku that is not in the input, and with
/// `ArithmeticOverflow` if a figure leaves the 96-bit decimal range.
pub fn analyze_sales_data(
    data: &SalesData,
    options: &AnalysisOptions,
) -> SalesReportResult<Vec<SellerReport>> {
    let aggregation = aggregate(data, options)?;
    Ok(aggregation.stats.iter().map(SellerReport::from).collect())
}

/// Run [`analyze_sales_data`] and wrap the report with totals, warnings and
/// computation metadata.
pub fn run_sales_analysis(
    data: &SalesData,
    options: &AnalysisOptions,
) -> SalesReportResult<ComputationOutput<SalesAnalysisOutput>> {
    let start = Instant::now();
    let aggregation = aggregate(data, options)?;

    let mut warnings: Vec<String> = aggregation
        .divergences
        .iter()
        .map(|d| {
            format!(
                "Receipt {}: total_amount ({}) differs from line item revenue ({})",
                d.receipt,
                d.total_amount,
                round_money(d.line_revenue)
            )
        })
        .collect();
    for stat in aggregation.stats.iter().filter(|s| s.sales_count == 0) {
        warnings.push(format!("Seller {} has no purchase records", stat.id));
    }

    let sellers: Vec<SellerReport> = aggregation.stats.iter().map(SellerReport::from).collect();
    let summary = SalesSummary {
        seller_count: sellers.len(),
        receipt_count: data.purchase_records.len(),
        total_revenue: checked_total(&sellers, "summary total_revenue", |s| s.revenue)?,
        total_profit: checked_total(&sellers, "summary total_profit", |s| s.profit)?,
        total_bonus: checked_total(&sellers, "summary total_bonus", |s| s.bonus)?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Per-Seller Sales Report — Revenue, Profit, Top Products and Profit-Rank Bonus",
        &serde_json::json!({
            "sellers": data.sellers.len(),
            "products": data.products.len(),
            "purchase_records": data.purchase_records.len(),
            "rounding": "2dp, half away from zero",
            "top_products_limit": TOP_PRODUCTS_LIMIT,
            "profit_tie_break": "input order of sellers",
        }),
        warnings,
        elapsed,
        SalesAnalysisOutput { sellers, summary },
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
