pub mod analyzer;
pub mod bonus;
pub mod model;
pub mod revenue;

pub use analyzer::{
    analyze_sales_data, run_sales_analysis, AnalysisOptions, SalesAnalysisOutput, SalesSummary,
    TOP_PRODUCTS_LIMIT,
};
pub use bonus::{bonus_for_profit, bonus_percent, calculate_bonus_by_profit, BonusStrategy};
pub use model::{
    LineItem, Product, PurchaseRecord, SalesData, Seller, SellerReport, SellerStat, TopProduct,
};
pub use revenue::{calculate_simple_revenue, RevenueStrategy};
