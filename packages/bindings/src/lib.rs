use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use sales_report_core::analysis::{self, AnalysisOptions, LineItem, SalesData};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_sales_data(input_json: &str) -> NapiResult<SalesData> {
    SalesData::from_json_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sales report
// ---------------------------------------------------------------------------

/// Ranked per-seller report entries, built with the standard strategies.
#[napi]
pub fn analyze_sales_data(input_json: String) -> NapiResult<String> {
    let data = parse_sales_data(&input_json)?;
    let report = analysis::analyze_sales_data(&data, &AnalysisOptions::standard())
        .map_err(to_napi_error)?;
    serde_json::to_string(&report).map_err(to_napi_error)
}

/// Report entries plus summary, warnings and metadata.
#[napi]
pub fn run_sales_analysis(input_json: String) -> NapiResult<String> {
    let data = parse_sales_data(&input_json)?;
    let output = analysis::run_sales_analysis(&data, &AnalysisOptions::standard())
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_simple_revenue(item_json: String) -> NapiResult<String> {
    let item: LineItem = serde_json::from_str(&item_json).map_err(to_napi_error)?;
    Ok(analysis::calculate_simple_revenue(&item).to_string())
}

/// `profit` is a decimal string to avoid f64 rounding on the JS side.
#[napi]
pub fn calculate_bonus_by_profit(index: u32, total: u32, profit: String) -> NapiResult<String> {
    let profit: Decimal = profit.parse().map_err(to_napi_error)?;
    let bonus = analysis::bonus_for_profit(index as usize, total as usize, profit);
    Ok(bonus.to_string())
}
