use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::SalesReportError;
use crate::types::{Money, Percent};
use crate::SalesReportResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// A seller who receives credit for purchase records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seller {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Seller {
    /// Display name: first and last name joined by one space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Catalog card for a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub sku: String,
    /// Cost price per unit
    pub purchase_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// List price; informational only, receipts carry the actual sale price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Money>,
}

/// One product line on a receipt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub sku: String,
    pub quantity: u32,
    /// Unit sale price before discount
    pub sale_price: Money,
    /// Discount on a 0-100 scale
    #[serde(default)]
    pub discount: Percent,
}

/// A single receipt issued by a seller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseRecord {
    pub seller_id: String,
    pub total_amount: Money,
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_discount: Option<Money>,
}

impl PurchaseRecord {
    /// Label used in diagnostics: the receipt id when present, else the
    /// position in the input.
    pub fn label(&self, position: usize) -> String {
        match &self.receipt_id {
            Some(id) => id.clone(),
            None => format!("#{}", position),
        }
    }
}

/// The three input collections of a sales analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SalesData {
    #[serde(default)]
    pub sellers: Vec<Seller>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub purchase_records: Vec<PurchaseRecord>,
}

impl SalesData {
    /// Decode a JSON document, checking its structural shape first.
    ///
    /// The document must be an object whose `sellers`, `products` and
    /// `purchase_records` keys each hold an array. Shape violations are
    /// reported as `InvalidInputData` naming the offending field; errors
    /// inside individual elements surface as `SerializationError`.
    pub fn from_value(value: &Value) -> SalesReportResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| SalesReportError::InvalidInputData {
                field: "data".into(),
                reason: "Sales data must be a JSON object".into(),
            })?;

        for field in ["sellers", "products", "purchase_records"] {
            match obj.get(field) {
                Some(Value::Array(_)) => {}
                Some(_) => {
                    return Err(SalesReportError::InvalidInputData {
                        field: field.into(),
                        reason: "Must be an array".into(),
                    })
                }
                None => {
                    return Err(SalesReportError::InvalidInputData {
                        field: field.into(),
                        reason: "Field is missing".into(),
                    })
                }
            }
        }

        Ok(serde_json::from_value(value.clone())?)
    }

    /// Decode a JSON string; see [`SalesData::from_value`].
    pub fn from_json_str(json: &str) -> SalesReportResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }
}

// ---------------------------------------------------------------------------
// Derived types
// ---------------------------------------------------------------------------

/// Cumulative quantity of one sku sold by a seller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopProduct {
    pub sku: String,
    pub quantity: u64,
}

/// Per-seller accumulator, built fresh for every analysis run.
///
/// Revenue and profit are kept unrounded; rounding happens only when the
/// report entry is emitted.
#[derive(Debug, Clone)]
pub struct SellerStat {
    pub id: String,
    pub name: String,
    pub revenue: Money,
    pub profit: Money,
    pub sales_count: u32,
    /// Sold quantity per sku, in order of first sale
    pub products_sold: Vec<TopProduct>,
    pub bonus: Money,
    pub top_products: Vec<TopProduct>,
    sku_slots: HashMap<String, usize>,
}

impl SellerStat {
    pub fn new(seller: &Seller) -> Self {
        Self {
            id: seller.id.clone(),
            name: seller.display_name(),
            revenue: Decimal::ZERO,
            profit: Decimal::ZERO,
            sales_count: 0,
            products_sold: Vec::new(),
            bonus: Decimal::ZERO,
            top_products: Vec::new(),
            sku_slots: HashMap::new(),
        }
    }

    /// Add `quantity` units of `sku`, creating the tally at zero if absent.
    pub fn record_sold(&mut self, sku: &str, quantity: u32) {
        match self.sku_slots.get(sku).copied() {
            Some(slot) => self.products_sold[slot].quantity += u64::from(quantity),
            None => {
                self.sku_slots.insert(sku.to_string(), self.products_sold.len());
                self.products_sold.push(TopProduct {
                    sku: sku.to_string(),
                    quantity: u64::from(quantity),
                });
            }
        }
    }
}

/// One entry of the final report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SellerReport {
    pub seller_id: String,
    pub name: String,
    pub revenue: Money,
    pub profit: Money,
    pub sales_count: u32,
    pub top_products: Vec<TopProduct>,
    pub bonus: Money,
}
