//! Report type definitions.
//!
//! `InventoryReport` is the structured result of a run. Console text,
//! Markdown and JSON are all rendered from it.

use crate::types::{DataOrigin, InventoryItem};
use chrono::NaiveDate;
use serde::Serialize;

/// One listed item in a report section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemLine {
    pub sku: String,
    pub description: String,
    pub quantity_on_hand: i64,
    /// Only filled for dead stock lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_since_last_sale: Option<i64>,
    pub inventory_value_at_cost: f64,
}

impl ItemLine {
    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            sku: item.sku.clone(),
            description: item.description.clone(),
            quantity_on_hand: item.quantity_on_hand,
            days_since_last_sale: None,
            inventory_value_at_cost: item.inventory_value_at_cost(),
        }
    }

    pub fn with_days(mut self, days: Option<i64>) -> Self {
        self.days_since_last_sale = days;
        self
    }
}

/// Section 1: replacement SKUs stocked above the quantity percentile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverstockSection {
    /// Quantile used, e.g. 0.9
    pub percentile: f64,
    /// Quantity that must be exceeded; None when there are no items
    pub threshold: Option<f64>,
    pub items: Vec<ItemLine>,
    pub total_value_at_cost: f64,
}

/// Section 2: negative quantity on hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NegativeSection {
    pub count: usize,
    /// Lowest QOH; first encountered wins ties
    pub most_negative: Option<ItemLine>,
    /// Sum of the negative quantities (itself negative)
    pub total_missing_units: i64,
    /// Absolute value of the summed value at cost
    pub shrink_cost: f64,
}

/// Section 3: positive stock with no sale inside the lookback window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeadStockSection {
    pub threshold_days: i64,
    /// Every dead item, even those not listed
    pub count: usize,
    /// First rows in load order, capped by the configured row limit
    pub items: Vec<ItemLine>,
    /// Over every dead item, not just the listed ones
    pub total_value_at_cost: f64,
}

/// Section 4: financial impact totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub total_value_at_cost: f64,
    pub dead_stock_value: f64,
    pub negative_shrink: f64,
    pub potential_lost_margin: f64,
}

/// Complete result of one report run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryReport {
    pub store_name: String,
    pub report_date: NaiveDate,
    pub total_items: usize,
    pub origin: DataOrigin,
    pub overstock: OverstockSection,
    pub negative: NegativeSection,
    pub dead_stock: DeadStockSection,
    pub summary: FinancialSummary,
}
