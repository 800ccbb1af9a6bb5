//! Core data structures for inventory rows and report runs
//!
//! This module defines the item record loaded from the store, the values
//! derived from it per report run, and the resolved configuration that
//! drives a run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One row of the `items` table (one SKU)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub sku: String,
    pub description: String,
    /// May be negative: unreconciled shrink or oversell
    pub quantity_on_hand: i64,
    pub cost: f64,
    pub retail_price: f64,
    /// None = never sold
    pub last_sold_date: Option<NaiveDate>,
    /// None = never received
    pub last_received_date: Option<NaiveDate>,
    /// Open set, observed values are "Active" and "Discontinued"
    pub status: String,
}

impl InventoryItem {
    /// Days between the last sale and `reference`; None when never sold.
    pub fn days_since_last_sale(&self, reference: NaiveDate) -> Option<i64> {
        self.last_sold_date.map(|sold| (reference - sold).num_days())
    }

    /// `quantity_on_hand * cost`, negative for negative stock
    pub fn inventory_value_at_cost(&self) -> f64 {
        self.quantity_on_hand as f64 * self.cost
    }

    /// Gross margin sitting on the shelf. Zero unless stock is positive.
    pub fn potential_lost_margin(&self) -> f64 {
        if self.quantity_on_hand > 0 {
            self.quantity_on_hand as f64 * (self.retail_price - self.cost)
        } else {
            0.0
        }
    }

    /// Case-insensitive substring match of the description against any keyword
    pub fn description_matches_any(&self, keywords: &[String]) -> bool {
        let description = self.description.to_lowercase();
        keywords.iter().any(|k| description.contains(&k.to_lowercase()))
    }
}

/// Where the items of a report run came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataOrigin {
    /// Loaded from the SQLite file at `path`
    Database { path: PathBuf },
    /// Database load failed; built-in sample data substituted
    Fallback { reason: String },
}

impl DataOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataOrigin::Fallback { .. })
    }

    /// One-line description for report headers
    pub fn describe(&self) -> String {
        match self {
            DataOrigin::Database { path } => path.display().to_string(),
            DataOrigin::Fallback { reason } => format!("built-in sample data (database unavailable: {})", reason),
        }
    }
}

/// Items for one report run, tagged with their origin
#[derive(Debug, Clone)]
pub struct LoadedInventory {
    pub items: Vec<InventoryItem>,
    pub origin: DataOrigin,
}

/// What to do with the database before reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Leave the database alone
    Skip,
    /// Recreate the sample rows, then report
    SeedThenReport,
    /// Recreate the sample rows and exit
    SeedOnly,
}

/// Fully resolved settings for a report run
///
/// Built once from CLI arguments by `config::build_report_config` and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub db_path: PathBuf,
    pub store_name: String,
    /// "Today" for the analyses; never read from the wall clock after config
    pub reference_date: NaiveDate,
    /// Quantile in [0, 1] that replacement stock must exceed
    pub overstock_percentile: f64,
    pub replacement_keywords: Vec<String>,
    /// Strictly more days than this without a sale counts as dead
    pub dead_stock_days: i64,
    /// Rows listed in the dead stock table (0 = all)
    pub dead_stock_rows: usize,
    pub seed: SeedMode,
    pub allow_fallback: bool,
    pub use_colors: bool,
    pub json_path: Option<PathBuf>,
    pub markdown_path: Option<PathBuf>,
}

#[cfg(test)]
#[path = "data_structures_test.rs"]
mod data_structures_test;
