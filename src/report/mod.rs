//! Report generation module - analyses and rendering.
//!
//! This module handles:
//! - The three anomaly rules (replacement overstock, negative QOH, dead stock)
//! - The financial summary and report assembly
//! - Console text rendering
//! - Export to JSON and Markdown formats
//!
//! # Module Organization
//!
//! - `types` - Structured report model (`InventoryReport` and its sections)
//! - `rules` - Pure filter/aggregate passes over the item list
//! - `stats` - Financial summary and `build_report`
//! - `table` - Console text output
//! - `export` - JSON and Markdown export

mod export;
mod rules;
mod stats;
mod table;
mod types;

// Re-export types
pub use types::InventoryReport;

// Re-export report assembly
pub use stats::build_report;

// Re-export export functions
pub use export::{export_json_report, export_markdown_report};

// Re-export table functions
pub use table::print_report;
