//! Report export functions for JSON and Markdown formats.
//!
//! This module handles writing a finished report to files for storage and
//! further analysis.

use super::table::format_report;
use super::types::InventoryReport;
use crate::console_format::{format_count, format_money};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export the report as JSON.
///
/// The document is the serialized `InventoryReport` plus the tool version.
///
/// # Arguments
/// * `report` - The finished report
/// * `output_path` - Path to write the JSON file
pub fn export_json_report(report: &InventoryReport, output_path: &Path) -> std::io::Result<()> {
    use serde_json::json;

    let document = json!({
        "generator": concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")),
        "report": report,
    });

    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, &document)?;

    Ok(())
}

/// Export the report as Markdown with the console text in a code block.
///
/// Creates a Markdown report that includes:
/// - Header with store, date and data source
/// - Financial summary as a list
/// - Full console report in a code block
///
/// # Arguments
/// * `report` - The finished report
/// * `output_path` - Path to write the Markdown file
pub fn export_markdown_report(report: &InventoryReport, output_path: &Path) -> std::io::Result<()> {
    let mut file = File::create(output_path)?;

    writeln!(file, "# Inventory Health Report\n")?;
    writeln!(file, "**Store**: {}", report.store_name)?;
    writeln!(file, "**Report Date**: {}", report.report_date.format("%B %d, %Y"))?;
    writeln!(file, "**Items Analyzed**: {}", format_count(report.total_items as i64))?;
    writeln!(file, "**Data Source**: {}\n", report.origin.describe())?;

    if report.origin.is_fallback() {
        writeln!(file, "> **Warning**: the database could not be loaded; figures below use built-in sample data.\n")?;
    }

    writeln!(file, "## Summary\n")?;
    writeln!(file, "- Replacement overstock SKUs: {}", report.overstock.items.len())?;
    writeln!(file, "- Negative QOH items: {}", report.negative.count)?;
    writeln!(file, "- Dead stock items: {}", report.dead_stock.count)?;
    writeln!(file, "- Total inventory value at cost: {}", format_money(report.summary.total_value_at_cost))?;
    writeln!(file, "- Value locked in dead stock: {}", format_money(report.summary.dead_stock_value))?;
    writeln!(file, "- Estimated shrink from negative QOH: {}", format_money(report.summary.negative_shrink))?;
    writeln!(
        file,
        "- Potential lost gross profit in overstock: {}\n",
        format_money(report.summary.potential_lost_margin)
    )?;

    writeln!(file, "## Report\n")?;
    writeln!(file, "```")?;
    write!(file, "{}", format_report(report))?;
    writeln!(file, "```")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::report::build_report;
    use crate::sample;
    use crate::types::{DataOrigin, LoadedInventory};

    fn fallback_report() -> InventoryReport {
        let inventory = LoadedInventory {
            items: sample::seed_items(),
            origin: DataOrigin::Fallback { reason: "no such table: items".to_string() },
        };
        build_report(&inventory, &test_config())
    }

    #[test]
    fn test_json_export_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        export_json_report(&fallback_report(), &path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let report = &value["report"];
        assert_eq!(report["total_items"], 12);
        assert_eq!(report["report_date"], "2025-12-17");
        assert_eq!(report["origin"]["kind"], "fallback");
        assert_eq!(report["negative"]["count"], 3);
        assert_eq!(report["negative"]["most_negative"]["sku"], "11111");
        assert_eq!(report["dead_stock"]["items"][1]["days_since_last_sale"], 1347);
        assert!(report["overstock"]["items"][0].get("days_since_last_sale").is_none());
        assert!(value["generator"].as_str().unwrap().starts_with("inventory-health "));
    }

    #[test]
    fn test_markdown_export_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        export_markdown_report(&fallback_report(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Inventory Health Report\n"));
        assert!(text.contains("**Report Date**: December 17, 2025"));
        assert!(text.contains("> **Warning**"));
        assert!(text.contains("- Estimated shrink from negative QOH: $52,023.50"));
        assert!(text.contains("```\nPIKE CREEK COMMUNITY HARDWARE - INVENTORY HEALTH REPORT"));
        assert!(text.trim_end().ends_with("```"));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");
        assert!(export_json_report(&fallback_report(), &path).is_err());
    }
}
