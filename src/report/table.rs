//! Console text rendering of an `InventoryReport`.
//!
//! The same writer produces colored stdout output and the plain text
//! embedded in Markdown exports.

use super::types::{DeadStockSection, FinancialSummary, InventoryReport, ItemLine, NegativeSection, OverstockSection};
use crate::config::DEFAULT_DEAD_STOCK_DAYS;
use crate::console_format::{Column, TableWriter, format_amount, format_count, format_money, get_console_width};
use std::io::{self, Write};

const TITLE_RULE: usize = 70;
const SECTION_RULE: usize = 60;
const SUMMARY_LABEL_WIDTH: usize = 42;

const TITLE_COLOR: term::color::Color = term::color::BRIGHT_CYAN;
const CLEAN_COLOR: term::color::Color = term::color::GREEN;
const WARN_COLOR: term::color::Color = term::color::BRIGHT_YELLOW;

/// Print the report to stdout.
pub fn print_report(report: &InventoryReport, use_colors: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut writer = TableWriter::new(stdout.lock(), use_colors);
    write_report(&mut writer, report)
}

/// Render the report as plain text at the given width.
pub fn format_report_string(report: &InventoryReport, width: usize) -> String {
    let mut writer = TableWriter::with_width(Vec::new(), false, width);
    // Writing into a Vec cannot fail
    let _ = write_report(&mut writer, report);
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}

/// Render the report as plain text at the console width.
pub fn format_report(report: &InventoryReport) -> String {
    format_report_string(report, get_console_width())
}

/// Write header and all four sections.
pub fn write_report<W: Write>(writer: &mut TableWriter<W>, report: &InventoryReport) -> io::Result<()> {
    write_header(writer, report)?;
    write_overstock(writer, &report.overstock)?;
    section_gap(writer)?;
    write_negative(writer, &report.negative)?;
    section_gap(writer)?;
    write_dead_stock(writer, &report.dead_stock)?;
    section_gap(writer)?;
    write_summary(writer, &report.summary)
}

fn section_gap<W: Write>(writer: &mut TableWriter<W>) -> io::Result<()> {
    writer.blank()?;
    writer.blank()
}

fn section_title<W: Write>(writer: &mut TableWriter<W>, title: &str) -> io::Result<()> {
    writer.colored_line(title, TITLE_COLOR)?;
    writer.rule('-', SECTION_RULE)
}

fn write_header<W: Write>(writer: &mut TableWriter<W>, report: &InventoryReport) -> io::Result<()> {
    writer.colored_line(&format!("{} - INVENTORY HEALTH REPORT", report.store_name.to_uppercase()), TITLE_COLOR)?;
    writer.rule('=', TITLE_RULE)?;
    writer.line(&format!("Report Date: {}", report.report_date.format("%B %d, %Y")))?;
    writer.line(&format!("Total Items Analyzed: {}", format_count(report.total_items as i64)))?;
    let source = format!("Data Source: {}", report.origin.describe());
    if report.origin.is_fallback() {
        writer.colored_line(&source, WARN_COLOR)?;
    } else {
        writer.line(&source)?;
    }
    writer.blank()
}

fn item_rows(lines: &[ItemLine], with_days: bool) -> Vec<Vec<String>> {
    lines
        .iter()
        .map(|line| {
            let mut row = vec![line.sku.clone(), line.description.clone(), format_count(line.quantity_on_hand)];
            if with_days {
                row.push(line.days_since_last_sale.map(format_count).unwrap_or_else(|| "-".to_string()));
            }
            row.push(format_money(line.inventory_value_at_cost));
            row
        })
        .collect()
}

fn percentile_label(q: f64) -> String {
    let pct = (q * 1000.0).round() / 10.0;
    if pct.fract() == 0.0 { format!("{}th percentile", pct as i64) } else { format!("{:.1}th percentile", pct) }
}

fn write_overstock<W: Write>(writer: &mut TableWriter<W>, section: &OverstockSection) -> io::Result<()> {
    section_title(writer, "1. REPLACEMENT SKU OVERSTOCK (from discontinued substitution)")?;

    if section.items.is_empty() {
        return writer.colored_line("No severe replacement overstock detected.", CLEAN_COLOR);
    }

    if let Some(threshold) = section.threshold {
        writer.line(&format!(
            "Replacement SKUs stocked above {} units ({})",
            format_amount(threshold).trim_end_matches(".00"),
            percentile_label(section.percentile)
        ))?;
    }
    let columns = [Column::left("SKU"), Column::flexible("Description"), Column::right("QOH"), Column::right("Value at Cost")];
    writer.write_table(&columns, &item_rows(&section.items, false))?;
    writer.blank()?;
    writer.line(&format!(
        "Total cost tied up in excess replacements: {}",
        format_money(section.total_value_at_cost)
    ))
}

fn write_negative<W: Write>(writer: &mut TableWriter<W>, section: &NegativeSection) -> io::Result<()> {
    section_title(writer, "2. NEGATIVE QUANTITY ON HAND")?;

    let Some(worst) = &section.most_negative else {
        return writer.colored_line("No negative QOH found.", CLEAN_COLOR);
    };

    writer.line(&format!("Items with negative QOH: {}", format_count(section.count as i64)))?;
    writer.line(&format!(
        "Most negative: {} (QOH: {})",
        worst.description,
        format_count(worst.quantity_on_hand)
    ))?;
    writer.line(&format!("Total missing units: {}", format_count(section.total_missing_units)))?;
    writer.line(&format!("Estimated unrecorded shrink cost: {}", format_money(section.shrink_cost)))
}

fn dead_stock_window(days: i64) -> String {
    if days == DEFAULT_DEAD_STOCK_DAYS { "18+ months".to_string() } else { format!("more than {} days", days) }
}

fn write_dead_stock<W: Write>(writer: &mut TableWriter<W>, section: &DeadStockSection) -> io::Result<()> {
    section_title(writer, &format!("3. DEAD STOCK (No sales in {})", dead_stock_window(section.threshold_days)))?;

    if section.count == 0 {
        return writer.colored_line("No dead stock detected.", CLEAN_COLOR);
    }

    writer.line(&format!("Dead stock items: {}", format_count(section.count as i64)))?;
    let columns = [
        Column::left("SKU"),
        Column::flexible("Description"),
        Column::right("QOH"),
        Column::right("Days Since Sale"),
        Column::right("Value at Cost"),
    ];
    writer.write_table(&columns, &item_rows(&section.items, true))?;
    if section.items.len() < section.count {
        writer.line(&format!("(showing first {} of {})", section.items.len(), section.count))?;
    }
    writer.blank()?;
    writer.line(&format!("Total cost tied up in dead stock: {}", format_money(section.total_value_at_cost)))?;
    writer.line("Recommendation: Clearance pricing, donation, or write-off.")
}

fn summary_line<W: Write>(writer: &mut TableWriter<W>, label: &str, value: f64) -> io::Result<()> {
    writer.line(&format!("{:<width$}{}", label, format_money(value), width = SUMMARY_LABEL_WIDTH))
}

fn write_summary<W: Write>(writer: &mut TableWriter<W>, summary: &FinancialSummary) -> io::Result<()> {
    section_title(writer, "4. ESTIMATED FINANCIAL IMPACT SUMMARY")?;
    summary_line(writer, "Total inventory value at cost:", summary.total_value_at_cost)?;
    summary_line(writer, "Value locked in dead stock:", summary.dead_stock_value)?;
    summary_line(writer, "Estimated shrink from negative QOH:", summary.negative_shrink)?;
    summary_line(writer, "Potential lost gross profit in overstock:", summary.potential_lost_margin)?;
    writer.blank()?;
    writer.line("These ongoing issues artificially lower COGS and inflate reported profits.")?;
    writer.line("Proactive SKU cleanup, cycle counts, and pricing discipline would")?;
    writer.line("dramatically improve accuracy, cash flow, and long-term viability.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::report::build_report;
    use crate::sample;
    use crate::types::{DataOrigin, LoadedInventory};
    use std::path::PathBuf;

    fn seed_report() -> InventoryReport {
        let inventory = LoadedInventory {
            items: sample::seed_items(),
            origin: DataOrigin::Database { path: PathBuf::from("inventory.db") },
        };
        build_report(&inventory, &test_config())
    }

    #[test]
    fn test_header_lines() {
        let text = format_report_string(&seed_report(), 120);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "PIKE CREEK COMMUNITY HARDWARE - INVENTORY HEALTH REPORT");
        assert_eq!(lines[1], "=".repeat(70));
        assert_eq!(lines[2], "Report Date: December 17, 2025");
        assert_eq!(lines[3], "Total Items Analyzed: 12");
        assert_eq!(lines[4], "Data Source: inventory.db");
    }

    #[test]
    fn test_sections_render_seed_values() {
        let text = format_report_string(&seed_report(), 120);
        assert!(text.contains("Replacement SKUs stocked above 433 units (90th percentile)"));
        assert!(text.contains("Total cost tied up in excess replacements: $14,460.00"));
        assert!(text.contains("Items with negative QOH: 3"));
        assert!(text.contains("Most negative: Lumber 2x4x8 (High Negative) (QOH: -11,033)"));
        assert!(text.contains("Total missing units: -11,283"));
        assert!(text.contains("Estimated unrecorded shrink cost: $52,023.50"));
        assert!(text.contains("3. DEAD STOCK (No sales in 18+ months)"));
        assert!(text.contains("Dead stock items: 2"));
        assert!(text.contains("│ 55555 "));
        assert!(text.contains("Total cost tied up in dead stock: $1,469.85"));
        assert!(text.contains("Total inventory value at cost:            $-8,213.65"));
        assert!(text.contains("Potential lost gross profit in overstock: $36,851.15"));
    }

    #[test]
    fn test_empty_sections_print_messages() {
        let inventory = LoadedInventory {
            items: vec![],
            origin: DataOrigin::Fallback { reason: "unable to open database file".to_string() },
        };
        let report = build_report(&inventory, &test_config());
        let text = format_report_string(&report, 80);

        assert!(text.contains("Total Items Analyzed: 0"));
        assert!(text.contains("Data Source: built-in sample data (database unavailable: unable to open database file)"));
        assert!(text.contains("No severe replacement overstock detected."));
        assert!(text.contains("No negative QOH found."));
        assert!(text.contains("No dead stock detected."));
        assert!(!text.contains('┌'));
    }

    #[test]
    fn test_custom_dead_stock_window_title() {
        let mut config = test_config();
        config.dead_stock_days = 365;
        let inventory = LoadedInventory { items: sample::seed_items(), origin: DataOrigin::Fallback { reason: "t".into() } };
        let text = format_report_string(&build_report(&inventory, &config), 120);
        assert!(text.contains("3. DEAD STOCK (No sales in more than 365 days)"));
    }

    #[test]
    fn test_tables_fit_narrow_console() {
        let text = format_report_string(&seed_report(), 70);
        for line in text.lines().filter(|l| l.starts_with('│') || l.starts_with('┌')) {
            assert!(crate::console_format::display_width(line) <= 70, "too wide: {}", line);
        }
    }

    #[test]
    fn test_percentile_label() {
        assert_eq!(percentile_label(0.9), "90th percentile");
        assert_eq!(percentile_label(0.95), "95th percentile");
        assert_eq!(percentile_label(0.875), "87.5th percentile");
    }
}
