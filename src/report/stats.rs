//! Financial summary and report assembly.
//!
//! The summary re-aggregates values the rules already derived; it reuses the
//! negative and dead stock sections rather than filtering again.

use super::rules::{dead_stock, negative_on_hand, replacement_overstock};
use super::types::{DeadStockSection, FinancialSummary, InventoryReport, NegativeSection};
use crate::types::{InventoryItem, LoadedInventory, ReportConfig};
use log::debug;

/// Totals over all items plus the dead stock and shrink subsets.
pub fn summarize(items: &[InventoryItem], negative: &NegativeSection, dead: &DeadStockSection) -> FinancialSummary {
    FinancialSummary {
        total_value_at_cost: items.iter().map(|i| i.inventory_value_at_cost()).sum(),
        dead_stock_value: dead.total_value_at_cost,
        negative_shrink: negative.shrink_cost,
        potential_lost_margin: items.iter().map(|i| i.potential_lost_margin()).sum(),
    }
}

/// Run every rule over `inventory` and assemble the report.
///
/// Time only enters through `config.reference_date`.
pub fn build_report(inventory: &LoadedInventory, config: &ReportConfig) -> InventoryReport {
    let items = &inventory.items;
    debug!("Building report over {} items as of {}", items.len(), config.reference_date);

    let overstock = replacement_overstock(items, config);
    let negative = negative_on_hand(items);
    let dead_stock = dead_stock(items, config);
    let summary = summarize(items, &negative, &dead_stock);

    debug!(
        "Overstock: {}, negative: {}, dead stock: {}",
        overstock.items.len(),
        negative.count,
        dead_stock.count
    );

    InventoryReport {
        store_name: config.store_name.clone(),
        report_date: config.reference_date,
        total_items: items.len(),
        origin: inventory.origin.clone(),
        overstock,
        negative,
        dead_stock,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::sample;
    use crate::types::DataOrigin;
    use std::path::PathBuf;

    fn seeded() -> LoadedInventory {
        LoadedInventory {
            items: sample::seed_items(),
            origin: DataOrigin::Database { path: PathBuf::from("inventory.db") },
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_seed_report_sections() {
        let report = build_report(&seeded(), &test_config());

        assert_eq!(report.total_items, 12);
        assert_eq!(report.store_name, "Pike Creek Community Hardware");

        let skus: Vec<&str> = report.overstock.items.iter().map(|l| l.sku.as_str()).collect();
        assert_eq!(skus, vec!["12345-REPL", "67890-REPL"]);
        assert!(close(report.overstock.total_value_at_cost, 14460.0));
        assert!(close(report.overstock.threshold.unwrap(), 433.0));

        assert_eq!(report.negative.count, 3);
        assert_eq!(report.negative.total_missing_units, -11283);
        assert_eq!(report.negative.most_negative.as_ref().unwrap().sku, "11111");
        assert!(close(report.negative.shrink_cost, 52023.5));

        let dead: Vec<(&str, Option<i64>)> =
            report.dead_stock.items.iter().map(|l| (l.sku.as_str(), l.days_since_last_sale)).collect();
        assert_eq!(dead, vec![("98765", Some(712)), ("55555", Some(1347))]);
    }

    #[test]
    fn test_seed_financial_summary() {
        let report = build_report(&seeded(), &test_config());
        let s = &report.summary;
        assert!(close(s.total_value_at_cost, -8213.65));
        assert!(close(s.dead_stock_value, 1469.85));
        assert!(close(s.negative_shrink, 52023.5));
        assert!(close(s.potential_lost_margin, 36851.15));
    }

    #[test]
    fn test_summary_zero_when_no_anomalies() {
        let mut items = sample::seed_items();
        items.retain(|i| i.sku == "54321");
        let inventory = LoadedInventory { items, origin: DataOrigin::Fallback { reason: "test".to_string() } };
        let report = build_report(&inventory, &test_config());

        assert_eq!(report.summary.dead_stock_value, 0.0);
        assert_eq!(report.summary.negative_shrink, 0.0);
        assert!(report.negative.most_negative.is_none());
        assert!(report.origin.is_fallback());
    }

    #[test]
    fn test_totals_are_order_independent() {
        let config = test_config();
        let forward = build_report(&seeded(), &config);

        let mut reversed = seeded();
        reversed.items.reverse();
        let backward = build_report(&reversed, &config);

        let mut rotated = seeded();
        rotated.items.rotate_left(5);
        let rotated = build_report(&rotated, &config);

        for other in [&backward, &rotated] {
            assert_eq!(forward.negative.total_missing_units, other.negative.total_missing_units);
            assert!(close(forward.negative.shrink_cost, other.negative.shrink_cost));
            assert!(close(forward.dead_stock.total_value_at_cost, other.dead_stock.total_value_at_cost));
            assert!(close(forward.summary.total_value_at_cost, other.summary.total_value_at_cost));
            assert!(close(forward.overstock.total_value_at_cost, other.overstock.total_value_at_cost));
        }
    }

    #[test]
    fn test_fallback_report_has_known_anomalies() {
        let inventory =
            LoadedInventory { items: sample::fallback_items(), origin: DataOrigin::Fallback { reason: "x".to_string() } };
        let report = build_report(&inventory, &test_config());

        assert_eq!(report.total_items, 47);
        assert_eq!(report.negative.count, 5);
        assert_eq!(report.negative.most_negative.as_ref().unwrap().sku, "LUM-7001");
        assert_eq!(report.negative.total_missing_units, -12128);

        let dead: Vec<&str> = report.dead_stock.items.iter().map(|l| l.sku.as_str()).collect();
        assert_eq!(dead, vec!["DEAD-10001", "DEAD-10002", "DEAD-10003", "DEAD-10004"]);
        assert!(close(report.dead_stock.total_value_at_cost, 150.0 * 4.2 + 80.0 * 18.5 + 55.0 * 22.0 + 30.0 * 25.0));
    }
}
