//! The three anomaly rules.
//!
//! Each rule is a pure pass over the full item slice; none depends on
//! another's output. Results keep load order.

use super::types::{DeadStockSection, ItemLine, NegativeSection, OverstockSection};
use crate::types::{InventoryItem, ReportConfig};
use log::debug;

/// Quantile of `values` by linear interpolation between closest ranks.
///
/// `q` is clamped to [0, 1]. Returns None for an empty slice.
pub fn percentile(values: &[i64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let q = q.clamp(0.0, 1.0);
    let pos = (sorted.len() - 1) as f64 * q;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;

    let low = sorted[lower] as f64;
    let high = sorted[upper] as f64;
    Some(low + (high - low) * frac)
}

/// Replacement SKUs whose quantity exceeds the configured percentile.
pub fn replacement_overstock(items: &[InventoryItem], config: &ReportConfig) -> OverstockSection {
    let quantities: Vec<i64> = items.iter().map(|i| i.quantity_on_hand).collect();
    let threshold = percentile(&quantities, config.overstock_percentile);
    debug!("Overstock threshold at q={}: {:?}", config.overstock_percentile, threshold);

    let selected: Vec<&InventoryItem> = match threshold {
        Some(limit) => items
            .iter()
            .filter(|i| i.description_matches_any(&config.replacement_keywords))
            .filter(|i| i.quantity_on_hand as f64 > limit)
            .collect(),
        None => Vec::new(),
    };

    OverstockSection {
        percentile: config.overstock_percentile,
        threshold,
        total_value_at_cost: selected.iter().map(|i| i.inventory_value_at_cost()).sum(),
        items: selected.into_iter().map(ItemLine::from_item).collect(),
    }
}

/// Items with negative quantity on hand.
pub fn negative_on_hand(items: &[InventoryItem]) -> NegativeSection {
    let negative: Vec<&InventoryItem> = items.iter().filter(|i| i.quantity_on_hand < 0).collect();

    // Strict `<` keeps the first of equal minimums
    let mut most_negative: Option<&InventoryItem> = None;
    for &item in &negative {
        if most_negative.is_none_or(|m| item.quantity_on_hand < m.quantity_on_hand) {
            most_negative = Some(item);
        }
    }

    NegativeSection {
        count: negative.len(),
        most_negative: most_negative.map(ItemLine::from_item),
        total_missing_units: negative.iter().map(|i| i.quantity_on_hand).sum(),
        shrink_cost: negative.iter().map(|i| i.inventory_value_at_cost()).sum::<f64>().abs(),
    }
}

/// Positive stock last sold more than `dead_stock_days` before the report date.
///
/// Never-sold items are not dead stock: there is no sale date to compare.
pub fn dead_stock(items: &[InventoryItem], config: &ReportConfig) -> DeadStockSection {
    let dead: Vec<(&InventoryItem, i64)> = items
        .iter()
        .filter(|i| i.quantity_on_hand > 0)
        .filter_map(|i| i.days_since_last_sale(config.reference_date).map(|days| (i, days)))
        .filter(|(_, days)| *days > config.dead_stock_days)
        .collect();

    let limit = if config.dead_stock_rows == 0 { dead.len() } else { config.dead_stock_rows };

    DeadStockSection {
        threshold_days: config.dead_stock_days,
        count: dead.len(),
        total_value_at_cost: dead.iter().map(|(i, _)| i.inventory_value_at_cost()).sum(),
        items: dead.iter().take(limit).map(|(i, days)| ItemLine::from_item(i).with_days(Some(*days))).collect(),
    }
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod rules_test;
