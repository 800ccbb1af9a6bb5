//! Built-in inventory datasets
//!
//! - `seed_items`: the store rows written by `--seed`
//! - `fallback_items`: the synthetic set substituted when the database
//!   cannot be loaded. Deterministic: the generated tail uses a fixed seed.

use crate::types::InventoryItem;
use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// RNG seed for the generated fallback rows
pub const FALLBACK_SEED: u64 = 42;

/// Number of "Generic Hardware Item" rows appended to the fallback set
pub const FALLBACK_GENERATED_ROWS: usize = 30;

type Row = (&'static str, &'static str, i64, f64, f64, Option<&'static str>, Option<&'static str>, &'static str);

const SEED_ROWS: &[Row] = &[
    ("12345", "Old Widget A (Discontinued)", -50, 12.50, 24.99, Some("2023-06-15"), Some("2024-03-10"), "Discontinued"),
    ("12345-REPL", "New Widget A (Replacement)", 450, 14.00, 27.99, Some("2025-12-10"), Some("2025-12-01"), "Active"),
    ("67890", "Old Bolt Pack (Discontinued)", -200, 8.75, 17.99, Some("2022-11-01"), Some("2023-09-20"), "Discontinued"),
    ("67890-REPL", "New Bolt Pack (Replacement)", 800, 10.20, 21.99, Some("2025-12-16"), Some("2025-12-15"), "Active"),
    ("54321", "Fastener Kit - Stainless (Midwest)", 120, 45.00, 89.99, Some("2025-11-20"), Some("2025-10-30"), "Active"),
    ("98765", "Spray Paint - Red (Slow Mover)", 15, 9.99, 14.99, Some("2024-01-05"), Some("2024-02-20"), "Active"),
    ("11111", "Lumber 2x4x8 (High Negative)", -11033, 4.50, 8.99, Some("2025-12-01"), Some("2025-11-28"), "Active"),
    ("22222", "Caulk Tube - White", 35, 6.50, 12.99, None, Some("2025-12-10"), "Active"),
    ("33333", "GRK RSS Structural Screws 3\" (100pk)", 280, 58.00, 89.99, Some("2025-10-15"), Some("2025-12-05"), "Active"),
    ("44444", "Tapcon Concrete Anchors 1/4x3\" (100)", 95, 32.50, 59.99, Some("2025-08-20"), Some("2025-11-01"), "Active"),
    ("55555", "Dead Stock Item - No Sale in 3 Years", 60, 22.00, 44.99, Some("2022-04-10"), Some("2023-01-15"), "Active"),
    ("66666", "Midwest Stainless Hex Bolts Assortment", 45, 65.00, 119.99, Some("2025-09-30"), Some("2025-11-20"), "Active"),
];

const FALLBACK_ROWS: &[Row] = &[
    // Discontinued -> replacement pairs
    ("OLD-1001", "Old Deck Screw 2-1/2\" (Discontinued)", -120, 0.15, 0.39, Some("2023-08-20"), Some("2024-01-15"), "Discontinued"),
    ("NEW-1001", "Spax Deck Screw 2-1/2\" (Replacement)", 1200, 0.22, 0.49, Some("2025-12-10"), Some("2025-12-01"), "Active"),
    ("OLD-2002", "Old Structural Bolt 1/2x6 (Discontinued)", -80, 2.80, 5.99, Some("2023-05-10"), Some("2023-11-20"), "Discontinued"),
    ("NEW-2002", "Simpson SDWS Framing Screw (Replacement)", 850, 3.50, 7.49, Some("2025-12-05"), Some("2025-12-03"), "Active"),
    ("OLD-3003", "Old Concrete Anchor Kit (Discontinued)", -45, 28.00, 54.99, Some("2022-12-01"), Some("2023-07-10"), "Discontinued"),
    ("NEW-3003", "Tapcon Pro Kit 1/4x3-1/4\" (Replacement)", 420, 35.00, 64.99, Some("2025-11-28"), Some("2025-12-02"), "Active"),
    // High-value fasteners
    ("MW-4001", "Midwest Stainless Hex Bolts Assortment (Large)", 65, 72.00, 129.99, Some("2025-10-15"), Some("2025-11-10"), "Active"),
    ("GRK-5001", "GRK RSS Structural Screws 3-1/8\" (100pk)", 320, 58.50, 94.99, Some("2025-11-01"), Some("2025-12-04"), "Active"),
    ("SPAX-6001", "Spax PowerLag 5/16x6\" (50pk)", 220, 68.00, 109.99, Some("2025-10-05"), Some("2025-11-25"), "Active"),
    // Lumber
    ("LUM-7001", "2x4x8 SPF Stud", -11033, 4.50, 8.99, Some("2025-12-01"), Some("2025-11-28"), "Active"),
    ("LUM-7002", "4x4x8 Treated Post", -850, 12.80, 24.99, Some("2025-11-10"), Some("2025-11-20"), "Active"),
    ("PAINT-8001", "Krylon Fusion Spray Paint Gloss Black", 85, 6.80, 12.99, Some("2025-12-12"), Some("2025-12-08"), "Active"),
    ("ELEC-8002", "Leviton Decora Outlet White (10pk)", 140, 8.50, 16.99, Some("2025-12-10"), Some("2025-12-05"), "Active"),
    // Dead stock
    ("DEAD-10001", "Obsolete LED Bulb 40W Equivalent (Old Model)", 150, 4.20, 9.99, Some("2022-03-15"), Some("2022-06-10"), "Active"),
    ("DEAD-10002", "Discontinued Brass Ball Valve 3/4\"", 80, 18.50, 34.99, Some("2021-11-20"), Some("2022-02-05"), "Active"),
    ("DEAD-10003", "Old Style Door Knob Set (Oil Rubbed Bronze)", 55, 22.00, 44.99, Some("2022-01-10"), Some("2022-04-18"), "Active"),
    ("DEAD-10004", "Vintage Halogen Work Light 500W", 30, 25.00, 49.99, Some("2020-12-05"), Some("2021-03-12"), "Active"),
];

/// Datetime layouts accepted besides a bare date; the time part is dropped
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Parse an ISO date or datetime, treating anything unparsable as absent
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn to_item(row: &Row) -> InventoryItem {
    let (sku, description, qoh, cost, retail, sold, received, status) = *row;
    InventoryItem {
        sku: sku.to_string(),
        description: description.to_string(),
        quantity_on_hand: qoh,
        cost,
        retail_price: retail,
        last_sold_date: sold.and_then(parse_date),
        last_received_date: received.and_then(parse_date),
        status: status.to_string(),
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rows written to the database by the seed step
pub fn seed_items() -> Vec<InventoryItem> {
    SEED_ROWS.iter().map(to_item).collect()
}

/// Synthetic dataset used when the database cannot be loaded
pub fn fallback_items() -> Vec<InventoryItem> {
    let mut items: Vec<InventoryItem> = FALLBACK_ROWS.iter().map(to_item).collect();

    let mut rng = StdRng::seed_from_u64(FALLBACK_SEED);
    for i in 0..FALLBACK_GENERATED_ROWS {
        let quantity_on_hand = rng.gen_range(10..=300);
        let cost = round_cents(rng.gen_range(5.0..100.0));
        let retail_price = round_cents(cost * rng.gen_range(1.8..2.5));
        let last_sold_date = NaiveDate::from_ymd_opt(2025, rng.gen_range(9..=12), rng.gen_range(1..=28));
        let last_received_date = NaiveDate::from_ymd_opt(2025, rng.gen_range(10..=12), rng.gen_range(1..=28));

        items.push(InventoryItem {
            sku: format!("NORM-{}", 12000 + i),
            description: format!("Generic Hardware Item {}", i + 1),
            quantity_on_hand,
            cost,
            retail_price,
            last_sold_date,
            last_received_date,
            status: "Active".to_string(),
        });
    }

    items
}
