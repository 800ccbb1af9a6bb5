//! Configuration resolution module
//!
//! This module handles:
//! - Building a ReportConfig from CLI arguments
//! - Resolving the database path (flag, $INVENTORY_DB, default)
//! - Parsing the report date, defaulting to today
//! - The named thresholds the analyses use

use crate::cli::CliArgs;
use crate::types::{ReportConfig, SeedMode};
use chrono::{Local, NaiveDate};
use log::debug;
use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Database file used when neither --db nor $INVENTORY_DB is given
pub const DEFAULT_DB_PATH: &str = "inventory.db";

/// Environment variable overriding the default database path
pub const DB_PATH_ENV: &str = "INVENTORY_DB";

pub const DEFAULT_STORE_NAME: &str = "Pike Creek Community Hardware";

/// Replacement SKUs must exceed this quantile of quantity on hand
pub const DEFAULT_OVERSTOCK_PERCENTILE: f64 = 0.90;

/// 18 months
pub const DEFAULT_DEAD_STOCK_DAYS: i64 = 547;

pub const DEFAULT_DEAD_STOCK_ROWS: usize = 15;

/// Case-insensitive description substrings that mark a replacement SKU
pub const REPLACEMENT_KEYWORDS: &[&str] = &["repl", "replacement", "new"];

/// Build a complete ReportConfig from CLI arguments
///
/// Everything that depends on the environment (wall clock, env vars,
/// terminal detection) is resolved here, so the analyses only ever see
/// fixed values.
pub fn build_report_config(args: &CliArgs) -> Result<ReportConfig, String> {
    debug!("Building report config from CLI args");

    let db_path = resolve_db_path(args, env::var(DB_PATH_ENV).ok());
    debug!("Database path: {:?}", db_path);

    let reference_date = match args.report_date.as_deref() {
        Some(s) => parse_report_date(s)?,
        None => Local::now().date_naive(),
    };
    debug!("Reference date: {}", reference_date);

    let seed = if args.seed_only {
        SeedMode::SeedOnly
    } else if args.seed {
        SeedMode::SeedThenReport
    } else {
        SeedMode::Skip
    };

    Ok(ReportConfig {
        db_path,
        store_name: args.store_name.clone(),
        reference_date,
        overstock_percentile: args.overstock_percentile,
        replacement_keywords: REPLACEMENT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        dead_stock_days: args.dead_stock_days,
        dead_stock_rows: args.dead_stock_rows,
        seed,
        allow_fallback: !args.no_fallback,
        use_colors: !args.no_color && std::io::stdout().is_terminal(),
        json_path: args.json.clone(),
        markdown_path: args.markdown.clone(),
    })
}

/// --db, then the $INVENTORY_DB value (blank counts as unset), then inventory.db
pub(crate) fn resolve_db_path(args: &CliArgs, env_value: Option<String>) -> PathBuf {
    if let Some(ref path) = args.db {
        return path.clone();
    }
    match env_value {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_DB_PATH),
    }
}

/// Parse a YYYY-MM-DD report date
pub fn parse_report_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid --report-date '{}' (expected YYYY-MM-DD): {}", s, e))
}

/// Config used across unit tests: defaults as of 2025-12-17
#[cfg(test)]
pub(crate) fn test_config() -> ReportConfig {
    ReportConfig {
        db_path: PathBuf::from(DEFAULT_DB_PATH),
        store_name: DEFAULT_STORE_NAME.to_string(),
        reference_date: NaiveDate::from_ymd_opt(2025, 12, 17).unwrap(),
        overstock_percentile: DEFAULT_OVERSTOCK_PERCENTILE,
        replacement_keywords: REPLACEMENT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        dead_stock_days: DEFAULT_DEAD_STOCK_DAYS,
        dead_stock_rows: DEFAULT_DEAD_STOCK_ROWS,
        seed: SeedMode::Skip,
        allow_fallback: true,
        use_colors: false,
        json_path: None,
        markdown_path: None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
