use crate::config::{DEFAULT_DEAD_STOCK_DAYS, DEFAULT_DEAD_STOCK_ROWS, DEFAULT_OVERSTOCK_PERCENTILE, DEFAULT_STORE_NAME};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "inventory-health")]
#[command(about = "Flag replacement overstock, negative on-hand and dead stock in a store inventory database")]
#[command(version)]
pub struct CliArgs {
    /// SQLite database holding the `items` table
    /// Default: inventory.db, or $INVENTORY_DB when set
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Store name printed in the report title
    #[arg(long, default_value = DEFAULT_STORE_NAME)]
    pub store_name: String,

    /// Date the report is run "as of" (YYYY-MM-DD). Default: today
    #[arg(long, value_name = "DATE")]
    pub report_date: Option<String>,

    /// Quantile (0-1) of quantity on hand that replacement SKUs must exceed
    /// Examples: 0.90, 0.95
    #[arg(long, value_name = "Q", default_value_t = DEFAULT_OVERSTOCK_PERCENTILE)]
    pub overstock_percentile: f64,

    /// Days without a sale after which positive stock counts as dead
    #[arg(long, value_name = "DAYS", default_value_t = DEFAULT_DEAD_STOCK_DAYS)]
    pub dead_stock_days: i64,

    /// Dead stock rows to list (0 = all)
    #[arg(long, value_name = "ROWS", default_value_t = DEFAULT_DEAD_STOCK_ROWS)]
    pub dead_stock_rows: usize,

    /// Recreate the sample rows in the database before reporting
    #[arg(long)]
    pub seed: bool,

    /// Recreate the sample rows and exit without reporting
    #[arg(long)]
    pub seed_only: bool,

    /// Fail instead of substituting built-in sample data when the database can't be loaded
    #[arg(long)]
    pub no_fallback: bool,

    /// Also write the report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Also write the report as Markdown to this path
    #[arg(long, value_name = "PATH")]
    pub markdown: Option<PathBuf>,

    /// Override console width for table layout (default: auto-detect)
    #[arg(long, value_name = "COLUMNS")]
    pub console_width: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        let mut args = CliArgs::parse();
        args.store_name = args.store_name.trim().to_string();
        args
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.seed && self.seed_only {
            return Err("Cannot specify both --seed and --seed-only".to_string());
        }

        if !(0.0..=1.0).contains(&self.overstock_percentile) {
            return Err(format!(
                "--overstock-percentile must be between 0 and 1 (got {})",
                self.overstock_percentile
            ));
        }

        if self.dead_stock_days < 0 {
            return Err(format!("--dead-stock-days must not be negative (got {})", self.dead_stock_days));
        }

        if self.console_width == Some(0) {
            return Err("--console-width must be greater than 0".to_string());
        }

        if self.store_name.is_empty() {
            return Err("--store-name must not be empty".to_string());
        }

        Ok(())
    }

    /// Should the database be reseeded before anything else?
    pub fn should_seed(&self) -> bool {
        self.seed || self.seed_only
    }
}

#[cfg(test)]
pub(crate) fn default_args() -> CliArgs {
    CliArgs {
        db: None,
        store_name: DEFAULT_STORE_NAME.to_string(),
        report_date: None,
        overstock_percentile: DEFAULT_OVERSTOCK_PERCENTILE,
        dead_stock_days: DEFAULT_DEAD_STOCK_DAYS,
        dead_stock_rows: DEFAULT_DEAD_STOCK_ROWS,
        seed: false,
        seed_only: false,
        no_fallback: false,
        json: None,
        markdown: None,
        console_width: None,
        no_color: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_defaults_succeed() {
        assert!(default_args().validate().is_ok());
    }

    #[test]
    fn test_validate_both_seed_flags_fails() {
        let args = CliArgs { seed: true, seed_only: true, ..default_args() };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_percentile_range() {
        let args = CliArgs { overstock_percentile: 1.5, ..default_args() };
        assert!(args.validate().is_err());

        let args = CliArgs { overstock_percentile: f64::NAN, ..default_args() };
        assert!(args.validate().is_err());

        let args = CliArgs { overstock_percentile: 0.95, ..default_args() };
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_negative_days_fails() {
        let args = CliArgs { dead_stock_days: -1, ..default_args() };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_zero_console_width_fails() {
        let args = CliArgs { console_width: Some(0), ..default_args() };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_parse_from_flags() {
        let args = CliArgs::try_parse_from([
            "inventory-health",
            "--db",
            "store.db",
            "--report-date",
            "2025-12-17",
            "--overstock-percentile",
            "0.95",
            "--seed",
            "--json",
            "out.json",
        ])
        .unwrap();
        assert_eq!(args.db, Some(PathBuf::from("store.db")));
        assert_eq!(args.report_date.as_deref(), Some("2025-12-17"));
        assert_eq!(args.overstock_percentile, 0.95);
        assert_eq!(args.dead_stock_days, 547);
        assert_eq!(args.dead_stock_rows, 15);
        assert!(args.should_seed());
        assert_eq!(args.json, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_should_seed() {
        assert!(!default_args().should_seed());
        assert!(CliArgs { seed_only: true, ..default_args() }.should_seed());
    }
}
