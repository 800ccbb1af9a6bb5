//! Data source resolution
//!
//! Loading returns a typed result; this module is the single place that
//! decides whether a failed load is answered with the built-in sample data.
//! The decision is recorded in `DataOrigin` so the report never hides it.

use crate::console_format::format_count;
use crate::sample;
use crate::store::{InventoryStore, StoreError};
use crate::types::{DataOrigin, InventoryItem, LoadedInventory, ReportConfig};
use crate::ui;
use log::{info, warn};
use std::path::Path;

/// Read every item from the SQLite file at `path`
pub fn load_from_database(path: &Path) -> Result<Vec<InventoryItem>, StoreError> {
    let store = InventoryStore::open_read_only(path)?;
    store.load_items()
}

/// Load the configured database, substituting fallback data if allowed
pub fn resolve(config: &ReportConfig) -> Result<LoadedInventory, StoreError> {
    resolve_with(config, load_from_database)
}

/// `resolve` with the loader supplied by the caller
pub fn resolve_with<F>(config: &ReportConfig, load: F) -> Result<LoadedInventory, StoreError>
where
    F: FnOnce(&Path) -> Result<Vec<InventoryItem>, StoreError>,
{
    match load(&config.db_path) {
        Ok(items) => {
            info!("Loaded {} items from {:?}", items.len(), config.db_path);
            ui::status(&format!(
                "Successfully loaded {} items from {}",
                format_count(items.len() as i64),
                config.db_path.display()
            ));
            Ok(LoadedInventory { items, origin: DataOrigin::Database { path: config.db_path.clone() } })
        }
        Err(e) if config.allow_fallback => {
            warn!("Loading {:?} failed, using fallback data: {}", config.db_path, e);
            ui::status(&format!("Error loading database: {}", e));
            ui::status("Falling back to built-in sample data.");
            Ok(LoadedInventory { items: sample::fallback_items(), origin: DataOrigin::Fallback { reason: e.to_string() } })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use std::path::PathBuf;

    fn config(db_path: PathBuf, allow_fallback: bool) -> ReportConfig {
        ReportConfig { db_path, allow_fallback, ..test_config() }
    }

    #[test]
    fn test_failed_load_falls_back() {
        let cfg = config(PathBuf::from("unused.db"), true);
        let loaded = resolve_with(&cfg, |_| Err(StoreError::MissingTable("items"))).unwrap();

        assert!(!loaded.items.is_empty());
        assert_eq!(loaded.items, sample::fallback_items());
        match loaded.origin {
            DataOrigin::Fallback { reason } => assert_eq!(reason, "no such table: items"),
            other => panic!("expected fallback origin, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_load_without_fallback_is_error() {
        let cfg = config(PathBuf::from("unused.db"), false);
        let result = resolve_with(&cfg, |_| Err(StoreError::MissingTable("items")));
        assert!(matches!(result, Err(StoreError::MissingTable(_))));
    }

    #[test]
    fn test_successful_load_keeps_items_and_path() {
        let cfg = config(PathBuf::from("store.db"), true);
        let seed = sample::seed_items();
        let expected = seed.clone();
        let loaded = resolve_with(&cfg, move |path| {
            assert_eq!(path, Path::new("store.db"));
            Ok(seed)
        })
        .unwrap();

        assert_eq!(loaded.items, expected);
        assert_eq!(loaded.origin, DataOrigin::Database { path: PathBuf::from("store.db") });
    }

    #[test]
    fn test_missing_file_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path().join("missing.db"), true);
        let loaded = resolve(&cfg).unwrap();
        assert!(loaded.origin.is_fallback());
        assert_eq!(loaded.items.len(), 47);
    }
}
