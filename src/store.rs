//! SQLite access for the `items` table
//!
//! Reading opens the file read-only so a missing database is reported as a
//! load failure instead of silently creating an empty file. Seeding opens
//! read-write, creates the schema and replaces all rows in one transaction.

use crate::sample;
use crate::types::InventoryItem;
use log::debug;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params};
use std::path::Path;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    MissingTable(&'static str),
    InvalidRow { index: usize, message: String },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::MissingTable(table) => write!(f, "no such table: {table}"),
            Self::InvalidRow { index, message } => write!(f, "invalid row {index}: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}

const ITEMS_TABLE: &str = "items";

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      item_number TEXT NOT NULL,
      description TEXT,
      quantity_on_hand INTEGER,
      cost REAL,
      retail_price REAL,
      last_sold_date DATE,
      last_received_date DATE,
      status TEXT
    );

    CREATE INDEX IF NOT EXISTS idx_items_quantity_on_hand ON items(quantity_on_hand);
    CREATE INDEX IF NOT EXISTS idx_items_last_sold_date ON items(last_sold_date);
    CREATE INDEX IF NOT EXISTS idx_items_description ON items(description);
    CREATE INDEX IF NOT EXISTS idx_items_status ON items(status);
    CREATE INDEX IF NOT EXISTS idx_items_sold_qoh ON items(last_sold_date, quantity_on_hand);
"#;

#[derive(Debug)]
pub struct InventoryStore {
    conn: Connection,
}

impl InventoryStore {
    /// Open an existing database for reading. Fails if the file is missing.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        debug!("Opening {:?} read-only", path);
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Open (creating if needed) a database and ensure the schema exists
    pub fn open_read_write(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        debug!("Opening {:?} read-write", path);
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// In-memory database with the schema applied
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self { conn: Connection::open_in_memory()? };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn has_items_table(&self) -> Result<bool, StoreError> {
        let found: Option<String> = self
            .conn
            .query_row("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1", params![ITEMS_TABLE], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// Delete every row and insert `items` in order. Returns rows written.
    pub fn replace_items(&mut self, items: &[InventoryItem]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM items", [])?;
        debug!("Removed {} existing rows", removed);
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO items
                  (item_number, description, quantity_on_hand, cost, retail_price,
                   last_sold_date, last_received_date, status)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )?;
            for item in items {
                stmt.execute(params![
                    item.sku,
                    item.description,
                    item.quantity_on_hand,
                    item.cost,
                    item.retail_price,
                    item.last_sold_date.map(|d| d.format("%Y-%m-%d").to_string()),
                    item.last_received_date.map(|d| d.format("%Y-%m-%d").to_string()),
                    item.status,
                ])?;
            }
        }
        tx.commit()?;
        Ok(items.len())
    }

    /// Every row of `items` in insertion order
    pub fn load_items(&self) -> Result<Vec<InventoryItem>, StoreError> {
        if !self.has_items_table()? {
            return Err(StoreError::MissingTable(ITEMS_TABLE));
        }

        let mut stmt = self.conn.prepare(
            r#"
            SELECT item_number, description, quantity_on_hand, cost, retail_price,
                   last_sold_date, last_received_date, status
            FROM items
            ORDER BY id ASC
            "#,
        )?;
        let rows = stmt.query_map([], read_item_row)?;
        let items = rows.collect::<Result<Vec<_>, _>>()?;

        if let Some(index) = items.iter().position(|item| item.sku.is_empty()) {
            return Err(StoreError::InvalidRow { index, message: "missing item_number".to_string() });
        }

        Ok(items)
    }
}

fn read_item_row(row: &Row<'_>) -> rusqlite::Result<InventoryItem> {
    Ok(InventoryItem {
        // NULL and empty item numbers are both rejected by load_items
        sku: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
        description: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        quantity_on_hand: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
        cost: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
        retail_price: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
        last_sold_date: read_date(row, 5)?,
        last_received_date: read_date(row, 6)?,
        status: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
    })
}

/// Dates are stored as text, either `YYYY-MM-DD` or an ISO datetime. Anything
/// else reads as None.
fn read_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<chrono::NaiveDate>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(sample::parse_date),
        _ => None,
    })
}

/// Create the schema in `path` and replace its rows with the seed data
pub fn seed_database(path: impl AsRef<Path>) -> Result<usize, StoreError> {
    let mut store = InventoryStore::open_read_write(path)?;
    store.replace_items(&sample::seed_items())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
