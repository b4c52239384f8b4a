//! # Storage Layer
//!
//! The record file engine. [`RecordStore`] is the seam between the command
//! layer and persistence: commands only ever talk to a `RecordStore`, keyed by
//! [`Table`].
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one CSV file per table under a
//!   data directory (see [`csv_file`] for the on-disk primitives).
//! - [`memory::InMemoryStore`]: no persistence, for command tests.
//!
//! ## Primitive vs. derived operations
//!
//! Implementors provide four primitives: `initialize`, `read_all`,
//! `write_all` and `append`. Id assignment, lookup and update are provided
//! methods built from full scans and full rewrites:
//!
//! - `next_id` is `max(id) + 1` over every row; rows whose id does not parse
//!   are skipped. Nothing is reserved until the caller appends. A table
//!   already holding `u64::MAX` has no next id and reports a store error.
//! - `find_by_id` returns the first row whose id matches; later duplicates are
//!   never seen.
//! - `update_by_id` is a read-modify-write of the whole table and only
//!   touches the first match.
//!
//! Mutating methods take `&mut self`, so a single store value serializes its
//! own writers. Nothing coordinates separate stores or processes pointed at
//! the same directory: the last full rewrite wins.

use crate::error::{FiledbError, Result};
use crate::model::{Record, Table};
use tracing::debug;

pub mod csv_file;
pub mod fs;
pub mod memory;

pub trait RecordStore {
    /// Create the table with its header row if absent. Existing tables are
    /// left untouched.
    fn initialize(&mut self, table: Table) -> Result<()>;

    /// Every row of the table, in stored order.
    fn read_all(&self, table: Table) -> Result<Vec<Record>>;

    /// Replace the table contents. Readers see the old or the new rows, never
    /// a mix.
    fn write_all(&mut self, table: Table, records: &[Record]) -> Result<()>;

    /// Add one row at the end of the table.
    fn append(&mut self, table: Table, record: &Record) -> Result<()>;

    fn next_id(&self, table: Table) -> Result<u64> {
        let rows = self.read_all(table)?;
        let mut max_id: u64 = 0;
        for row in &rows {
            let raw = row.get("id").map(String::as_str).unwrap_or("");
            match raw.trim().parse::<u64>() {
                Ok(id) => max_id = max_id.max(id),
                Err(_) => debug!(%table, id = raw, "skipping row with unparsable id"),
            }
        }
        max_id.checked_add(1).ok_or_else(|| {
            FiledbError::Store(format!("{} table has no id left after {}", table, max_id))
        })
    }

    fn find_by_id(&self, table: Table, id: u64) -> Result<Option<Record>> {
        let target = id.to_string();
        Ok(self
            .read_all(table)?
            .into_iter()
            .find(|row| row.get("id") == Some(&target)))
    }

    /// Merge `changes` over the first row with a matching id and rewrite the
    /// table. Returns `false`, without writing, when no row matched.
    fn update_by_id(&mut self, table: Table, id: u64, changes: &Record) -> Result<bool> {
        let target = id.to_string();
        let mut rows = self.read_all(table)?;

        let Some(row) = rows.iter_mut().find(|row| row.get("id") == Some(&target)) else {
            return Ok(false);
        };
        row.extend(changes.iter().map(|(k, v)| (k.clone(), v.clone())));

        self.write_all(table, &rows)?;
        Ok(true)
    }
}
