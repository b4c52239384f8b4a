use super::RecordStore;
use crate::error::{FiledbError, Result};
use crate::model::{Record, Table};
use std::collections::HashMap;

/// In-memory record store for testing.
///
/// Tables must be initialized before use, mirroring the file store where
/// reading a file that was never created is an error.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: HashMap<Table, Vec<Record>>,
    fail_rewrites_of: Option<Table>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `write_all` on `table` fail, to exercise the
    /// non-atomic multi-step commands. Appends still succeed.
    pub fn fail_rewrites_of(&mut self, table: Option<Table>) {
        self.fail_rewrites_of = table;
    }

    fn rows_mut(&mut self, table: Table) -> Result<&mut Vec<Record>> {
        self.tables
            .get_mut(&table)
            .ok_or_else(|| FiledbError::Store(format!("Table {} is not initialized", table)))
    }
}

impl RecordStore for InMemoryStore {
    fn initialize(&mut self, table: Table) -> Result<()> {
        self.tables.entry(table).or_default();
        Ok(())
    }

    fn read_all(&self, table: Table) -> Result<Vec<Record>> {
        self.tables
            .get(&table)
            .cloned()
            .ok_or_else(|| FiledbError::Store(format!("Table {} is not initialized", table)))
    }

    fn write_all(&mut self, table: Table, records: &[Record]) -> Result<()> {
        if self.fail_rewrites_of == Some(table) {
            return Err(FiledbError::Store(format!(
                "Simulated write failure on {}",
                table
            )));
        }
        *self.rows_mut(table)? = records.to_vec();
        Ok(())
    }

    fn append(&mut self, table: Table, record: &Record) -> Result<()> {
        self.initialize(table)?;
        self.rows_mut(table)?.push(record.clone());
        Ok(())
    }
}
