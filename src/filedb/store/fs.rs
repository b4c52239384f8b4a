use super::{csv_file, RecordStore};
use crate::error::Result;
use crate::model::{Record, Table};
use std::path::{Path, PathBuf};

/// File-backed record store: `books.csv`, `members.csv` and `loans.csv`
/// under one data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table_path(&self, table: Table) -> PathBuf {
        self.root.join(table.file_name())
    }
}

impl RecordStore for FileStore {
    fn initialize(&mut self, table: Table) -> Result<()> {
        csv_file::ensure_file(&self.table_path(table), table.headers())?;
        Ok(())
    }

    fn read_all(&self, table: Table) -> Result<Vec<Record>> {
        csv_file::read_all(&self.table_path(table))
    }

    fn write_all(&mut self, table: Table, records: &[Record]) -> Result<()> {
        csv_file::write_all(&self.table_path(table), table.headers(), records)
    }

    fn append(&mut self, table: Table, record: &Record) -> Result<()> {
        csv_file::append_row(&self.table_path(table), table.headers(), record)
    }
}
