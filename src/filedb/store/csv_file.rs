//! Path-level record file primitives.
//!
//! A record file is a CSV file whose first row names the fields. These
//! functions know nothing about books or loans: they take a path and a header
//! list and move [`Record`]s in and out of the file.
//!
//! Guarantees are deliberately thin:
//! - [`write_all`] replaces the target by renaming a fully written temporary
//!   file from the same directory, so readers see either the old or the new
//!   content. Two racing writers still lose one of the updates.
//! - [`append_row`] writes straight into the file in append mode and is not
//!   atomic with respect to other appenders or to a concurrent [`write_all`].

use crate::error::{FiledbError, Result};
use crate::model::{field, Record};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Create `path` with a header row if it does not exist yet.
///
/// Returns `true` when the file was created. The headers of an existing file
/// are never checked against `headers`.
pub fn ensure_file(path: &Path, headers: &[&str]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    ensure_parent(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers)?;
    writer.flush()?;

    debug!(path = %path.display(), "created record file");
    Ok(true)
}

/// Parse the whole file into records, preserving row order.
pub fn read_all(path: &Path) -> Result<Vec<Record>> {
    let parse_err = |source: csv::Error| FiledbError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|e| match e.into_kind() {
            csv::ErrorKind::Io(io) => FiledbError::Io(io),
            kind => FiledbError::Store(format!("{}: {:?}", path.display(), kind)),
        })?;

    let headers = reader.headers().map_err(parse_err)?.clone();

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row.map_err(parse_err)?;
        rows.push(
            headers
                .iter()
                .zip(row.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect(),
        );
    }

    debug!(path = %path.display(), rows = rows.len(), "read record file");
    Ok(rows)
}

/// Replace the file with `headers` followed by `records`.
///
/// Fields missing from a record are written empty; fields not named in
/// `headers` are dropped.
pub fn write_all(path: &Path, headers: &[&str], records: &[Record]) -> Result<()> {
    ensure_parent(path)?;
    let tmp = temp_path(path);

    let written = write_rows(&tmp, headers, records);
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(FiledbError::Io(e));
    }

    debug!(path = %path.display(), rows = records.len(), "rewrote record file");
    Ok(())
}

/// Append one record, creating the file with `headers` first if needed.
pub fn append_row(path: &Path, headers: &[&str], record: &Record) -> Result<()> {
    ensure_file(path, headers)?;

    let file = OpenOptions::new().append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(headers.iter().map(|h| field(record, h)))?;
    writer.flush()?;

    debug!(path = %path.display(), id = field(record, "id"), "appended record");
    Ok(())
}

fn write_rows(path: &Path, headers: &[&str], records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers)?;
    for record in records {
        writer.write_record(headers.iter().map(|h| field(record, h)))?;
    }
    writer.flush()?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let stem = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("records");
    let name = format!(".{}-{}.tmp", stem, Uuid::new_v4());
    match path.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}
