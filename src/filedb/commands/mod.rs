//! # Command Layer
//!
//! Lending workflow built on [`RecordStore`] calls. Every command first makes
//! sure the three tables exist, then runs its own sequence of engine calls;
//! commands never call each other.
//!
//! Commands return plain values (ids, booleans, rows, problem lists). The API
//! layer wraps them in a [`CmdResult`] with user-facing messages.
//!
//! Not-found is reported two ways on purpose: update-style commands (rename,
//! set status, return) answer `false`, while checkout fails with a
//! validation error naming the missing record.

use crate::config::FiledbConfig;
use crate::error::Result;
use crate::model::{Record, Table};
use crate::store::RecordStore;

pub mod books;
pub mod checkin;
pub mod checkout;
pub mod config;
pub mod helpers;
pub mod init;
pub mod loans;
pub mod members;
pub mod reconcile;
pub mod validate;

/// Create any missing table with its header row.
pub fn bootstrap<S: RecordStore>(store: &mut S) -> Result<()> {
    for table in Table::ALL {
        store.initialize(table)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Id assigned by an add or checkout.
    pub new_id: Option<u64>,
    /// Outcome of an update-style command; `Some(false)` means not found.
    pub updated: Option<bool>,
    /// Table the listed rows come from, for column ordering.
    pub table: Option<Table>,
    pub rows: Vec<Record>,
    pub problems: Vec<String>,
    pub config: Option<FiledbConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_new_id(mut self, id: u64) -> Self {
        self.new_id = Some(id);
        self
    }

    pub fn with_updated(mut self, updated: bool) -> Self {
        self.updated = Some(updated);
        self
    }

    pub fn with_rows(mut self, table: Table, rows: Vec<Record>) -> Self {
        self.table = Some(table);
        self.rows = rows;
        self
    }

    pub fn with_problems(mut self, problems: Vec<String>) -> Self {
        self.problems = problems;
        self
    }

    pub fn with_config(mut self, config: FiledbConfig) -> Self {
        self.config = Some(config);
        self
    }
}
