//! # API Facade
//!
//! Thin layer over the commands. It owns the store and the loaded
//! configuration, supplies today's date, and turns plain command results into
//! [`CmdResult`]s carrying user-facing messages.
//!
//! Business rules live in `commands/*.rs`; persistence lives in `store/`.
//! Nothing here prints or exits.

use crate::commands;
use crate::config::FiledbConfig;
use crate::error::Result;
use crate::model::{MemberStatus, Table};
use crate::store::fs::FileStore;
use crate::store::RecordStore;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

pub struct FiledbApi<S: RecordStore> {
    store: S,
    data_dir: PathBuf,
    config: FiledbConfig,
    fixed_today: Option<NaiveDate>,
}

impl FiledbApi<FileStore> {
    /// Open the file store in `data_dir`, loading `config.json` from it.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let config = FiledbConfig::load(&data_dir)?;
        Ok(Self::new(FileStore::new(data_dir.clone()), data_dir, config))
    }
}

impl<S: RecordStore> FiledbApi<S> {
    pub fn new(store: S, data_dir: PathBuf, config: FiledbConfig) -> Self {
        Self {
            store,
            data_dir,
            config,
            fixed_today: None,
        }
    }

    /// Pin the date used for new records and overdue checks.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn init(&mut self) -> Result<CmdResult> {
        commands::init::run(&mut self.store)?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!(
            "Initialized filedb store at {}",
            self.data_dir.display()
        )));
        Ok(result)
    }

    pub fn add_book(
        &mut self,
        title: &str,
        author: &str,
        year: i32,
        isbn: &str,
    ) -> Result<CmdResult> {
        let id = commands::books::add(&mut self.store, title, author, year, isbn)?;
        let mut result = CmdResult::default().with_new_id(id);
        result.add_message(CmdMessage::success(format!("Added book id={}", id)));
        Ok(result)
    }

    pub fn find_books(&mut self, title: &str) -> Result<CmdResult> {
        let rows = commands::books::find_by_title(&mut self.store, title)?;
        Ok(CmdResult::default().with_rows(Table::Books, rows))
    }

    pub fn list_books(&mut self) -> Result<CmdResult> {
        let rows = commands::books::list(&mut self.store)?;
        Ok(CmdResult::default().with_rows(Table::Books, rows))
    }

    pub fn add_member(&mut self, name: &str, email: &str) -> Result<CmdResult> {
        let today = self.today();
        let id = commands::members::add(&mut self.store, name, email, today)?;
        let mut result = CmdResult::default().with_new_id(id);
        result.add_message(CmdMessage::success(format!("Added member id={}", id)));
        Ok(result)
    }

    pub fn list_members(&mut self) -> Result<CmdResult> {
        let rows = commands::members::list(&mut self.store)?;
        Ok(CmdResult::default().with_rows(Table::Members, rows))
    }

    pub fn rename_member(&mut self, member_id: u64, name: &str) -> Result<CmdResult> {
        let updated = commands::members::rename(&mut self.store, member_id, name)?;
        Ok(updated_result(updated, format!("Member {} renamed to {}", member_id, name)))
    }

    pub fn set_member_status(&mut self, member_id: u64, status: MemberStatus) -> Result<CmdResult> {
        let updated = commands::members::set_status(&mut self.store, member_id, status)?;
        Ok(updated_result(updated, format!("Member {} is now {}", member_id, status)))
    }

    pub fn checkout(&mut self, book_id: u64, member_id: u64) -> Result<CmdResult> {
        let today = self.today();
        let loan_id =
            commands::checkout::run(&mut self.store, book_id, member_id, today, &self.config)?;
        let mut result = CmdResult::default().with_new_id(loan_id);
        result.add_message(CmdMessage::success(format!(
            "Checked out. loan_id={}",
            loan_id
        )));
        Ok(result)
    }

    pub fn return_loan(&mut self, loan_id: u64) -> Result<CmdResult> {
        let today = self.today();
        let updated = commands::checkin::run(&mut self.store, loan_id, today, &self.config)?;
        Ok(updated_result(updated, format!("Loan {} returned", loan_id)))
    }

    pub fn member_loans(&mut self, member_id: u64, include_returned: bool) -> Result<CmdResult> {
        let rows = commands::loans::member_loans(&mut self.store, member_id, include_returned)?;
        Ok(CmdResult::default().with_rows(Table::Loans, rows))
    }

    /// Overdue loans; `days` falls back to the configured `overdue_days`.
    pub fn overdue(&mut self, days: Option<u32>) -> Result<CmdResult> {
        let today = self.today();
        let days = days.unwrap_or(self.config.overdue_days);
        let rows = commands::loans::overdue(&mut self.store, days, today)?;
        Ok(CmdResult::default().with_rows(Table::Loans, rows))
    }

    pub fn validate(&mut self) -> Result<CmdResult> {
        let problems = commands::validate::run(&mut self.store)?;
        let mut result = CmdResult::default();
        if problems.is_empty() {
            result.add_message(CmdMessage::success("No problems found."));
        } else {
            result.add_message(CmdMessage::warning(format!(
                "{} problem(s) found:",
                problems.len()
            )));
        }
        Ok(result.with_problems(problems))
    }

    pub fn reconcile(&mut self) -> Result<CmdResult> {
        let corrections = commands::reconcile::run(&mut self.store)?;
        let mut result = CmdResult::default();
        if corrections.is_empty() {
            result.add_message(CmdMessage::success("Book status matches the loan ledger."));
        }
        for c in &corrections {
            result.add_message(CmdMessage::warning(format!(
                "Book {}: {} -> {}",
                c.book_id, c.was, c.now
            )));
        }
        Ok(result)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.data_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }
}

fn updated_result(updated: bool, success: String) -> CmdResult {
    let mut result = CmdResult::default().with_updated(updated);
    if updated {
        result.add_message(CmdMessage::success(success));
    } else {
        result.add_message(CmdMessage::warning("Not found"));
    }
    result
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
