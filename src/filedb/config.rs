//! # Configuration
//!
//! Per data directory settings, stored as `config.json` next to the record
//! files. A missing file means all defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `overdue_days` | `14` | Window used by `overdue` when no `--days` is given |
//! | `enforce_member_status` | `true` | Checkout refuses SUSPENDED members |
//! | `check_loan_ledger` | `true` | Checkout refuses books with an open loan in the ledger, and return keeps a book OUT while another open loan remains |
//!
//! Turning both flags off gives the plain cached-status behavior: checkout
//! trusts the book's `status` field alone and return always marks the book
//! AVAILABLE.

use crate::error::{FiledbError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_OVERDUE_DAYS: u32 = 14;

pub const CONFIG_KEYS: &[&str] = &["overdue_days", "enforce_member_status", "check_loan_ledger"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FiledbConfig {
    #[serde(default = "default_overdue_days")]
    pub overdue_days: u32,

    #[serde(default = "default_true")]
    pub enforce_member_status: bool,

    #[serde(default = "default_true")]
    pub check_loan_ledger: bool,
}

fn default_overdue_days() -> u32 {
    DEFAULT_OVERDUE_DAYS
}

fn default_true() -> bool {
    true
}

impl Default for FiledbConfig {
    fn default() -> Self {
        Self {
            overdue_days: DEFAULT_OVERDUE_DAYS,
            enforce_member_status: true,
            check_loan_ledger: true,
        }
    }
}

impl FiledbConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: FiledbConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "overdue_days" => Some(self.overdue_days.to_string()),
            "enforce_member_status" => Some(self.enforce_member_status.to_string()),
            "check_loan_ledger" => Some(self.check_loan_ledger.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "overdue_days" => self.overdue_days = parse_value(key, value)?,
            "enforce_member_status" => self.enforce_member_status = parse_value(key, value)?,
            "check_loan_ledger" => self.check_loan_ledger = parse_value(key, value)?,
            other => {
                return Err(FiledbError::Config(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| FiledbError::Config(format!("Invalid value for {}: {}", key, value)))
}
