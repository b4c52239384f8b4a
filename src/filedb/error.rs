use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FiledbError {
    /// A business rule rejected the operation. The message is meant for humans.
    #[error("{0}")]
    Validation(String),

    #[error("Malformed record file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl FiledbError {
    pub fn validation(message: impl Into<String>) -> Self {
        FiledbError::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, FiledbError>;
