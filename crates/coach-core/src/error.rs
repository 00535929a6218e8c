//! Error types for Coach

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// True for errors caused by bad caller input rather than the store
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidMonth(_) | Self::InvalidBudget(_) | Self::InvalidData(_) | Self::Import(_)
        )
    }

    /// True when the store could not be reached or queried
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Pool(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
