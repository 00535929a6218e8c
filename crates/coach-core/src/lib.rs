//! Coach Core Library
//!
//! Shared functionality for the Coach personal finance tool:
//! - Database access and migrations (SQLite, optionally SQLCipher-encrypted)
//! - CSV import with category normalisation and deduplication
//! - Monthly summaries, budget insights and spending trajectory
//! - Spend recommendations and savings goal progress
//! - Layered TOML configuration

pub mod analysis;
pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod models;
pub mod money;
pub mod month;

pub use config::CoachConfig;
pub use db::Database;
pub use error::{Error, Result};
pub use month::YearMonth;
