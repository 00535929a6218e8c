//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_config` - Resolve the coach configuration
//! - `parse_month` - Parse a YYYY-MM argument
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use coach_core::{config::default_config_path, db::Database, CoachConfig, YearMonth};
use tracing::debug;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    debug!(path = path_str, encrypted = !no_encrypt, "Opening database");
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Load config from --config, the user config dir, or built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<CoachConfig> {
    CoachConfig::load(path).context("Failed to load configuration")
}

pub fn parse_month(s: &str) -> Result<YearMonth> {
    s.parse()
        .with_context(|| format!("Invalid month '{}' (use YYYY-MM)", s))
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    db.ping().context("Database is not responding")?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }
    if let Some(path) = default_config_path() {
        println!("   ⚙️  Config override: {}", path.display());
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Import spending: coach import --file spending.csv");
    println!("  2. Set a budget: coach budget set --category Groceries --month 2025-03 --limit 400");
    println!("  3. Start web UI: coach serve");

    Ok(())
}
