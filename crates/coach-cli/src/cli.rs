//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Coach - Understand where your money goes
#[derive(Parser)]
#[command(name = "coach")]
#[command(about = "Personal finance coach: budgets, trends and savings goals", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "coach.db", global = true)]
    pub db: PathBuf,

    /// Configuration file (defaults to the user config dir, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set COACH_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Import a spending log from CSV (columns: date, category, amount, description)
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,

        /// Amounts in the file are positive for purchases
        #[arg(long)]
        expenses_positive: bool,
    },

    /// List recent transactions
    Transactions {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Show spending and income for a month
    Summary {
        /// Month as YYYY-MM
        #[arg(short, long)]
        month: String,
    },

    /// Show month-over-month spending totals
    Trajectory {
        /// Number of most recent months (0 = all, default from config)
        #[arg(short, long)]
        months: Option<usize>,
    },

    /// Manage category budgets
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },

    /// Classify each budget for a month
    Insights {
        /// Month as YYYY-MM
        #[arg(short, long)]
        month: String,

        /// Near-limit ratio between 0 and 1 (default from config)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Suggest how to rebalance spending for a month
    Recommend {
        /// Month as YYYY-MM
        #[arg(short, long)]
        month: String,
    },

    /// Manage savings goals
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, every API request needs a key from COACH_API_KEYS.
        #[arg(long)]
        no_auth: bool,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set (or replace) the limit for a category in a month
    Set {
        /// Category display name
        #[arg(short, long)]
        category: String,

        /// Month as YYYY-MM
        #[arg(short, long)]
        month: String,

        /// Spending limit
        #[arg(short, long)]
        limit: f64,
    },

    /// List budgets for a month
    List {
        /// Month as YYYY-MM
        #[arg(short, long)]
        month: String,
    },
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// List all goals
    List,

    /// Create a savings goal
    Add {
        /// Goal name
        name: String,

        /// Amount to save
        #[arg(short, long)]
        target: f64,

        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        by: String,

        /// Start date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        start: Option<String>,
    },

    /// Add money to a goal
    Contribute {
        /// Goal ID
        id: i64,

        /// Amount to add
        amount: f64,
    },

    /// Show progress toward every goal
    Progress,
}
