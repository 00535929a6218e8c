//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init plus shared utilities (open_db, load_config)
//! - `import` - CSV import and transaction listing
//! - `reports` - Monthly summary, trajectory, insights, recommendations
//! - `budgets` - Budget set/list
//! - `goals` - Savings goal commands
//! - `serve` - Web server command

pub mod budgets;
pub mod core;
pub mod goals;
pub mod import;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use goals::*;
pub use import::*;
pub use reports::*;
pub use serve::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a signed amount, red for spending and green for income
pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("\x1b[31m${:.2}\x1b[0m", amount.abs())
    } else {
        format!("\x1b[32m+${:.2}\x1b[0m", amount)
    }
}
