//! Report computations
//!
//! Everything here is a pure function over rows already loaded from the
//! store. The database layer (`db::reports`) fetches the rows and calls in;
//! the same inputs always produce the same outputs.
//!
//! - **aggregate** - monthly totals per category
//! - **budget** - classify spend against per-category limits
//! - **trajectory** - month-over-month totals and the biggest jumps
//! - **recommend** - reallocation suggestions from budget insights
//! - **goals** - savings goal progress

pub mod aggregate;
pub mod budget;
pub mod goals;
pub mod recommend;
pub mod trajectory;

pub use aggregate::{category_totals, monthly_summary};
pub use budget::{classify, evaluate_budgets};
pub use goals::{apply_contribution, goal_progress, months_between, validate_goal};
pub use recommend::build_recommendations;
pub use trajectory::{biggest_jump, build_trajectory, category_jump, month_totals};

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, Utc};

    use crate::models::Transaction;

    /// Build a transaction for computation tests (negative = expense)
    pub fn tx(date: &str, amount: f64, category: &str) -> Transaction {
        Transaction {
            id: 0,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            category: category.to_string(),
            raw_category: category.to_string(),
            description: String::new(),
            import_hash: format!("{}{}{}", date, amount, category),
            created_at: Utc::now(),
        }
    }
}
