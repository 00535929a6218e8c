//! Budget operations

use rusqlite::params;
use tracing::info;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Budget, NewBudget};
use crate::month::YearMonth;

impl Database {
    /// Create or replace the limit for a category in a month
    ///
    /// The category must already exist (it is created by importing
    /// transactions that use it).
    pub fn upsert_budget(&self, budget: &NewBudget) -> Result<Budget> {
        let month = YearMonth::new(budget.year, budget.month)?;
        let category = budget.category_name.trim();

        if category.is_empty() {
            return Err(Error::InvalidBudget("category_name cannot be empty".into()));
        }
        if !budget.amount_limit.is_finite() || budget.amount_limit <= 0.0 {
            return Err(Error::InvalidBudget(format!(
                "amount_limit must be positive, got {}",
                budget.amount_limit
            )));
        }
        if !self.category_exists(category)? {
            return Err(Error::NotFound(format!(
                "Category '{}' not found. Make sure it matches a category in your data.",
                category
            )));
        }

        let conn = self.conn()?;
        let id: i64 = conn.query_row(
            r#"
            INSERT INTO budgets (category_name, year, month, amount_limit)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (category_name, year, month)
            DO UPDATE SET amount_limit = excluded.amount_limit, updated_at = CURRENT_TIMESTAMP
            RETURNING id
            "#,
            params![category, month.year(), month.month(), budget.amount_limit],
            |row| row.get(0),
        )?;

        info!(category = %category, month = %month, limit = budget.amount_limit, "Budget saved");

        Ok(Budget {
            id,
            category_name: category.to_string(),
            year: month.year(),
            month: month.month(),
            amount_limit: budget.amount_limit,
        })
    }

    /// Budgets for a month, in the order they were first created
    pub fn list_budgets(&self, month: YearMonth) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, category_name, year, month, amount_limit
             FROM budgets WHERE year = ? AND month = ? ORDER BY id",
        )?;

        let budgets = stmt
            .query_map(params![month.year(), month.month()], |row| {
                Ok(Budget {
                    id: row.get(0)?,
                    category_name: row.get(1)?,
                    year: row.get(2)?,
                    month: row.get(3)?,
                    amount_limit: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }
}
