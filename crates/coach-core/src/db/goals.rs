//! Savings goal operations

use rusqlite::{params, OptionalExtension, TransactionBehavior};
use tracing::info;

use super::{parse_date_column, Database};
use crate::analysis::goals::{apply_contribution, validate_goal};
use crate::error::{Error, Result};
use crate::models::{Goal, GoalStatus, NewGoal};

const SELECT_GOALS: &str = "SELECT id, name, target_amount, current_amount, start_date, target_date, status FROM goals";

impl Database {
    /// Create a new active goal with nothing saved yet
    pub fn create_goal(&self, goal: &NewGoal) -> Result<Goal> {
        let name = goal.name.trim();
        validate_goal(name, goal.target_amount, goal.start_date, goal.target_date)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO goals (name, target_amount, start_date, target_date, status) VALUES (?, ?, ?, ?, ?)",
            params![
                name,
                goal.target_amount,
                goal.start_date.to_string(),
                goal.target_date.to_string(),
                GoalStatus::Active.as_str(),
            ],
        )?;
        let id = conn.last_insert_rowid();

        info!(id, name = %name, target = goal.target_amount, "Goal created");

        Ok(Goal {
            id,
            name: name.to_string(),
            target_amount: goal.target_amount,
            current_amount: 0.0,
            start_date: goal.start_date,
            target_date: goal.target_date,
            status: GoalStatus::Active,
        })
    }

    pub fn get_goal(&self, id: i64) -> Result<Option<Goal>> {
        let conn = self.conn()?;
        let goal = conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_GOALS),
                params![id],
                Self::row_to_goal,
            )
            .optional()?;
        Ok(goal)
    }

    pub fn list_goals(&self) -> Result<Vec<Goal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_GOALS))?;

        let goals = stmt
            .query_map([], Self::row_to_goal)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(goals)
    }

    /// Add money to a goal, completing it once the target is reached
    ///
    /// The read and the write share one immediate transaction, so concurrent
    /// contributions to the same goal are serialized instead of overwriting
    /// each other.
    pub fn contribute_to_goal(&self, id: i64, amount: f64) -> Result<Goal> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut goal = tx
            .query_row(
                &format!("{} WHERE id = ?", SELECT_GOALS),
                params![id],
                Self::row_to_goal,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Goal {} not found", id)))?;

        apply_contribution(&mut goal, amount)?;

        tx.execute(
            "UPDATE goals SET current_amount = ?, status = ? WHERE id = ?",
            params![goal.current_amount, goal.status.as_str(), id],
        )?;
        tx.commit()?;

        info!(
            id,
            amount,
            current = goal.current_amount,
            status = %goal.status,
            "Goal contribution recorded"
        );
        Ok(goal)
    }

    fn row_to_goal(row: &rusqlite::Row) -> rusqlite::Result<Goal> {
        let start: String = row.get(4)?;
        let target: String = row.get(5)?;
        let status: String = row.get(6)?;
        Ok(Goal {
            id: row.get(0)?,
            name: row.get(1)?,
            target_amount: row.get(2)?,
            current_amount: row.get(3)?,
            start_date: parse_date_column(4, &start)?,
            target_date: parse_date_column(5, &target)?,
            status: status.parse().unwrap_or_default(),
        })
    }
}
