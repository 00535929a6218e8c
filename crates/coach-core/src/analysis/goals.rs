//! Savings goal progress

use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};
use crate::models::{Goal, GoalProgress, GoalStatus};

/// Whole months from `today` until `target`, never less than 1
///
/// A partial final month does not count, so Jan 20 → Mar 10 is one month.
/// Targets today or in the past count as one month.
pub fn months_between(today: NaiveDate, target: NaiveDate) -> u32 {
    if target <= today {
        return 1;
    }

    let mut months = (target.year() - today.year()) * 12 + target.month() as i32
        - today.month() as i32;
    if target.day() < today.day() {
        months -= 1;
    }

    u32::try_from(months).unwrap_or(0).max(1)
}

/// Compute progress toward a goal as of `today`
pub fn goal_progress(goal: &Goal, today: NaiveDate) -> GoalProgress {
    let percent = if goal.target_amount > 0.0 {
        goal.current_amount / goal.target_amount * 100.0
    } else {
        0.0
    };

    let months_left = months_between(today, goal.target_date);
    let remaining = (goal.target_amount - goal.current_amount).max(0.0);
    let monthly_needed = remaining / months_left as f64;

    let message = if goal.status == GoalStatus::Completed {
        format!(
            "Goal '{}' is completed 🎉. You reached your target of ${:.2}.",
            goal.name, goal.target_amount
        )
    } else {
        format!(
            "You're {:.1}% of the way to '{}'. To hit ${:.2} by {}, you need to save \
             about ${:.2} per month for the next {} month(s).",
            percent, goal.name, goal.target_amount, goal.target_date, monthly_needed, months_left
        )
    };

    GoalProgress {
        id: goal.id,
        name: goal.name.clone(),
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
        percent_complete: percent,
        months_left,
        monthly_needed,
        status: goal.status,
        message,
    }
}

/// Add a contribution, completing the goal once the target is reached
pub fn apply_contribution(goal: &mut Goal, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidData(format!(
            "contribution must be a positive amount, got {}",
            amount
        )));
    }

    goal.current_amount += amount;
    if goal.current_amount >= goal.target_amount {
        goal.status = GoalStatus::Completed;
    }
    Ok(())
}

/// Validate a goal definition before it is stored
pub fn validate_goal(name: &str, target_amount: f64, start: NaiveDate, target: NaiveDate) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidData("goal name cannot be empty".into()));
    }
    if !target_amount.is_finite() || target_amount <= 0.0 {
        return Err(Error::InvalidData(format!(
            "target_amount must be positive, got {}",
            target_amount
        )));
    }
    if target < start {
        return Err(Error::InvalidData(format!(
            "target_date {} is before start_date {}",
            target, start
        )));
    }
    Ok(())
}
