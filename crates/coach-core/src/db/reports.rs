//! Report queries
//!
//! Each report loads the rows it needs and hands them to `crate::analysis`.

use chrono::NaiveDate;
use tracing::debug;

use super::Database;
use crate::analysis;
use crate::error::Result;
use crate::models::{BudgetInsight, GoalProgress, MonthlySummary, RecommendationsReport, Trajectory};
use crate::month::YearMonth;

impl Database {
    /// Spending and income totals for one month
    pub fn monthly_summary(&self, month: YearMonth) -> Result<MonthlySummary> {
        let (start, end) = month.date_range();
        let transactions = self.list_transactions_between(start, end)?;
        debug!(month = %month, rows = transactions.len(), "Building monthly summary");

        Ok(analysis::monthly_summary(month, &transactions))
    }

    /// Classify each of the month's budgets against its spending
    pub fn budget_insights(&self, month: YearMonth, threshold: f64) -> Result<Vec<BudgetInsight>> {
        let summary = self.monthly_summary(month)?;
        let budgets = self.list_budgets(month)?;

        analysis::evaluate_budgets(month, &summary.by_category, &budgets, threshold)
    }

    /// Month-over-month totals over the last `window` months (0 = all)
    pub fn trajectory(&self, window: usize) -> Result<Trajectory> {
        let transactions = self.list_all_transactions()?;
        debug!(rows = transactions.len(), window, "Building trajectory");

        Ok(analysis::build_trajectory(&transactions, window))
    }

    /// Progress for every goal as of `today`
    pub fn goals_progress(&self, today: NaiveDate) -> Result<Vec<GoalProgress>> {
        Ok(self
            .list_goals()?
            .iter()
            .map(|goal| analysis::goal_progress(goal, today))
            .collect())
    }

    /// Reallocation suggestions for a month plus the top goal
    pub fn recommendations(
        &self,
        month: YearMonth,
        threshold: f64,
        today: NaiveDate,
    ) -> Result<RecommendationsReport> {
        let summary = self.monthly_summary(month)?;
        let budgets = self.list_budgets(month)?;
        let insights =
            analysis::evaluate_budgets(month, &summary.by_category, &budgets, threshold)?;
        let goals = self.goals_progress(today)?;

        Ok(analysis::build_recommendations(
            month,
            summary.total_spent,
            insights,
            &goals,
        ))
    }
}
