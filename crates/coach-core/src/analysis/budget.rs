//! Budget evaluation

use std::collections::HashMap;

use crate::config::validate_threshold;
use crate::error::{Error, Result};
use crate::models::{Budget, BudgetInsight, BudgetStatus, CategoryTotal};
use crate::month::YearMonth;

/// Classify a spend against a limit
///
/// `ratio >= 1` is over budget, `ratio >= threshold` is near the limit.
/// A boundary value goes to the stricter status.
pub fn classify(spent: f64, amount_limit: f64, threshold: f64) -> Result<BudgetStatus> {
    if amount_limit.is_nan() || amount_limit <= 0.0 {
        return Err(Error::InvalidBudget(format!(
            "amount_limit must be positive, got {}",
            amount_limit
        )));
    }

    let ratio = spent / amount_limit;
    Ok(if ratio >= 1.0 {
        BudgetStatus::OverBudget
    } else if ratio >= threshold {
        BudgetStatus::NearLimit
    } else {
        BudgetStatus::OnTrack
    })
}

/// Evaluate each budget for `month` against that month's category totals
///
/// Output follows budget order. Budgets for other months are skipped and
/// categories without a budget produce no insight.
pub fn evaluate_budgets(
    month: YearMonth,
    totals: &[CategoryTotal],
    budgets: &[Budget],
    threshold: f64,
) -> Result<Vec<BudgetInsight>> {
    let threshold = validate_threshold(threshold)?;

    let spent_by_category: HashMap<&str, f64> = totals
        .iter()
        .map(|c| (c.category_name.as_str(), c.total_spent))
        .collect();

    budgets
        .iter()
        .filter(|b| b.year == month.year() && b.month == month.month())
        .map(|budget| {
            let spent = spent_by_category
                .get(budget.category_name.as_str())
                .copied()
                .unwrap_or(0.0);
            let status = classify(spent, budget.amount_limit, threshold)?;

            Ok(BudgetInsight {
                category_name: budget.category_name.clone(),
                year: month.year(),
                month: month.month(),
                spent,
                amount_limit: budget.amount_limit,
                status,
                message: budget_message(&budget.category_name, month, spent, budget.amount_limit, status),
            })
        })
        .collect()
}

fn budget_message(
    category: &str,
    month: YearMonth,
    spent: f64,
    limit: f64,
    status: BudgetStatus,
) -> String {
    match status {
        BudgetStatus::OnTrack => format!(
            "Your {} spending is on track. You've spent ${:.2} out of your ${:.2} budget for {}.",
            category, spent, limit, month
        ),
        BudgetStatus::NearLimit => format!(
            "You're close to your {} budget for {}. You've spent ${:.2} out of ${:.2}. \
             Try to keep the remaining ${:.2} for the rest of the month.",
            category,
            month,
            spent,
            limit,
            limit - spent
        ),
        BudgetStatus::OverBudget => format!(
            "You've exceeded your {} budget of ${:.2} by ${:.2} this month.",
            category,
            limit,
            spent - limit
        ),
    }
}
