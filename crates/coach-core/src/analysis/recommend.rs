//! Spend recommendations built from budget insights

use crate::models::{
    BudgetInsight, BudgetStatus, GoalProgress, GoalStatus, RecommendationsReport,
    SpendRecommendation,
};
use crate::money::round_cents;
use crate::month::YearMonth;

/// Share of a near-limit budget to try to free up
const NEAR_LIMIT_TRIM: f64 = 0.1;

const NO_BUDGETS_HIGHLIGHT: &str = "Set at least one category budget to unlock recommendations.";

/// Suggest reallocations for over/near-limit categories
///
/// On-track budgets with room left act as slack, largest room first. Each
/// flagged category draws from the roomiest slack until it is used up; with
/// no slack at all, a direct reduction is suggested instead.
pub fn build_recommendations(
    month: YearMonth,
    total_spent: f64,
    insights: Vec<BudgetInsight>,
    goals: &[GoalProgress],
) -> RecommendationsReport {
    if insights.is_empty() {
        return RecommendationsReport {
            year: month.year(),
            month: month.month(),
            total_spent,
            spend_recommendations: vec![],
            goal_highlight: Some(NO_BUDGETS_HIGHLIGHT.to_string()),
            budget_insights: insights,
        };
    }

    let mut slack: Vec<(f64, &str)> = insights
        .iter()
        .filter(|i| i.status == BudgetStatus::OnTrack && i.remaining() > 0.0)
        .map(|i| (i.remaining(), i.category_name.as_str()))
        .collect();
    slack.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut recommendations = Vec::new();
    for insight in insights
        .iter()
        .filter(|i| i.status != BudgetStatus::OnTrack)
    {
        let needed = match insight.status {
            BudgetStatus::OverBudget => insight.spent - insight.amount_limit,
            _ => NEAR_LIMIT_TRIM * insight.amount_limit,
        };
        if needed <= 0.0 {
            continue;
        }

        let reason = format!(
            "{} spending is {} for {}.",
            insight.category_name,
            insight.status.label(),
            month
        );

        match slack.first_mut() {
            Some((room, target)) => {
                let amount = needed.min(*room);
                if amount <= 0.0 {
                    continue;
                }
                *room -= amount;

                recommendations.push(SpendRecommendation {
                    category_from: insight.category_name.clone(),
                    category_to: Some(target.to_string()),
                    amount: round_cents(amount),
                    reason,
                    action: format!(
                        "Try trimming about ${:.2} from {} and shifting that towards your {} / savings for this month.",
                        amount, insight.category_name, target
                    ),
                });
            }
            None => recommendations.push(SpendRecommendation {
                category_from: insight.category_name.clone(),
                category_to: None,
                amount: round_cents(needed),
                reason,
                action: format!(
                    "Try reducing your {} spend by about ${:.2} over the rest of the month to get back on track.",
                    insight.category_name, needed
                ),
            }),
        }
    }

    RecommendationsReport {
        year: month.year(),
        month: month.month(),
        total_spent,
        spend_recommendations: recommendations,
        goal_highlight: goal_highlight(goals),
        budget_insights: insights,
    }
}

/// Describe the active goal that needs the most per month
fn goal_highlight(goals: &[GoalProgress]) -> Option<String> {
    let mut top: Option<&GoalProgress> = None;
    for goal in goals.iter().filter(|g| g.status == GoalStatus::Active) {
        if top.map_or(true, |t| goal.monthly_needed > t.monthly_needed) {
            top = Some(goal);
        }
    }

    top.map(|g| {
        format!(
            "Top priority goal: '{}'. To stay on track you need about ${:.2}/month for the next {} month(s).",
            g.name, g.monthly_needed, g.months_left
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month() -> YearMonth {
        YearMonth::new(2025, 3).unwrap()
    }

    fn insight(category: &str, spent: f64, limit: f64, status: BudgetStatus) -> BudgetInsight {
        BudgetInsight {
            category_name: category.to_string(),
            year: 2025,
            month: 3,
            spent,
            amount_limit: limit,
            status,
            message: String::new(),
        }
    }

    fn progress(name: &str, monthly_needed: f64, status: GoalStatus) -> GoalProgress {
        GoalProgress {
            id: 1,
            name: name.to_string(),
            target_amount: 1000.0,
            current_amount: 0.0,
            percent_complete: 0.0,
            months_left: 4,
            monthly_needed,
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_no_budgets() {
        let report = build_recommendations(month(), 120.0, vec![], &[]);
        assert!(report.spend_recommendations.is_empty());
        assert_eq!(report.goal_highlight.as_deref(), Some(NO_BUDGETS_HIGHLIGHT));
        assert_eq!(report.total_spent, 120.0);
    }

    #[test]
    fn test_reallocates_from_slack() {
        let insights = vec![
            insight("Restaurant", 260.0, 200.0, BudgetStatus::OverBudget),
            insight("Groceries", 100.0, 400.0, BudgetStatus::OnTrack),
            insight("Coffee", 10.0, 50.0, BudgetStatus::OnTrack),
        ];

        let report = build_recommendations(month(), 370.0, insights, &[]);
        assert_eq!(report.spend_recommendations.len(), 1);

        let rec = &report.spend_recommendations[0];
        assert_eq!(rec.category_from, "Restaurant");
        assert_eq!(rec.category_to.as_deref(), Some("Groceries"));
        assert!((rec.amount - 60.0).abs() < 1e-9);
        assert_eq!(rec.reason, "Restaurant spending is over budget for 2025-03.");
        assert_eq!(
            rec.action,
            "Try trimming about $60.00 from Restaurant and shifting that towards your Groceries / savings for this month."
        );
        assert_eq!(report.budget_insights.len(), 3);
    }

    #[test]
    fn test_near_limit_trims_ten_percent() {
        let insights = vec![
            insight("Groceries", 450.0, 500.0, BudgetStatus::NearLimit),
            insight("Coffee", 0.0, 100.0, BudgetStatus::OnTrack),
        ];

        let report = build_recommendations(month(), 450.0, insights, &[]);
        let rec = &report.spend_recommendations[0];
        assert!((rec.amount - 50.0).abs() < 1e-9);
        assert_eq!(rec.reason, "Groceries spending is near limit for 2025-03.");
    }

    #[test]
    fn test_slack_is_consumed() {
        let insights = vec![
            insight("Restaurant", 300.0, 200.0, BudgetStatus::OverBudget),
            insight("Travel", 600.0, 500.0, BudgetStatus::OverBudget),
            insight("Coffee", 20.0, 50.0, BudgetStatus::OnTrack),
        ];

        let report = build_recommendations(month(), 920.0, insights, &[]);
        // Coffee's $30 of room is used up by Restaurant; Travel gets nothing
        assert_eq!(report.spend_recommendations.len(), 1);
        assert!((report.spend_recommendations[0].amount - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_direct_reduction_without_slack() {
        let insights = vec![insight("Restaurant", 230.0, 200.0, BudgetStatus::OverBudget)];

        let report = build_recommendations(month(), 230.0, insights, &[]);
        let rec = &report.spend_recommendations[0];
        assert!(rec.category_to.is_none());
        assert!((rec.amount - 30.0).abs() < 1e-9);
        assert_eq!(
            rec.action,
            "Try reducing your Restaurant spend by about $30.00 over the rest of the month to get back on track."
        );
    }

    #[test]
    fn test_goal_highlight_picks_most_demanding_active_goal() {
        let goals = vec![
            progress("Car", 100.0, GoalStatus::Active),
            progress("House", 900.0, GoalStatus::Completed),
            progress("Trip", 250.0, GoalStatus::Active),
        ];
        let insights = vec![insight("Coffee", 10.0, 50.0, BudgetStatus::OnTrack)];

        let report = build_recommendations(month(), 10.0, insights, &goals);
        assert_eq!(
            report.goal_highlight.as_deref(),
            Some("Top priority goal: 'Trip'. To stay on track you need about $250.00/month for the next 4 month(s).")
        );
    }

    #[test]
    fn test_no_active_goals_no_highlight() {
        let insights = vec![insight("Coffee", 10.0, 50.0, BudgetStatus::OnTrack)];
        let report = build_recommendations(month(), 10.0, insights, &[]);
        assert!(report.goal_highlight.is_none());
    }
}
