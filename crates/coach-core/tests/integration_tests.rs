//! Integration tests for coach-core
//!
//! These tests exercise the full import → budget → report workflow through
//! the public API.

use chrono::NaiveDate;
use coach_core::{
    db::Database,
    models::{BudgetStatus, NewBudget, NewGoal, SignConvention},
    CoachConfig, Error, YearMonth,
};

/// Spending log in the "expenses positive" style, three months of data
fn spending_log_csv() -> &'static str {
    r#"date,category,amount,description
2024-01-03 09:12:00+0000,Coffe,4.20,Flat white
2024-01-10,Groceries,300.00,Weekly shop
2024-01-22,Restuarant,700.00,Team dinner
2024-02-02,Groceries,450.00,Weekly shop
2024-02-14,Restuarant,1050.00,Valentine's
2024-03-05,Groceries,500.00,Weekly shop
2024-03-18,Film/enjoyment,700.00,Festival pass"#
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn seeded_db() -> Database {
    let db = Database::in_memory().expect("Failed to create test database");
    let config = CoachConfig::embedded().expect("Embedded config should parse");
    db.import_csv(
        spending_log_csv().as_bytes(),
        SignConvention::ExpensesPositive,
        &config,
    )
    .expect("Import should succeed");
    db
}

// =============================================================================
// Import
// =============================================================================

#[test]
fn test_import_is_idempotent() {
    let db = Database::in_memory().unwrap();
    let config = CoachConfig::embedded().unwrap();

    let first = db
        .import_csv(spending_log_csv().as_bytes(), SignConvention::ExpensesPositive, &config)
        .unwrap();
    assert_eq!(first.inserted, 7);
    assert_eq!(first.categories_created, 4);

    let second = db
        .import_csv(spending_log_csv().as_bytes(), SignConvention::ExpensesPositive, &config)
        .unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.duplicates, 7);
    assert_eq!(db.count_transactions().unwrap(), 7);
}

#[test]
fn test_positive_expenses_stored_negative() {
    let db = seeded_db();
    let txs = db.list_transactions(100, 0).unwrap();
    assert!(txs.iter().all(|t| t.amount < 0.0));
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn test_monthly_summary_uses_display_names() {
    let db = seeded_db();
    let summary = db.monthly_summary(YearMonth::new(2024, 1).unwrap()).unwrap();

    assert!((summary.total_spent - 1004.2).abs() < 1e-9);
    let names: Vec<_> = summary
        .by_category
        .iter()
        .map(|c| c.category_name.as_str())
        .collect();
    assert_eq!(names, vec!["Restaurant", "Groceries", "Coffee"]);

    let sum: f64 = summary.by_category.iter().map(|c| c.total_spent).sum();
    assert!((sum - summary.total_spent).abs() < 1e-6);
}

#[test]
fn test_summary_json_rounds_money() {
    let db = seeded_db();
    let summary = db.monthly_summary(YearMonth::new(2024, 1).unwrap()).unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["total_spent"], 1004.2);
    assert_eq!(json["by_category"][0]["category_name"], "Restaurant");
}

#[test]
fn test_trajectory_workflow() {
    let db = seeded_db();
    let trajectory = db.trajectory(0).unwrap();

    let totals: Vec<_> = trajectory
        .months
        .iter()
        .map(|m| (m.month, m.total_spent))
        .collect();
    assert_eq!(totals.len(), 3);
    assert!((totals[0].1 - 1004.2).abs() < 1e-9);
    assert!((totals[1].1 - 1500.0).abs() < 1e-9);
    assert!((totals[2].1 - 1200.0).abs() < 1e-9);

    let jump = trajectory.biggest_jump.unwrap();
    assert_eq!((jump.from_month, jump.to_month), (1, 2));

    let category_jump = trajectory.category_jump.unwrap();
    assert_eq!(category_jump.category_name, "Restaurant");
    assert!((category_jump.absolute_change - 350.0).abs() < 1e-9);
    assert!((category_jump.percentage_change.unwrap() - 50.0).abs() < 1e-9);

    // A window of one month has nothing to compare
    let last = db.trajectory(1).unwrap();
    assert_eq!(last.months.len(), 1);
    assert!(last.biggest_jump.is_none());
}

#[test]
fn test_budget_and_recommendation_workflow() {
    let db = seeded_db();
    let feb = YearMonth::new(2024, 2).unwrap();

    for (category, limit) in [("Restaurant", 1000.0), ("Groceries", 500.0)] {
        db.upsert_budget(&NewBudget {
            category_name: category.to_string(),
            year: 2024,
            month: 2,
            amount_limit: limit,
        })
        .unwrap();
    }

    let insights = db.budget_insights(feb, 0.8).unwrap();
    assert_eq!(insights[0].status, BudgetStatus::OverBudget);
    assert_eq!(insights[1].status, BudgetStatus::NearLimit);

    let report = db.recommendations(feb, 0.8, date("2024-02-20")).unwrap();
    assert!((report.total_spent - 1500.0).abs() < 1e-9);
    // No on-track budgets means no slack: both become direct reductions
    assert_eq!(report.spend_recommendations.len(), 2);
    assert!(report
        .spend_recommendations
        .iter()
        .all(|r| r.category_to.is_none()));
    assert!((report.spend_recommendations[0].amount - 50.0).abs() < 1e-9);
    assert!(report.goal_highlight.is_none());
}

#[test]
fn test_recommendations_without_budgets() {
    let db = seeded_db();
    let report = db
        .recommendations(YearMonth::new(2024, 3).unwrap(), 0.8, date("2024-03-20"))
        .unwrap();
    assert!(report.spend_recommendations.is_empty());
    assert_eq!(
        report.goal_highlight.as_deref(),
        Some("Set at least one category budget to unlock recommendations.")
    );
}

#[test]
fn test_goal_workflow() {
    let db = seeded_db();
    let goal = db
        .create_goal(&NewGoal {
            name: "New laptop".to_string(),
            target_amount: 1500.0,
            start_date: date("2024-01-01"),
            target_date: date("2024-07-01"),
        })
        .unwrap();

    let progress = db.goals_progress(date("2024-01-01")).unwrap();
    assert_eq!(progress[0].months_left, 6);
    assert!((progress[0].monthly_needed - 250.0).abs() < 1e-9);

    db.contribute_to_goal(goal.id, 1500.0).unwrap();
    let progress = db.goals_progress(date("2024-02-01")).unwrap();
    assert_eq!(progress[0].monthly_needed, 0.0);
    assert!(progress[0].message.contains("is completed"));
}

#[test]
fn test_invalid_month_rejected() {
    assert!(matches!(YearMonth::new(2024, 13), Err(Error::InvalidMonth(_))));
    assert!(matches!("2024-00".parse::<YearMonth>(), Err(Error::InvalidMonth(_))));
}
