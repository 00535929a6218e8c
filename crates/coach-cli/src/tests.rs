//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use coach_core::db::Database;
use coach_core::models::GoalStatus;
use coach_core::{CoachConfig, YearMonth};

use crate::commands::{self, truncate};

const SPENDING_CSV: &str = "\
date,category,amount,description
2025-02-03,Groceries,82.10,Market
2025-02-10,Coffe,4.50,Latte
2025-03-01,Groceries,120.00,Market
2025-03-05,Restuarant,45.00,Dinner
2025-03-28,Salary,-2000.00,Paycheck
";

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn config() -> CoachConfig {
    CoachConfig::embedded().unwrap()
}

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn seeded_db() -> Database {
    let db = setup_test_db();
    let file = write_csv(SPENDING_CSV);
    commands::cmd_import(&db, file.path(), true, &config()).unwrap();
    db
}

// ========== Import Command Tests ==========

#[test]
fn test_cmd_import_expenses_positive() {
    let db = seeded_db();
    assert_eq!(db.count_transactions().unwrap(), 5);

    let summary = db
        .monthly_summary(YearMonth::new(2025, 3).unwrap())
        .unwrap();
    assert!((summary.total_spent - 165.0).abs() < 1e-9);
    assert!((summary.total_income - 2000.0).abs() < 1e-9);
}

#[test]
fn test_cmd_import_twice_skips_duplicates() {
    let db = seeded_db();
    let file = write_csv(SPENDING_CSV);
    commands::cmd_import(&db, file.path(), true, &config()).unwrap();
    assert_eq!(db.count_transactions().unwrap(), 5);
}

#[test]
fn test_cmd_import_missing_file() {
    let db = setup_test_db();
    let result = commands::cmd_import(
        &db,
        std::path::Path::new("/nonexistent/spending.csv"),
        false,
        &config(),
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_import_bad_row_imports_nothing() {
    let db = setup_test_db();
    let file = write_csv("date,category,amount\n2025-03-01,Groceries,12.00\nnot-a-date,Groceries,3.00\n");
    let result = commands::cmd_import(&db, file.path(), true, &config());
    assert!(result.is_err());
    assert_eq!(db.count_transactions().unwrap(), 0);
}

#[test]
fn test_cmd_transactions_list() {
    let db = seeded_db();
    assert!(commands::cmd_transactions_list(&db, 3).is_ok());

    let empty = setup_test_db();
    assert!(commands::cmd_transactions_list(&empty, 20).is_ok());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_summary() {
    let db = seeded_db();
    assert!(commands::cmd_summary(&db, "2025-03").is_ok());
    assert!(commands::cmd_summary(&db, "2031-01").is_ok());
}

#[test]
fn test_cmd_summary_invalid_month() {
    let db = seeded_db();
    assert!(commands::cmd_summary(&db, "2025-13").is_err());
    assert!(commands::cmd_summary(&db, "March").is_err());
}

#[test]
fn test_cmd_trajectory() {
    let db = seeded_db();
    assert!(commands::cmd_trajectory(&db, 6).is_ok());
    assert!(commands::cmd_trajectory(&db, 0).is_ok());
    assert!(commands::cmd_trajectory(&setup_test_db(), 6).is_ok());
}

#[test]
fn test_cmd_insights_and_recommend() {
    let db = seeded_db();
    assert!(commands::cmd_insights(&db, "2025-03", 0.8).is_ok());

    commands::cmd_budget_set(&db, "Groceries", "2025-03", 100.0).unwrap();
    commands::cmd_budget_set(&db, "Restaurant", "2025-03", 200.0).unwrap();
    assert!(commands::cmd_insights(&db, "2025-03", 0.8).is_ok());
    assert!(commands::cmd_insights(&db, "2025-03", 1.5).is_err());
    assert!(commands::cmd_recommend(&db, "2025-03", &config()).is_ok());

    let report = db
        .recommendations(
            YearMonth::new(2025, 3).unwrap(),
            0.8,
            chrono::NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        )
        .unwrap();
    assert_eq!(report.spend_recommendations.len(), 1);
    assert_eq!(report.spend_recommendations[0].category_from, "Groceries");
    assert!((report.spend_recommendations[0].amount - 20.0).abs() < 1e-9);
}

// ========== Budget Command Tests ==========

#[test]
fn test_cmd_budget_set_replaces_limit() {
    let db = seeded_db();
    commands::cmd_budget_set(&db, "Groceries", "2025-03", 100.0).unwrap();
    commands::cmd_budget_set(&db, "Groceries", "2025-03", 250.0).unwrap();

    let budgets = db.list_budgets(YearMonth::new(2025, 3).unwrap()).unwrap();
    assert_eq!(budgets.len(), 1);
    assert!((budgets[0].amount_limit - 250.0).abs() < 1e-9);
    assert!(commands::cmd_budget_list(&db, "2025-03").is_ok());
}

#[test]
fn test_cmd_budget_set_rejects_bad_input() {
    let db = seeded_db();
    assert!(commands::cmd_budget_set(&db, "Groceries", "2025-03", -5.0).is_err());
    assert!(commands::cmd_budget_set(&db, "Unknown", "2025-03", 50.0).is_err());
    assert!(commands::cmd_budget_set(&db, "Groceries", "2025-00", 50.0).is_err());
}

// ========== Goal Command Tests ==========

#[test]
fn test_cmd_goals_lifecycle() {
    let db = setup_test_db();
    assert!(commands::cmd_goals_list(&db).is_ok());

    commands::cmd_goals_add(&db, "Bike", 300.0, "2099-06-30", Some("2025-01-01")).unwrap();
    let goals = db.list_goals().unwrap();
    assert_eq!(goals.len(), 1);
    let id = goals[0].id;

    commands::cmd_goals_contribute(&db, id, 100.0).unwrap();
    assert!(commands::cmd_goals_progress(&db).is_ok());

    commands::cmd_goals_contribute(&db, id, 200.0).unwrap();
    let goal = db.get_goal(id).unwrap().unwrap();
    assert_eq!(goal.status, GoalStatus::Completed);
    assert!(commands::cmd_goals_list(&db).is_ok());
}

#[test]
fn test_cmd_goals_errors() {
    let db = setup_test_db();
    assert!(commands::cmd_goals_add(&db, "Bike", 300.0, "next year", None).is_err());
    assert!(commands::cmd_goals_add(&db, "Bike", 300.0, "2020-01-01", Some("2025-01-01")).is_err());
    assert!(commands::cmd_goals_contribute(&db, 42, 10.0).is_err());
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer description", 10), "a much ...");
    assert_eq!(truncate("Café crème brûlée", 8), "Café ...");
}

#[test]
fn test_parse_month() {
    let month = commands::parse_month("2025-03").unwrap();
    assert_eq!(month.year(), 2025);
    assert_eq!(month.month(), 3);
    assert!(commands::parse_month("2025/03").is_err());
}

#[test]
fn test_load_config_missing_explicit_path() {
    let result = commands::load_config(Some(std::path::Path::new("/nonexistent/coach.toml")));
    assert!(result.is_err());
}
