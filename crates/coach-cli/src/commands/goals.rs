//! Savings goal commands

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use coach_core::db::Database;
use coach_core::models::{GoalStatus, NewGoal};

use super::truncate;

fn parse_date(s: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
}

pub fn cmd_goals_list(db: &Database) -> Result<()> {
    let goals = db.list_goals()?;

    if goals.is_empty() {
        println!("No goals yet. Create one with:");
        println!("  coach goals add \"Emergency fund\" --target 1000 --by 2026-12-31");
        return Ok(());
    }

    println!();
    println!("🎯 Savings Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    for goal in goals {
        let icon = match goal.status {
            GoalStatus::Completed => "✅",
            GoalStatus::Active => "⏳",
            GoalStatus::Paused => "⏸️ ",
        };
        println!(
            "   {} [{}] {:<20} ${:>9.2} / ${:>9.2}  by {}",
            icon,
            goal.id,
            truncate(&goal.name, 20),
            goal.current_amount,
            goal.target_amount,
            goal.target_date
        );
    }

    Ok(())
}

pub fn cmd_goals_add(
    db: &Database,
    name: &str,
    target: f64,
    by: &str,
    start: Option<&str>,
) -> Result<()> {
    let target_date = parse_date(by, "--by")?;
    let start_date = match start {
        Some(s) => parse_date(s, "--start")?,
        None => Utc::now().date_naive(),
    };

    let goal = db
        .create_goal(&NewGoal {
            name: name.to_string(),
            target_amount: target,
            start_date,
            target_date,
        })
        .context("Failed to create goal")?;

    println!(
        "✅ Created goal #{}: {} (${:.2} by {})",
        goal.id, goal.name, goal.target_amount, goal.target_date
    );

    Ok(())
}

pub fn cmd_goals_contribute(db: &Database, id: i64, amount: f64) -> Result<()> {
    let goal = db
        .contribute_to_goal(id, amount)
        .with_context(|| format!("Failed to contribute to goal {}", id))?;

    println!(
        "💵 Added ${:.2} to {} (${:.2} / ${:.2})",
        amount, goal.name, goal.current_amount, goal.target_amount
    );
    if goal.status == GoalStatus::Completed {
        println!("🎉 Goal reached!");
    }

    Ok(())
}

pub fn cmd_goals_progress(db: &Database) -> Result<()> {
    let progress = db.goals_progress(Utc::now().date_naive())?;

    if progress.is_empty() {
        println!("No goals yet.");
        return Ok(());
    }

    println!();
    println!("📅 Goal Progress");
    println!("   ─────────────────────────────────────────────────────────────");

    for p in progress {
        println!(
            "   {:<20} {:>5.1}%  ${:>9.2}/month for {} month(s)",
            truncate(&p.name, 20),
            p.percent_complete,
            p.monthly_needed,
            p.months_left
        );
        println!("      {}", p.message);
    }

    Ok(())
}
