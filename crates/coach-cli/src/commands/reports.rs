//! Report command implementations

use anyhow::Result;
use chrono::Utc;
use coach_core::db::Database;
use coach_core::models::BudgetStatus;
use coach_core::CoachConfig;

use super::{parse_month, truncate};

fn status_icon(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::OnTrack => "✅",
        BudgetStatus::NearLimit => "⚠️ ",
        BudgetStatus::OverBudget => "🔴",
    }
}

pub fn cmd_summary(db: &Database, month: &str) -> Result<()> {
    let month = parse_month(month)?;
    let summary = db.monthly_summary(month)?;

    println!();
    println!("📊 Spending Summary: {}", month);
    println!("   ─────────────────────────────────────────");

    if summary.by_category.is_empty() {
        println!("   No spending recorded for this month.");
    }

    for cat in &summary.by_category {
        let pct = if summary.total_spent > 0.0 {
            cat.total_spent / summary.total_spent * 100.0
        } else {
            0.0
        };
        println!(
            "   {:<20} ${:>10.2}  ({:>5.1}%)",
            truncate(&cat.category_name, 20),
            cat.total_spent,
            pct
        );
    }

    println!("   ─────────────────────────────────────────");
    println!("   {:<20} ${:>10.2}", "Total spent", summary.total_spent);
    println!("   {:<20} ${:>10.2}", "Total income", summary.total_income);

    Ok(())
}

pub fn cmd_trajectory(db: &Database, months: usize) -> Result<()> {
    let trajectory = db.trajectory(months)?;

    if trajectory.months.is_empty() {
        println!("No transactions found. Import some with:");
        println!("  coach import --file spending.csv");
        return Ok(());
    }

    println!();
    println!("📈 Spending Trajectory");
    println!("   ─────────────────────────────");

    let max = trajectory
        .months
        .iter()
        .map(|m| m.total_spent)
        .fold(0.0_f64, f64::max);

    for m in &trajectory.months {
        let bar_len = if max > 0.0 {
            ((m.total_spent / max) * 30.0).round() as usize
        } else {
            0
        };
        println!(
            "   {}-{:02}  ${:>10.2}  {}",
            m.year,
            m.month,
            m.total_spent,
            "█".repeat(bar_len)
        );
    }

    if let Some(jump) = &trajectory.biggest_jump {
        println!();
        println!(
            "   Biggest change: {}-{:02} → {}-{:02} ({:+.2})",
            jump.from_year, jump.from_month, jump.to_year, jump.to_month, jump.delta
        );
    }

    if let Some(jump) = &trajectory.category_jump {
        let pct = jump
            .percentage_change
            .map(|p| format!(" ({:+.1}%)", p))
            .unwrap_or_default();
        println!(
            "   Biggest category change: {} {}-{:02} → {}-{:02} {:+.2}{}",
            jump.category_name,
            jump.from_year,
            jump.from_month,
            jump.to_year,
            jump.to_month,
            jump.absolute_change,
            pct
        );
    }

    Ok(())
}

pub fn cmd_insights(db: &Database, month: &str, threshold: f64) -> Result<()> {
    let month = parse_month(month)?;
    let insights = db.budget_insights(month, threshold)?;

    if insights.is_empty() {
        println!("No budgets set for {}. Add one with:", month);
        println!("  coach budget set --category Groceries --month {} --limit 400", month);
        return Ok(());
    }

    println!();
    println!("💡 Budget Insights: {}", month);
    println!("   ─────────────────────────────────────────────────────────────");

    for insight in &insights {
        println!(
            "   {} {:<20} ${:>9.2} / ${:>9.2}",
            status_icon(insight.status),
            truncate(&insight.category_name, 20),
            insight.spent,
            insight.amount_limit
        );
        println!("      {}", insight.message);
    }

    Ok(())
}

pub fn cmd_recommend(db: &Database, month: &str, config: &CoachConfig) -> Result<()> {
    let month = parse_month(month)?;
    let today = Utc::now().date_naive();
    let report = db.recommendations(month, config.near_limit_threshold, today)?;

    println!();
    println!("🧭 Recommendations: {}", month);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total spent: ${:.2}", report.total_spent);

    if report.spend_recommendations.is_empty() {
        println!("   Nothing to rebalance this month.");
    }

    for rec in &report.spend_recommendations {
        println!();
        println!("   • {}", rec.reason);
        println!("     {}", rec.action);
    }

    if let Some(highlight) = &report.goal_highlight {
        println!();
        println!("   🎯 {}", highlight);
    }

    Ok(())
}
