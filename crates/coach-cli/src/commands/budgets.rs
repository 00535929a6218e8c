//! Budget command implementations

use anyhow::{Context, Result};
use coach_core::db::Database;
use coach_core::models::NewBudget;

use super::{parse_month, truncate};

pub fn cmd_budget_set(db: &Database, category: &str, month: &str, limit: f64) -> Result<()> {
    let month = parse_month(month)?;
    let budget = db
        .upsert_budget(&NewBudget {
            category_name: category.to_string(),
            year: month.year(),
            month: month.month(),
            amount_limit: limit,
        })
        .with_context(|| format!("Failed to set budget for '{}'", category))?;

    println!(
        "✅ Budget set: {} → ${:.2} for {}",
        budget.category_name, budget.amount_limit, month
    );

    Ok(())
}

pub fn cmd_budget_list(db: &Database, month: &str) -> Result<()> {
    let month = parse_month(month)?;
    let budgets = db.list_budgets(month)?;

    if budgets.is_empty() {
        println!("No budgets set for {}.", month);
        return Ok(());
    }

    println!();
    println!("💰 Budgets: {}", month);
    println!("   ─────────────────────────────────");

    for budget in budgets {
        println!(
            "   {:<20} ${:>10.2}",
            truncate(&budget.category_name, 20),
            budget.amount_limit
        );
    }

    Ok(())
}
