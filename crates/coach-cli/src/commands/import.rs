//! Import and transaction listing commands

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use coach_core::{db::Database, models::SignConvention, CoachConfig};

use super::{format_amount, truncate};

pub fn cmd_import(
    db: &Database,
    file: &Path,
    expenses_positive: bool,
    config: &CoachConfig,
) -> Result<()> {
    let convention = if expenses_positive {
        SignConvention::ExpensesPositive
    } else {
        config.sign_convention
    };

    println!("📥 Importing {} ({})...", file.display(), convention);

    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;
    let stats = db
        .import_csv(csv_file, convention, config)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    println!("   Found {} transactions", stats.parsed);
    println!();
    println!("✅ Import complete!");
    println!("   Imported: {}", stats.inserted);
    if stats.duplicates > 0 {
        println!("   Skipped (duplicates): {}", stats.duplicates);
    }
    if stats.categories_created > 0 {
        println!("   New categories: {}", stats.categories_created);
    }

    Ok(())
}

pub fn cmd_transactions_list(db: &Database, limit: i64) -> Result<()> {
    let transactions = db.list_transactions(limit.max(1), 0)?;

    if transactions.is_empty() {
        println!("No transactions found. Import some with:");
        println!("  coach import --file spending.csv");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions ({} total)", db.count_transactions()?);
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        println!(
            "   {} │ {:>10} │ {:<16} │ {}",
            tx.date,
            format_amount(tx.amount),
            truncate(&tx.category, 16),
            truncate(&tx.description, 30)
        );
    }

    Ok(())
}
