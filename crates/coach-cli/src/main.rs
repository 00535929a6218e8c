//! Coach CLI - Personal finance coach
//!
//! Usage:
//!   coach init                        Initialize database
//!   coach import --file spending.csv  Import a spending log
//!   coach summary --month 2025-03     Monthly totals by category
//!   coach serve --port 3000           Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Import {
            file,
            expenses_positive,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_import(&db, &file, expenses_positive, &config)
        }
        Commands::Transactions { limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_transactions_list(&db, limit)
        }
        Commands::Summary { month } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_summary(&db, &month)
        }
        Commands::Trajectory { months } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_trajectory(&db, months.unwrap_or(config.trajectory_months))
        }
        Commands::Budget { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                BudgetAction::Set {
                    category,
                    month,
                    limit,
                } => commands::cmd_budget_set(&db, &category, &month, limit),
                BudgetAction::List { month } => commands::cmd_budget_list(&db, &month),
            }
        }
        Commands::Insights { month, threshold } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_insights(
                &db,
                &month,
                threshold.unwrap_or(config.near_limit_threshold),
            )
        }
        Commands::Recommend { month } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_recommend(&db, &month, &config)
        }
        Commands::Goals { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(GoalsAction::List) => commands::cmd_goals_list(&db),
                Some(GoalsAction::Add {
                    name,
                    target,
                    by,
                    start,
                }) => commands::cmd_goals_add(&db, &name, target, &by, start.as_deref()),
                Some(GoalsAction::Contribute { id, amount }) => {
                    commands::cmd_goals_contribute(&db, id, amount)
                }
                Some(GoalsAction::Progress) => commands::cmd_goals_progress(&db),
            }
        }
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(&cli.db, &host, port, no_auth, cli.no_encrypt, config).await,
    }
}
