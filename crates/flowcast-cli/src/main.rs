//! Flowcast CLI - Transaction analytics for the personal finance dashboard
//!
//! Usage:
//!   flowcast analyze --file tx.json     Full dashboard
//!   flowcast report subscriptions -f F  One view at a time
//!   flowcast demo --seed 7 -o demo.csv  Generate synthetic transactions
//!   flowcast config                     Show effective thresholds

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
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
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Analyze { input, json } => commands::cmd_analyze(config_path, &input, json),
        Commands::Report { report_type } => match report_type {
            ReportType::Months { input } => commands::cmd_report_months(config_path, &input),
            ReportType::Categories { input } => {
                commands::cmd_report_categories(config_path, &input)
            }
            ReportType::Subscriptions { input } => {
                commands::cmd_report_subscriptions(config_path, &input)
            }
            ReportType::Forecast { input } => commands::cmd_report_forecast(config_path, &input),
            ReportType::Insights { input } => commands::cmd_report_insights(config_path, &input),
        },
        Commands::Demo {
            seed,
            as_of,
            output,
            csv,
        } => commands::cmd_demo(seed, as_of.as_deref(), output.as_deref(), csv),
        Commands::Config => commands::cmd_config(config_path),
    }
}
