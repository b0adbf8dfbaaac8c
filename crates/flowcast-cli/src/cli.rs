//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Flowcast - Cash-flow analytics for your transactions
#[derive(Parser)]
#[command(name = "flowcast")]
#[command(about = "Transaction analytics: cash flow, subscriptions, projections and insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analytics threshold config (TOML)
    ///
    /// Defaults to ~/.config/flowcast/analytics.toml when present,
    /// otherwise the built-in thresholds.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where transactions come from and how to project them
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Transaction file (JSON, CSV or provider payload)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Input format: json, csv, provider (auto-detected if not specified)
    #[arg(long)]
    pub format: Option<String>,

    /// Anchor date for projections (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub as_of: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full analysis and print the dashboard
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a single dashboard view
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Generate synthetic demo transactions
    Demo {
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Last month to generate (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write CSV instead of JSON
        #[arg(long)]
        csv: bool,
    },

    /// Show the effective analytics configuration
    Config,
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Income and outcome per calendar month
    Months {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Spend by category, highest first
    Categories {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Recurring merchants and zombie subscriptions
    Subscriptions {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Projected income and outcome
    Forecast {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Natural-language insights
    Insights {
        #[command(flatten)]
        input: InputArgs,
    },
}
