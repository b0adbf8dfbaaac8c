//! Shared command utilities

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use flowcast_core::import::{self, detect_format};
use flowcast_core::{AnalyticsConfig, Analyzer, Dashboard, ImportFormat, Transaction};
use tracing::{debug, info};

use crate::cli::InputArgs;

/// Resolve the analytics config, logging where it came from
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    let loaded = AnalyticsConfig::load(path)?;
    debug!(source = %loaded.source, "Resolved analytics config");
    Ok(loaded.config)
}

/// Parse an optional YYYY-MM-DD anchor, defaulting to today
pub fn parse_as_of(as_of: Option<&str>) -> Result<NaiveDate> {
    match as_of {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --as-of date format (use YYYY-MM-DD)"),
        None => Ok(Local::now().date_naive()),
    }
}

/// Read and parse a transaction file
pub fn load_transactions(file: &Path, format: Option<&str>) -> Result<Vec<Transaction>> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let format = match format {
        Some(f) => f.parse::<ImportFormat>().map_err(|e| anyhow::anyhow!(e))?,
        None => detect_format(file, &content).ok_or_else(|| {
            anyhow::anyhow!(
                "Could not detect format of {}. Use --format json|csv|provider",
                file.display()
            )
        })?,
    };

    let transactions = import::parse(content.as_bytes(), format)
        .with_context(|| format!("Failed to parse {} as {}", file.display(), format))?;

    info!(
        file = %file.display(),
        format = format.as_str(),
        count = transactions.len(),
        "Loaded transactions"
    );

    Ok(transactions)
}

/// Load input and run the full analysis
pub fn analyze_input(config_path: Option<&Path>, input: &InputArgs) -> Result<Dashboard> {
    let config = load_config(config_path)?;
    let anchor = parse_as_of(input.as_of.as_deref())?;
    let transactions = load_transactions(&input.file, input.format.as_deref())?;

    Ok(Analyzer::with_config(config).analyze_as_of(&transactions, anchor))
}
