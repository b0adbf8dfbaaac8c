//! Analyze command implementation

use std::path::Path;

use anyhow::Result;
use flowcast_core::Dashboard;

use super::{
    analyze_input, print_categories, print_forecast, print_insights, print_months,
    print_subscriptions,
};
use crate::cli::InputArgs;

pub fn cmd_analyze(config_path: Option<&Path>, input: &InputArgs, json: bool) -> Result<()> {
    let dashboard = analyze_input(config_path, input)?;

    if json {
        println!("{}", dashboard_json(&dashboard)?);
        return Ok(());
    }

    let summary = dashboard.summary();

    println!();
    println!("📊 Flowcast Dashboard");
    println!("{}", "═".repeat(64));
    println!("   Income:            ${:.2}", summary.total_income);
    println!("   Outcome:           ${:.2}", summary.total_outcome);
    println!("   Net:               ${:.2}", summary.net);
    println!("   Savings rate:      {:.1}%", summary.savings_rate);
    if summary.zombie_count > 0 {
        println!(
            "   Zombies:           {} (save up to ${:.2}/year)",
            summary.zombie_count, summary.potential_savings
        );
    }

    print_months(&dashboard.monthly);
    print_categories(&dashboard.categories);
    print_subscriptions(&dashboard.subscriptions);
    print_forecast(&dashboard.predictions);
    print_insights(&dashboard.insights);

    Ok(())
}

/// Dashboard plus summary and combined timeline as pretty JSON
pub fn dashboard_json(dashboard: &Dashboard) -> Result<String> {
    let mut value = serde_json::to_value(dashboard)?;
    value["summary"] = serde_json::to_value(dashboard.summary())?;
    value["timeline"] = serde_json::to_value(dashboard.timeline())?;
    Ok(serde_json::to_string_pretty(&value)?)
}
