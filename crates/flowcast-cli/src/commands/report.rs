//! Report command implementations

use std::path::Path;

use anyhow::Result;
use flowcast_core::detect::{total_potential_savings, zombies};
use flowcast_core::{
    CategoryAggregate, Insight, InsightKind, MonthlyAggregate, PredictionPoint,
    SubscriptionRecord,
};

use super::{analyze_input, truncate};
use crate::cli::InputArgs;

const RULE: &str = "   ─────────────────────────────────────────────────────────────";

pub fn cmd_report_months(config_path: Option<&Path>, input: &InputArgs) -> Result<()> {
    let dashboard = analyze_input(config_path, input)?;
    print_months(&dashboard.monthly);
    Ok(())
}

pub fn cmd_report_categories(config_path: Option<&Path>, input: &InputArgs) -> Result<()> {
    let dashboard = analyze_input(config_path, input)?;
    print_categories(&dashboard.categories);
    Ok(())
}

pub fn cmd_report_subscriptions(config_path: Option<&Path>, input: &InputArgs) -> Result<()> {
    let dashboard = analyze_input(config_path, input)?;
    print_subscriptions(&dashboard.subscriptions);
    Ok(())
}

pub fn cmd_report_forecast(config_path: Option<&Path>, input: &InputArgs) -> Result<()> {
    let dashboard = analyze_input(config_path, input)?;
    print_forecast(&dashboard.predictions);
    Ok(())
}

pub fn cmd_report_insights(config_path: Option<&Path>, input: &InputArgs) -> Result<()> {
    let dashboard = analyze_input(config_path, input)?;
    print_insights(&dashboard.insights);
    Ok(())
}

pub fn print_months(monthly: &[MonthlyAggregate]) {
    println!();
    println!("📅 Monthly Cash Flow");
    println!("{}", RULE);

    if monthly.is_empty() {
        println!("   No transactions.");
        return;
    }

    for m in monthly {
        let net = m.net();
        let net_icon = if net >= 0.0 { "🟢" } else { "🔴" };
        println!(
            "   {:8} │ in {:>11} │ out {:>11} │ {} {:>11}",
            m.label,
            format!("${:.2}", m.income),
            format!("${:.2}", m.outcome),
            net_icon,
            format!("${:.2}", net)
        );
    }
}

pub fn print_categories(categories: &[CategoryAggregate]) {
    println!();
    println!("🏷️  Spending by Category");
    println!("{}", RULE);

    if categories.is_empty() {
        println!("   No spending.");
        return;
    }

    let total: f64 = categories.iter().map(|c| c.amount).sum();
    for c in categories {
        let share = if total > 0.0 { c.amount / total * 100.0 } else { 0.0 };
        println!(
            "   {:18} │ {:>11} │ {:>5.1}% │ {:>4} txns │ {}",
            truncate(&c.category, 18),
            format!("${:.2}", c.amount),
            share,
            c.count,
            c.color
        );
    }
}

pub fn print_subscriptions(subscriptions: &[SubscriptionRecord]) {
    println!();
    println!("📋 Recurring Subscriptions");
    println!("{}", RULE);

    if subscriptions.is_empty() {
        println!("   No recurring charges found.");
        return;
    }

    for sub in subscriptions {
        let status_icon = if sub.is_zombie { "🧟" } else { "✅" };
        println!(
            "   {} {} {:22} │ {:>8}/mo │ {:>9}/yr │ seen {}x",
            status_icon,
            sub.logo,
            truncate(&sub.merchant, 22),
            format!("${:.2}", sub.monthly_spend),
            format!("${:.2}", sub.annual_spend),
            sub.occurrences
        );
    }

    if let Some(footer) = zombie_footer(subscriptions) {
        println!("{}", RULE);
        println!("{}", footer);
    }
}

/// Zombie count and yearly savings line, None when there are no zombies
pub fn zombie_footer(subscriptions: &[SubscriptionRecord]) -> Option<String> {
    let zombie_count = zombies(subscriptions).len();
    if zombie_count == 0 {
        return None;
    }

    Some(format!(
        "   🧟 {} zombie subscription{} │ up to ${:.2}/year to save",
        zombie_count,
        if zombie_count == 1 { "" } else { "s" },
        total_potential_savings(subscriptions)
    ))
}

pub fn print_forecast(predictions: &[PredictionPoint]) {
    println!();
    println!("🔮 Cash-Flow Projection");
    println!("{}", RULE);

    if predictions.is_empty() {
        println!("   Not enough history to project (need at least 3 months).");
        return;
    }

    for p in predictions {
        println!(
            "   {:8} │ in {:>11} │ out {:>11} │ net {:>11}",
            p.label,
            format!("${:.2}", p.income),
            format!("${:.2}", p.outcome),
            format!("${:.2}", p.income - p.outcome)
        );
    }
}

pub fn print_insights(insights: &[Insight]) {
    println!();
    println!("💡 Insights");
    println!("{}", RULE);

    if insights.is_empty() {
        println!("   Nothing to report yet.");
        return;
    }

    for insight in insights {
        let tag = match insight.kind {
            InsightKind::Positive => "good",
            InsightKind::Neutral => "note",
            InsightKind::Warning => "warn",
            InsightKind::Suggestion => "tip",
            InsightKind::Info => "info",
        };
        println!("   {} [{}] {}", insight.icon, tag, insight.title);
        println!("      {}", insight.message);
    }
}
