//! Subscription detection
//!
//! Detects:
//! - Recurring merchants: anything typed `subscription` or marked recurring
//! - Zombie subscriptions: rarely seen, or pricey entertainment
//! - Potential savings: annual spend of rarely seen subscriptions

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

use crate::config::DetectionConfig;
use crate::models::{SubscriptionRecord, Transaction};

/// Glyph shown for merchants that never supplied one
pub const DEFAULT_SUBSCRIPTION_LOGO: &str = "💳";

/// Identify recurring merchants using the default thresholds
pub fn identify_subscriptions(transactions: &[Transaction]) -> Vec<SubscriptionRecord> {
    identify_subscriptions_with(transactions, &DetectionConfig::default())
}

/// Per-merchant accumulator, filled in input order
struct MerchantTally {
    merchant: String,
    category: String,
    amount: f64,
    logo: Option<String>,
    dates: Vec<NaiveDate>,
}

/// Identify recurring merchants, highest annual spend first
pub fn identify_subscriptions_with(
    transactions: &[Transaction],
    config: &DetectionConfig,
) -> Vec<SubscriptionRecord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<MerchantTally> = Vec::new();

    for tx in transactions.iter().filter(|tx| tx.is_recurring_charge()) {
        let slot = *index.entry(tx.merchant.as_str()).or_insert_with(|| {
            tallies.push(MerchantTally {
                merchant: tx.merchant.clone(),
                category: tx.category.clone(),
                amount: tx.amount,
                logo: None,
                dates: Vec::new(),
            });
            tallies.len() - 1
        });

        let tally = &mut tallies[slot];
        // Intentional quirk: the last transaction processed wins, in input
        // order, not the latest by date. Callers rely on this.
        tally.category = tx.category.clone();
        tally.amount = tx.amount;
        if tally.logo.is_none() {
            tally.logo = tx.logo.clone().filter(|l| !l.is_empty());
        }
        tally.dates.push(tx.date);
    }

    let mut records: Vec<SubscriptionRecord> = tallies
        .into_iter()
        .map(|tally| build_record(tally, config))
        .collect();

    records.sort_by(|a, b| {
        b.annual_spend
            .partial_cmp(&a.annual_spend)
            .unwrap_or(Ordering::Equal)
    });

    debug!(
        subscriptions = records.len(),
        zombies = records.iter().filter(|r| r.is_zombie).count(),
        "Identified subscriptions"
    );

    records
}

fn build_record(tally: MerchantTally, config: &DetectionConfig) -> SubscriptionRecord {
    let occurrences = tally.dates.len();
    let monthly_spend = tally.amount;
    let annual_spend = monthly_spend * 12.0;

    SubscriptionRecord {
        is_zombie: is_zombie(occurrences, &tally.category, monthly_spend, config),
        // Savings threshold (4) intentionally differs from the zombie one (3)
        potential_savings: if occurrences < config.savings_max_occurrences {
            annual_spend
        } else {
            0.0
        },
        merchant: tally.merchant,
        category: tally.category,
        monthly_spend,
        annual_spend,
        occurrences,
        dates: tally.dates,
        logo: tally
            .logo
            .unwrap_or_else(|| DEFAULT_SUBSCRIPTION_LOGO.to_string()),
    }
}

/// Zombie heuristic: rarely seen, or an entertainment charge above the limit
pub fn is_zombie(
    occurrences: usize,
    category: &str,
    monthly_spend: f64,
    config: &DetectionConfig,
) -> bool {
    occurrences < config.zombie_max_occurrences
        || (category == config.entertainment_category
            && monthly_spend > config.entertainment_spend_limit)
}

/// Records flagged as zombies, in their existing order
pub fn zombies(records: &[SubscriptionRecord]) -> Vec<&SubscriptionRecord> {
    records.iter().filter(|r| r.is_zombie).collect()
}

/// Summed annual spend of all zombie subscriptions
pub fn total_potential_savings(records: &[SubscriptionRecord]) -> f64 {
    records
        .iter()
        .filter(|r| r.is_zombie)
        .map(|r| r.annual_spend)
        .sum()
}
