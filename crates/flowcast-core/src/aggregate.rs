//! Monthly and category aggregation
//!
//! Both aggregators rebuild their output from scratch on every call. Nothing
//! about a previous call survives into the next one.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::models::{CategoryAggregate, MonthlyAggregate, Transaction};

/// Colour used for categories missing from the palette
pub const DEFAULT_CATEGORY_COLOR: &str = "#64748B";

/// Look up the display colour for a category
pub fn category_color(category: &str) -> &'static str {
    match category {
        "Salary" => "#10B981",
        "Freelance" => "#34D399",
        "Investment" => "#6EE7B7",
        "Business" => "#059669",
        "Entertainment" => "#8B5CF6",
        "Software" => "#6366F1",
        "Shopping" => "#EC4899",
        "Health" => "#F97316",
        "Media" => "#EAB308",
        "Groceries" => "#22C55E",
        "Transportation" => "#3B82F6",
        "Dining" => "#F59E0B",
        "Home" => "#A855F7",
        "Utilities" => "#64748B",
        _ => DEFAULT_CATEGORY_COLOR,
    }
}

/// Zero-padded `YYYY-MM` key for the month containing `date`
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Short display label such as "Mar 2024"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Group transactions into calendar-month cash-flow totals, oldest first
pub fn aggregate_by_month(transactions: &[Transaction]) -> Vec<MonthlyAggregate> {
    let mut months: BTreeMap<String, MonthlyAggregate> = BTreeMap::new();

    for tx in transactions {
        let key = month_key(tx.date);
        let entry = months
            .entry(key.clone())
            .or_insert_with(|| MonthlyAggregate {
                month_key: key,
                income: 0.0,
                outcome: 0.0,
                label: month_label(tx.date),
            });

        if tx.transaction_type.is_income() {
            entry.income += tx.amount;
        } else {
            entry.outcome += tx.amount;
        }
    }

    debug!(
        transactions = transactions.len(),
        months = months.len(),
        "Aggregated by month"
    );

    months.into_values().collect()
}

/// Group non-income transactions by category, highest spend first
///
/// Categories match on the exact label; "Dining" and "dining" stay separate.
/// Ties keep the order in which the categories were first encountered.
pub fn aggregate_by_category(transactions: &[Transaction]) -> Vec<CategoryAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut categories: Vec<CategoryAggregate> = Vec::new();

    for tx in transactions
        .iter()
        .filter(|tx| !tx.transaction_type.is_income())
    {
        let slot = *index.entry(tx.category.as_str()).or_insert_with(|| {
            categories.push(CategoryAggregate {
                category: tx.category.clone(),
                amount: 0.0,
                count: 0,
                color: category_color(&tx.category).to_string(),
            });
            categories.len() - 1
        });

        let entry = &mut categories[slot];
        entry.amount += tx.amount;
        entry.count += 1;
    }

    // sort_by is stable, which gives the first-encountered tie-break
    categories.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));

    debug!(categories = categories.len(), "Aggregated by category");

    categories
}
