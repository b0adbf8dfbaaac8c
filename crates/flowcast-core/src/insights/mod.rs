//! Insight Engine - natural-language financial findings
//!
//! Turns the derived aggregates into short findings for the dashboard. The
//! engine runs an ordered list of rules; the order is the display order.
//!
//! ## Built-in Rules
//!
//! - **Savings Rate** - Always present when any month exists
//! - **Subscription Optimization** - Present when zombie subscriptions exist
//! - **Spending Trend** - Spike or reduction between the last two months
//! - **Top Category** - The single highest-spend category
//!
//! ## Usage
//!
//! ```rust,ignore
//! use flowcast_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let insights = engine.generate(&transactions, &monthly, &subscriptions);
//! ```

pub mod engine;
pub mod savings_rate;
pub mod spending_trend;
pub mod subscription_optimizer;
pub mod top_category;
pub mod types;

pub use engine::{InsightContext, InsightEngine, InsightRule};
pub use savings_rate::SavingsRateInsight;
pub use spending_trend::SpendingTrendInsight;
pub use subscription_optimizer::SubscriptionOptimizerInsight;
pub use top_category::TopCategoryInsight;
pub use types::{Insight, InsightKind, InsightSource};

use crate::models::{MonthlyAggregate, SubscriptionRecord, Transaction};

/// Generate insights with the built-in rules and default thresholds
pub fn generate_insights(
    transactions: &[Transaction],
    monthly: &[MonthlyAggregate],
    subscriptions: &[SubscriptionRecord],
) -> Vec<Insight> {
    InsightEngine::new().generate(transactions, monthly, subscriptions)
}

/// Round a percentage to one decimal place, the precision it is shown at
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
