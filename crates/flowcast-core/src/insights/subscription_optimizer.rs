//! Subscription Optimization Insight
//!
//! Surfaces zombie subscriptions and what cancelling them would save.

use crate::detect::{total_potential_savings, zombies};

use super::engine::{InsightContext, InsightRule};
use super::types::{Insight, InsightKind, InsightSource};

pub struct SubscriptionOptimizerInsight;

impl InsightRule for SubscriptionOptimizerInsight {
    fn id(&self) -> InsightSource {
        InsightSource::Subscriptions
    }

    fn name(&self) -> &'static str {
        "Subscription Optimization"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        let zombie_count = zombies(ctx.subscriptions).len();
        if zombie_count == 0 {
            return None;
        }

        let savings = total_potential_savings(ctx.subscriptions);

        Some(Insight::new(
            self.id(),
            InsightKind::Suggestion,
            "Subscription Optimization",
            format!(
                "Found {} underutilized subscriptions. You could save up to ${:.2}/year.",
                zombie_count, savings
            ),
            "🧟",
        ))
    }
}
