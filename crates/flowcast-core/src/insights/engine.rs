//! Insight Engine - runs the registered rules in display order

use tracing::debug;

use crate::aggregate::aggregate_by_category;
use crate::config::InsightConfig;
use crate::models::{CategoryAggregate, MonthlyAggregate, SubscriptionRecord, Transaction};

use super::types::{Insight, InsightSource};
use super::{
    SavingsRateInsight, SpendingTrendInsight, SubscriptionOptimizerInsight, TopCategoryInsight,
};

/// Inputs shared by every rule
pub struct InsightContext<'a> {
    pub transactions: &'a [Transaction],
    pub monthly: &'a [MonthlyAggregate],
    pub subscriptions: &'a [SubscriptionRecord],
    /// Category breakdown of `transactions`, computed once per run
    pub categories: Vec<CategoryAggregate>,
    pub config: &'a InsightConfig,
}

impl<'a> InsightContext<'a> {
    pub fn new(
        transactions: &'a [Transaction],
        monthly: &'a [MonthlyAggregate],
        subscriptions: &'a [SubscriptionRecord],
        config: &'a InsightConfig,
    ) -> Self {
        Self {
            transactions,
            monthly,
            subscriptions,
            categories: aggregate_by_category(transactions),
            config,
        }
    }
}

/// A single insight rule. Returning `None` skips its slot.
pub trait InsightRule: Send + Sync {
    /// Identifier recorded on the insights this rule produces
    fn id(&self) -> InsightSource;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight>;
}

/// The insight engine. Holds rules and thresholds only, never data.
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
    config: InsightConfig,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules and default thresholds
    pub fn new() -> Self {
        Self::with_config(InsightConfig::default())
    }

    pub fn with_config(config: InsightConfig) -> Self {
        let mut engine = Self {
            rules: vec![],
            config,
        };

        // Registration order is display order
        engine.register(Box::new(SavingsRateInsight));
        engine.register(Box::new(SubscriptionOptimizerInsight));
        engine.register(Box::new(SpendingTrendInsight));
        engine.register(Box::new(TopCategoryInsight));

        engine
    }

    /// Append a rule after the existing ones
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Run every rule in order and collect the insights they emit
    pub fn generate(
        &self,
        transactions: &[Transaction],
        monthly: &[MonthlyAggregate],
        subscriptions: &[SubscriptionRecord],
    ) -> Vec<Insight> {
        let ctx = InsightContext::new(transactions, monthly, subscriptions, &self.config);

        self.rules
            .iter()
            .filter_map(|rule| {
                let insight = rule.evaluate(&ctx);
                debug!(
                    rule = rule.id().as_str(),
                    emitted = insight.is_some(),
                    "Insight rule evaluated"
                );
                insight
            })
            .collect()
    }

    /// Get list of registered rules, in order
    pub fn rule_ids(&self) -> Vec<InsightSource> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}
