//! Analyzer - computes every dashboard view in one pass
//!
//! Bundles the five derived views behind a single call so callers do not
//! have to thread the intermediate results through by hand.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::info;

use crate::aggregate::{aggregate_by_category, aggregate_by_month};
use crate::config::AnalyticsConfig;
use crate::detect::{identify_subscriptions_with, total_potential_savings, zombies};
use crate::forecast::generate_predictions_as_of;
use crate::insights::savings_rate::savings_rate;
use crate::insights::{Insight, InsightEngine};
use crate::models::{
    CategoryAggregate, MonthlyAggregate, PredictionPoint, SubscriptionRecord, Transaction,
};

/// All derived views for one transaction list
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub monthly: Vec<MonthlyAggregate>,
    pub categories: Vec<CategoryAggregate>,
    pub subscriptions: Vec<SubscriptionRecord>,
    pub predictions: Vec<PredictionPoint>,
    pub insights: Vec<Insight>,
}

/// One point of the combined actual + projected cash-flow chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub month_key: String,
    pub label: String,
    pub income: f64,
    pub outcome: f64,
    pub is_prediction: bool,
}

/// Headline figures across all observed months
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_income: f64,
    pub total_outcome: f64,
    pub net: f64,
    /// Percent, unrounded; 0.0 when there is no income
    pub savings_rate: f64,
    pub zombie_count: usize,
    pub potential_savings: f64,
}

impl Dashboard {
    /// Actual months followed by projected months
    pub fn timeline(&self) -> Vec<TimelinePoint> {
        let actual = self.monthly.iter().map(|m| TimelinePoint {
            month_key: m.month_key.clone(),
            label: m.label.clone(),
            income: m.income,
            outcome: m.outcome,
            is_prediction: false,
        });
        let projected = self.predictions.iter().map(|p| TimelinePoint {
            month_key: p.month_key.clone(),
            label: p.label.clone(),
            income: p.income,
            outcome: p.outcome,
            is_prediction: true,
        });

        actual.chain(projected).collect()
    }

    pub fn summary(&self) -> DashboardSummary {
        let total_income: f64 = self.monthly.iter().map(|m| m.income).sum();
        let total_outcome: f64 = self.monthly.iter().map(|m| m.outcome).sum();

        DashboardSummary {
            total_income,
            total_outcome,
            net: total_income - total_outcome,
            savings_rate: savings_rate(&self.monthly),
            zombie_count: zombies(&self.subscriptions).len(),
            potential_savings: total_potential_savings(&self.subscriptions),
        }
    }
}

/// Runs the full analytics pipeline with one set of thresholds
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyticsConfig,
}

impl Analyzer {
    /// Analyzer with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Analyze with projections anchored to today's date
    pub fn analyze(&self, transactions: &[Transaction]) -> Dashboard {
        self.analyze_as_of(transactions, Local::now().date_naive())
    }

    /// Analyze with projections anchored to `anchor`
    pub fn analyze_as_of(&self, transactions: &[Transaction], anchor: NaiveDate) -> Dashboard {
        let monthly = aggregate_by_month(transactions);
        let categories = aggregate_by_category(transactions);
        let subscriptions = identify_subscriptions_with(transactions, &self.config.detection);
        let predictions = generate_predictions_as_of(&monthly, anchor, &self.config.forecast);
        let insights = InsightEngine::with_config(self.config.insights.clone()).generate(
            transactions,
            &monthly,
            &subscriptions,
        );

        info!(
            transactions = transactions.len(),
            months = monthly.len(),
            categories = categories.len(),
            subscriptions = subscriptions.len(),
            predictions = predictions.len(),
            insights = insights.len(),
            "Analysis complete"
        );

        Dashboard {
            monthly,
            categories,
            subscriptions,
            predictions,
            insights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn three_months() -> Vec<Transaction> {
        let mut txs = Vec::new();
        for m in 1..=3 {
            txs.push(Transaction::new(
                format!("inc{}", m),
                "Payroll",
                "Salary",
                5000.0,
                TransactionType::Income,
                date(2024, m, 15),
            ));
            txs.push(Transaction::new(
                format!("grc{}", m),
                "Whole Foods Market",
                "Groceries",
                1000.0,
                TransactionType::Expense,
                date(2024, m, 5),
            ));
            txs.push(Transaction::new(
                format!("nfx{}", m),
                "Netflix",
                "Entertainment",
                15.99,
                TransactionType::Subscription,
                date(2024, m, 2),
            ));
        }
        txs
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = Analyzer::new().analyze_as_of(&[], date(2024, 3, 1));
        assert!(dashboard.monthly.is_empty());
        assert!(dashboard.categories.is_empty());
        assert!(dashboard.subscriptions.is_empty());
        assert!(dashboard.predictions.is_empty());
        assert!(dashboard.insights.is_empty());

        let summary = dashboard.summary();
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.savings_rate, 0.0);
        assert_eq!(summary.zombie_count, 0);
    }

    #[test]
    fn test_full_pipeline() {
        let txs = three_months();
        let dashboard = Analyzer::new().analyze_as_of(&txs, date(2024, 3, 20));

        assert_eq!(dashboard.monthly.len(), 3);
        assert_eq!(dashboard.categories[0].category, "Groceries");
        assert_eq!(dashboard.subscriptions.len(), 1);
        assert!(!dashboard.subscriptions[0].is_zombie);
        assert_eq!(dashboard.predictions.len(), 6);
        assert_eq!(dashboard.predictions[0].month_key, "2024-04");
        // Savings rate + top category; no zombies, flat spending
        assert_eq!(dashboard.insights.len(), 2);
    }

    #[test]
    fn test_timeline_appends_predictions() {
        let dashboard = Analyzer::new().analyze_as_of(&three_months(), date(2024, 3, 20));
        let timeline = dashboard.timeline();

        assert_eq!(timeline.len(), 9);
        assert!(timeline[..3].iter().all(|p| !p.is_prediction));
        assert!(timeline[3..].iter().all(|p| p.is_prediction));
        assert_eq!(timeline[3].month_key, "2024-04");
    }

    #[test]
    fn test_summary_totals() {
        let dashboard = Analyzer::new().analyze_as_of(&three_months(), date(2024, 3, 20));
        let summary = dashboard.summary();

        assert_eq!(summary.total_income, 15000.0);
        assert!((summary.total_outcome - (3000.0 + 3.0 * 15.99)).abs() < 1e-9);
        assert!((summary.net - (summary.total_income - summary.total_outcome)).abs() < 1e-9);
        assert!(summary.savings_rate > 79.0 && summary.savings_rate < 80.0);
        assert_eq!(summary.zombie_count, 0);
        assert_eq!(summary.potential_savings, 0.0);
    }

    #[test]
    fn test_config_thresholds_flow_through() {
        let mut config = AnalyticsConfig::default();
        config.detection.entertainment_spend_limit = 10.0;
        config.forecast.horizon_months = 3;

        let dashboard =
            Analyzer::with_config(config).analyze_as_of(&three_months(), date(2024, 3, 20));
        assert!(dashboard.subscriptions[0].is_zombie);
        assert_eq!(dashboard.predictions.len(), 3);
        assert_eq!(dashboard.summary().zombie_count, 1);
    }
}
