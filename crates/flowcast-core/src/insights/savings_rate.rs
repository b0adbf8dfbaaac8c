//! Savings Rate Insight
//!
//! Share of total income kept after all outflow, across every month.

use crate::models::MonthlyAggregate;

use super::engine::{InsightContext, InsightRule};
use super::round_to_tenth;
use super::types::{Insight, InsightKind, InsightSource};

pub struct SavingsRateInsight;

/// Savings rate in percent over all months
///
/// Zero total income yields 0.0 rather than a non-finite value.
pub fn savings_rate(monthly: &[MonthlyAggregate]) -> f64 {
    let total_income: f64 = monthly.iter().map(|m| m.income).sum();
    let total_outcome: f64 = monthly.iter().map(|m| m.outcome).sum();

    if total_income == 0.0 {
        return 0.0;
    }
    (total_income - total_outcome) / total_income * 100.0
}

impl InsightRule for SavingsRateInsight {
    fn id(&self) -> InsightSource {
        InsightSource::SavingsRate
    }

    fn name(&self) -> &'static str {
        "Savings Rate"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        if ctx.monthly.is_empty() {
            return None;
        }

        let rate = round_to_tenth(savings_rate(ctx.monthly));

        let insight = if rate > ctx.config.strong_savings_rate {
            Insight::new(
                self.id(),
                InsightKind::Positive,
                "Strong Savings Rate",
                format!(
                    "You're saving {:.1}% of your income. This is above the recommended 20% threshold.",
                    rate
                ),
                "💪",
            )
        } else if rate > ctx.config.moderate_savings_rate {
            Insight::new(
                self.id(),
                InsightKind::Neutral,
                "Moderate Savings",
                format!(
                    "Your savings rate is {:.1}%. Consider small expense reductions to reach the 20% goal.",
                    rate
                ),
                "📊",
            )
        } else {
            Insight::new(
                self.id(),
                InsightKind::Warning,
                "Low Savings Alert",
                format!(
                    "Your savings rate is only {:.1}%. Review subscriptions and discretionary spending.",
                    rate
                ),
                "⚠️",
            )
        };

        Some(insight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InsightConfig;

    fn month(income: f64, outcome: f64) -> MonthlyAggregate {
        MonthlyAggregate {
            month_key: "2024-01".into(),
            income,
            outcome,
            label: "Jan 2024".into(),
        }
    }

    fn evaluate(monthly: &[MonthlyAggregate]) -> Option<Insight> {
        let config = InsightConfig::default();
        let ctx = InsightContext::new(&[], monthly, &[], &config);
        SavingsRateInsight.evaluate(&ctx)
    }

    #[test]
    fn test_savings_rate_bands() {
        let strong = evaluate(&[month(5000.0, 3000.0)]).unwrap();
        assert_eq!(strong.kind, InsightKind::Positive);
        assert!(strong.message.contains("40.0%"));

        let moderate = evaluate(&[month(1000.0, 850.0)]).unwrap();
        assert_eq!(moderate.kind, InsightKind::Neutral);
        assert!(moderate.message.contains("15.0%"));

        let low = evaluate(&[month(1000.0, 950.0)]).unwrap();
        assert_eq!(low.kind, InsightKind::Warning);
    }

    #[test]
    fn test_exact_threshold_is_not_above() {
        assert_eq!(evaluate(&[month(1000.0, 800.0)]).unwrap().kind, InsightKind::Neutral);
        assert_eq!(evaluate(&[month(1000.0, 900.0)]).unwrap().kind, InsightKind::Warning);
    }

    #[test]
    fn test_compares_on_displayed_precision() {
        // 20.04% displays as 20.0%, which is not above 20
        let insight = evaluate(&[month(10000.0, 7996.0)]).unwrap();
        assert_eq!(insight.kind, InsightKind::Neutral);
        assert!(insight.message.contains("20.0%"));
    }

    #[test]
    fn test_sums_across_months() {
        let rate = savings_rate(&[month(1000.0, 500.0), month(1000.0, 1300.0)]);
        assert!((rate - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_income_is_zero_rate() {
        assert_eq!(savings_rate(&[month(0.0, 250.0)]), 0.0);
        let insight = evaluate(&[month(0.0, 250.0)]).unwrap();
        assert_eq!(insight.kind, InsightKind::Warning);
        assert!(insight.message.contains("only 0.0%"));
    }

    #[test]
    fn test_no_months_no_insight() {
        assert!(evaluate(&[]).is_none());
    }
}
