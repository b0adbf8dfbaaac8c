//! Spending Trend Insight
//!
//! Compares outflow in the last two months. Only a spike or a reduction is
//! reported; anything in between leaves the slot empty.

use super::engine::{InsightContext, InsightRule};
use super::round_to_tenth;
use super::types::{Insight, InsightKind, InsightSource};

pub struct SpendingTrendInsight;

impl InsightRule for SpendingTrendInsight {
    fn id(&self) -> InsightSource {
        InsightSource::SpendingTrend
    }

    fn name(&self) -> &'static str {
        "Spending Trend"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        let [.., prev, last] = ctx.monthly else {
            return None;
        };

        // No prior spending to compare against
        if prev.outcome == 0.0 {
            return None;
        }

        let change = round_to_tenth((last.outcome - prev.outcome) / prev.outcome * 100.0);

        if change > ctx.config.spending_spike_percent {
            Some(Insight::new(
                self.id(),
                InsightKind::Warning,
                "Spending Spike Detected",
                format!(
                    "Your spending increased {:.1}% compared to last month. Check for unusual expenses.",
                    change
                ),
                "📈",
            ))
        } else if change < ctx.config.spending_drop_percent {
            Some(Insight::new(
                self.id(),
                InsightKind::Positive,
                "Spending Reduction",
                format!(
                    "Great job! You reduced spending by {}% this month.",
                    plain_number(change.abs())
                ),
                "🎯",
            ))
        } else {
            None
        }
    }
}

/// A tenth-rounded figure without a trailing ".0" (10.0 -> "10", 12.5 -> "12.5")
fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
