//! Top Category Insight

use super::engine::{InsightContext, InsightRule};
use super::types::{Insight, InsightKind, InsightSource};

pub struct TopCategoryInsight;

impl InsightRule for TopCategoryInsight {
    fn id(&self) -> InsightSource {
        InsightSource::TopCategory
    }

    fn name(&self) -> &'static str {
        "Top Spending Category"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<Insight> {
        let top = ctx.categories.first()?;

        Some(Insight::new(
            self.id(),
            InsightKind::Info,
            "Top Spending Category",
            format!(
                "{} accounts for ${:.2} of your expenses across {} transactions.",
                top.category, top.amount, top.count
            ),
            "🏷️",
        ))
    }
}
