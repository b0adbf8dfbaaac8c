//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentiment of an insight, used for display styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Positive,
    Neutral,
    Warning,
    Suggestion,
    Info,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Positive => "positive",
            InsightKind::Neutral => "neutral",
            InsightKind::Warning => "warning",
            InsightKind::Suggestion => "suggestion",
            InsightKind::Info => "info",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(InsightKind::Positive),
            "neutral" => Ok(InsightKind::Neutral),
            "warning" => Ok(InsightKind::Warning),
            "suggestion" => Ok(InsightKind::Suggestion),
            "info" => Ok(InsightKind::Info),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Rule that produced an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSource {
    SavingsRate,
    Subscriptions,
    SpendingTrend,
    TopCategory,
}

impl InsightSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightSource::SavingsRate => "savings_rate",
            InsightSource::Subscriptions => "subscriptions",
            InsightSource::SpendingTrend => "spending_trend",
            InsightSource::TopCategory => "top_category",
        }
    }
}

impl fmt::Display for InsightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A finding shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    /// Short title (e.g., "Strong Savings Rate")
    pub title: String,
    /// Sentence with the computed figures interpolated
    pub message: String,
    pub icon: String,
    pub source: InsightSource,
}

impl Insight {
    pub fn new(
        source: InsightSource,
        kind: InsightKind,
        title: impl Into<String>,
        message: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            icon: icon.into(),
            source,
        }
    }
}
