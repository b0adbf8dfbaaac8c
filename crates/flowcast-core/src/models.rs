//! Domain models for Flowcast

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a transaction. The sign lives here, never in the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Subscription,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Subscription => "subscription",
        }
    }

    /// Income is the only inflow; every other type counts as outflow
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "subscription" => Ok(Self::Subscription),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A financial transaction as delivered by a banking-data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub merchant: String,
    /// Free-form taxonomy label (e.g. "Groceries")
    pub category: String,
    /// Non-negative magnitude of the movement
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
    /// Source marked this as a repeating payment (independent of type)
    #[serde(default, alias = "isRecurring")]
    pub is_recurring: bool,
    /// Display glyph, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        merchant: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        transaction_type: TransactionType,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            merchant: merchant.into(),
            category: category.into(),
            amount,
            transaction_type,
            date,
            is_recurring: false,
            logo: None,
        }
    }

    pub fn recurring(mut self) -> Self {
        self.is_recurring = true;
        self
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Whether the subscription classifier should consider this transaction
    pub fn is_recurring_charge(&self) -> bool {
        self.transaction_type == TransactionType::Subscription || self.is_recurring
    }
}

/// Cash-flow totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// Zero-padded `YYYY-MM`, sortable lexicographically
    pub month_key: String,
    pub income: f64,
    pub outcome: f64,
    /// Display-only label such as "Mar 2024"
    pub label: String,
}

impl MonthlyAggregate {
    pub fn net(&self) -> f64 {
        self.income - self.outcome
    }
}

/// Spend totals for one category (income excluded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub category: String,
    pub amount: f64,
    pub count: usize,
    /// Hex colour from the fixed category palette
    pub color: String,
}

/// A merchant with recurring charges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub merchant: String,
    /// Category of the last transaction seen for this merchant
    pub category: String,
    /// Amount of the last transaction seen for this merchant
    pub monthly_spend: f64,
    pub annual_spend: f64,
    pub occurrences: usize,
    pub dates: Vec<NaiveDate>,
    pub potential_savings: f64,
    pub is_zombie: bool,
    pub logo: String,
}

/// A projected future month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    pub month_key: String,
    pub income: f64,
    pub outcome: f64,
    pub label: String,
    pub is_prediction: bool,
}
