//! Synthetic transaction generator for demos and tests
//!
//! Produces six months of plausible activity ending at an anchor date:
//! a monthly salary, occasional side income, a fixed catalogue of
//! subscriptions and a spread of everyday expenses.

use chrono::{Datelike, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::models::{Transaction, TransactionType};

/// Number of calendar months generated, the anchor month included
pub const GENERATED_MONTHS: u32 = 6;

const SALARY: (&str, &str) = ("Acme Corp Payroll", "Salary");

const SIDE_INCOME: &[(&str, &str)] = &[
    ("Freelance Payment", "Freelance"),
    ("Investment Dividend", "Investment"),
    ("Side Project Revenue", "Business"),
];

struct CatalogueSubscription {
    merchant: &'static str,
    category: &'static str,
    amount: f64,
    logo: &'static str,
}

const SUBSCRIPTIONS: &[CatalogueSubscription] = &[
    CatalogueSubscription { merchant: "Netflix", category: "Entertainment", amount: 15.99, logo: "🎬" },
    CatalogueSubscription { merchant: "Spotify", category: "Entertainment", amount: 9.99, logo: "🎵" },
    CatalogueSubscription { merchant: "Adobe Creative Cloud", category: "Software", amount: 54.99, logo: "🎨" },
    CatalogueSubscription { merchant: "Amazon Prime", category: "Shopping", amount: 14.99, logo: "📦" },
    CatalogueSubscription { merchant: "Gym Membership", category: "Health", amount: 49.99, logo: "🏋️" },
    CatalogueSubscription { merchant: "Cloud Storage Pro", category: "Software", amount: 9.99, logo: "☁️" },
    CatalogueSubscription { merchant: "News Subscription", category: "Media", amount: 12.99, logo: "📰" },
    CatalogueSubscription { merchant: "VPN Service", category: "Software", amount: 11.99, logo: "🔐" },
    CatalogueSubscription { merchant: "Streaming Service+", category: "Entertainment", amount: 8.99, logo: "📺" },
    CatalogueSubscription { merchant: "Password Manager", category: "Software", amount: 4.99, logo: "🔑" },
];

const EXPENSES: &[(&str, &str)] = &[
    ("Whole Foods Market", "Groceries"),
    ("Shell Gas Station", "Transportation"),
    ("Uber", "Transportation"),
    ("Starbucks", "Dining"),
    ("Target", "Shopping"),
    ("Amazon", "Shopping"),
    ("Chipotle", "Dining"),
    ("CVS Pharmacy", "Health"),
    ("Home Depot", "Home"),
    ("Electric Company", "Utilities"),
    ("Water Utility", "Utilities"),
    ("Internet Provider", "Utilities"),
    ("Restaurant", "Dining"),
    ("Coffee Shop", "Dining"),
    ("Clothing Store", "Shopping"),
];

/// Spend range for one everyday expense in a category
fn expense_range(category: &str) -> (f64, f64) {
    match category {
        "Utilities" => (50.0, 200.0),
        "Groceries" => (30.0, 200.0),
        "Dining" => (10.0, 80.0),
        "Transportation" => (20.0, 100.0),
        _ => (15.0, 150.0),
    }
}

fn cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Seedable generator of demo transactions
pub struct SyntheticGenerator {
    rng: StdRng,
    next_id: usize,
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticGenerator {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            next_id: 1,
        }
    }

    /// Deterministic generator; the same seed yields the same transactions
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Generate six months of transactions ending in the anchor's month,
    /// newest first
    pub fn generate(&mut self, anchor: NaiveDate) -> Vec<Transaction> {
        let mut transactions = Vec::new();
        self.next_id = 1;

        let Some(anchor_month) = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1) else {
            return transactions;
        };

        for months_ago in 0..GENERATED_MONTHS {
            let Some(month) = anchor_month.checked_sub_months(Months::new(months_ago)) else {
                continue;
            };
            self.generate_month(month, &mut transactions);
        }

        // Stable sort keeps generation order within a day
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        debug!(
            count = transactions.len(),
            anchor = %anchor,
            "Generated synthetic transactions"
        );

        transactions
    }

    fn generate_month(&mut self, month: NaiveDate, out: &mut Vec<Transaction>) {
        let salary = self.rng.gen_range(4500.0..6500.0);
        let payday = self.day(month, 15);
        out.push(self.income(SALARY, salary, payday));

        if self.rng.gen_bool(0.5) {
            let source = SIDE_INCOME[self.rng.gen_range(0..SIDE_INCOME.len())];
            let amount = self.rng.gen_range(200.0..1500.0);
            let date = self.random_day(month);
            out.push(self.income(source, amount, date));
        }

        for sub in SUBSCRIPTIONS {
            if !self.rng.gen_bool(0.85) {
                continue;
            }
            let day = self.rng.gen_range(1..5);
            let date = self.day(month, day);
            let id = self.id();
            out.push(
                Transaction::new(
                    id,
                    sub.merchant,
                    sub.category,
                    sub.amount,
                    TransactionType::Subscription,
                    date,
                )
                .recurring()
                .with_logo(sub.logo),
            );
        }

        let expense_count = self.rng.gen_range(15..30);
        for _ in 0..expense_count {
            let (merchant, category) = EXPENSES[self.rng.gen_range(0..EXPENSES.len())];
            let (min, max) = expense_range(category);
            let amount = cents(self.rng.gen_range(min..max));
            let date = self.random_day(month);
            let id = self.id();
            out.push(Transaction::new(
                id,
                merchant,
                category,
                amount,
                TransactionType::Expense,
                date,
            ));
        }
    }

    fn income(&mut self, (merchant, category): (&str, &str), amount: f64, date: NaiveDate) -> Transaction {
        let id = self.id();
        Transaction::new(id, merchant, category, cents(amount), TransactionType::Income, date)
    }

    fn id(&mut self) -> String {
        let id = format!("txn_{}", self.next_id);
        self.next_id += 1;
        id
    }

    /// Days 1..=27 exist in every month
    fn random_day(&mut self, month: NaiveDate) -> NaiveDate {
        let day = self.rng.gen_range(1..28);
        self.day(month, day)
    }

    fn day(&self, month: NaiveDate, day: u32) -> NaiveDate {
        month.with_day(day).unwrap_or(month)
    }
}
