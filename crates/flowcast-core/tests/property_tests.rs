//! Property tests for flowcast-core
//!
//! Invariants that must hold for any transaction list, not just fixtures.

use chrono::NaiveDate;
use flowcast_core::{
    aggregate_by_category, aggregate_by_month,
    forecast::generate_predictions_as_of,
    generate_insights, identify_subscriptions, ForecastConfig, MonthlyAggregate, Transaction,
    TransactionType,
};
use proptest::prelude::*;

const MERCHANTS: &[&str] = &["Netflix", "Gym Membership", "Target", "Uber", "Adobe"];
const CATEGORIES: &[&str] = &["Entertainment", "Health", "Shopping", "Transportation", "Software"];

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 10).unwrap()
}

/// Strategy for transaction types
fn type_strategy() -> impl Strategy<Value = TransactionType> {
    prop_oneof![
        Just(TransactionType::Income),
        Just(TransactionType::Expense),
        Just(TransactionType::Subscription),
    ]
}

/// Strategy for a single transaction, amounts in whole cents up to $1,000
fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (
        type_strategy(),
        0..MERCHANTS.len(),
        0..CATEGORIES.len(),
        0u32..100_000,
        1u32..=12,
        1u32..=28,
        any::<bool>(),
    )
        .prop_map(|(kind, merchant, category, cents, month, day, recurring)| {
            let date = NaiveDate::from_ymd_opt(2024, month, day).unwrap();
            let mut tx = Transaction::new(
                format!("{}-{}-{}", merchant, month, day),
                MERCHANTS[merchant],
                CATEGORIES[category],
                cents as f64 / 100.0,
                kind,
                date,
            );
            tx.is_recurring = recurring;
            tx
        })
}

fn transactions_strategy() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(transaction_strategy(), 0..60)
}

/// Strategy for a consecutive monthly history with arbitrary totals
fn history_strategy() -> impl Strategy<Value = Vec<MonthlyAggregate>> {
    prop::collection::vec((0.0f64..1_000_000.0, 0.0f64..1_000_000.0), 0..12).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (income, outcome))| MonthlyAggregate {
                month_key: format!("2024-{:02}", i + 1),
                income,
                outcome,
                label: format!("M{}", i + 1),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Every transaction lands in exactly one month, on exactly one side
    #[test]
    fn prop_monthly_partition(txs in transactions_strategy()) {
        let monthly = aggregate_by_month(&txs);

        let raw_income: f64 = txs.iter().filter(|t| t.transaction_type.is_income()).map(|t| t.amount).sum();
        let raw_outcome: f64 = txs.iter().filter(|t| !t.transaction_type.is_income()).map(|t| t.amount).sum();
        let income: f64 = monthly.iter().map(|m| m.income).sum();
        let outcome: f64 = monthly.iter().map(|m| m.outcome).sum();

        prop_assert!((income - raw_income).abs() < 1e-6);
        prop_assert!((outcome - raw_outcome).abs() < 1e-6);
        prop_assert!(monthly.windows(2).all(|w| w[0].month_key < w[1].month_key));
    }

    /// Category totals and counts cover exactly the non-income transactions
    #[test]
    fn prop_category_sum_equals_outcome(txs in transactions_strategy()) {
        let categories = aggregate_by_category(&txs);
        let monthly = aggregate_by_month(&txs);

        let category_total: f64 = categories.iter().map(|c| c.amount).sum();
        let outcome_total: f64 = monthly.iter().map(|m| m.outcome).sum();
        prop_assert!((category_total - outcome_total).abs() < 1e-6);

        let count_total: usize = categories.iter().map(|c| c.count).sum();
        let outflow_count = txs.iter().filter(|t| !t.transaction_type.is_income()).count();
        prop_assert_eq!(count_total, outflow_count);
        prop_assert!(categories.windows(2).all(|w| w[0].amount >= w[1].amount));
    }

    /// Occurrences count only the rows the recurring filter lets through
    #[test]
    fn prop_occurrences_equal_filtered_count(txs in transactions_strategy()) {
        let records = identify_subscriptions(&txs);

        for record in &records {
            let filtered = txs
                .iter()
                .filter(|t| t.merchant == record.merchant && t.is_recurring_charge())
                .count();
            prop_assert_eq!(record.occurrences, filtered);
            prop_assert_eq!(record.dates.len(), filtered);
        }

        let total: usize = records.iter().map(|r| r.occurrences).sum();
        prop_assert_eq!(total, txs.iter().filter(|t| t.is_recurring_charge()).count());
    }

    /// Zombie and savings flags follow their thresholds exactly
    #[test]
    fn prop_zombie_rule(txs in transactions_strategy()) {
        for record in identify_subscriptions(&txs) {
            let expected_zombie = record.occurrences < 3
                || (record.category == "Entertainment" && record.monthly_spend > 20.0);
            prop_assert_eq!(record.is_zombie, expected_zombie);

            prop_assert!((record.annual_spend - record.monthly_spend * 12.0).abs() < 1e-9);
            let expected_savings = if record.occurrences < 4 { record.annual_spend } else { 0.0 };
            prop_assert_eq!(record.potential_savings, expected_savings);
        }
    }

    /// Projected steps stay inside the income cap and the outcome collar
    #[test]
    fn prop_growth_bounds(monthly in history_strategy()) {
        let predictions = generate_predictions_as_of(&monthly, anchor(), &ForecastConfig::default());

        if monthly.len() < 3 {
            prop_assert!(predictions.is_empty());
            return Ok(());
        }
        prop_assert_eq!(predictions.len(), 6);
        prop_assert!(predictions.windows(2).all(|w| w[0].month_key < w[1].month_key));

        let last = monthly.last().unwrap();
        let mut prev = (last.income, last.outcome);
        for point in &predictions {
            prop_assert!(point.income.is_finite() && point.outcome.is_finite());
            prop_assert!(point.income >= 0.0 && point.outcome >= 0.0);
            if prev.0 > 0.0 {
                prop_assert!(point.income / prev.0 <= 1.05 + 1e-9);
            }
            if prev.1 > 0.0 {
                let ratio = point.outcome / prev.1;
                prop_assert!(ratio >= 0.98 - 1e-9 && ratio <= 1.03 + 1e-9);
            }
            prev = (point.income, point.outcome);
        }
    }

    /// No computation carries state from one call into the next
    #[test]
    fn prop_all_operations_idempotent(txs in transactions_strategy()) {
        let monthly = aggregate_by_month(&txs);
        prop_assert_eq!(&monthly, &aggregate_by_month(&txs));
        prop_assert_eq!(aggregate_by_category(&txs), aggregate_by_category(&txs));

        let subscriptions = identify_subscriptions(&txs);
        prop_assert_eq!(&subscriptions, &identify_subscriptions(&txs));

        let config = ForecastConfig::default();
        prop_assert_eq!(
            generate_predictions_as_of(&monthly, anchor(), &config),
            generate_predictions_as_of(&monthly, anchor(), &config)
        );
        prop_assert_eq!(
            generate_insights(&txs, &monthly, &subscriptions),
            generate_insights(&txs, &monthly, &subscriptions)
        );
    }
}
