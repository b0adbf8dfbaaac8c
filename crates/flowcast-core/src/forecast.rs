//! Cash-flow projection
//!
//! Extrapolates income and outcome forward from the trend of the most recent
//! months. The growth rates are estimated once, clamped, and then compounded
//! across the whole horizon. This is a bounded extrapolation, not a forecast
//! model.

use chrono::{Datelike, Local, Months, NaiveDate};
use tracing::debug;

use crate::aggregate::{month_key, month_label};
use crate::config::{ForecastConfig, MAX_HORIZON_MONTHS};
use crate::models::{MonthlyAggregate, PredictionPoint};

/// Project future months from today's date using the default parameters
pub fn generate_predictions(monthly: &[MonthlyAggregate]) -> Vec<PredictionPoint> {
    generate_predictions_as_of(monthly, Local::now().date_naive(), &ForecastConfig::default())
}

/// Project future months, labelling them relative to `anchor`
///
/// Month keys advance from the anchor's month, not from the last observed
/// month. Returns nothing when fewer than `window_months` months are present.
pub fn generate_predictions_as_of(
    monthly: &[MonthlyAggregate],
    anchor: NaiveDate,
    config: &ForecastConfig,
) -> Vec<PredictionPoint> {
    let window = config.window_months.max(2);
    if monthly.len() < window {
        debug!(
            months = monthly.len(),
            required = window,
            "Not enough history to project"
        );
        return vec![];
    }

    let recent = &monthly[monthly.len() - window..];
    let (income_rate, outcome_rate) = applied_growth_rates(recent, config);

    let Some(last) = monthly.last() else {
        return vec![];
    };
    let Some(anchor_month) = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1) else {
        return vec![];
    };

    let mut predictions = Vec::new();
    let mut income = last.income;
    let mut outcome = last.outcome;

    let horizon = config.horizon_months.min(MAX_HORIZON_MONTHS);
    for step in 1..=horizon {
        let Some(month) = anchor_month.checked_add_months(Months::new(step)) else {
            break;
        };

        // Each step compounds on the previous projection, never on actuals
        income *= 1.0 + income_rate;
        outcome *= 1.0 + outcome_rate;

        predictions.push(PredictionPoint {
            month_key: month_key(month),
            income,
            outcome,
            label: month_label(month),
            is_prediction: true,
        });
    }

    debug!(
        points = predictions.len(),
        income_rate, outcome_rate, "Generated cash-flow projection"
    );

    predictions
}

/// Clamped (income, outcome) monthly growth rates for a window of months
pub fn applied_growth_rates(recent: &[MonthlyAggregate], config: &ForecastConfig) -> (f64, f64) {
    let income_growth = average_growth(recent.iter().map(|m| m.income));
    let outcome_growth = average_growth(recent.iter().map(|m| m.outcome));

    let income_rate = income_growth.min(config.income_growth_cap);
    let outcome_rate = outcome_growth
        .min(config.outcome_growth_cap)
        .max(config.outcome_growth_floor);

    (income_rate, outcome_rate)
}

/// Mean month-over-month fractional growth across consecutive pairs
///
/// A pair whose previous value is zero contributes zero growth but still
/// counts toward the divisor.
pub fn average_growth(values: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.collect();
    if values.len() < 2 {
        return 0.0;
    }

    let total: f64 = values
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (pair[0], pair[1]);
            if prev == 0.0 {
                return 0.0;
            }
            let growth = (curr - prev) / prev;
            if growth.is_finite() {
                growth
            } else {
                0.0
            }
        })
        .sum();

    total / (values.len() - 1) as f64
}
