//! Flowcast Core Library
//!
//! Transaction analytics engine for the Flowcast personal finance dashboard.
//! Turns a raw list of transactions into the derived views the dashboard
//! displays:
//! - Monthly cash-flow aggregates
//! - Spend-by-category breakdowns
//! - Recurring subscription and "zombie" detection
//! - Bounded-growth cash-flow projections
//! - Natural-language insights
//!
//! Every computation is a pure function of its inputs. Nothing is cached
//! between calls, so all entry points are safe to call from multiple threads.
//!
//! Around the engine sit the boundary helpers: transaction import and banking
//! provider normalization, a seedable synthetic data generator, and the
//! threshold configuration loader.

pub mod aggregate;
pub mod analyzer;
pub mod config;
pub mod detect;
pub mod error;
pub mod forecast;
pub mod import;
pub mod insights;
pub mod models;
pub mod synthetic;

pub use aggregate::{aggregate_by_category, aggregate_by_month, category_color};
pub use analyzer::{Analyzer, Dashboard, DashboardSummary, TimelinePoint};
pub use config::{AnalyticsConfig, DetectionConfig, ForecastConfig, InsightConfig};
pub use detect::identify_subscriptions;
pub use error::{Error, Result};
pub use forecast::generate_predictions;
pub use import::{ImportFormat, ProviderNormalizer};
pub use insights::{generate_insights, Insight, InsightEngine, InsightKind, InsightSource};
pub use models::{
    CategoryAggregate, MonthlyAggregate, PredictionPoint, SubscriptionRecord, Transaction,
    TransactionType,
};
pub use synthetic::SyntheticGenerator;
