//! Analytics threshold configuration
//!
//! Every threshold the engine uses lives here. The defaults are the values
//! the dashboard has always shipped with; the free functions in `aggregate`,
//! `detect`, `forecast` and `insights` always use them.
//!
//! ## Configuration Resolution
//!
//! 1. Explicit path (CLI `--config`), which must exist
//! 2. User override (~/.config/flowcast/analytics.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Longest projection a config may ask for (ten years)
pub const MAX_HORIZON_MONTHS: u32 = 120;

/// Subscription classifier thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Zombie when occurrences are strictly below this
    pub zombie_max_occurrences: usize,
    /// Potential savings when occurrences are strictly below this.
    /// Deliberately distinct from the zombie threshold.
    pub savings_max_occurrences: usize,
    /// Category subject to the spend-limit rule
    pub entertainment_category: String,
    /// Zombie when monthly spend in that category is strictly above this
    pub entertainment_spend_limit: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            zombie_max_occurrences: 3,
            savings_max_occurrences: 4,
            entertainment_category: "Entertainment".to_string(),
            entertainment_spend_limit: 20.0,
        }
    }
}

/// Cash-flow projector parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Trailing months used for growth, and the minimum history required
    pub window_months: usize,
    /// Number of future months to project
    pub horizon_months: u32,
    pub income_growth_cap: f64,
    pub outcome_growth_floor: f64,
    pub outcome_growth_cap: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window_months: 3,
            horizon_months: 6,
            income_growth_cap: 0.05,
            outcome_growth_floor: -0.02,
            outcome_growth_cap: 0.03,
        }
    }
}

/// Insight generator thresholds (all in percent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    pub strong_savings_rate: f64,
    pub moderate_savings_rate: f64,
    pub spending_spike_percent: f64,
    pub spending_drop_percent: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            strong_savings_rate: 20.0,
            moderate_savings_rate: 10.0,
            spending_spike_percent: 10.0,
            spending_drop_percent: -5.0,
        }
    }
}

/// Full analytics configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub detection: DetectionConfig,
    pub forecast: ForecastConfig,
    pub insights: InsightConfig,
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A resolved configuration together with its source
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AnalyticsConfig,
    pub source: ConfigSource,
}

impl AnalyticsConfig {
    /// Resolve configuration (explicit path, then user override, then embedded)
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_file(path);
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        debug!("Using embedded analytics config");
        Ok(LoadedConfig {
            config: parse_config(DEFAULT_CONFIG)?,
            source: ConfigSource::Embedded,
        })
    }

    fn load_file(path: &Path) -> Result<LoadedConfig> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
        let config = parse_config(&content)?;
        debug!(path = %path.display(), "Loaded analytics config");
        Ok(LoadedConfig {
            config,
            source: ConfigSource::File(path.to_path_buf()),
        })
    }

    /// Render as TOML (used by `flowcast config`)
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("flowcast").join("analytics.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    detection: Option<RawDetection>,
    forecast: Option<RawForecast>,
    insights: Option<RawInsights>,
}

#[derive(Debug, Deserialize)]
struct RawDetection {
    zombie_max_occurrences: Option<usize>,
    savings_max_occurrences: Option<usize>,
    entertainment_category: Option<String>,
    entertainment_spend_limit: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    window_months: Option<usize>,
    horizon_months: Option<u32>,
    income_growth_cap: Option<f64>,
    outcome_growth_floor: Option<f64>,
    outcome_growth_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    strong_savings_rate: Option<f64>,
    moderate_savings_rate: Option<f64>,
    spending_spike_percent: Option<f64>,
    spending_drop_percent: Option<f64>,
}

/// Parse config from TOML content, layering it over the defaults
pub fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(detection) = raw.detection {
        let target = &mut config.detection;
        if let Some(v) = detection.zombie_max_occurrences {
            target.zombie_max_occurrences = v;
        }
        if let Some(v) = detection.savings_max_occurrences {
            target.savings_max_occurrences = v;
        }
        if let Some(v) = detection.entertainment_category {
            target.entertainment_category = v;
        }
        if let Some(v) = detection.entertainment_spend_limit {
            target.entertainment_spend_limit = v;
        }
    }

    if let Some(forecast) = raw.forecast {
        let target = &mut config.forecast;
        if let Some(v) = forecast.window_months {
            target.window_months = v;
        }
        if let Some(v) = forecast.horizon_months {
            target.horizon_months = v;
        }
        if let Some(v) = forecast.income_growth_cap {
            target.income_growth_cap = v;
        }
        if let Some(v) = forecast.outcome_growth_floor {
            target.outcome_growth_floor = v;
        }
        if let Some(v) = forecast.outcome_growth_cap {
            target.outcome_growth_cap = v;
        }
    }

    if let Some(insights) = raw.insights {
        let target = &mut config.insights;
        if let Some(v) = insights.strong_savings_rate {
            target.strong_savings_rate = v;
        }
        if let Some(v) = insights.moderate_savings_rate {
            target.moderate_savings_rate = v;
        }
        if let Some(v) = insights.spending_spike_percent {
            target.spending_spike_percent = v;
        }
        if let Some(v) = insights.spending_drop_percent {
            target.spending_drop_percent = v;
        }
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &AnalyticsConfig) -> Result<()> {
    let forecast = &config.forecast;
    if forecast.window_months < 2 {
        return Err(Error::Config(
            "forecast.window_months must be at least 2".into(),
        ));
    }
    if forecast.horizon_months == 0 || forecast.horizon_months > MAX_HORIZON_MONTHS {
        return Err(Error::Config(format!(
            "forecast.horizon_months must be between 1 and {}, got {}",
            MAX_HORIZON_MONTHS, forecast.horizon_months
        )));
    }
    if forecast.outcome_growth_floor > forecast.outcome_growth_cap {
        return Err(Error::Config(format!(
            "forecast.outcome_growth_floor ({}) exceeds outcome_growth_cap ({})",
            forecast.outcome_growth_floor, forecast.outcome_growth_cap
        )));
    }
    if config.insights.moderate_savings_rate > config.insights.strong_savings_rate {
        return Err(Error::Config(
            "insights.moderate_savings_rate exceeds strong_savings_rate".into(),
        ));
    }
    Ok(())
}
