//! Configuration for the trend analysis engine
//!
//! This module handles loading and validating the tunable constants of the
//! engine from environment variables or a TOML file: regression thresholds,
//! prediction windows and the trend-classification epsilon.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{Metric, Timeframe};

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Regression detection configuration
    #[serde(default)]
    pub regression: RegressionConfig,

    /// Score prediction configuration
    #[serde(default)]
    pub prediction: PredictionConfig,

    /// Trend classification configuration
    #[serde(default)]
    pub trend: TrendConfig,
}

/// Regression detection thresholds and scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionConfig {
    /// Minimum |change %| for a minor regression
    pub minor_pct: f64,

    /// Minimum |change %| for a major regression
    pub major_pct: f64,

    /// Minimum |change %| for a critical regression
    pub critical_pct: f64,

    /// Snapshot spacing when pairing; 1 compares adjacent snapshots
    pub stride: usize,

    /// Metrics scanned when the caller does not name a set
    pub tracked_metrics: Vec<Metric>,
}

/// Prediction fit windows and projection horizons, per timeframe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Fitting window (number of trailing snapshots) for a 1-week forecast
    pub fit_window_1w: usize,

    /// Fitting window for a 1-month forecast
    pub fit_window_1m: usize,

    /// Fitting window for a 3-month forecast
    pub fit_window_3m: usize,

    /// Projection steps beyond the last snapshot for a 1-week forecast
    pub horizon_1w: usize,

    /// Projection steps for a 1-month forecast
    pub horizon_1m: usize,

    /// Projection steps for a 3-month forecast
    pub horizon_3m: usize,

    /// Sample count below which confidence is penalized proportionally
    pub min_samples: usize,
}

/// Trend classification and smoothing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Half-average delta (in points) below which a window is Stable
    pub epsilon: f64,

    /// Points of consistency lost per point of volatility
    pub consistency_scaling: f64,

    /// Trailing moving-average window for trend series smoothing
    pub smoothing_window: usize,
}

impl PredictionConfig {
    /// Fitting window for a timeframe
    #[must_use]
    pub fn fit_window(&self, timeframe: Timeframe) -> usize {
        match timeframe {
            Timeframe::OneWeek => self.fit_window_1w,
            Timeframe::OneMonth => self.fit_window_1m,
            Timeframe::ThreeMonths => self.fit_window_3m,
        }
    }

    /// Projection horizon for a timeframe
    #[must_use]
    pub fn horizon_steps(&self, timeframe: Timeframe) -> usize {
        match timeframe {
            Timeframe::OneWeek => self.horizon_1w,
            Timeframe::OneMonth => self.horizon_1m,
            Timeframe::ThreeMonths => self.horizon_3m,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let tracked_metrics = std::env::var("SEOTREND_REGRESSION_METRICS")
            .ok()
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(Metric::parse)
                    .collect::<Vec<_>>()
            })
            .unwrap_or(defaults.regression.tracked_metrics);

        let config = Self {
            regression: RegressionConfig {
                minor_pct: env_parse("SEOTREND_REGRESSION_MINOR_PCT", defaults.regression.minor_pct),
                major_pct: env_parse("SEOTREND_REGRESSION_MAJOR_PCT", defaults.regression.major_pct),
                critical_pct: env_parse(
                    "SEOTREND_REGRESSION_CRITICAL_PCT",
                    defaults.regression.critical_pct,
                ),
                stride: env_parse("SEOTREND_REGRESSION_STRIDE", defaults.regression.stride),
                tracked_metrics,
            },
            prediction: PredictionConfig {
                fit_window_1w: env_parse(
                    "SEOTREND_PREDICTION_WINDOW_1W",
                    defaults.prediction.fit_window_1w,
                ),
                fit_window_1m: env_parse(
                    "SEOTREND_PREDICTION_WINDOW_1M",
                    defaults.prediction.fit_window_1m,
                ),
                fit_window_3m: env_parse(
                    "SEOTREND_PREDICTION_WINDOW_3M",
                    defaults.prediction.fit_window_3m,
                ),
                horizon_1w: env_parse(
                    "SEOTREND_PREDICTION_HORIZON_1W",
                    defaults.prediction.horizon_1w,
                ),
                horizon_1m: env_parse(
                    "SEOTREND_PREDICTION_HORIZON_1M",
                    defaults.prediction.horizon_1m,
                ),
                horizon_3m: env_parse(
                    "SEOTREND_PREDICTION_HORIZON_3M",
                    defaults.prediction.horizon_3m,
                ),
                min_samples: env_parse(
                    "SEOTREND_PREDICTION_MIN_SAMPLES",
                    defaults.prediction.min_samples,
                ),
            },
            trend: TrendConfig {
                epsilon: env_parse("SEOTREND_TREND_EPSILON", defaults.trend.epsilon),
                consistency_scaling: env_parse(
                    "SEOTREND_TREND_CONSISTENCY_SCALING",
                    defaults.trend.consistency_scaling,
                ),
                smoothing_window: env_parse(
                    "SEOTREND_TREND_SMOOTHING_WINDOW",
                    defaults.trend.smoothing_window,
                ),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.regression.minor_pct <= 0.0 {
            anyhow::bail!("regression.minor_pct must be positive");
        }

        if self.regression.minor_pct >= self.regression.major_pct
            || self.regression.major_pct >= self.regression.critical_pct
        {
            anyhow::bail!("regression thresholds must be strictly ascending: minor < major < critical");
        }

        if self.regression.stride == 0 {
            anyhow::bail!("regression.stride must be at least 1");
        }

        if self.regression.tracked_metrics.is_empty() {
            anyhow::bail!("regression.tracked_metrics must not be empty");
        }

        for window in [
            self.prediction.fit_window_1w,
            self.prediction.fit_window_1m,
            self.prediction.fit_window_3m,
        ] {
            if window < 2 {
                anyhow::bail!("prediction fit windows must be at least 2");
            }
        }

        for horizon in [
            self.prediction.horizon_1w,
            self.prediction.horizon_1m,
            self.prediction.horizon_3m,
        ] {
            if horizon == 0 {
                anyhow::bail!("prediction horizons must be at least 1");
            }
        }

        if self.prediction.min_samples < 2 {
            anyhow::bail!("prediction.min_samples must be at least 2");
        }

        if self.trend.epsilon < 0.0 {
            anyhow::bail!("trend.epsilon must not be negative");
        }

        if self.trend.consistency_scaling < 0.0 {
            anyhow::bail!("trend.consistency_scaling must not be negative");
        }

        if self.trend.smoothing_window == 0 {
            anyhow::bail!("trend.smoothing_window must be at least 1");
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            regression: RegressionConfig::default(),
            prediction: PredictionConfig::default(),
            trend: TrendConfig::default(),
        }
    }
}

impl Default for RegressionConfig {
    fn default() -> Self {
        let mut tracked_metrics = Metric::score_metrics();
        tracked_metrics.extend(Metric::standard_vitals());

        Self {
            minor_pct: 5.0,
            major_pct: 15.0,
            critical_pct: 25.0,
            stride: 1,
            tracked_metrics,
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            fit_window_1w: 5,
            fit_window_1m: 10,
            fit_window_3m: 20,
            horizon_1w: 2,
            horizon_1m: 6,
            horizon_3m: 18,
            min_samples: 5,
        }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            epsilon: 2.0,
            consistency_scaling: 5.0,
            smoothing_window: 7,
        }
    }
}
