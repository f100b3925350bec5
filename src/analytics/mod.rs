//! Trend analysis engine for SEO score histories
//!
//! This module provides functionality for:
//! - Aggregating snapshot windows into summary statistics
//! - Detecting metric regressions between snapshots
//! - Forecasting the overall score with a confidence estimate
//! - Assembling the composite trend report served by the API layer

pub mod aggregator;
pub mod predictor;
pub mod regression;
pub mod stats;

use thiserror::Error;

use crate::config::EngineConfig;
use crate::models::{
    DashboardStats, Metric, Period, Prediction, RegressionEvent, ScoreSnapshot, SeriesPoint,
    Timeframe, TrendReport, TrendSummary,
};

pub use stats::LineFit;

/// Errors that can occur during snapshot validation
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("snapshot {index}: {field} is {value}, expected a finite score in [0, 100]")]
    InvalidScore {
        index: usize,
        field: String,
        value: f64,
    },

    #[error("snapshot {index}: web vital '{name}' is {value}, expected a finite non-negative value")]
    InvalidVital {
        index: usize,
        name: String,
        value: f64,
    },

    #[error("snapshot {index}: timestamp does not increase over the previous snapshot")]
    UnorderedTimestamps { index: usize },
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Reject malformed snapshots before any statistics run.
///
/// Checks every category score for finiteness and the [0, 100] range,
/// every web vital for finiteness and non-negativity, and the sequence for
/// strictly increasing timestamps.
pub fn validate_snapshots(snapshots: &[ScoreSnapshot]) -> AnalysisResult<()> {
    for (index, snapshot) in snapshots.iter().enumerate() {
        for (field, value) in snapshot.score_fields() {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(AnalysisError::InvalidScore {
                    index,
                    field: field.to_string(),
                    value,
                });
            }
        }

        if let Some(vitals) = &snapshot.core_web_vitals {
            for (name, &value) in vitals {
                if !value.is_finite() || value < 0.0 {
                    return Err(AnalysisError::InvalidVital {
                        index,
                        name: name.clone(),
                        value,
                    });
                }
            }
        }

        if index > 0 && snapshot.timestamp <= snapshots[index - 1].timestamp {
            return Err(AnalysisError::UnorderedTimestamps { index });
        }
    }

    Ok(())
}

/// The trend/aggregation core: aggregator, regression detector and
/// predictor behind one configured handle.
///
/// The engine is pure computation over caller-supplied snapshot slices:
/// no I/O, no shared mutable state, no global singletons. Construct it
/// with an [`EngineConfig`] (dependency-injected by the API layer) and
/// call its operations from as many tasks as needed.
#[derive(Debug, Clone, Default)]
pub struct TrendAnalysisEngine {
    config: EngineConfig,
}

impl TrendAnalysisEngine {
    /// Create an engine with the given configuration
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The configuration the engine was built with
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Summarize a snapshot window into aggregate statistics.
    ///
    /// An empty window is a valid, displayable state and yields the
    /// zero-valued summary.
    pub fn summarize(
        &self,
        snapshots: &[ScoreSnapshot],
        period: Period,
    ) -> AnalysisResult<TrendSummary> {
        validate_snapshots(snapshots)?;
        Ok(aggregator::summarize(snapshots, period, &self.config.trend))
    }

    /// One summary per reporting period over the trailing windows ending
    /// at the newest snapshot
    pub fn summarize_periods(
        &self,
        snapshots: &[ScoreSnapshot],
    ) -> AnalysisResult<Vec<TrendSummary>> {
        validate_snapshots(snapshots)?;
        Ok(aggregator::summarize_periods(snapshots, &self.config.trend))
    }

    /// Scan for regressions in the given metrics.
    ///
    /// Total for well-formed input: returns an empty list when nothing
    /// regressed or fewer than two snapshots were supplied.
    #[must_use]
    pub fn detect_regressions(
        &self,
        snapshots: &[ScoreSnapshot],
        metrics: &[Metric],
    ) -> Vec<RegressionEvent> {
        regression::detect_regressions(snapshots, metrics, &self.config.regression)
    }

    /// Forecast the overall score over `timeframe`.
    ///
    /// Falls back to the last known score at zero confidence below two
    /// snapshots.
    #[must_use]
    pub fn predict(&self, snapshots: &[ScoreSnapshot], timeframe: Timeframe) -> Prediction {
        predictor::predict(snapshots, timeframe, &self.config.prediction)
    }

    /// Validate once, then assemble the composite report: summary over
    /// `period`, regressions over the configured tracked metrics, and a
    /// prediction over `timeframe`.
    pub fn analyze(
        &self,
        snapshots: &[ScoreSnapshot],
        period: Period,
        timeframe: Timeframe,
    ) -> AnalysisResult<TrendReport> {
        validate_snapshots(snapshots)?;

        tracing::debug!(
            data_points = snapshots.len(),
            period = %period,
            timeframe = %timeframe,
            "assembling trend report"
        );

        let summary = aggregator::summarize(snapshots, period, &self.config.trend);
        let regressions = regression::detect_regressions(
            snapshots,
            &self.config.regression.tracked_metrics,
            &self.config.regression,
        );
        let prediction = predictor::predict(snapshots, timeframe, &self.config.prediction);

        Ok(TrendReport {
            summary,
            regressions,
            prediction,
        })
    }

    /// Headline statistics for the project dashboard
    pub fn dashboard_stats(&self, snapshots: &[ScoreSnapshot]) -> AnalysisResult<DashboardStats> {
        validate_snapshots(snapshots)?;
        Ok(aggregator::dashboard_stats(snapshots))
    }

    /// Chronological series of one metric with moving-average smoothing
    pub fn trend_series(
        &self,
        snapshots: &[ScoreSnapshot],
        metric: &Metric,
    ) -> AnalysisResult<Vec<SeriesPoint>> {
        validate_snapshots(snapshots)?;
        Ok(aggregator::trend_series(snapshots, metric, &self.config.trend))
    }
}
