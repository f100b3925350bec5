//! seotrend - SEO Score Trend Analysis Engine
//!
//! A pure-computation core that turns a project's history of SEO analysis
//! snapshots into dashboard statistics, trend summaries, regression events
//! and score forecasts. The surrounding system (API layer, persistence,
//! caching) supplies an ordered snapshot sequence and serializes the
//! results; this crate performs no I/O and holds no global state.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Engine configuration: thresholds, windows, epsilon
//! - [`models`] - Core data structures and types
//! - [`analytics`] - Aggregator, regression detector and predictor
//! - [`error`] - Unified error handling
//!
//! # Example
//!
//! ```no_run
//! use seotrend::analytics::TrendAnalysisEngine;
//! use seotrend::config::EngineConfig;
//! use seotrend::models::{Period, Timeframe};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = EngineConfig::from_env()?;
//!     let engine = TrendAnalysisEngine::new(config);
//!     let snapshots = Vec::new(); // supplied by the persistence layer
//!     let report = engine.analyze(&snapshots, Period::ThirtyDays, Timeframe::OneMonth)?;
//!     println!("{}", serde_json::to_string(&report)?);
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod models;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{AnalysisError, TrendAnalysisEngine};
    pub use crate::config::EngineConfig;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{
        Metric, Period, Prediction, RegressionEvent, ScoreSnapshot, Severity, Timeframe,
        TrendDirection, TrendReport, TrendSummary,
    };
}

// Direct re-exports for convenience
pub use analytics::TrendAnalysisEngine;
pub use models::{Metric, Period, ScoreSnapshot, Timeframe, TrendReport};
