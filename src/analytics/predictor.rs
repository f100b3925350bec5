//! Overall-score forecasting via windowed least-squares fitting
//!
//! Fits a line through the trailing snapshot window, projects it forward by
//! a horizon proportional to the requested timeframe, and derives a
//! confidence from the fit's coefficient of determination. Fully
//! deterministic; identical input always yields an identical prediction.

use crate::analytics::stats;
use crate::config::PredictionConfig;
use crate::models::{Prediction, PredictionFactors, ScoreSnapshot, Timeframe};

/// Number of trailing points used for the momentum factor
const MOMENTUM_POINTS: usize = 3;

/// Cap on each individual factor contribution, in points
const FACTOR_CAP: f64 = 50.0;

/// Slope-to-points scale for the factor attribution
const FACTOR_SLOPE_SCALE: f64 = 25.0;

/// Project the overall score forward over `timeframe`.
///
/// With fewer than two snapshots the prediction falls back to the last
/// known score (or 0 with no history) at zero confidence; this is a
/// defined, displayable state rather than an error.
#[must_use]
pub fn predict(
    snapshots: &[ScoreSnapshot],
    timeframe: Timeframe,
    config: &PredictionConfig,
) -> Prediction {
    let last_score = snapshots.last().map_or(0.0, |s| s.overall_score);

    if snapshots.len() < 2 {
        return Prediction {
            predicted_score: last_score,
            confidence: 0.0,
            timeframe,
            factors: PredictionFactors::none(),
        };
    }

    let window = config.fit_window(timeframe).max(2);
    let start = snapshots.len().saturating_sub(window);
    let recent: Vec<f64> = snapshots[start..].iter().map(|s| s.overall_score).collect();

    // At least two points are in the window, so the fit always exists
    let Some(fit) = stats::fit_line(&recent) else {
        return Prediction {
            predicted_score: last_score,
            confidence: 0.0,
            timeframe,
            factors: PredictionFactors::none(),
        };
    };

    let horizon = config.horizon_steps(timeframe).max(1) as f64;
    let last_index = (recent.len() - 1) as f64;
    let predicted_score = fit.value_at(last_index + horizon).clamp(0.0, 100.0);

    let mut confidence = fit.r_squared * 100.0;
    if recent.len() < config.min_samples {
        confidence *= recent.len() as f64 / config.min_samples as f64;
    }
    let confidence = confidence.clamp(0.0, 100.0);

    let factors = attribute_factors(&recent, fit.slope);

    tracing::debug!(
        timeframe = %timeframe,
        predicted = predicted_score,
        confidence,
        "score prediction computed"
    );

    Prediction {
        predicted_score,
        confidence,
        timeframe,
        factors,
    }
}

/// Split the prediction drivers into historical and momentum contributions.
///
/// `historical` grows with the fitted slope's magnitude; `momentum` grows
/// with the short-term slope over the last few points and is halved when
/// the short-term direction disagrees with the overall fit. Seasonality
/// detection is a stub contributing 0. Each component is capped so the
/// three never sum past 100.
fn attribute_factors(recent: &[f64], overall_slope: f64) -> PredictionFactors {
    let historical = (overall_slope.abs() * FACTOR_SLOPE_SCALE).min(FACTOR_CAP);

    let tail_start = recent.len().saturating_sub(MOMENTUM_POINTS);
    let tail = &recent[tail_start..];
    let momentum = match stats::fit_line(tail) {
        Some(tail_fit) => {
            let magnitude = (tail_fit.slope.abs() * FACTOR_SLOPE_SCALE).min(FACTOR_CAP);
            if tail_fit.slope * overall_slope >= 0.0 {
                magnitude
            } else {
                magnitude / 2.0
            }
        }
        None => 0.0,
    };

    PredictionFactors {
        historical,
        momentum,
        seasonality: 0.0,
    }
}
