//! Tests for the score predictor

mod common;

use seotrend::analytics::TrendAnalysisEngine;
use seotrend::models::{PredictionFactors, Timeframe};

#[test]
fn test_single_snapshot_fallback() {
    let snapshots = common::daily_series(&[77.0]);
    let engine = TrendAnalysisEngine::default();

    let prediction = engine.predict(&snapshots, Timeframe::OneWeek);

    assert_eq!(prediction.predicted_score, 77.0);
    assert_eq!(prediction.confidence, 0.0);
    assert_eq!(prediction.timeframe, Timeframe::OneWeek);
    assert_eq!(prediction.factors, PredictionFactors::none());
}

#[test]
fn test_empty_history_fallback() {
    let engine = TrendAnalysisEngine::default();
    let prediction = engine.predict(&[], Timeframe::ThreeMonths);

    assert_eq!(prediction.predicted_score, 0.0);
    assert_eq!(prediction.confidence, 0.0);
}

#[test]
fn test_linear_trend_projection() {
    // Slope 2/step over the last 5 points; 1w projects 2 steps ahead
    let snapshots = common::daily_series(&[60.0, 62.0, 64.0, 66.0, 68.0]);
    let engine = TrendAnalysisEngine::default();

    let prediction = engine.predict(&snapshots, Timeframe::OneWeek);

    assert!((prediction.predicted_score - 72.0).abs() < 1e-9);
    assert!((prediction.confidence - 100.0).abs() < 1e-9);
}

#[test]
fn test_longer_timeframe_projects_further() {
    let snapshots = common::daily_series(&[60.0, 61.0, 62.0, 63.0, 64.0]);
    let engine = TrendAnalysisEngine::default();

    let week = engine.predict(&snapshots, Timeframe::OneWeek);
    let quarter = engine.predict(&snapshots, Timeframe::ThreeMonths);

    assert!(quarter.predicted_score > week.predicted_score);
}

#[test]
fn test_extreme_slopes_are_clamped() {
    let rising = common::daily_series(&[20.0, 40.0, 60.0, 80.0, 100.0]);
    let falling = common::daily_series(&[80.0, 60.0, 40.0, 20.0, 0.0]);
    let engine = TrendAnalysisEngine::default();

    for timeframe in Timeframe::all() {
        let up = engine.predict(&rising, timeframe);
        assert!(up.predicted_score <= 100.0);
        assert!(up.predicted_score >= 0.0);

        let down = engine.predict(&falling, timeframe);
        assert!(down.predicted_score >= 0.0);
        assert!(down.predicted_score <= 100.0);
    }
}

#[test]
fn test_flat_series_low_confidence() {
    let snapshots = common::daily_series(&[70.0; 8]);
    let engine = TrendAnalysisEngine::default();

    let prediction = engine.predict(&snapshots, Timeframe::OneMonth);

    assert!((prediction.predicted_score - 70.0).abs() < 1e-9);
    assert_eq!(prediction.confidence, 0.0);
}

#[test]
fn test_small_sample_confidence_penalty() {
    // A perfect 2-point fit at the default minimum of 5 samples
    let snapshots = common::daily_series(&[50.0, 55.0]);
    let engine = TrendAnalysisEngine::default();

    let prediction = engine.predict(&snapshots, Timeframe::OneWeek);

    assert!((prediction.confidence - 40.0).abs() < 1e-9);
}

#[test]
fn test_noisy_series_has_reduced_confidence() {
    let noisy = common::seeded_series(7, 20, 60.0);
    let engine = TrendAnalysisEngine::default();

    let prediction = engine.predict(&noisy, Timeframe::OneMonth);

    assert!(prediction.confidence < 100.0);
    assert!(prediction.predicted_score >= 0.0);
    assert!(prediction.predicted_score <= 100.0);
}

#[test]
fn test_identical_input_identical_output() {
    let snapshots = common::seeded_series(42, 15, 70.0);
    let engine = TrendAnalysisEngine::default();

    let first = engine.predict(&snapshots, Timeframe::OneMonth);
    let second = engine.predict(&snapshots, Timeframe::OneMonth);

    assert_eq!(first, second);
}
