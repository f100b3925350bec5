//! Score aggregation over snapshot windows
//!
//! This module reduces an ordered snapshot sequence into the summary
//! statistics the dashboard renders:
//! - Per-period trend summaries (average, best, worst, volatility,
//!   trend direction, consistency)
//! - Headline dashboard statistics
//! - Chartable metric series with moving-average smoothing

use chrono::Duration;

use crate::analytics::stats;
use crate::config::TrendConfig;
use crate::models::{
    DashboardStats, Metric, Period, ScoreSnapshot, SeriesPoint, TrendDirection, TrendSummary,
};

/// Summarize a window of snapshots into aggregate statistics.
///
/// An empty window yields [`TrendSummary::empty`]; a single snapshot has
/// zero volatility, zero improvement and a `Stable` trend. Snapshots are
/// assumed validated and ordered by the caller.
#[must_use]
pub fn summarize(snapshots: &[ScoreSnapshot], period: Period, config: &TrendConfig) -> TrendSummary {
    if snapshots.is_empty() {
        return TrendSummary::empty(period);
    }

    let scores: Vec<f64> = snapshots.iter().map(|s| s.overall_score).collect();

    let mut sum = 0.0;
    let mut best = f64::NEG_INFINITY;
    let mut worst = f64::INFINITY;
    for &score in &scores {
        sum += score;
        best = best.max(score);
        worst = worst.min(score);
    }
    let average = sum / scores.len() as f64;

    let volatility = stats::population_std_dev(&scores);
    let consistency = (100.0 - volatility * config.consistency_scaling).max(0.0);

    let overall_trend = classify_trend(&scores, config.epsilon);

    let score_improvement = if scores.len() > 1 {
        scores[scores.len() - 1] - scores[0]
    } else {
        0.0
    };

    TrendSummary {
        period,
        total_data_points: snapshots.len(),
        average_score: average,
        best_score: best,
        worst_score: worst,
        volatility,
        overall_trend,
        score_improvement,
        consistency_score: consistency,
    }
}

/// One summary per reporting period, each over the trailing window ending
/// at the newest snapshot
#[must_use]
pub fn summarize_periods(snapshots: &[ScoreSnapshot], config: &TrendConfig) -> Vec<TrendSummary> {
    let Some(newest) = snapshots.last() else {
        return Period::all()
            .into_iter()
            .map(TrendSummary::empty)
            .collect();
    };

    Period::all()
        .into_iter()
        .map(|period| {
            let cutoff = newest.timestamp - Duration::days(period.days());
            // Snapshots are timestamp-ordered, so the window is a suffix
            let start = snapshots.partition_point(|s| s.timestamp < cutoff);
            summarize(&snapshots[start..], period, config)
        })
        .collect()
}

/// Headline statistics for the project dashboard
#[must_use]
pub fn dashboard_stats(snapshots: &[ScoreSnapshot]) -> DashboardStats {
    let Some(latest) = snapshots.last() else {
        return DashboardStats::empty();
    };

    let scores: Vec<f64> = snapshots.iter().map(|s| s.overall_score).collect();

    let mut sum = 0.0;
    let mut best = f64::NEG_INFINITY;
    let mut worst = f64::INFINITY;
    for &score in &scores {
        sum += score;
        best = best.max(score);
        worst = worst.min(score);
    }

    let score_change = if snapshots.len() > 1 {
        latest.overall_score - snapshots[snapshots.len() - 2].overall_score
    } else {
        0.0
    };

    let latest_scores = latest
        .score_fields()
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

    DashboardStats {
        total_analyses: snapshots.len(),
        latest_scores,
        score_change,
        average_score: sum / scores.len() as f64,
        best_score: best,
        worst_score: worst,
    }
}

/// Chronological series of one metric with trailing moving-average
/// smoothing.
///
/// Snapshots missing the metric are skipped; the smoothing window covers
/// the last `smoothing_window` emitted values including the current one.
#[must_use]
pub fn trend_series(
    snapshots: &[ScoreSnapshot],
    metric: &Metric,
    config: &TrendConfig,
) -> Vec<SeriesPoint> {
    let window = config.smoothing_window.max(1);
    let mut values: Vec<f64> = Vec::new();
    let mut points = Vec::new();

    for snapshot in snapshots {
        let Some(value) = metric.value_in(snapshot) else {
            continue;
        };
        values.push(value);

        let start = values.len().saturating_sub(window);
        let smoothed = stats::mean(&values[start..]);

        points.push(SeriesPoint {
            timestamp: snapshot.timestamp,
            value,
            smoothed,
        });
    }

    if points.is_empty() {
        tracing::debug!(metric = %metric, "trend series has no data points");
    }

    points
}

/// First-half vs second-half trend classification.
///
/// The window splits by count; on odd counts the middle point belongs to
/// neither half. Fewer than two points classify as `Stable`.
fn classify_trend(scores: &[f64], epsilon: f64) -> TrendDirection {
    let n = scores.len();
    if n < 2 {
        return TrendDirection::Stable;
    }

    let half = n / 2;
    let first_avg = stats::mean(&scores[..half]);
    let second_avg = stats::mean(&scores[n - half..]);

    TrendDirection::from_delta(second_avg - first_avg, epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn daily_series(scores: &[f64]) -> Vec<ScoreSnapshot> {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| ScoreSnapshot::new(base + Duration::days(i as i64), score))
            .collect()
    }

    #[test]
    fn test_classify_trend_improving() {
        let direction = classify_trend(&[70.0, 72.0, 74.0, 80.0, 83.0], 2.0);
        assert_eq!(direction, TrendDirection::Improving);
    }

    #[test]
    fn test_classify_trend_excludes_middle_point_on_odd_counts() {
        // Middle spike must not influence either half
        let direction = classify_trend(&[50.0, 50.0, 100.0, 50.0, 50.0], 2.0);
        assert_eq!(direction, TrendDirection::Stable);
    }

    #[test]
    fn test_classify_trend_single_point_stable() {
        assert_eq!(classify_trend(&[90.0], 2.0), TrendDirection::Stable);
    }

    #[test]
    fn test_summarize_single_point() {
        let snapshots = daily_series(&[75.0]);
        let summary = summarize(&snapshots, Period::ThirtyDays, &TrendConfig::default());

        assert_eq!(summary.total_data_points, 1);
        assert_eq!(summary.volatility, 0.0);
        assert_eq!(summary.score_improvement, 0.0);
        assert_eq!(summary.overall_trend, TrendDirection::Stable);
        assert!((summary.consistency_score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_periods_windows_are_suffixes() {
        // 40 daily points: the 7d window sees only the tail
        let scores: Vec<f64> = (0..40).map(|i| 50.0 + i as f64).collect();
        let snapshots = daily_series(&scores);

        let summaries = summarize_periods(&snapshots, &TrendConfig::default());
        assert_eq!(summaries.len(), 4);

        let week = summaries
            .iter()
            .find(|s| s.period == Period::SevenDays)
            .unwrap();
        let month = summaries
            .iter()
            .find(|s| s.period == Period::ThirtyDays)
            .unwrap();

        assert!(week.total_data_points <= 8);
        assert!(month.total_data_points > week.total_data_points);
        assert!(week.average_score > month.average_score);
    }

    #[test]
    fn test_trend_series_skips_missing_metric() {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let snapshots = vec![
            ScoreSnapshot::new(base, 80.0).with_vital("lcp", 1000.0),
            ScoreSnapshot::new(base + Duration::days(1), 81.0),
            ScoreSnapshot::new(base + Duration::days(2), 82.0).with_vital("lcp", 1200.0),
        ];

        let metric = Metric::Vital("lcp".to_string());
        let series = trend_series(&snapshots, &metric, &TrendConfig::default());

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].value, 1000.0);
        assert_eq!(series[1].value, 1200.0);
        assert!((series[1].smoothed - 1100.0).abs() < 1e-9);
    }
}
