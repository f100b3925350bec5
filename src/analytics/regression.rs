//! Regression detection over consecutive snapshot pairs
//!
//! Scans snapshot pairs at a configurable stride and emits a
//! [`RegressionEvent`] for every tracked metric that moved in its harmful
//! direction by at least the minor threshold. Score metrics regress
//! downward; web vitals regress upward (a rising LCP is a slower page).

use crate::config::RegressionConfig;
use crate::models::{Metric, RegressionEvent, ScoreSnapshot, Severity};

/// Detect regressions across the snapshot sequence.
///
/// Total for well-formed input: fewer than two snapshots, absent metrics
/// and zero baselines all yield fewer events, never an error. Events are
/// ordered by `detected_at` ascending, then by the order of `metrics`;
/// one snapshot pair may yield several events when several metrics regress
/// at once.
#[must_use]
pub fn detect_regressions(
    snapshots: &[ScoreSnapshot],
    metrics: &[Metric],
    config: &RegressionConfig,
) -> Vec<RegressionEvent> {
    let stride = config.stride.max(1);
    if snapshots.len() <= stride {
        return Vec::new();
    }

    let mut events = Vec::new();

    for i in stride..snapshots.len() {
        let before = &snapshots[i - stride];
        let after = &snapshots[i];

        for metric in metrics {
            let (Some(before_value), Some(after_value)) =
                (metric.value_in(before), metric.value_in(after))
            else {
                continue;
            };

            // A zero baseline has no meaningful percentage change
            if before_value == 0.0 {
                continue;
            }

            let change_percentage = (after_value - before_value) / before_value * 100.0;

            let harmful = if metric.lower_is_better() {
                change_percentage > 0.0
            } else {
                change_percentage < 0.0
            };
            if !harmful {
                continue;
            }

            let Some(severity) = Severity::classify(
                change_percentage.abs(),
                config.minor_pct,
                config.major_pct,
                config.critical_pct,
            ) else {
                continue;
            };

            tracing::debug!(
                metric = %metric,
                change = change_percentage,
                ?severity,
                "regression detected"
            );

            events.push(RegressionEvent {
                metric_name: metric.clone(),
                before_value,
                after_value,
                change_percentage,
                severity,
                detected_at: after.timestamp,
            });
        }
    }

    events
}
