//! Common test utilities

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use seotrend::models::ScoreSnapshot;

/// Fixed base timestamp so fixtures are reproducible
#[allow(dead_code)]
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

/// Build one snapshot per score, spaced one day apart
pub fn daily_series(scores: &[f64]) -> Vec<ScoreSnapshot> {
    let base = base_time();
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| ScoreSnapshot::new(base + Duration::days(i as i64), score))
        .collect()
}

/// Seeded random-walk score series, clamped to [0, 100].
///
/// Deterministic for a given seed, so assertions on its output are stable
/// across runs.
#[allow(dead_code)]
pub fn seeded_series(seed: u64, len: usize, start: f64) -> Vec<ScoreSnapshot> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut score = start.clamp(0.0, 100.0);
    let mut scores = Vec::with_capacity(len);

    for _ in 0..len {
        scores.push(score);
        let step: f64 = rng.gen_range(-4.0..=4.0);
        score = (score + step).clamp(0.0, 100.0);
    }

    daily_series(&scores)
}

/// Install a test subscriber once so traced runs show engine debug output
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
