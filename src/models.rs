// Core data structures for SEO trend analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scored analysis of a project at a point in time.
///
/// Snapshots are produced by the crawler/analysis pipeline and handed to this
/// crate as an immutable list ordered by `timestamp` ascending. All score
/// fields are on a 0-100 scale; `core_web_vitals` carries metric-specific
/// units (milliseconds for the timing vitals, unitless for CLS).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    pub timestamp: DateTime<Utc>,
    pub overall_score: f64,
    pub technical_score: f64,
    pub content_score: f64,
    pub on_page_score: f64,
    pub ux_score: f64,
    /// Named web vital -> measured value (e.g. "lcp" -> 1050.0).
    /// BTreeMap so iteration order is stable across runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_web_vitals: Option<BTreeMap<String, f64>>,
}

impl ScoreSnapshot {
    /// Create a snapshot with every category score set to `score`
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, score: f64) -> Self {
        Self {
            timestamp,
            overall_score: score,
            technical_score: score,
            content_score: score,
            on_page_score: score,
            ux_score: score,
            core_web_vitals: None,
        }
    }

    /// Attach a web vital measurement
    #[must_use]
    pub fn with_vital(mut self, name: &str, value: f64) -> Self {
        self.core_web_vitals
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_ascii_lowercase(), value);
        self
    }

    /// Category score fields as (wire name, value) pairs
    #[must_use]
    pub fn score_fields(&self) -> [(&'static str, f64); 5] {
        [
            ("overallScore", self.overall_score),
            ("technicalScore", self.technical_score),
            ("contentScore", self.content_score),
            ("onPageScore", self.on_page_score),
            ("uxScore", self.ux_score),
        ]
    }
}

/// A trackable metric series within a snapshot sequence.
///
/// The five category scores improve upward; web vitals are latencies or
/// shift ratios and improve downward. [`Metric::lower_is_better`] encodes
/// that orientation for the regression detector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Metric {
    Overall,
    Technical,
    Content,
    OnPage,
    Ux,
    /// A core-web-vital key such as "lcp", "fid", "cls", "fcp" or "ttfb"
    Vital(String),
}

impl Metric {
    /// Wire name of the metric
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Overall => "overallScore",
            Self::Technical => "technicalScore",
            Self::Content => "contentScore",
            Self::OnPage => "onPageScore",
            Self::Ux => "uxScore",
            Self::Vital(name) => name,
        }
    }

    /// Parse a metric from its wire name; unknown names are treated as
    /// web-vital keys
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "overallScore" | "overall" => Self::Overall,
            "technicalScore" | "technical" => Self::Technical,
            "contentScore" | "content" => Self::Content,
            "onPageScore" | "onPage" | "onpage" => Self::OnPage,
            "uxScore" | "ux" => Self::Ux,
            other => Self::Vital(other.to_ascii_lowercase()),
        }
    }

    /// Whether a decrease in this metric is an improvement
    #[must_use]
    pub fn lower_is_better(&self) -> bool {
        matches!(self, Self::Vital(_))
    }

    /// Extract this metric's value from a snapshot, if present
    #[must_use]
    pub fn value_in(&self, snapshot: &ScoreSnapshot) -> Option<f64> {
        match self {
            Self::Overall => Some(snapshot.overall_score),
            Self::Technical => Some(snapshot.technical_score),
            Self::Content => Some(snapshot.content_score),
            Self::OnPage => Some(snapshot.on_page_score),
            Self::Ux => Some(snapshot.ux_score),
            Self::Vital(name) => snapshot
                .core_web_vitals
                .as_ref()
                .and_then(|vitals| vitals.get(name))
                .copied(),
        }
    }

    /// The five category score metrics
    #[must_use]
    pub fn score_metrics() -> Vec<Self> {
        vec![
            Self::Overall,
            Self::Technical,
            Self::Content,
            Self::OnPage,
            Self::Ux,
        ]
    }

    /// The standard core-web-vital metrics
    #[must_use]
    pub fn standard_vitals() -> Vec<Self> {
        ["lcp", "fid", "cls", "fcp", "ttfb"]
            .into_iter()
            .map(|name| Self::Vital(name.to_string()))
            .collect()
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Metric> for String {
    fn from(metric: Metric) -> Self {
        metric.name().to_string()
    }
}

impl From<String> for Metric {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// Reporting window for a trend summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "1y")]
    OneYear,
}

impl Period {
    /// Get string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
            Self::NinetyDays => "90d",
            Self::OneYear => "1y",
        }
    }

    /// Create from string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "7d" => Some(Self::SevenDays),
            "30d" => Some(Self::ThirtyDays),
            "90d" => Some(Self::NinetyDays),
            "1y" => Some(Self::OneYear),
            _ => None,
        }
    }

    /// Window length in days
    #[must_use]
    pub fn days(&self) -> i64 {
        match self {
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
            Self::NinetyDays => 90,
            Self::OneYear => 365,
        }
    }

    /// Get all periods
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![
            Self::SevenDays,
            Self::ThirtyDays,
            Self::NinetyDays,
            Self::OneYear,
        ]
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Forecast horizon for score prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
}

impl Timeframe {
    /// Get string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneWeek => "1w",
            Self::OneMonth => "1m",
            Self::ThreeMonths => "3m",
        }
    }

    /// Create from string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1w" => Some(Self::OneWeek),
            "1m" => Some(Self::OneMonth),
            "3m" => Some(Self::ThreeMonths),
            _ => None,
        }
    }

    /// Get all timeframes
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![Self::OneWeek, Self::OneMonth, Self::ThreeMonths]
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall trend classification for a summary window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    /// Classify a first-half vs second-half average delta.
    ///
    /// Deltas within `epsilon` points of zero are considered noise.
    #[must_use]
    pub fn from_delta(delta: f64, epsilon: f64) -> Self {
        if delta > epsilon {
            Self::Improving
        } else if delta < -epsilon {
            Self::Declining
        } else {
            Self::Stable
        }
    }
}

/// Severity of a detected regression
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

impl Severity {
    /// Classify a change magnitude against ascending percentage cutoffs.
    ///
    /// Returns the highest severity whose cutoff is met; a magnitude exactly
    /// on a boundary resolves to the higher severity. Below `minor` the
    /// change is not a reportable regression.
    #[must_use]
    pub fn classify(magnitude: f64, minor: f64, major: f64, critical: f64) -> Option<Self> {
        if magnitude >= critical {
            Some(Self::Critical)
        } else if magnitude >= major {
            Some(Self::Major)
        } else if magnitude >= minor {
            Some(Self::Minor)
        } else {
            None
        }
    }
}

/// Aggregate view over a window of snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub period: Period,
    pub total_data_points: usize,
    pub average_score: f64,
    pub best_score: f64,
    pub worst_score: f64,
    /// Population standard deviation of the overall score
    pub volatility: f64,
    pub overall_trend: TrendDirection,
    /// Last overall score minus the first
    pub score_improvement: f64,
    /// 100 at zero volatility, decaying linearly with it
    pub consistency_score: f64,
}

impl TrendSummary {
    /// Zero-valued summary for an empty history; a valid, displayable state
    #[must_use]
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            total_data_points: 0,
            average_score: 0.0,
            best_score: 0.0,
            worst_score: 0.0,
            volatility: 0.0,
            overall_trend: TrendDirection::Stable,
            score_improvement: 0.0,
            consistency_score: 0.0,
        }
    }
}

/// A detected decline between two compared snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionEvent {
    pub metric_name: Metric,
    pub before_value: f64,
    pub after_value: f64,
    /// Raw signed percentage change, `(after - before) / before * 100`
    pub change_percentage: f64,
    pub severity: Severity,
    /// Timestamp of the "after" snapshot
    pub detected_at: DateTime<Utc>,
}

/// Contribution breakdown for a prediction, each component in points.
///
/// `historical + momentum + seasonality` never exceeds 100. Seasonality
/// detection is not implemented and always contributes 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionFactors {
    pub historical: f64,
    pub momentum: f64,
    pub seasonality: f64,
}

impl PredictionFactors {
    /// All-zero factors, used for insufficient-data fallbacks
    #[must_use]
    pub fn none() -> Self {
        Self {
            historical: 0.0,
            momentum: 0.0,
            seasonality: 0.0,
        }
    }
}

/// A forward projection of the overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Projected overall score, clamped to [0, 100]
    pub predicted_score: f64,
    /// Fit quality scaled to [0, 100]
    pub confidence: f64,
    pub timeframe: Timeframe,
    pub factors: PredictionFactors,
}

/// Headline numbers for the project dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_analyses: usize,
    /// Category scores from the newest snapshot, keyed by wire name
    pub latest_scores: BTreeMap<String, f64>,
    /// Overall score delta against the previous snapshot
    pub score_change: f64,
    pub average_score: f64,
    pub best_score: f64,
    pub worst_score: f64,
}

impl DashboardStats {
    /// Zero-valued stats for an empty history
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_analyses: 0,
            latest_scores: BTreeMap::new(),
            score_change: 0.0,
            average_score: 0.0,
            best_score: 0.0,
            worst_score: 0.0,
        }
    }
}

/// One charted point of a metric series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    /// Trailing moving average over the configured smoothing window
    pub smoothed: f64,
}

/// Composite response assembled for the API layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub summary: TrendSummary,
    pub regressions: Vec<RegressionEvent>,
    pub prediction: Prediction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_metric_name_roundtrip() {
        for metric in Metric::score_metrics() {
            let restored = Metric::parse(metric.name());
            assert_eq!(metric, restored);
        }
        for vital in Metric::standard_vitals() {
            let restored = Metric::parse(vital.name());
            assert_eq!(vital, restored);
        }
    }

    #[test]
    fn test_metric_orientation() {
        assert!(!Metric::Overall.lower_is_better());
        assert!(Metric::Vital("lcp".to_string()).lower_is_better());
    }

    #[test]
    fn test_metric_value_extraction() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let snapshot = ScoreSnapshot::new(ts, 80.0).with_vital("LCP", 1050.0);

        assert_eq!(Metric::Overall.value_in(&snapshot), Some(80.0));
        assert_eq!(
            Metric::Vital("lcp".to_string()).value_in(&snapshot),
            Some(1050.0)
        );
        assert_eq!(Metric::Vital("cls".to_string()).value_in(&snapshot), None);
    }

    #[test]
    fn test_period_string_roundtrip() {
        for period in Period::all() {
            assert_eq!(Period::parse(period.as_str()), Some(period));
        }
    }

    #[test]
    fn test_timeframe_string_roundtrip() {
        for timeframe in Timeframe::all() {
            assert_eq!(Timeframe::parse(timeframe.as_str()), Some(timeframe));
        }
    }

    #[test]
    fn test_severity_classification_boundaries() {
        assert_eq!(Severity::classify(4.99, 5.0, 15.0, 25.0), None);
        assert_eq!(
            Severity::classify(5.0, 5.0, 15.0, 25.0),
            Some(Severity::Minor)
        );
        assert_eq!(
            Severity::classify(15.0, 5.0, 15.0, 25.0),
            Some(Severity::Major)
        );
        assert_eq!(
            Severity::classify(25.0, 5.0, 15.0, 25.0),
            Some(Severity::Critical)
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Minor < Severity::Major);
        assert!(Severity::Major < Severity::Critical);
    }

    #[test]
    fn test_trend_direction_from_delta() {
        assert_eq!(
            TrendDirection::from_delta(2.5, 2.0),
            TrendDirection::Improving
        );
        assert_eq!(
            TrendDirection::from_delta(-2.5, 2.0),
            TrendDirection::Declining
        );
        assert_eq!(TrendDirection::from_delta(1.5, 2.0), TrendDirection::Stable);
        assert_eq!(
            TrendDirection::from_delta(-2.0, 2.0),
            TrendDirection::Stable
        );
    }
}
