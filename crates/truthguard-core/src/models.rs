//! Data model for truthguard: analysis requests, reports, and statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// What kind of input the client submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Free text pasted by the user.
    Text,
    /// A URL whose main content should be fetched and analyzed.
    Url,
}

/// Canonical text payload produced by the content normalizer.
///
/// Invariant: `text` is non-empty, whitespace-collapsed, and at most
/// [`crate::text::MAX_ANALYZABLE_CHARS`] characters, truncated at a
/// whitespace boundary.
#[derive(Debug, Clone)]
pub struct NormalizedContent {
    /// Canonical analyzable text.
    pub text: String,
    /// Where the text came from.
    pub kind: InputKind,
    /// Source URL when `kind` is [`InputKind::Url`].
    pub source_url: Option<String>,
    /// Page title when one was extracted from a fetched URL.
    pub title: Option<String>,
}

impl NormalizedContent {
    /// The query string to hand to the search corroborator.
    ///
    /// URL inputs search by page title (falling back to body text);
    /// text inputs search by the text itself.
    pub fn search_query(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => &self.text,
        }
    }
}

/// Sentiment polarity bucket reported alongside the truth label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

/// Polarity magnitude below which sentiment counts as neutral.
pub const NEUTRAL_POLARITY_BAND: f64 = 0.05;

impl SentimentLabel {
    /// Bucket a signed polarity in [-1, 1].
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > NEUTRAL_POLARITY_BAND {
            SentimentLabel::Positive
        } else if polarity < -NEUTRAL_POLARITY_BAND {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Three-way credibility label derived from the confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruthLabel {
    Real,
    Suspicious,
    Fake,
}

impl TruthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TruthLabel::Real => "real",
            TruthLabel::Suspicious => "suspicious",
            TruthLabel::Fake => "fake",
        }
    }
}

impl std::fmt::Display for TruthLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TruthLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "real" => Ok(TruthLabel::Real),
            "suspicious" => Ok(TruthLabel::Suspicious),
            "fake" => Ok(TruthLabel::Fake),
            other => Err(Error::Internal(format!("unknown truth label: {other}"))),
        }
    }
}

/// Raw output of the sentiment/heuristic analyzer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentAssessment {
    /// Signed sentiment polarity in [-1, 1].
    pub polarity: f64,
    /// Count of suspicious heuristic indicators (clickbait hits,
    /// punctuation runs, all-caps words). Never negative.
    pub indicators: u32,
}

/// Combined scoring outcome for one request.
///
/// Invariant: `confidence` and `label` are always derived together by
/// [`crate::scoring::score`] from the same thresholds, never set
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Sentiment bucket (advisory context, does not move the label).
    pub sentiment: SentimentLabel,
    /// Signed polarity as reported by the analyzer.
    pub polarity: f64,
    /// Heuristic indicator count.
    pub indicators: u32,
    /// Credibility label derived from `confidence`.
    pub label: TruthLabel,
    /// Confidence score in [0, 100].
    pub confidence: u8,
}

impl AnalysisResult {
    /// Sentiment strength in [0, 1] (polarity magnitude).
    pub fn sentiment_strength(&self) -> f64 {
        self.polarity.abs().clamp(0.0, 1.0)
    }
}

/// A corroborating source returned by the search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// An immutable persisted record of one completed analysis request.
///
/// Identifiers are monotonic and assigned at creation. Reports are
/// create-only: the core flow never updates or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub id: i64,
    /// Input text, possibly truncated for storage.
    pub text: String,
    pub label: TruthLabel,
    pub confidence: i32,
    pub created_at: DateTime<Utc>,
}

/// Aggregate counts over all reports. Recomputed per request, never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub total_reports: i64,
    pub real_count: i64,
    pub suspicious_count: i64,
    pub fake_count: i64,
}

impl StatsSnapshot {
    /// Count for a single label.
    pub fn count_for(&self, label: TruthLabel) -> i64 {
        match label {
            TruthLabel::Real => self.real_count,
            TruthLabel::Suspicious => self.suspicious_count,
            TruthLabel::Fake => self.fake_count,
        }
    }
}
