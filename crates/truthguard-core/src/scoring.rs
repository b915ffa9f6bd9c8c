//! The truth scorer: indicator count to confidence score to label.
//!
//! A pure, deterministic function of its inputs. Sentiment polarity is
//! carried through for display but never moves the label; the label is a
//! function of the confidence score alone, and both are always derived
//! together so they cannot drift apart.
//!
//! The thresholds are mirrored by the gauge widget on the client (red band
//! below 40, yellow below 70, green above), so changing them here is a
//! breaking change to the frontend contract.

use crate::models::{AnalysisResult, SentimentLabel, TruthLabel};

/// Confidence penalty per heuristic indicator.
pub const INDICATOR_PENALTY: u32 = 10;

/// Confidence below this is labeled fake.
pub const FAKE_BELOW: u8 = 40;

/// Confidence below this (and at or above [`FAKE_BELOW`]) is suspicious.
pub const SUSPICIOUS_BELOW: u8 = 70;

/// Derive the confidence score from an indicator count.
///
/// `100 - indicators * 10`, clamped to [0, 100]. Ten or more indicators
/// saturate at zero.
pub fn confidence_for(indicators: u32) -> u8 {
    100u32.saturating_sub(indicators.saturating_mul(INDICATOR_PENALTY)) as u8
}

/// Map a confidence score to its truth label.
fn label_for(confidence: u8) -> TruthLabel {
    if confidence < FAKE_BELOW {
        TruthLabel::Fake
    } else if confidence < SUSPICIOUS_BELOW {
        TruthLabel::Suspicious
    } else {
        TruthLabel::Real
    }
}

/// Score one analyzed request.
///
/// `polarity` is the analyzer's signed sentiment in [-1, 1]; `indicators`
/// is its heuristic indicator count. Callers that could not compute an
/// indicator count pass 0 (the most trusting outcome) rather than failing
/// the request.
pub fn score(polarity: f64, indicators: u32) -> AnalysisResult {
    let confidence = confidence_for(indicators);
    AnalysisResult {
        sentiment: SentimentLabel::from_polarity(polarity),
        polarity,
        indicators,
        label: label_for(confidence),
        confidence,
    }
}
