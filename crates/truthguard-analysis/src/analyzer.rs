//! Lexicon-based sentiment and suspicious-indicator analysis.
//!
//! This is the built-in [`TextAnalyzer`] implementation: a deterministic
//! heuristic over word lexicons and surface features. It counts three kinds
//! of indicators:
//!
//! - sensational/clickbait word hits ("shocking", "miracle", "exposed", …)
//! - excessive punctuation: one indicator per two `!`/`?` characters
//! - an all-caps indicator when more than one long word is fully uppercase
//!
//! Polarity comes from small positive/negative word lists, normalized to
//! [-1, 1]. The analyzer never inspects URLs or network state; it sees only
//! the canonical text the normalizer produced.

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use truthguard_core::{Result, SentimentAssessment, TextAnalyzer};

/// Clickbait/sensational lexicon. Matched as substrings of lowercased
/// tokens, so "shocking!!!" and "pre-shocking" both count.
const SENSATIONAL_WORDS: &[&str] = &[
    "click",
    "shocking",
    "unbelievable",
    "hate",
    "secret",
    "miracle",
    "cure",
    "conspiracy",
    "pharma",
    "believe",
    "weird",
    "trick",
    "scientists",
    "baffled",
    "hidden",
    "truth",
    "wake",
    "sheeple",
    "fake",
    "hoax",
    "breaking",
    "urgent",
    "alert",
    "warning",
    "scandal",
    "exposed",
    "leaked",
    "bombshell",
    "revolutionary",
    "guaranteed",
    "limited",
    "free",
    "money",
    "cancer",
    "apocalypse",
];

/// Positive sentiment lexicon.
const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "positive", "confirm", "confirmed", "success", "successful",
    "win", "won", "safe", "effective", "best", "love", "happy", "improve", "improved", "benefit",
    "true", "verified", "accurate", "reliable",
];

/// Negative sentiment lexicon.
const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "negative", "fail", "failed", "failure", "danger", "dangerous",
    "worst", "hate", "horrible", "lie", "lies", "lying", "wrong", "false", "harm", "harmful",
    "threat", "crisis", "disaster", "corrupt",
];

/// Minimum text length (trimmed chars) worth analyzing. Shorter inputs get
/// a neutral assessment with zero indicators.
const MIN_ANALYZABLE_CHARS: usize = 10;

/// Deterministic lexicon/heuristic analyzer.
pub struct HeuristicAnalyzer {
    word_re: Regex,
}

impl HeuristicAnalyzer {
    pub fn new() -> Self {
        Self {
            // alphabetic runs only; digits and punctuation delimit tokens
            word_re: Regex::new(r"[A-Za-z]+").expect("static word regex"),
        }
    }

    fn tokens(&self, text: &str) -> Vec<String> {
        self.word_re
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    /// Signed polarity in [-1, 1] from lexicon hit balance.
    fn polarity(&self, tokens: &[String]) -> f64 {
        let positive = tokens
            .iter()
            .filter(|t| POSITIVE_WORDS.contains(&t.as_str()))
            .count() as f64;
        let negative = tokens
            .iter()
            .filter(|t| NEGATIVE_WORDS.contains(&t.as_str()))
            .count() as f64;
        if positive + negative == 0.0 {
            0.0
        } else {
            (positive - negative) / (positive + negative)
        }
    }

    /// Count suspicious indicators: lexicon hits + punctuation runs + caps.
    fn indicators(&self, text: &str, tokens: &[String]) -> u32 {
        let lexicon_hits = tokens
            .iter()
            .filter(|t| SENSATIONAL_WORDS.iter().any(|w| t.contains(w)))
            .count() as u32;

        let exclaims = text.matches('!').count() + text.matches('?').count();
        let punct_indicators = (exclaims / 2) as u32;

        let caps_words = text
            .split_whitespace()
            .filter(|w| {
                w.len() > 3
                    && w.chars().any(|c| c.is_alphabetic())
                    && w.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase())
            })
            .count();
        let caps_indicators = u32::from(caps_words > 1);

        lexicon_hits + punct_indicators + caps_indicators
    }
}

impl Default for HeuristicAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextAnalyzer for HeuristicAnalyzer {
    async fn analyze(&self, text: &str) -> Result<SentimentAssessment> {
        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_ANALYZABLE_CHARS {
            return Ok(SentimentAssessment {
                polarity: 0.0,
                indicators: 0,
            });
        }

        let tokens = self.tokens(trimmed);
        let polarity = self.polarity(&tokens);
        let indicators = self.indicators(trimmed, &tokens);

        debug!(
            subsystem = "analysis",
            component = "heuristic",
            op = "analyze",
            text_len = trimmed.chars().count(),
            indicators,
            polarity,
            "Text analyzed"
        );

        Ok(SentimentAssessment {
            polarity,
            indicators,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> HeuristicAnalyzer {
        HeuristicAnalyzer::new()
    }

    #[tokio::test]
    async fn test_clickbait_headline_counts_six_indicators() {
        // 2 lexicon hits (shocking, believe) + 3 punctuation (6 bangs / 2)
        // + 1 caps (SHOCKING, WON'T)
        let assessment = analyzer()
            .analyze("SHOCKING!!! You WON'T believe this!!!")
            .await
            .unwrap();
        assert_eq!(assessment.indicators, 6);
    }

    #[tokio::test]
    async fn test_plain_statement_has_no_indicators() {
        let assessment = analyzer()
            .analyze("The city council approved the new budget on Tuesday.")
            .await
            .unwrap();
        assert_eq!(assessment.indicators, 0);
    }

    #[tokio::test]
    async fn test_short_input_is_neutral_and_trusting() {
        let assessment = analyzer().analyze("ok!!!").await.unwrap();
        assert_eq!(assessment.indicators, 0);
        assert_eq!(assessment.polarity, 0.0);
    }

    #[tokio::test]
    async fn test_polarity_positive() {
        let assessment = analyzer()
            .analyze("The results were good and the rollout was successful.")
            .await
            .unwrap();
        assert!(assessment.polarity > 0.0);
        assert!(assessment.polarity <= 1.0);
    }

    #[tokio::test]
    async fn test_polarity_negative() {
        let assessment = analyzer()
            .analyze("A terrible, dangerous failure that caused real harm.")
            .await
            .unwrap();
        assert!(assessment.polarity < 0.0);
        assert!(assessment.polarity >= -1.0);
    }

    #[tokio::test]
    async fn test_polarity_neutral_without_lexicon_hits() {
        let assessment = analyzer()
            .analyze("The committee met at noon to discuss the agenda.")
            .await
            .unwrap();
        assert_eq!(assessment.polarity, 0.0);
    }

    #[tokio::test]
    async fn test_caps_indicator_needs_more_than_one_caps_word() {
        let one = analyzer()
            .analyze("The report said NASA launched a satellite yesterday morning.")
            .await
            .unwrap();
        let two = analyzer()
            .analyze("URGENT WARNING issued about the storm system this weekend.")
            .await
            .unwrap();
        // one caps word alone does not trip the caps indicator
        assert_eq!(one.indicators, 0);
        // two caps words add one indicator on top of the lexicon hits
        // (urgent + warning = 2 lexicon, + 1 caps)
        assert_eq!(two.indicators, 3);
    }

    #[tokio::test]
    async fn test_determinism() {
        let text = "BREAKING!!! Miracle cure EXPOSED by insiders?!";
        let a = analyzer().analyze(text).await.unwrap();
        let b = analyzer().analyze(text).await.unwrap();
        assert_eq!(a, b);
    }
}
