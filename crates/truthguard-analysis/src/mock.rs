//! Deterministic mock backends for tests.
//!
//! Always compiled (not `#[cfg(test)]`) so integration tests in dependent
//! crates can drive the pipeline with fixed analyzer output and canned
//! search results.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use truthguard_core::{Error, Result, SearchResult, SentimentAssessment, SourceSearch, TextAnalyzer};

/// Mock analyzer returning a fixed assessment (or a fixed failure).
#[derive(Clone)]
pub struct MockAnalyzer {
    polarity: f64,
    indicators: u32,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockAnalyzer {
    /// Fixed neutral assessment with zero indicators.
    pub fn new() -> Self {
        Self {
            polarity: 0.0,
            indicators: 0,
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_polarity(mut self, polarity: f64) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn with_indicators(mut self, indicators: u32) -> Self {
        self.indicators = indicators;
        self
    }

    /// Make every call fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Number of analyze calls made.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextAnalyzer for MockAnalyzer {
    async fn analyze(&self, _text: &str) -> Result<SentimentAssessment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Analysis("mock analyzer failure".to_string()));
        }
        Ok(SentimentAssessment {
            polarity: self.polarity,
            indicators: self.indicators,
        })
    }
}

/// Mock search provider returning canned results (or a fixed failure).
#[derive(Clone)]
pub struct MockSearch {
    results: Vec<SearchResult>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockSearch {
    /// No results, never fails.
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_results(mut self, results: Vec<SearchResult>) -> Self {
        self.results = results;
        self
    }

    /// Make every call fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Number of find_sources calls made.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceSearch for MockSearch {
    async fn find_sources(&self, _query: &str) -> Result<Vec<SearchResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Search("mock search failure".to_string()));
        }
        Ok(self.results.clone())
    }
}
