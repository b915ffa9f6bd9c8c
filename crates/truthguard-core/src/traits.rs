//! Core traits for truthguard abstractions.
//!
//! These traits define the seams between the request pipeline and its
//! pluggable backends: the sentiment/heuristic analyzer, the search
//! corroborator, and the report store. Any implementation satisfying the
//! contract is substitutable; the API binary wires concrete ones in `main`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Report, SearchResult, SentimentAssessment, StatsSnapshot, TruthLabel};

/// Sentiment and heuristic-indicator analysis over normalized text.
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    /// Analyze text, returning signed polarity and an indicator count.
    async fn analyze(&self, text: &str) -> Result<SentimentAssessment>;
}

/// Retrieval of corroborating sources for a query.
///
/// Implementations report failures as errors; the pipeline degrades any
/// failure to an empty result list rather than failing the request.
#[async_trait]
pub trait SourceSearch: Send + Sync {
    /// Return candidate corroborating sources in provider rank order.
    async fn find_sources(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Persistent store of immutable analysis reports.
///
/// All operations are atomic with respect to each other: a concurrent
/// create is never lost and is visible to subsequent reads within this
/// process. Reports are create-only; there is no update or delete.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Persist a new report, assigning the next identifier and the
    /// current timestamp.
    async fn create(&self, text: &str, label: TruthLabel, confidence: u8) -> Result<Report>;

    /// List the most recent reports, newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<Report>>;

    /// Aggregate counts by label over all reports. Always reflects the
    /// latest committed state at call time.
    async fn counts_by_label(&self) -> Result<StatsSnapshot>;
}
