//! Request handlers for the truthguard HTTP surface.

use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use truthguard_core::{
    preview, score, text::STORED_TEXT_CHARS, truncate_at_boundary, Error, InputKind, Report,
    SearchResult, SentimentAssessment,
};

use crate::AppState;

/// Default and maximum number of reports returned by `GET /reports`.
const REPORTS_LIMIT: i64 = 100;

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// API-level error with an HTTP status and a user-visible message.
///
/// Every error body is `{"error": string}`; no error is fatal to the
/// process.
#[derive(Debug)]
pub enum ApiError {
    /// Invalid client input (empty text, malformed URL).
    BadRequest(String),
    /// The normalizer's upstream fetch failed.
    UpstreamFailed(String),
    /// Store or other internal failure. Detail is logged, not leaked.
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::Fetch(msg) => ApiError::UpstreamFailed(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::UpstreamFailed(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => {
                warn!(subsystem = "api", error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

// =============================================================================
// VERIFY
// =============================================================================

/// Body of `POST /verify`: exactly one of `text` or `url`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub text: Option<String>,
    pub url: Option<String>,
}

/// Analysis section of the verify response.
#[derive(Debug, Serialize)]
pub struct AnalysisBody {
    pub label: String,
    /// Signed sentiment polarity in [-1, 1].
    pub sentiment: f64,
    pub indicators: u32,
    pub confidence: u8,
    pub preview: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub analysis: AnalysisBody,
    pub search_results: Vec<SearchResult>,
}

/// POST /verify: run the full pipeline for one submission.
///
/// Normalize, then score and search concurrently, then persist, then
/// respond. Validation and fetch failures terminate before the store
/// write, so no partial report ever exists for a failed request.
pub async fn verify(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let start = Instant::now();

    let (kind, raw) = match (req.text.as_deref(), req.url.as_deref()) {
        (Some(text), None) => (InputKind::Text, text),
        (None, Some(url)) => (InputKind::Url, url),
        (Some(_), Some(_)) => {
            return Err(ApiError::BadRequest(
                "provide either text or url, not both".to_string(),
            ))
        }
        (None, None) => return Err(ApiError::BadRequest("no input provided".to_string())),
    };

    let content = state.normalizer.normalize(kind, raw).await?;

    // Scoring and search have no data dependency; run them concurrently.
    // Both degrade instead of failing the request: an analyzer error
    // counts as zero indicators (the most trusting outcome), a search
    // error yields no corroborating sources.
    let analyze = async {
        match state.analyzer.analyze(&content.text).await {
            Ok(assessment) => assessment,
            Err(e) => {
                warn!(
                    subsystem = "api",
                    component = "verify",
                    error = %e,
                    "Analyzer failed, treating as zero indicators"
                );
                SentimentAssessment {
                    polarity: 0.0,
                    indicators: 0,
                }
            }
        }
    };
    let search = async {
        match state.search.find_sources(content.search_query()).await {
            Ok(results) => results,
            Err(e) => {
                warn!(
                    subsystem = "api",
                    component = "verify",
                    error = %e,
                    "Search corroboration failed, returning no sources"
                );
                Vec::new()
            }
        }
    };
    let (assessment, search_results) = tokio::join!(analyze, search);

    let result = score(assessment.polarity, assessment.indicators);

    let stored_text = truncate_at_boundary(&content.text, STORED_TEXT_CHARS);
    let report = state
        .reports
        .create(&stored_text, result.label, result.confidence)
        .await?;

    info!(
        subsystem = "api",
        component = "verify",
        op = "verify",
        report_id = report.id,
        label = %result.label,
        confidence = result.confidence,
        indicators = result.indicators,
        result_count = search_results.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Verification completed"
    );

    Ok(Json(VerifyResponse {
        analysis: AnalysisBody {
            label: result.label.as_str().to_string(),
            sentiment: result.polarity,
            indicators: result.indicators,
            confidence: result.confidence,
            preview: preview(&content.text),
        },
        search_results,
    }))
}

// =============================================================================
// REPORTS & STATS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ListReportsQuery {
    pub limit: Option<i64>,
}

/// GET /reports: recent reports, newest first.
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<Vec<Report>>, ApiError> {
    let limit = query.limit.unwrap_or(REPORTS_LIMIT).clamp(1, REPORTS_LIMIT);
    let reports = state.reports.list_recent(limit).await?;
    Ok(Json(reports))
}

/// GET /stats: aggregate counts, recomputed per request.
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<truthguard_core::StatsSnapshot>, ApiError> {
    let stats = state.reports.counts_by_label().await?;
    Ok(Json(stats))
}

/// GET /health: liveness probe.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
