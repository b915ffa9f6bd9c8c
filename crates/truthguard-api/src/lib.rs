//! truthguard-api - HTTP API server for truthguard.
//!
//! The router and handlers live in the library so integration tests can
//! drive the full pipeline in-process; `main.rs` only wires concrete
//! backends and serves.

pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use truthguard_analysis::ContentNormalizer;
use truthguard_core::{ReportRepository, SourceSearch, TextAnalyzer};

use handlers::{get_stats, health_check, list_reports, verify};

/// Application state shared across handlers.
///
/// The store and the external capabilities sit behind trait objects so
/// main can wire Postgres + live backends while tests wire the memory
/// store + mocks.
#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<dyn ReportRepository>,
    pub analyzer: Arc<dyn TextAnalyzer>,
    pub search: Arc<dyn SourceSearch>,
    pub normalizer: ContentNormalizer,
}

/// Build the application router over the given state.
///
/// Middleware layers (trace, request-id, CORS, body limit) are added by
/// the binary; tests exercise the bare routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/verify", post(verify))
        .route("/reports", get(list_reports))
        .route("/stats", get(get_stats))
        .with_state(state)
}
