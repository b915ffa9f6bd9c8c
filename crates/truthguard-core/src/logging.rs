//! Structured logging field name constants for truthguard.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data (search hits) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "analysis", "search", "db"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "normalizer", "serpapi", "scrape", "reports", "pool"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "verify", "fetch_page", "find_sources", "create"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Report identifier being operated on.
pub const REPORT_ID: &str = "report_id";

/// Search query text.
pub const QUERY: &str = "query";

/// URL being fetched.
pub const URL: &str = "url";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a search or query.
pub const RESULT_COUNT: &str = "result_count";

/// Character length of the text under analysis.
pub const TEXT_LEN: &str = "text_len";

/// Heuristic indicator count from the analyzer.
pub const INDICATORS: &str = "indicators";

/// Derived confidence score (0-100).
pub const CONFIDENCE: &str = "confidence";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Truth label assigned to a report.
pub const LABEL: &str = "label";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
