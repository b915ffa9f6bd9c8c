//! # truthguard-core
//!
//! Core types, traits, and scoring for truthguard.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other truthguard crates depend on: the report/analysis data model,
//! the error taxonomy, the pure truth scorer, and the seams for the pluggable
//! analyzer, search, and storage backends.

pub mod error;
pub mod logging;
pub mod models;
pub mod scoring;
pub mod text;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use scoring::{confidence_for, score, FAKE_BELOW, INDICATOR_PENALTY, SUSPICIOUS_BELOW};
pub use text::{collapse_whitespace, preview, truncate_at_boundary, MAX_ANALYZABLE_CHARS};
pub use traits::*;
