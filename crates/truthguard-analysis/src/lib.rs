//! # truthguard-analysis
//!
//! External-capability backends for truthguard, behind the narrow traits
//! defined in `truthguard-core`:
//!
//! - [`analyzer::HeuristicAnalyzer`]: lexicon-based sentiment polarity and
//!   suspicious-indicator counting
//! - [`extract::PageFetcher`]: bounded URL fetch + HTML main-content
//!   extraction
//! - [`normalize::ContentNormalizer`]: raw input to canonical text payload
//! - [`search::WebSearch`]: SerpApi corroboration with an HTML-scrape
//!   fallback
//! - [`mock`]: deterministic implementations for tests
//!
//! Any implementation satisfying the trait contracts is substitutable; the
//! API binary picks concrete ones at startup.

pub mod analyzer;
pub mod extract;
pub mod mock;
pub mod normalize;
pub mod search;

pub use analyzer::HeuristicAnalyzer;
pub use extract::{ExtractedPage, PageFetcher};
pub use mock::{MockAnalyzer, MockSearch};
pub use normalize::ContentNormalizer;
pub use search::{GoogleScrapeSearch, SerpApiSearch, WebSearch};
