//! # Boardpulse Core
//!
//! Limit-up streak tracking, seal classification, and day rating for
//! A-share symbols.
//!
//! ## Overview
//!
//! This crate provides the full analysis pipeline:
//!
//! - **Canonical domain types** for symbols, session dates/times, bars,
//!   and intraday seal events
//! - **Market data source trait** for pluggable upstream feeds
//! - **Per-day snapshot cache** with bounded retry and timeout
//! - **Streak scanner** counting consecutive sealed sessions
//! - **Seal classifier** for one-word, T-word, broken, and resealed days
//! - **Rating engine** mapping the day's signals to a letter grade
//! - **Symbol resolver** turning free text into canonical codes
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`analyzer`] | High-level facade producing per-day verdicts |
//! | [`cache`] | Per-(symbol, date) snapshot memoization |
//! | [`classify`] | Seal-pattern classification of one session |
//! | [`domain`] | Domain types (SymbolCode, SessionDate, snapshot, events) |
//! | [`error`] | Validation and analysis error types |
//! | [`rating`] | Signal tuple to grade decision table |
//! | [`resolver`] | Free-text symbol resolution |
//! | [`retry`] | Backoff and retry policy |
//! | [`source`] | Market data source trait and structured errors |
//! | [`streak`] | Backward consecutive-seal scan |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use boardpulse_core::{DirectoryResolver, LimitUpAnalyzer, SessionDate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = LimitUpAnalyzer::new(my_source, Arc::new(resolver));
//!
//!     let as_of = SessionDate::parse("20250114")?;
//!     let verdict = analyzer.analyze("贵州茅台", as_of).await?;
//!
//!     println!(
//!         "{}: {} day streak, {} ({})",
//!         verdict.symbol,
//!         verdict.streak.streak_days,
//!         verdict.rating.grade,
//!         verdict.classification.as_str(),
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result` types with structured errors:
//!
//! ```rust
//! use boardpulse_core::AnalysisError;
//!
//! fn handle_error(error: AnalysisError) {
//!     match error {
//!         AnalysisError::AmbiguousSymbol { candidates, .. } => {
//!             // Present the candidates and ask the user to pick
//!         }
//!         AnalysisError::SymbolNotFound { .. } => {
//!             // Report to user
//!         }
//!         AnalysisError::DataUnavailable { .. } => {
//!             // Retry later or pick another as-of date
//!         }
//!         _ => {}
//!     }
//! }
//! ```

pub mod analyzer;
pub mod cache;
pub mod classify;
pub mod domain;
pub mod error;
pub mod rating;
pub mod resolver;
pub mod retry;
pub mod source;
pub mod streak;

// Re-export commonly used types at crate root for convenience

// Analysis facade
pub use analyzer::{AnalyzerConfig, DayVerdict, LimitUpAnalyzer};

// Caching
pub use cache::{CacheConfig, DayState, TradingDayCache};

// Classification
pub use classify::{break_count, classify, sealed_end_of_day, SealClassification};

// Domain types
pub use domain::{
    DayBar, RawSealEvent, SealEvent, SealEventKind, SessionDate, SessionTime, SymbolCode,
    TradingDaySnapshot,
};

// Error types
pub use error::{AnalysisError, ValidationError};

// Rating engine
pub use rating::{rate, Grade, RatingSignals, RatingVerdict};

// Symbol resolution
pub use resolver::{resolve_query, DirectoryResolver, SymbolMatch, SymbolResolver};

// Retry logic
pub use retry::{Backoff, RetryPolicy};

// Data source trait and types
pub use source::{
    DayFetch, MarketDataSource, SourceError, SourceErrorKind, UnavailableMarketData,
};

// Streak scanning
pub use streak::{compute_streak, ScanConfig, StreakResult};
