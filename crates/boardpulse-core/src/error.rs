use thiserror::Error;

use crate::domain::SessionDate;
use crate::resolver::SymbolMatch;

/// Validation and contract errors exposed by `boardpulse-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol code cannot be empty")]
    EmptySymbolCode,
    #[error("symbol code must be at most 6 digits: '{value}'")]
    SymbolCodeTooLong { value: String },
    #[error("symbol code contains non-digit character '{ch}': '{value}'")]
    SymbolCodeNotNumeric { value: String, ch: char },

    #[error("session date must be YYYYMMDD: '{value}'")]
    InvalidSessionDate { value: String },
    #[error("no calendar day before {value}")]
    SessionDateUnderflow { value: String },

    #[error("session time must be HH:MM[:SS] or HHMM[SS]: '{value}'")]
    InvalidSessionTime { value: String },

    #[error("unknown seal event kind '{value}'")]
    UnknownEventKind { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,
}

/// Caller-facing error taxonomy for analysis operations.
///
/// Nothing here is fatal: a bad symbol or an unfetchable anchor day fails
/// that one request and leaves the rest of a batch untouched.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The resolver returned more than one candidate. The candidates are
    /// surfaced so the caller can disambiguate; the engine never guesses.
    #[error("query '{query}' matched {} symbols, disambiguation required", candidates.len())]
    AmbiguousSymbol {
        query: String,
        candidates: Vec<SymbolMatch>,
    },

    /// The resolver returned no candidates.
    #[error("no symbol found for query '{query}'")]
    SymbolNotFound { query: String },

    /// The anchor (as-of) day itself could not be fetched after retry.
    /// Gaps in the middle of a backward scan are absorbed instead.
    #[error("market data unavailable for {date}")]
    DataUnavailable { date: SessionDate },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
