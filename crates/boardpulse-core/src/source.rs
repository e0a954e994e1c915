//! Market data source contract.
//!
//! The engine never talks to a provider directly: it consumes this trait
//! and treats transport, authentication, and upstream caching as someone
//! else's problem. Implementations return one [`DayFetch`] per
//! (symbol, date) query; a day without a session is an explicit
//! [`DayFetch::NonTradingDay`], never an empty snapshot.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::domain::{SessionDate, SymbolCode, TradingDaySnapshot};

/// Outcome of one snapshot fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum DayFetch {
    /// A session took place; here is what the source saw.
    Trading(TradingDaySnapshot),
    /// The source explicitly reports no session on this date.
    NonTradingDay,
}

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    Timeout,
    InvalidRequest,
    Internal,
}

/// Structured source error. `retryable` drives the cache's retry-once
/// policy; everything else is for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Timeout,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::Timeout => "source.timeout",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Snapshot provider contract.
///
/// Implementations must be `Send + Sync`; the cache shares one instance
/// across concurrent per-symbol pipelines.
pub trait MarketDataSource: Send + Sync {
    /// Fetch everything the source knows about `symbol` on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the call fails; the caller decides
    /// whether the `retryable` flag warrants a second attempt. A missing
    /// session is `Ok(DayFetch::NonTradingDay)`, not an error.
    fn fetch_snapshot<'a>(
        &'a self,
        symbol: &'a SymbolCode,
        date: SessionDate,
    ) -> Pin<Box<dyn Future<Output = Result<DayFetch, SourceError>> + Send + 'a>>;
}

/// Null-object source for wiring the engine without a provider.
///
/// Every fetch fails with an explicit `Unavailable` error, so a missing
/// provider shows up in results instead of masquerading as quiet days.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableMarketData;

impl MarketDataSource for UnavailableMarketData {
    fn fetch_snapshot<'a>(
        &'a self,
        symbol: &'a SymbolCode,
        date: SessionDate,
    ) -> Pin<Box<dyn Future<Output = Result<DayFetch, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            Err(SourceError::unavailable(format!(
                "no market data source configured (symbol {symbol}, date {date})"
            )))
        })
    }
}
