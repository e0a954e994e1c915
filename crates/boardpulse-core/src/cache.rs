//! Per-day snapshot memoization.
//!
//! The backward scan may revisit a date many times across queries; each
//! (symbol, date) pair hits the upstream source at most once per process.
//! The cache also pins down the three-way distinction the scan depends
//! on: a fetched-but-quiet day, a confirmed non-trading day, and a day
//! the source could not answer for.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::{SessionDate, SymbolCode, TradingDaySnapshot};
use crate::retry::RetryPolicy;
use crate::source::{DayFetch, MarketDataSource, SourceError};

/// Cached resolution of one (symbol, date) query.
#[derive(Debug, Clone)]
pub enum DayState {
    /// A session took place and the fetch succeeded.
    Trading(Arc<TradingDaySnapshot>),
    /// The source explicitly reported no session.
    NonTradingDay,
    /// The fetch failed even after retry; absorbed by scans, surfaced by
    /// anchor-day lookups.
    Unavailable,
}

impl DayState {
    pub fn snapshot(&self) -> Option<&Arc<TradingDaySnapshot>> {
        match self {
            Self::Trading(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Fetch bounds and retry behavior for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Hard bound on one upstream call; elapse maps to a retryable
    /// timeout error, never an unhandled fault.
    pub fetch_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// Insert-once memo of day snapshots in front of a [`MarketDataSource`].
pub struct TradingDayCache {
    source: Arc<dyn MarketDataSource>,
    config: CacheConfig,
    entries: RwLock<HashMap<(SymbolCode, SessionDate), DayState>>,
}

impl TradingDayCache {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self::with_config(source, CacheConfig::default())
    }

    pub fn with_config(source: Arc<dyn MarketDataSource>, config: CacheConfig) -> Self {
        Self {
            source,
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve one (symbol, date) query, fetching on first miss.
    ///
    /// Every outcome, including `Unavailable`, is memoized, so a flaky
    /// upstream is asked about each day at most `1 + max_retries` times
    /// per process.
    pub async fn get(&self, symbol: &SymbolCode, date: SessionDate) -> DayState {
        let key = (symbol.clone(), date);

        if let Some(state) = self.entries.read().await.get(&key) {
            return state.clone();
        }

        let state = self.fetch_with_retry(symbol, date).await;

        let mut entries = self.entries.write().await;
        // Another task may have resolved the same key while we fetched;
        // keep the first entry so snapshots stay stable.
        entries.entry(key).or_insert(state).clone()
    }

    /// Number of resolved entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn fetch_with_retry(&self, symbol: &SymbolCode, date: SessionDate) -> DayState {
        let retry = &self.config.retry;
        let max_retries = if retry.enabled { retry.max_retries } else { 0 };
        let mut attempt: u32 = 0;

        loop {
            match self.fetch_once(symbol, date).await {
                Ok(DayFetch::Trading(snapshot)) => {
                    debug!(symbol = %symbol, date = %date, events = snapshot.events.len(),
                        "fetched trading-day snapshot");
                    return DayState::Trading(Arc::new(snapshot));
                }
                Ok(DayFetch::NonTradingDay) => {
                    debug!(symbol = %symbol, date = %date, "confirmed non-trading day");
                    return DayState::NonTradingDay;
                }
                Err(err) if err.retryable() && attempt < max_retries => {
                    let delay = retry.delay_for_attempt(attempt);
                    warn!(symbol = %symbol, date = %date, error = %err,
                        attempt, "snapshot fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(symbol = %symbol, date = %date, error = %err,
                        "snapshot fetch failed, marking day unavailable");
                    return DayState::Unavailable;
                }
            }
        }
    }

    async fn fetch_once(
        &self,
        symbol: &SymbolCode,
        date: SessionDate,
    ) -> Result<DayFetch, SourceError> {
        match tokio::time::timeout(
            self.config.fetch_timeout,
            self.source.fetch_snapshot(symbol, date),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(SourceError::timeout(format!(
                "snapshot fetch exceeded {:?} (symbol {symbol}, date {date})",
                self.config.fetch_timeout
            ))),
        }
    }
}
