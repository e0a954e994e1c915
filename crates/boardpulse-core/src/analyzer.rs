//! Analysis facade: one consistent verdict per (symbol, date).
//!
//! Owns the cache and resolver, derives the rating signal tuple from a
//! single snapshot, and exposes the three read operations callers use.
//! Because streak, classification, and rating all read through the same
//! cache entry, the three answers for a day can never disagree about
//! what that day looked like.

use std::sync::Arc;

use serde::Serialize;
use time::macros::time;

use crate::cache::{CacheConfig, DayState, TradingDayCache};
use crate::classify::{break_count, classify, sealed_end_of_day, SealClassification};
use crate::domain::{SealEventKind, SessionDate, SessionTime, SymbolCode, TradingDaySnapshot};
use crate::error::AnalysisError;
use crate::rating::{rate, RatingSignals, RatingVerdict};
use crate::resolver::{resolve_query, SymbolResolver};
use crate::source::MarketDataSource;
use crate::streak::{compute_streak, ScanConfig, StreakResult};

/// Tunables for the whole pipeline.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub scan: ScanConfig,
    pub cache: CacheConfig,
    /// Continuous-session opening bell; call-auction seals land at or
    /// before this time.
    pub session_open: SessionTime,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            cache: CacheConfig::default(),
            session_open: SessionTime::from_time(time!(09:30)),
        }
    }
}

/// The combined per-day answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayVerdict {
    pub symbol: SymbolCode,
    pub as_of: SessionDate,
    pub streak: StreakResult,
    pub classification: SealClassification,
    pub rating: RatingVerdict,
    /// Break/reseal oscillations during the session; classification only
    /// reflects the final pair.
    pub break_count: u32,
}

/// Read-only analysis engine over one market data source.
pub struct LimitUpAnalyzer {
    cache: TradingDayCache,
    resolver: Arc<dyn SymbolResolver>,
    config: AnalyzerConfig,
}

impl LimitUpAnalyzer {
    pub fn new(source: Arc<dyn MarketDataSource>, resolver: Arc<dyn SymbolResolver>) -> Self {
        Self::with_config(source, resolver, AnalyzerConfig::default())
    }

    pub fn with_config(
        source: Arc<dyn MarketDataSource>,
        resolver: Arc<dyn SymbolResolver>,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            cache: TradingDayCache::with_config(source, config.cache.clone()),
            resolver,
            config,
        }
    }

    /// Consecutive sealed sessions ending at `as_of`.
    pub async fn get_streak(
        &self,
        query: &str,
        as_of: SessionDate,
    ) -> Result<StreakResult, AnalysisError> {
        let symbol = resolve_query(self.resolver.as_ref(), query)?;
        compute_streak(&self.cache, &symbol, as_of, self.config.scan).await
    }

    /// Today's seal-pattern classification.
    pub async fn get_seal_classification(
        &self,
        query: &str,
        as_of: SessionDate,
    ) -> Result<SealClassification, AnalysisError> {
        let symbol = resolve_query(self.resolver.as_ref(), query)?;
        let snapshot = self.snapshot_for(&symbol, as_of).await?;
        Ok(self.classification_of(&snapshot))
    }

    /// Composite rating for the day.
    pub async fn get_rating(
        &self,
        query: &str,
        as_of: SessionDate,
    ) -> Result<RatingVerdict, AnalysisError> {
        let symbol = resolve_query(self.resolver.as_ref(), query)?;
        let snapshot = self.snapshot_for(&symbol, as_of).await?;
        let classification = self.classification_of(&snapshot);
        Ok(rate(self.signals_from(&snapshot, classification)))
    }

    /// Streak, classification, and rating from one consistent snapshot.
    pub async fn analyze(
        &self,
        query: &str,
        as_of: SessionDate,
    ) -> Result<DayVerdict, AnalysisError> {
        let symbol = resolve_query(self.resolver.as_ref(), query)?;
        let snapshot = self.snapshot_for(&symbol, as_of).await?;
        let classification = self.classification_of(&snapshot);
        let rating = rate(self.signals_from(&snapshot, classification));
        let streak = compute_streak(&self.cache, &symbol, as_of, self.config.scan).await?;

        Ok(DayVerdict {
            symbol,
            as_of,
            streak,
            classification,
            rating,
            break_count: break_count(&snapshot),
        })
    }

    async fn snapshot_for(
        &self,
        symbol: &SymbolCode,
        date: SessionDate,
    ) -> Result<Arc<TradingDaySnapshot>, AnalysisError> {
        match self.cache.get(symbol, date).await {
            DayState::Trading(snapshot) => Ok(snapshot),
            DayState::NonTradingDay | DayState::Unavailable => {
                Err(AnalysisError::DataUnavailable { date })
            }
        }
    }

    fn classification_of(&self, snapshot: &TradingDaySnapshot) -> SealClassification {
        if let (Some(limit_price), Some(bar)) = (snapshot.limit_price, snapshot.bar) {
            return classify(snapshot, self.config.session_open, limit_price, bar);
        }

        // No usable bar: fall back to pool flags and the event tape
        // rather than failing the day.
        let broke = snapshot.last_break_time().is_some() || snapshot.in_broken_pool;
        let sealed = sealed_end_of_day(snapshot);
        match (broke, sealed) {
            (true, false) => SealClassification::BrokenUnsealed,
            (true, true) => SealClassification::BrokenResealed,
            (false, true) => SealClassification::Ordinary,
            (false, false) => SealClassification::NotLimited,
        }
    }

    fn signals_from(
        &self,
        snapshot: &TradingDaySnapshot,
        classification: SealClassification,
    ) -> RatingSignals {
        let is_broken = classification.is_broken()
            || snapshot.in_broken_pool
            || snapshot.last_break_time().is_some();
        let sealed = sealed_end_of_day(snapshot);

        RatingSignals {
            is_limit: classification.is_limit() || sealed,
            is_broken,
            has_big_sell: has_big_sell_leak(snapshot),
            is_resealed: classification.is_resealed() || (is_broken && sealed),
            is_strong_pool: snapshot.in_strong_pool,
            is_one_word: classification.is_one_word(),
        }
    }
}

/// A big sell only counts as leakage when it lands after the final seal;
/// sells during an open (unsealed) stretch are ordinary trading.
fn has_big_sell_leak(snapshot: &TradingDaySnapshot) -> bool {
    match snapshot.last_seal_time() {
        Some(seal) => snapshot
            .events_of_kind(SealEventKind::BigSell)
            .any(|event| event.at > seal),
        None => snapshot.events_of_kind(SealEventKind::BigSell).next().is_some(),
    }
}
