//! Consecutive sealed-session counting.
//!
//! Walks backward from the as-of date one calendar day at a time. Only a
//! clean end-of-day seal extends the run; the first confirmed trading day
//! without one ends it. Non-trading days and fetch failures are gaps, not
//! terminators, so a weekend or one upstream outage never fractures a
//! real streak. Both scan bounds are explicit, so the loop terminates no
//! matter what the upstream does.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{DayState, TradingDayCache};
use crate::classify::sealed_end_of_day;
use crate::domain::{SessionDate, SymbolCode};
use crate::error::AnalysisError;

/// Bounds for one backward scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanConfig {
    /// Hard cap on total days examined, including the as-of day.
    pub max_lookback_days: u32,
    /// Longest tolerated run of non-trading/unavailable days before the
    /// scan gives up and flags truncation.
    pub max_consecutive_unknown: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_lookback_days: 30,
            max_consecutive_unknown: 5,
        }
    }
}

/// Outcome of one streak scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    pub symbol: SymbolCode,
    pub as_of: SessionDate,
    /// Consecutive sealed sessions ending at `as_of`. Zero when the as-of
    /// day itself is not sealed.
    pub streak_days: u32,
    /// True when a scan bound was hit before a confirmed non-sealed
    /// trading day; `streak_days` is then a lower bound, not exact.
    pub truncated: bool,
}

/// Count consecutive sealed sessions ending at `as_of`.
///
/// # Errors
///
/// `DataUnavailable` only when the as-of day itself cannot be fetched;
/// gaps earlier in the scan are absorbed into the unknown-run budget.
pub async fn compute_streak(
    cache: &TradingDayCache,
    symbol: &SymbolCode,
    as_of: SessionDate,
    config: ScanConfig,
) -> Result<StreakResult, AnalysisError> {
    let result = |streak_days, truncated| StreakResult {
        symbol: symbol.clone(),
        as_of,
        streak_days,
        truncated,
    };

    match cache.get(symbol, as_of).await {
        DayState::Trading(snapshot) if sealed_end_of_day(&snapshot) => {}
        DayState::Trading(_) | DayState::NonTradingDay => {
            // No clean seal on the as-of day: streak is zero by
            // definition, no scan needed.
            return Ok(result(0, false));
        }
        DayState::Unavailable => {
            return Err(AnalysisError::DataUnavailable { date: as_of });
        }
    }

    let mut streak: u32 = 1;
    let mut unknown_run: u32 = 0;
    let mut scanned: u32 = 1;
    let mut date = as_of;

    while scanned < config.max_lookback_days {
        date = match date.prev() {
            Ok(prev) => prev,
            // Calendar floor: nothing earlier to examine.
            Err(_) => return Ok(result(streak, true)),
        };
        scanned += 1;

        match cache.get(symbol, date).await {
            DayState::Trading(snapshot) if sealed_end_of_day(&snapshot) => {
                streak += 1;
                unknown_run = 0;
                debug!(symbol = %symbol, date = %date, streak, "sealed day extends streak");
            }
            DayState::Trading(_) => {
                // First confirmed non-sealed trading day bounds the run.
                debug!(symbol = %symbol, date = %date, streak, "unsealed day ends streak");
                return Ok(result(streak, false));
            }
            DayState::NonTradingDay | DayState::Unavailable => {
                unknown_run += 1;
                if unknown_run > config.max_consecutive_unknown {
                    debug!(symbol = %symbol, date = %date, streak,
                        "unknown-day run exceeded, truncating scan");
                    return Ok(result(streak, true));
                }
            }
        }
    }

    debug!(symbol = %symbol, streak, "lookback bound reached, truncating scan");
    Ok(result(streak, true))
}
