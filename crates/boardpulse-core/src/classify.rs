//! Seal-pattern classification for a single session.
//!
//! A strict first-match-wins state machine over the day's OHLC extremes
//! and ordered intraday events. Multiple break/reseal oscillations in one
//! day collapse to the final pair; only [`break_count`] remembers how
//! many times the seal gave way.

use serde::{Deserialize, Serialize};

use crate::domain::{DayBar, SealEventKind, SessionTime, TradingDaySnapshot};

/// Price comparisons against the cap tolerate one cent of feed rounding.
pub const PRICE_TOLERANCE: f64 = 0.01;

/// How the session interacted with its price cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SealClassification {
    /// Opened pinned at the cap and never traded below it.
    OneWord,
    /// Opened at the cap, broke intraday, resealed by the close.
    TWord,
    /// Reached the cap during the session, no break, no one-word open.
    Ordinary,
    /// Broke the seal and never resealed before the close.
    BrokenUnsealed,
    /// Opened below the cap, rallied, broke, resealed by the close.
    BrokenResealed,
    /// Never reached the cap.
    NotLimited,
}

impl SealClassification {
    /// Sealed at end of session.
    pub const fn is_limit(self) -> bool {
        matches!(
            self,
            Self::OneWord | Self::TWord | Self::Ordinary | Self::BrokenResealed
        )
    }

    /// The seal broke at some point during the session.
    pub const fn is_broken(self) -> bool {
        matches!(self, Self::TWord | Self::BrokenUnsealed | Self::BrokenResealed)
    }

    /// A break was followed by a reseal that held to the close.
    pub const fn is_resealed(self) -> bool {
        matches!(self, Self::TWord | Self::BrokenResealed)
    }

    pub const fn is_one_word(self) -> bool {
        matches!(self, Self::OneWord)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneWord => "one_word",
            Self::TWord => "t_word",
            Self::Ordinary => "ordinary",
            Self::BrokenUnsealed => "broken_unsealed",
            Self::BrokenResealed => "broken_resealed",
            Self::NotLimited => "not_limited",
        }
    }
}

/// Classify one session. First matching rule wins:
///
/// 1. never reached the cap → `NotLimited`
/// 2. all four bar prices pinned at the cap, no break → `OneWord`
/// 3. final break with no later reseal → `BrokenUnsealed`
/// 4. break then reseal → `TWord` if sealed at the open, else `BrokenResealed`
/// 5. otherwise → `Ordinary`
///
/// Events after session close never reach this function; the snapshot is
/// already bounded to the session.
pub fn classify(
    snapshot: &TradingDaySnapshot,
    session_open: SessionTime,
    limit_price: f64,
    bar: DayBar,
) -> SealClassification {
    if !reached_limit(snapshot, limit_price, bar) {
        return SealClassification::NotLimited;
    }

    let broke = snapshot.last_break_time().is_some() || snapshot.in_broken_pool;

    if is_pinned_at_limit(bar, limit_price) && !broke {
        return SealClassification::OneWord;
    }

    if broke {
        if !resealed_after_final_break(snapshot) {
            return SealClassification::BrokenUnsealed;
        }
        return if sealed_at_open(snapshot, session_open, limit_price, bar) {
            SealClassification::TWord
        } else {
            SealClassification::BrokenResealed
        };
    }

    SealClassification::Ordinary
}

/// Number of times the seal broke during the session.
pub fn break_count(snapshot: &TradingDaySnapshot) -> u32 {
    snapshot.events_of_kind(SealEventKind::Broken).count() as u32
}

/// End-of-day seal status, the value the streak scan counts.
///
/// A day that broke and resealed before the close still counts as sealed;
/// seal status is evaluated at the close, not intraday.
pub fn sealed_end_of_day(snapshot: &TradingDaySnapshot) -> bool {
    if snapshot.in_limit_pool {
        return true;
    }

    match (snapshot.last_seal_time(), snapshot.last_break_time()) {
        (Some(seal), Some(brk)) => seal > brk,
        (Some(_), None) => true,
        _ => false,
    }
}

fn reached_limit(snapshot: &TradingDaySnapshot, limit_price: f64, bar: DayBar) -> bool {
    bar.high >= limit_price - PRICE_TOLERANCE
        || snapshot.in_limit_pool
        || snapshot.in_broken_pool
        || snapshot.last_seal_time().is_some()
}

fn is_pinned_at_limit(bar: DayBar, limit_price: f64) -> bool {
    [bar.open, bar.high, bar.low, bar.close]
        .iter()
        .all(|price| (price - limit_price).abs() <= PRICE_TOLERANCE)
}

/// Only the final Broken/Resealed pair decides the terminal state.
fn resealed_after_final_break(snapshot: &TradingDaySnapshot) -> bool {
    if snapshot.in_limit_pool {
        // Pool membership is end-of-day truth: present means the close
        // was sealed regardless of what the event tape caught.
        return true;
    }
    match (snapshot.last_seal_time(), snapshot.last_break_time()) {
        (Some(seal), Some(brk)) => seal > brk,
        _ => false,
    }
}

fn sealed_at_open(
    snapshot: &TradingDaySnapshot,
    session_open: SessionTime,
    limit_price: f64,
    bar: DayBar,
) -> bool {
    if (bar.open - limit_price).abs() <= PRICE_TOLERANCE {
        return true;
    }
    // Call-auction seals land at or before the opening bell.
    snapshot
        .events
        .iter()
        .find(|event| event.kind.seals())
        .is_some_and(|event| event.at <= session_open)
}
