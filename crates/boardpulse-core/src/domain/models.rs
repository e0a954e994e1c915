use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{SessionDate, SessionTime};
use crate::ValidationError;

/// Kind of intraday seal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SealEventKind {
    /// Price reached the cap and the seal formed.
    Sealed,
    /// The seal broke: price fell back below the cap.
    Broken,
    /// The seal re-formed after a break. Feeds that do not tag reseals
    /// emit a second `Sealed` instead; both read the same downstream.
    Resealed,
    /// A large sell order leaked through the seal.
    BigSell,
}

impl SealEventKind {
    /// Decode an upstream feed label. Feeds use either snake_case tags or
    /// the exchange's Chinese change-type labels.
    pub fn from_feed_label(label: &str) -> Result<Self, ValidationError> {
        match label.trim() {
            "sealed" | "封涨停板" => Ok(Self::Sealed),
            "broken" | "打开涨停板" => Ok(Self::Broken),
            "resealed" => Ok(Self::Resealed),
            "big_sell" | "大笔卖出" => Ok(Self::BigSell),
            other => Err(ValidationError::UnknownEventKind {
                value: other.to_owned(),
            }),
        }
    }

    /// True for events that leave the seal in place.
    pub const fn seals(self) -> bool {
        matches!(self, Self::Sealed | Self::Resealed)
    }
}

/// One timestamped intraday seal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealEvent {
    pub at: SessionTime,
    pub kind: SealEventKind,
}

impl SealEvent {
    pub const fn new(at: SessionTime, kind: SealEventKind) -> Self {
        Self { at, kind }
    }
}

/// Untyped event record as it arrives from a feed, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSealEvent {
    pub time: String,
    pub kind: String,
}

impl RawSealEvent {
    fn validate(&self) -> Result<SealEvent, ValidationError> {
        let at = SessionTime::parse(&self.time)?;
        let kind = SealEventKind::from_feed_label(&self.kind)?;
        Ok(SealEvent::new(at, kind))
    }
}

/// Daily OHLC extremes for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayBar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl DayBar {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }
        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            open,
            high,
            low,
            close,
        })
    }
}

/// Everything one source reports about one symbol on one session date.
///
/// Immutable once built; the cache hands out shared references and never
/// rewrites an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingDaySnapshot {
    pub date: SessionDate,
    pub in_limit_pool: bool,
    pub in_broken_pool: bool,
    pub in_strong_pool: bool,
    /// The session's cap price, when the source reports it.
    pub limit_price: Option<f64>,
    pub bar: Option<DayBar>,
    /// Intraday events, sorted by time.
    pub events: Vec<SealEvent>,
}

impl TradingDaySnapshot {
    pub fn new(
        date: SessionDate,
        in_limit_pool: bool,
        in_broken_pool: bool,
        in_strong_pool: bool,
        limit_price: Option<f64>,
        bar: Option<DayBar>,
        mut events: Vec<SealEvent>,
    ) -> Self {
        events.sort_by_key(|event| event.at);
        Self {
            date,
            in_limit_pool,
            in_broken_pool,
            in_strong_pool,
            limit_price,
            bar,
            events,
        }
    }

    /// Build a snapshot from raw feed records. A record that fails
    /// validation is dropped and logged; it never aborts the day.
    #[allow(clippy::too_many_arguments)]
    pub fn from_feed(
        date: SessionDate,
        in_limit_pool: bool,
        in_broken_pool: bool,
        in_strong_pool: bool,
        limit_price: Option<f64>,
        bar: Option<DayBar>,
        raw_events: &[RawSealEvent],
    ) -> Self {
        let events = raw_events
            .iter()
            .filter_map(|raw| match raw.validate() {
                Ok(event) => Some(event),
                Err(err) => {
                    warn!(date = %date, time = %raw.time, kind = %raw.kind, error = %err,
                        "dropping malformed seal event record");
                    None
                }
            })
            .collect();

        Self::new(
            date,
            in_limit_pool,
            in_broken_pool,
            in_strong_pool,
            limit_price,
            bar,
            events,
        )
    }

    pub fn events_of_kind(&self, kind: SealEventKind) -> impl Iterator<Item = &SealEvent> {
        self.events.iter().filter(move |event| event.kind == kind)
    }

    /// Time of the last event that left the seal in place.
    pub fn last_seal_time(&self) -> Option<SessionTime> {
        self.events
            .iter()
            .rev()
            .find(|event| event.kind.seals())
            .map(|event| event.at)
    }

    /// Time of the last `Broken` event.
    pub fn last_break_time(&self) -> Option<SessionTime> {
        self.events
            .iter()
            .rev()
            .find(|event| event.kind == SealEventKind::Broken)
            .map(|event| event.at)
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
