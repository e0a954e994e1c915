use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Time};

use crate::ValidationError;

const DATE_FORMAT: &[FormatItem<'_>] = format_description!("[year][month][day]");

/// Calendar date of one trading session, in the upstream `YYYYMMDD` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionDate(Date);

impl SessionDate {
    /// Parse the feed's `YYYYMMDD` date format.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let parsed = Date::parse(input.trim(), DATE_FORMAT).map_err(|_| {
            ValidationError::InvalidSessionDate {
                value: input.to_owned(),
            }
        })?;
        Ok(Self(parsed))
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_date(self) -> Date {
        self.0
    }

    /// One calendar day earlier. Calendar days, not trading days: holiday
    /// awareness lives in the scan, which treats no-session days as gaps.
    pub fn prev(self) -> Result<Self, ValidationError> {
        self.0
            .previous_day()
            .map(Self)
            .ok_or(ValidationError::SessionDateUnderflow {
                value: self.to_string(),
            })
    }

    pub fn format_compact(self) -> String {
        self.0
            .format(DATE_FORMAT)
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }
}

impl Display for SessionDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_compact())
    }
}

impl Serialize for SessionDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_compact())
    }
}

impl<'de> Deserialize<'de> for SessionDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Session-local intraday time.
///
/// Feeds emit every flavor of the same clock reading: `09:31:05`,
/// `09:31`, `093105`, `0931`. All four are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionTime(Time);

impl SessionTime {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let invalid = || ValidationError::InvalidSessionTime {
            value: input.to_owned(),
        };

        if !trimmed.is_ascii() {
            return Err(invalid());
        }

        let digits: Vec<&str> = if trimmed.contains(':') {
            trimmed.split(':').collect()
        } else {
            match trimmed.len() {
                6 => vec![&trimmed[0..2], &trimmed[2..4], &trimmed[4..6]],
                4 => vec![&trimmed[0..2], &trimmed[2..4]],
                _ => return Err(invalid()),
            }
        };

        let (hour, minute, second) = match digits.as_slice() {
            [h, m] => (h, m, "0"),
            [h, m, s] => (h, m, *s),
            _ => return Err(invalid()),
        };

        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        let second: u8 = second.parse().map_err(|_| invalid())?;

        let time = Time::from_hms(hour, minute, second).map_err(|_| invalid())?;
        Ok(Self(time))
    }

    pub const fn from_time(time: Time) -> Self {
        Self(time)
    }

    pub const fn into_time(self) -> Time {
        self.0
    }
}

impl Display for SessionTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (h, m, s) = self.0.as_hms();
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}

impl Serialize for SessionTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SessionTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
