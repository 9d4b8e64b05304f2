//! Computation configuration: date range, work windows, timezone and buffer.
//!
//! Clock times are (de)serialized as `HH:MM` (seconds are accepted on input),
//! dates as `YYYY-MM-DD`, and the timezone as an IANA identifier string that
//! [`TimeConfig::validate`] resolves through `chrono-tz`.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::window::WindowKind;

/// Keywords that mark a task-calendar event as a placeholder rather than work.
pub const DEFAULT_BLOCKING_KEYWORDS: [&str; 2] = ["block", "new event"];

/// Everything the engine needs besides the events themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// First civil date of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last civil date of the range (inclusive).
    pub end_date: NaiveDate,
    #[serde(with = "clock")]
    pub weekday_start: NaiveTime,
    #[serde(with = "clock")]
    pub weekday_end: NaiveTime,
    #[serde(with = "clock")]
    pub weekend_start: NaiveTime,
    #[serde(with = "clock")]
    pub weekend_end: NaiveTime,
    /// IANA timezone identifier (e.g., "America/New_York").
    pub timezone: String,
    /// Fraction of the nominal window treated as realistically available.
    pub buffer_factor: f64,
    /// Task events whose summary contains any of these (case-insensitive) are ignored.
    pub blocking_keywords: Vec<String>,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::default(),
            end_date: NaiveDate::default(),
            weekday_start: hm(9, 0),
            weekday_end: hm(17, 0),
            weekend_start: hm(10, 0),
            weekend_end: hm(14, 0),
            timezone: "UTC".to_string(),
            buffer_factor: 0.8,
            blocking_keywords: DEFAULT_BLOCKING_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl TimeConfig {
    /// Check every precondition of a computation run and resolve the timezone.
    ///
    /// # Errors
    /// - `EngineError::InvalidRange` if `end_date < start_date`.
    /// - `EngineError::InvalidWindow` if either window's end is not after its start.
    /// - `EngineError::InvalidBufferFactor` if the factor is not in `(0, 1]`.
    /// - `EngineError::InvalidTimezone` if the timezone is not a valid IANA name.
    pub fn validate(&self) -> Result<Tz> {
        if self.end_date < self.start_date {
            return Err(EngineError::InvalidRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        check_window(WindowKind::Weekday, self.weekday_start, self.weekday_end)?;
        check_window(WindowKind::Weekend, self.weekend_start, self.weekend_end)?;

        if !self.buffer_factor.is_finite() || self.buffer_factor <= 0.0 || self.buffer_factor > 1.0
        {
            return Err(EngineError::InvalidBufferFactor(self.buffer_factor));
        }

        parse_timezone(&self.timezone)
    }

    /// Lowercased, non-empty blocking keywords ready for substring matching.
    pub fn normalized_keywords(&self) -> Vec<String> {
        self.blocking_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect()
    }
}

/// Parse an IANA timezone name into a `chrono_tz::Tz`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
}

fn check_window(kind: WindowKind, start: NaiveTime, end: NaiveTime) -> Result<()> {
    if end <= start {
        return Err(EngineError::InvalidWindow { kind, start, end });
    }
    Ok(())
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// `HH:MM` clock-time serde, accepting `HH:MM:SS` on input.
pub(crate) mod clock {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|e| de::Error::custom(format!("invalid clock time '{}': {}", raw, e)))
    }
}
