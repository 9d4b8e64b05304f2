//! Work-window resolution: which clock window applies on a given civil date.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::TimeConfig;

/// Which of the two configured windows applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    Weekday,
    Weekend,
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowKind::Weekday => f.pad("weekday"),
            WindowKind::Weekend => f.pad("weekend"),
        }
    }
}

/// The nominal work window for one day, plus the buffer applied to its capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkWindow {
    pub kind: WindowKind,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub buffer_factor: f64,
}

impl WorkWindow {
    /// Unscaled window length in whole minutes (never negative).
    pub fn nominal_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes().max(0)
    }

    /// Realistically available minutes: nominal length scaled by the buffer,
    /// clamped at zero.
    pub fn capacity_minutes(&self) -> f64 {
        (self.nominal_minutes() as f64 * self.buffer_factor).max(0.0)
    }
}

/// Saturday and Sunday are weekend days.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Select the weekend or weekday window for `date`.
///
/// The returned window is nominal; buffer scaling only happens in
/// [`WorkWindow::capacity_minutes`].
pub fn resolve(date: NaiveDate, config: &TimeConfig) -> WorkWindow {
    if is_weekend(date) {
        WorkWindow {
            kind: WindowKind::Weekend,
            start: config.weekend_start,
            end: config.weekend_end,
            buffer_factor: config.buffer_factor,
        }
    } else {
        WorkWindow {
            kind: WindowKind::Weekday,
            start: config.weekday_start,
            end: config.weekday_end,
            buffer_factor: config.buffer_factor,
        }
    }
}
