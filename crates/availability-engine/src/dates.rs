//! Civil-date sequencing and the absolute fetch boundary for a date range.
//!
//! Dates advance as civil dates (`NaiveDate::succ_opt`), never by adding 24h to
//! an instant, so DST transitions can neither skip nor duplicate a day.

use std::iter::FusedIterator;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config::TimeConfig;
use crate::error::{EngineError, Result};

/// Inclusive, lazily-evaluated sequence of civil dates.
///
/// Cloning yields an independent iterator starting where the original stood,
/// so `range.clone()` taken before iteration restarts the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    front: Option<NaiveDate>,
    back: NaiveDate,
}

impl DateRange {
    /// Build the range `start..=end`.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidRange` if `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(Self {
            front: Some(start),
            back: end,
        })
    }

    /// Whether `date` is still ahead of (or at) the cursor and within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        matches!(self.front, Some(front) if front <= date && date <= self.back)
    }

    fn remaining(&self) -> usize {
        match self.front {
            Some(front) => ((self.back - front).num_days() + 1) as usize,
            None => 0,
        }
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.front?;
        self.front = if current < self.back {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl DoubleEndedIterator for DateRange {
    fn next_back(&mut self) -> Option<NaiveDate> {
        let front = self.front?;
        let current = self.back;
        if current > front {
            match current.pred_opt() {
                Some(prev) => self.back = prev,
                None => self.front = None,
            }
        } else {
            self.front = None;
        }
        Some(current)
    }
}

impl ExactSizeIterator for DateRange {}

impl FusedIterator for DateRange {}

/// Enumerate the civil dates `start..=end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<DateRange> {
    DateRange::new(start, end)
}

/// The absolute range a collaborator must fetch events for.
///
/// Local midnight at the start of `start_date` through local midnight at the
/// start of the day after `end_date`, so no event of a boundary day is clipped.
pub fn fetch_bounds(config: &TimeConfig, tz: &Tz) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let range = DateRange::new(config.start_date, config.end_date)?;
    let after_end = range
        .back
        .succ_opt()
        .ok_or(EngineError::InvalidRange {
            start: config.start_date,
            end: config.end_date,
        })?;
    Ok((
        local_midnight(config.start_date, tz),
        local_midnight(after_end, tz),
    ))
}

/// First instant of `date` in `tz`.
///
/// When midnight falls in a DST gap the earliest valid wall-clock time after it
/// is used; when midnight is ambiguous the earlier instant wins.
pub fn local_midnight(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    (0..=24 * 4)
        .map(|quarter| midnight + Duration::minutes(15 * quarter))
        .find_map(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}
