//! Minutes of an event's local time range that fall inside a day's work window.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

use crate::window::WorkWindow;

/// Overlap in whole minutes between an event and the work window on `date`.
///
/// The event's instants are converted to wall-clock times in `tz`. An event
/// whose local start falls on a different civil date contributes nothing to
/// `date`. Only the local clock times are compared, so an event running past
/// local midnight ends at its next-day clock time (16:00 to 01:00 yields 0
/// against a 09:00–17:00 window). Disjoint ranges yield 0, never a negative value.
pub fn overlap_minutes(
    event_start: DateTime<Utc>,
    event_end: DateTime<Utc>,
    window: &WorkWindow,
    date: NaiveDate,
    tz: &Tz,
) -> i64 {
    if event_end <= event_start {
        return 0;
    }

    let local_start = event_start.with_timezone(tz);
    if local_start.date_naive() != date {
        return 0;
    }
    let local_end = event_end.with_timezone(tz);

    let start_secs = i64::from(local_start.num_seconds_from_midnight());
    let end_secs = i64::from(local_end.num_seconds_from_midnight());

    let window_start = i64::from(window.start.num_seconds_from_midnight());
    let window_end = i64::from(window.end.num_seconds_from_midnight());

    let overlap = end_secs.min(window_end) - start_secs.max(window_start);
    overlap.max(0) / 60
}
