//! # availability-engine
//!
//! Turns a batch of categorised calendar events into a day-by-day picture of
//! remaining working time, plus breakdowns by project/task and by the
//! calendars that consume time without being attributable work.
//!
//! All timezone-local wall-clock derivation goes through `chrono-tz`, so DST
//! transitions are handled by the IANA database rather than fixed offsets.
//!
//! ## Modules
//!
//! - [`config`] — `TimeConfig` and its validation
//! - [`dates`] — civil-date sequencing and the fetch boundary
//! - [`window`] — weekday/weekend work-window resolution
//! - [`overlap`] — event/window overlap in local wall-clock minutes
//! - [`classify`] — category rules and project/task derivation
//! - [`capacity`] — per-day capacity ledger
//! - [`color`] — deterministic colour allocation
//! - [`report`] — aggregation into the final [`Report`]
//! - [`model`] — calendars and events as handed over by the fetch boundary
//! - [`error`] — error types

pub mod capacity;
pub mod classify;
pub mod color;
pub mod config;
pub mod dates;
pub mod error;
pub mod model;
pub mod overlap;
pub mod report;
pub mod window;

pub use classify::{classify, ImpactType, ProjectTaskId};
pub use config::TimeConfig;
pub use dates::{date_range, fetch_bounds, DateRange};
pub use error::EngineError;
pub use model::{Calendar, CalendarCategory, CalendarEvent, CalendarSnapshot, Event};
pub use overlap::overlap_minutes;
pub use report::{compute_report, Report, ReportTotals};
pub use window::{resolve, WorkWindow};
