//! Error types for availability computation.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::window::WindowKind;

/// Errors that can occur while validating inputs or computing a report.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The configured end date falls before the start date.
    #[error("Invalid range: end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A work window whose end is not after its start.
    #[error("Invalid {kind} window: end {end} must be after start {start}")]
    InvalidWindow {
        kind: WindowKind,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Buffer factor outside `(0, 1]`.
    #[error("Invalid buffer factor {0}: must be greater than 0 and at most 1")]
    InvalidBufferFactor(f64),

    /// An event lacking precise start/end instants. Recovered locally by
    /// skipping the event; never surfaced from [`crate::compute_report`].
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    /// The calendar snapshot was not valid JSON for the expected shape.
    #[error("Snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Convenience alias used throughout availability-engine.
pub type Result<T> = std::result::Result<T, EngineError>;
