//! Input model: calendars, their categories, and the raw events fetched for them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// How a calendar's events participate in the computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarCategory {
    /// Events are never considered.
    #[default]
    Inactive,
    /// Events reduce available capacity but are not attributed to a project.
    Fungible,
    /// Events are parsed into project/task buckets and, unless blocked, reduce capacity.
    Task,
}

impl CalendarCategory {
    /// Only fungible and task calendars contribute events.
    pub fn is_active(self) -> bool {
        !matches!(self, CalendarCategory::Inactive)
    }
}

impl fmt::Display for CalendarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarCategory::Inactive => f.write_str("inactive"),
            CalendarCategory::Fungible => f.write_str("fungible"),
            CalendarCategory::Task => f.write_str("task"),
        }
    }
}

/// A calendar together with the category the user assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: CalendarCategory,
}

/// An event as handed over by the fetch boundary.
///
/// All-day events arrive without precise instants and are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    pub calendar_id: String,
}

/// A timed event bound to its (active) source calendar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event<'a> {
    pub summary: &'a str,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub calendar: &'a Calendar,
}

impl<'a> Event<'a> {
    /// Bind a raw event to its calendar, requiring both instants.
    ///
    /// # Errors
    /// Returns `EngineError::MalformedEvent` if either instant is missing or the
    /// end precedes the start.
    pub fn from_raw(raw: &'a CalendarEvent, calendar: &'a Calendar) -> Result<Self> {
        let (start, end) = match (raw.start, raw.end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(EngineError::MalformedEvent(format!(
                    "'{}' has no precise start/end",
                    raw.summary
                )))
            }
        };
        if end < start {
            return Err(EngineError::MalformedEvent(format!(
                "'{}' ends before it starts",
                raw.summary
            )));
        }
        Ok(Self {
            summary: &raw.summary,
            start,
            end,
            calendar,
        })
    }

    pub fn category(&self) -> CalendarCategory {
        self.calendar.category
    }

    /// Full event length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// A closed, fully-fetched batch of calendars and their events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarSnapshot {
    #[serde(default)]
    pub calendars: Vec<Calendar>,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

impl CalendarSnapshot {
    /// Parse a snapshot from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn calendar(&self, id: &str) -> Option<&Calendar> {
        self.calendars.iter().find(|c| c.id == id)
    }
}
