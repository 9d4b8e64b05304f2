//! Category-driven business rules: how a single event affects the report.
//!
//! | category | condition            | impact              | capacity effect          |
//! |----------|----------------------|---------------------|--------------------------|
//! | Fungible | overlap > 0          | `ReducesAvailable`  | fungible deduction       |
//! | Fungible | overlap == 0         | `Ignored`           | none                     |
//! | Task     | summary is blocked   | `Ignored`           | none                     |
//! | Task     | overlap > 0          | `TaskTracked`       | task deduction           |
//! | Task     | overlap == 0         | `TaskTracked`       | none                     |
//!
//! Tracked task events always contribute their full duration (not just the
//! overlap) to their project/task bucket.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{CalendarCategory, Event};

/// How an event affected the computed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactType {
    ReducesAvailable,
    TaskTracked,
    Ignored,
}

impl fmt::Display for ImpactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactType::ReducesAvailable => f.write_str("reduces_available"),
            ImpactType::TaskTracked => f.write_str("task_tracked"),
            ImpactType::Ignored => f.write_str("ignored"),
        }
    }
}

/// Minutes to subtract from a day's capacity, tagged by what consumed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deduction {
    None,
    Fungible(i64),
    Task(i64),
}

impl Deduction {
    pub fn minutes(self) -> i64 {
        match self {
            Deduction::None => 0,
            Deduction::Fungible(m) | Deduction::Task(m) => m,
        }
    }
}

/// Project and task labels derived from an event summary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectTaskId {
    pub project: String,
    pub task: String,
}

impl ProjectTaskId {
    /// Split on the first colon: `"Acme: Draft: v2"` is project `Acme`, task
    /// `Draft: v2`. Without a colon the whole summary names both.
    pub fn parse(summary: &str) -> Self {
        match summary.split_once(':') {
            Some((project, task)) => Self {
                project: project.trim().to_string(),
                task: task.trim().to_string(),
            },
            None => {
                let name = summary.trim().to_string();
                Self {
                    project: name.clone(),
                    task: name,
                }
            }
        }
    }

    /// Case-folded grouping key.
    pub fn key(&self) -> (String, String) {
        (self.project.to_lowercase(), self.task.to_lowercase())
    }
}

/// The classifier's verdict for one event on its credited day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub impact: ImpactType,
    pub deduction: Deduction,
    /// Present for tracked task events.
    pub project_task: Option<ProjectTaskId>,
    /// Minutes credited to the project/task bucket.
    pub tracked_minutes: i64,
}

impl Classification {
    fn ignored() -> Self {
        Self {
            impact: ImpactType::Ignored,
            deduction: Deduction::None,
            project_task: None,
            tracked_minutes: 0,
        }
    }
}

/// Whether `summary` contains any of the (already lowercased) blocking keywords.
pub fn is_blocked(summary: &str, keywords: &[String]) -> bool {
    let summary = summary.to_lowercase();
    keywords.iter().any(|k| summary.contains(k.as_str()))
}

/// Apply the category rules to `event`, given its overlap with the day's window.
///
/// Inactive calendars are filtered upstream; should one slip through it is
/// treated as ignored.
pub fn classify(event: &Event<'_>, overlap: i64, blocking_keywords: &[String]) -> Classification {
    let overlap = overlap.max(0);
    match event.category() {
        CalendarCategory::Fungible if overlap > 0 => Classification {
            impact: ImpactType::ReducesAvailable,
            deduction: Deduction::Fungible(overlap),
            project_task: None,
            tracked_minutes: 0,
        },
        CalendarCategory::Task if !is_blocked(event.summary, blocking_keywords) => {
            Classification {
                impact: ImpactType::TaskTracked,
                deduction: if overlap > 0 {
                    Deduction::Task(overlap)
                } else {
                    Deduction::None
                },
                project_task: Some(ProjectTaskId::parse(event.summary)),
                tracked_minutes: event.duration_minutes(),
            }
        }
        _ => Classification::ignored(),
    }
}
