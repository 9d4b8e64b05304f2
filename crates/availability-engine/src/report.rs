//! Aggregation: fold classified events and per-day windows into a [`Report`].
//!
//! All mutable state (capacity ledger, project and calendar buckets, colour
//! map) lives in a [`RunContext`] created per call, so repeated or concurrent
//! runs cannot interfere and identical input yields an identical report.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::capacity::DailyCapacity;
use crate::classify::{classify, Classification, Deduction, ImpactType, ProjectTaskId};
use crate::color::ColorAllocator;
use crate::config::TimeConfig;
use crate::dates::DateRange;
use crate::error::{EngineError, Result};
use crate::model::{Calendar, CalendarCategory, CalendarEvent, Event};
use crate::overlap::overlap_minutes;
use crate::window::{self, WorkWindow};

/// One row of the day-by-day chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAvailability {
    pub date: NaiveDate,
    /// Three-letter weekday name, e.g. "Mon".
    pub weekday: String,
    /// Post-buffer capacity of the day's window.
    pub capacity_hours: f64,
    /// Chart baseline: capacity after fungible deductions only.
    pub total_hours: f64,
    /// Capacity left after fungible and task deductions.
    pub available_hours: f64,
    pub fungible_hours: f64,
    pub task_hours: f64,
}

/// Hours tracked against one case-folded `(project, task)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTask {
    /// Project label as first seen (text before the first colon).
    pub project: String,
    /// Task label as first seen (text after the first colon, or the whole summary).
    pub task: String,
    /// Full duration of every tracked event in this bucket, not just the overlap.
    pub hours: f64,
    /// Display colour of the project.
    pub color: String,
}

/// Hours tracked against one project across all of its tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project label as first seen.
    pub project: String,
    /// Sum of the project's task hours over the whole range.
    pub total_hours: f64,
    /// Display colour, shared with the project's [`ProjectTask`] rows.
    pub color: String,
}

/// Capacity consumed by one fungible calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FungibleSummary {
    /// Name of the source calendar.
    pub calendar_name: String,
    /// Overlap hours that reduced availability over the whole range.
    pub total_hours: f64,
    /// Display colour of the calendar.
    pub color: String,
}

/// One row per event that reached the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEventDetail {
    /// The civil date the event was credited to (its local start date).
    pub date: NaiveDate,
    pub summary: String,
    pub calendar_name: String,
    pub category: CalendarCategory,
    pub local_start: NaiveDateTime,
    pub local_end: NaiveDateTime,
    pub duration_hours: f64,
    /// Minutes deducted from the day's capacity.
    pub overlap_minutes: i64,
    pub impact_type: ImpactType,
}

/// Range-wide sums of the daily columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub capacity_hours: f64,
    pub total_hours: f64,
    pub available_hours: f64,
    pub fungible_hours: f64,
    pub task_hours: f64,
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub daily_availability: Vec<DailyAvailability>,
    pub project_tasks: Vec<ProjectTask>,
    pub project_summaries: Vec<ProjectSummary>,
    pub fungible_summaries: Vec<FungibleSummary>,
    pub daily_details: Vec<DailyEventDetail>,
}

impl Report {
    pub fn totals(&self) -> ReportTotals {
        self.daily_availability
            .iter()
            .fold(ReportTotals::default(), |acc, day| ReportTotals {
                capacity_hours: acc.capacity_hours + day.capacity_hours,
                total_hours: acc.total_hours + day.total_hours,
                available_hours: acc.available_hours + day.available_hours,
                fungible_hours: acc.fungible_hours + day.fungible_hours,
                task_hours: acc.task_hours + day.task_hours,
            })
    }
}

/// Compute the availability report for one closed batch of calendars and events.
///
/// Events are processed in the order given; colour assignment follows that
/// order. Malformed events, events of unknown or inactive calendars and events
/// whose local start falls outside the range are skipped.
///
/// # Errors
/// Any validation failure of `config` (see [`TimeConfig::validate`]) aborts the
/// run before any event is looked at.
pub fn compute_report(
    config: &TimeConfig,
    calendars: &[Calendar],
    events: &[CalendarEvent],
) -> Result<Report> {
    let tz = config.validate()?;
    let days = DateRange::new(config.start_date, config.end_date)?;

    let mut ctx = RunContext::new(config, tz, days);
    let calendars: HashMap<&str, &Calendar> =
        calendars.iter().map(|c| (c.id.as_str(), c)).collect();

    for raw in events {
        let Some(calendar) = calendars.get(raw.calendar_id.as_str()) else {
            tracing::debug!(calendar_id = %raw.calendar_id, "skipping event of unknown calendar");
            continue;
        };
        if !calendar.category.is_active() {
            tracing::debug!(calendar = %calendar.name, "skipping event of inactive calendar");
            continue;
        }
        match Event::from_raw(raw, calendar) {
            Ok(event) => ctx.record(&event),
            Err(EngineError::MalformedEvent(reason)) => {
                tracing::debug!(%reason, "skipping malformed event");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(ctx.finish())
}

struct TaskBucket {
    id: ProjectTaskId,
    minutes: i64,
}

struct ProjectLabel {
    name: String,
    color: &'static str,
}

struct FungibleBucket {
    calendar_name: String,
    minutes: i64,
    color: &'static str,
}

/// State scoped to a single computation run.
struct RunContext {
    tz: Tz,
    keywords: Vec<String>,
    days: BTreeMap<NaiveDate, (WorkWindow, DailyCapacity)>,
    tasks: HashMap<(String, String), TaskBucket>,
    projects: HashMap<String, ProjectLabel>,
    fungible: HashMap<String, FungibleBucket>,
    colors: ColorAllocator,
    details: Vec<DailyEventDetail>,
}

impl RunContext {
    fn new(config: &TimeConfig, tz: Tz, range: DateRange) -> Self {
        let days = range
            .map(|date| {
                let window = window::resolve(date, config);
                (date, (window, DailyCapacity::for_window(&window)))
            })
            .collect();
        Self {
            tz,
            keywords: config.normalized_keywords(),
            days,
            tasks: HashMap::new(),
            projects: HashMap::new(),
            fungible: HashMap::new(),
            colors: ColorAllocator::new(),
            details: Vec::new(),
        }
    }

    fn record(&mut self, event: &Event<'_>) {
        let local_start = event.start.with_timezone(&self.tz).naive_local();
        let local_end = event.end.with_timezone(&self.tz).naive_local();
        let date = local_start.date();

        let Some((window, capacity)) = self.days.get_mut(&date) else {
            tracing::debug!(summary = event.summary, %date, "skipping event outside range");
            return;
        };

        let overlap = overlap_minutes(event.start, event.end, window, date, &self.tz);
        let verdict = classify(event, overlap, &self.keywords);
        capacity.apply(verdict.deduction);

        self.details.push(DailyEventDetail {
            date,
            summary: event.summary.to_string(),
            calendar_name: event.calendar.name.clone(),
            category: event.category(),
            local_start,
            local_end,
            duration_hours: minutes_to_hours(event.duration_minutes()),
            overlap_minutes: verdict.deduction.minutes(),
            impact_type: verdict.impact,
        });

        self.attribute(event, verdict);
    }

    fn attribute(&mut self, event: &Event<'_>, verdict: Classification) {
        if let Deduction::Fungible(minutes) = verdict.deduction {
            let color = self.colors.color_for(&event.calendar.name);
            self.fungible
                .entry(event.calendar.id.clone())
                .or_insert_with(|| FungibleBucket {
                    calendar_name: event.calendar.name.clone(),
                    minutes: 0,
                    color,
                })
                .minutes += minutes;
        }

        let Some(id) = verdict.project_task else {
            return;
        };
        let key = id.key();
        if !self.projects.contains_key(&key.0) {
            let color = self.colors.color_for(&id.project);
            self.projects.insert(
                key.0.clone(),
                ProjectLabel {
                    name: id.project.clone(),
                    color,
                },
            );
        }
        self.tasks
            .entry(key)
            .or_insert(TaskBucket { id, minutes: 0 })
            .minutes += verdict.tracked_minutes;
    }

    fn finish(self) -> Report {
        let daily_availability = self
            .days
            .iter()
            .map(|(date, (_, capacity))| {
                tracing::debug!(%date, available = capacity.available_minutes, "day computed");
                DailyAvailability {
                    date: *date,
                    weekday: date.format("%a").to_string(),
                    capacity_hours: capacity.total_minutes / 60.0,
                    total_hours: capacity.after_fungible_minutes() / 60.0,
                    available_hours: capacity.available_minutes.max(0.0) / 60.0,
                    fungible_hours: minutes_to_hours(capacity.fungible_minutes),
                    task_hours: minutes_to_hours(capacity.task_minutes),
                }
            })
            .collect();

        let mut tasks: Vec<(&(String, String), &TaskBucket)> = self.tasks.iter().collect();
        tasks.sort_by(|a, b| a.0.cmp(b.0));

        let mut project_minutes: HashMap<&str, i64> = HashMap::new();
        let project_tasks = tasks
            .into_iter()
            .map(|((project_key, _), bucket)| {
                *project_minutes.entry(project_key.as_str()).or_default() += bucket.minutes;
                let label = &self.projects[project_key];
                ProjectTask {
                    project: label.name.clone(),
                    task: bucket.id.task.clone(),
                    hours: minutes_to_hours(bucket.minutes),
                    color: label.color.to_string(),
                }
            })
            .collect();

        let mut project_summaries: Vec<ProjectSummary> = project_minutes
            .into_iter()
            .map(|(key, minutes)| {
                let label = &self.projects[key];
                ProjectSummary {
                    project: label.name.clone(),
                    total_hours: minutes_to_hours(minutes),
                    color: label.color.to_string(),
                }
            })
            .collect();
        project_summaries.sort_by(|a, b| {
            b.total_hours
                .total_cmp(&a.total_hours)
                .then_with(|| a.project.cmp(&b.project))
        });

        let mut fungible_summaries: Vec<FungibleSummary> = self
            .fungible
            .into_values()
            .map(|bucket| FungibleSummary {
                calendar_name: bucket.calendar_name,
                total_hours: minutes_to_hours(bucket.minutes),
                color: bucket.color.to_string(),
            })
            .collect();
        fungible_summaries.sort_by(|a, b| {
            b.total_hours
                .total_cmp(&a.total_hours)
                .then_with(|| a.calendar_name.cmp(&b.calendar_name))
        });

        Report {
            daily_availability,
            project_tasks,
            project_summaries,
            fungible_summaries,
            daily_details: self.details,
        }
    }
}

fn minutes_to_hours(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}
