//! Plain-text tables for a computed report.

use std::fmt::Write;

use availability_engine::Report;

pub fn render_report(report: &Report) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Daily availability");
    let _ = writeln!(
        out,
        "{:<10}  {:<3}  {:>8}  {:>8}  {:>9}  {:>8}  {:>6}",
        "date", "day", "capacity", "baseline", "available", "fungible", "task"
    );
    for day in &report.daily_availability {
        let _ = writeln!(
            out,
            "{:<10}  {:<3}  {:>8.2}  {:>8.2}  {:>9.2}  {:>8.2}  {:>6.2}",
            day.date,
            day.weekday,
            day.capacity_hours,
            day.total_hours,
            day.available_hours,
            day.fungible_hours,
            day.task_hours
        );
    }
    let totals = report.totals();
    let _ = writeln!(
        out,
        "{:<10}  {:<3}  {:>8.2}  {:>8.2}  {:>9.2}  {:>8.2}  {:>6.2}",
        "total",
        "",
        totals.capacity_hours,
        totals.total_hours,
        totals.available_hours,
        totals.fungible_hours,
        totals.task_hours
    );

    if !report.project_tasks.is_empty() {
        let _ = writeln!(out, "\nProject tasks");
        for entry in &report.project_tasks {
            let _ = writeln!(
                out,
                "{:>7.2}h  {} / {}",
                entry.hours, entry.project, entry.task
            );
        }
        let _ = writeln!(out, "\nProjects");
        for summary in &report.project_summaries {
            let _ = writeln!(out, "{:>7.2}h  {}", summary.total_hours, summary.project);
        }
    }

    if !report.fungible_summaries.is_empty() {
        let _ = writeln!(out, "\nFungible time");
        for summary in &report.fungible_summaries {
            let _ = writeln!(
                out,
                "{:>7.2}h  {}",
                summary.total_hours, summary.calendar_name
            );
        }
    }

    out
}
