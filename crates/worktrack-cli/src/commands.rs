//! Report subcommands
//!
//! Each report renders either plain text or pretty JSON into any writer.

use crate::config::CliConfig;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde_json::json;
use std::io::Write;
use worktrack_core::{
    build_forest, flatten_with_depth, node_progress, rollup_progress, to_percent, validate_hierarchy,
    weighted_progress, DepthRow,
};
use worktrack_model::Project;
use worktrack_report::{
    burndown_with_tail, calendar_month, collect_alerts_within, day_agenda, monthly_progress,
    portfolio_items, project_summaries, status_counts, weekly_progress, DateRange, PeriodProgress,
};

/// Available reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Indented forest with per-node progress
    Tree,
    /// Rollup and flat progress per project
    Progress,
    /// Weekly and monthly buckets across all projects
    Periods,
    /// Burndown per project
    Burndown,
    /// Alert list
    Alerts,
    /// Month calendar around today with today's agenda
    Calendar,
    /// Hierarchy validation
    Validate,
}

impl Report {
    /// Subcommand name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Report::Tree => "tree",
            Report::Progress => "progress",
            Report::Periods => "periods",
            Report::Burndown => "burndown",
            Report::Alerts => "alerts",
            Report::Calendar => "calendar",
            Report::Validate => "validate",
        }
    }

    /// Look a report up by subcommand name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [
            Report::Tree,
            Report::Progress,
            Report::Periods,
            Report::Burndown,
            Report::Alerts,
            Report::Calendar,
            Report::Validate,
        ]
        .into_iter()
        .find(|r| r.name() == name)
    }
}

/// Inputs shared by every report
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Reference date for period, burndown and alert reports
    pub today: NaiveDate,
    /// Emit JSON instead of text
    pub json: bool,
    /// Loaded configuration
    pub config: CliConfig,
}

/// Render `report` for `projects`.
///
/// Returns `Ok(false)` when `validate` found a broken hierarchy.
pub fn run(report: Report, projects: &[Project], ctx: &RunContext, out: &mut dyn Write) -> Result<bool> {
    tracing::info!("Running {} over {} projects", report.name(), projects.len());
    match report {
        Report::Tree => tree(projects, ctx, out).map(|()| true),
        Report::Progress => progress(projects, ctx, out).map(|()| true),
        Report::Periods => periods(projects, ctx, out).map(|()| true),
        Report::Burndown => burndown(projects, ctx, out).map(|()| true),
        Report::Alerts => alerts(projects, ctx, out).map(|()| true),
        Report::Calendar => calendar(projects, ctx, out).map(|()| true),
        Report::Validate => validate(projects, ctx, out),
    }
}

fn tree(projects: &[Project], ctx: &RunContext, out: &mut dyn Write) -> Result<()> {
    if ctx.json {
        let value: Vec<_> = projects
            .iter()
            .map(|p| {
                let rows: Vec<_> = tree_rows(p)
                    .into_iter()
                    .map(|(row, progress)| {
                        json!({ "depth": row.depth, "progress": progress, "item": row.item })
                    })
                    .collect();
                json!({
                    "project": p.id,
                    "progress": rollup_progress(&p.items),
                    "rows": rows,
                })
            })
            .collect();
        return write_json(out, &value);
    }

    for project in projects {
        writeln!(
            out,
            "{} [{}] {}%",
            project.name,
            project.status,
            rollup_progress(&project.items)
        )?;
        for (row, progress) in tree_rows(project) {
            let label = if row.item.name.is_empty() { &row.item.id } else { &row.item.name };
            writeln!(
                out,
                "{}{} {}% (weight {})",
                "  ".repeat(row.depth + 1),
                label,
                progress,
                row.item.weight()
            )?;
        }
    }
    Ok(())
}

// Pre-order rows paired with each node's rolled-up percentage.
fn tree_rows(project: &Project) -> Vec<(DepthRow, u8)> {
    let forest = build_forest(&project.items);
    let progress = node_progress(&forest);
    flatten_with_depth(&forest)
        .into_iter()
        .zip(progress.into_iter().map(to_percent))
        .collect()
}

fn progress(projects: &[Project], ctx: &RunContext, out: &mut dyn Write) -> Result<()> {
    let summaries = project_summaries(projects);
    let counts = status_counts(projects);

    if ctx.json {
        let rows: Vec<_> = summaries
            .iter()
            .zip(projects)
            .map(|(s, p)| json!({ "summary": s, "flatProgress": weighted_progress(&p.items) }))
            .collect();
        return write_json(out, &json!({ "statusCounts": counts, "projects": rows }));
    }

    for (stage, count) in &counts {
        writeln!(out, "{stage}: {count}")?;
    }
    for (summary, project) in summaries.iter().zip(projects) {
        writeln!(
            out,
            "{} [{}] rollup {}% flat {}%",
            summary.name,
            summary.status,
            summary.progress,
            weighted_progress(&project.items)
        )?;
    }
    Ok(())
}

fn periods(projects: &[Project], ctx: &RunContext, out: &mut dyn Write) -> Result<()> {
    let items = portfolio_items(projects);
    let weekly = weekly_progress(&items, ctx.today, ctx.config.weeks);
    let monthly = monthly_progress(&items, ctx.today, ctx.config.months);

    if ctx.json {
        return write_json(out, &json!({ "weekly": weekly, "monthly": monthly }));
    }

    writeln!(out, "Weekly")?;
    write_periods(out, &weekly)?;
    writeln!(out, "Monthly")?;
    write_periods(out, &monthly)
}

fn write_periods(out: &mut dyn Write, series: &[PeriodProgress]) -> Result<()> {
    for p in series {
        writeln!(
            out,
            "  {}: planned {}, completed {}, rate {}%",
            p.label, p.planned, p.completed, p.rate
        )?;
    }
    Ok(())
}

fn burndown(projects: &[Project], ctx: &RunContext, out: &mut dyn Write) -> Result<()> {
    let mut charts = Vec::new();
    for project in projects {
        let (Some(start), Some(end)) = (project.start_date, project.end_date) else {
            tracing::warn!("Project {} has no start/end date, skipping burndown", project.id);
            continue;
        };
        let points = burndown_with_tail(
            &project.items,
            DateRange::new(start, end),
            ctx.today,
            ctx.config.burndown_tail_days,
        );
        charts.push((project, points));
    }

    if ctx.json {
        let value: Vec<_> = charts
            .iter()
            .map(|(p, points)| json!({ "project": p.id, "points": points }))
            .collect();
        return write_json(out, &value);
    }

    for (project, points) in &charts {
        writeln!(out, "{}", project.name)?;
        for point in points {
            let actual = point.actual.map_or_else(|| "-".to_string(), |a| a.to_string());
            writeln!(out, "  {} ideal {} actual {}", point.label, point.ideal, actual)?;
        }
    }
    Ok(())
}

fn alerts(projects: &[Project], ctx: &RunContext, out: &mut dyn Write) -> Result<()> {
    let alerts = collect_alerts_within(projects, ctx.today, ctx.config.alert_horizon_days);

    if ctx.json {
        return write_json(out, &alerts);
    }

    if alerts.is_empty() {
        writeln!(out, "No alerts")?;
    }
    for alert in &alerts {
        writeln!(out, "[{:?}] {}: {}", alert.kind, alert.project_name, alert.message)?;
    }
    Ok(())
}

fn calendar(projects: &[Project], ctx: &RunContext, out: &mut dyn Write) -> Result<()> {
    let days = calendar_month(projects, ctx.today);
    let agenda = day_agenda(projects, ctx.today, ctx.today);

    if ctx.json {
        return write_json(out, &json!({ "days": days, "agenda": agenda }));
    }

    writeln!(out, "{}", ctx.today.format("%Y-%m"))?;
    writeln!(out, "  Su  Mo  Tu  We  Th  Fr  Sa")?;
    for week in days.chunks(7) {
        let cells: Vec<String> = week
            .iter()
            .map(|d| {
                let marker = match (d.status.item_count > 0, d.status.has_issue) {
                    (_, true) => '!',
                    (true, false) => '*',
                    (false, false) => ' ',
                };
                if d.in_month {
                    format!("{:>3}{marker}", d.date.day())
                } else {
                    "    ".to_string()
                }
            })
            .collect();
        writeln!(out, "{}", cells.concat().trim_end())?;
    }

    writeln!(out, "Agenda {}", agenda.date)?;
    for entry in &agenda.items {
        let label = if entry.item.name.is_empty() { &entry.item.id } else { &entry.item.name };
        writeln!(out, "  {}: {} [{}]", entry.project_name, label, entry.item.status)?;
    }
    for entry in &agenda.issues {
        writeln!(out, "  {}: issue {}", entry.project_name, entry.issue.title)?;
    }
    Ok(())
}

fn validate(projects: &[Project], ctx: &RunContext, out: &mut dyn Write) -> Result<bool> {
    let results: Vec<_> = projects
        .iter()
        .map(|p| (p, validate_hierarchy(&p.items)))
        .collect();
    let ok = results.iter().all(|(_, r)| r.is_ok());

    if ctx.json {
        let value: Vec<_> = results
            .iter()
            .map(|(p, r)| {
                json!({
                    "project": p.id,
                    "ok": r.is_ok(),
                    "error": r.as_ref().err().map(ToString::to_string),
                })
            })
            .collect();
        write_json(out, &value)?;
        return Ok(ok);
    }

    for (project, result) in &results {
        match result {
            Ok(()) => writeln!(out, "{}: ok", project.name)?,
            Err(e) => {
                tracing::warn!("Project {} failed validation: {}", project.id, e);
                writeln!(out, "{}: {}", project.name, e)?;
            }
        }
    }
    Ok(ok)
}

fn write_json<T: serde::Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_names_round_trip() {
        for name in ["tree", "progress", "periods", "burndown", "alerts", "calendar", "validate"] {
            assert_eq!(Report::from_name(name).map(Report::name), Some(name));
        }
        assert_eq!(Report::from_name("gantt"), None);
    }

    #[test]
    fn deep_chain_renders() {
        let items: Vec<_> = (0..6_000)
            .map(|i| {
                let item = worktrack_model::WorkItem::new(format!("n{i}"))
                    .with_weight(1.0)
                    .with_quantities(2.0, 1.0);
                if i == 0 {
                    item
                } else {
                    item.with_parent(format!("n{}", i - 1))
                }
            })
            .collect();
        let project = Project::new("deep", "Deep").with_items(items);
        let ctx = RunContext {
            today: chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            json: false,
            config: CliConfig::new(),
        };

        let mut out = Vec::new();
        run(Report::Tree, std::slice::from_ref(&project), &ctx, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 6_001);
        assert_eq!(text.lines().next(), Some("Deep [Proposal] 50%"));

        let mut out = Vec::new();
        let ctx = RunContext { json: true, ..ctx };
        run(Report::Tree, &[project], &ctx, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["rows"][5_999]["depth"], 5_999);
    }
}
