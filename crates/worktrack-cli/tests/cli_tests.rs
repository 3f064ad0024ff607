use pretty_assertions::assert_eq;
use std::io::Write as _;
use worktrack_cli::{load_projects, run, CliConfig, Report, RunContext};
use worktrack_model::{Project, WorkItem};
use worktrack_test_utils::{day, deep_tree_items, sample_project};

fn ctx(json: bool) -> RunContext {
    RunContext {
        today: day(2025, 3, 26),
        json,
        config: CliConfig::new(),
    }
}

fn render(report: Report, projects: &[Project], json: bool) -> (bool, String) {
    let mut out = Vec::new();
    let ok = run(report, projects, &ctx(json), &mut out).unwrap();
    (ok, String::from_utf8(out).unwrap())
}

#[test]
fn loads_project_file_and_renders_tree() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let json = serde_json::to_string(&vec![sample_project()]).unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let projects = load_projects(file.path()).unwrap();
    assert_eq!(projects, vec![sample_project()]);

    let (ok, text) = render(Report::Tree, &projects, false);
    assert!(ok);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Warehouse [Execution] 45%");
    assert_eq!(lines[1], "  design 100% (weight 30)");
    assert_eq!(lines[2], "  build 30% (weight 50)");
    assert_eq!(lines[3], "    frame 50% (weight 60)");
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_projects(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn config_file_overrides_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "weeks = 2\nmonths = 1\nlog_level = \"info\"").unwrap();

    let config = CliConfig::from_file(file.path()).unwrap();
    assert_eq!(config.weeks, 2);
    assert_eq!(config.months, 1);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.alert_horizon_days, 7);
}

#[test]
fn malformed_config_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "weeks = \"many\"").unwrap();
    assert!(CliConfig::from_file(file.path()).is_err());
}

#[test]
fn progress_json_has_rollup_and_flat() {
    let project = Project::new("d", "Deep").with_items(deep_tree_items());
    let (_, text) = render(Report::Progress, &[project], true);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["projects"][0]["summary"]["progress"], 70);
    assert_eq!(value["projects"][0]["flatProgress"], 30);
    assert_eq!(value["statusCounts"]["Proposal"], 1);
}

#[test]
fn periods_use_configured_bucket_counts() {
    let mut context = ctx(true);
    context.config = CliConfig::new().with_periods(2, 3);
    let mut out = Vec::new();
    run(Report::Periods, &[sample_project()], &context, &mut out).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["weekly"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["monthly"].as_array().map(Vec::len), Some(3));
}

#[test]
fn burndown_skips_undated_projects() {
    let undated = Project::new("u", "Undated").with_items(vec![WorkItem::new("x").with_weight(1.0)]);
    let (_, text) = render(Report::Burndown, &[undated, sample_project()], true);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    let charts = value.as_array().unwrap();
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0]["project"], "p1");
}

#[test]
fn alerts_text_lists_issue_first() {
    let (_, text) = render(Report::Alerts, &[sample_project()], false);
    assert_eq!(
        text.lines().next(),
        Some("[Issue] Warehouse: [Critical] issue: Crane inspection overdue")
    );
}

#[test]
fn calendar_marks_scheduled_and_issue_days() {
    let (ok, text) = render(Report::Calendar, &[sample_project()], false);
    assert!(ok);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "2025-03");
    assert_eq!(lines[1], "  Su  Mo  Tu  We  Th  Fr  Sa");
    // March 2025 opens on a Saturday; build is scheduled through 03/15.
    assert_eq!(lines[2], "                          1*");
    assert!(lines.contains(&"Agenda 2025-03-26"));

    let (_, json) = render(Report::Calendar, &[sample_project()], true);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["days"].as_array().map(Vec::len), Some(42));
    assert_eq!(value["days"][6]["status"]["item_count"], 1);
    assert_eq!(value["agenda"]["date"], "2025-03-26");
}

#[test]
fn validate_fails_on_cycle() {
    let broken = Project::new("b", "Broken").with_items(vec![
        WorkItem::new("a").with_parent("b"),
        WorkItem::new("b").with_parent("a"),
    ]);
    let (ok, text) = render(Report::Validate, &[sample_project(), broken], false);

    assert!(!ok);
    assert_eq!(text, "Warehouse: ok\nBroken: parent cycle among items: a, b\n");
}
