//! `worktrack` binary: loads project JSON and prints trees, progress and
//! dashboard series.

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;
use worktrack_cli::{init_tracing, load_projects, run, CliConfig, Report, RunContext};

fn cli() -> Command {
    let report = |name: &'static str, about: &'static str| Command::new(name).about(about);

    Command::new("worktrack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Work breakdown trees, weighted progress and dashboard series")
        .subcommand_required(true)
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Project JSON file (one project or a list)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .value_parser(|s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
                .help("Reference date (YYYY-MM-DD), defaults to the local date"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Config file (defaults to ./worktrack.toml if present)"),
        )
        .subcommand(report("tree", "Print the item forest with per-node progress"))
        .subcommand(report("progress", "Print rollup and flat progress per project"))
        .subcommand(report("periods", "Print weekly and monthly progress buckets"))
        .subcommand(report("burndown", "Print burndown series per project"))
        .subcommand(report("alerts", "Print deadline, issue and overdue alerts"))
        .subcommand(report("calendar", "Print the month calendar and today's agenda"))
        .subcommand(report("validate", "Check item hierarchies for duplicates and cycles"))
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let Some((name, args)) = matches.subcommand() else {
        bail!("no subcommand given");
    };
    let Some(report) = Report::from_name(name) else {
        bail!("unknown subcommand: {name}");
    };

    let config = CliConfig::load(args.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .context("failed to load configuration")?;
    init_tracing(&config);

    let Some(input) = args.get_one::<PathBuf>("input") else {
        bail!("--input <path> is required");
    };
    let projects = load_projects(input)?;

    let ctx = RunContext {
        today: args
            .get_one::<NaiveDate>("today")
            .copied()
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        json: args.get_flag("json"),
        config,
    };

    let stdout = std::io::stdout();
    let ok = run(report, &projects, &ctx, &mut stdout.lock())?;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
