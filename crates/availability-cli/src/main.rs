//! `avail` CLI — compute working-time availability from categorised calendar events.
//!
//! ## Usage
//!
//! ```sh
//! # Report as JSON (snapshot from stdin → stdout)
//! cat snapshot.json | avail report --start 2026-03-16 --end 2026-03-20
//!
//! # Report as plain-text tables, reading from and writing to files
//! avail -c config.toml report -i snapshot.json -o report.txt --format text
//!
//! # Show each day's resolved work window and capacity
//! avail days --start 2026-03-14 --end 2026-03-16
//!
//! # Print the absolute range events must be fetched for
//! avail bounds --timezone America/New_York
//! ```

mod config;
mod render;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use availability_engine::{
    compute_report, dates, window, CalendarSnapshot, DateRange, TimeConfig,
};
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "avail",
    version,
    about = "Working-time availability from categorised calendar events"
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML configuration file (layered over the user config file)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Overrides applied on top of the loaded configuration.
#[derive(Args, Debug, Default)]
struct RangeArgs {
    /// First date of the range (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last date of the range, inclusive (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,
    /// IANA timezone (e.g., "America/New_York")
    #[arg(long)]
    timezone: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the availability report for a calendar snapshot
    Report {
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// List each date with its resolved work window and capacity
    Days {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Print the absolute time range events must be fetched for
    Bounds {
        #[command(flatten)]
        range: RangeArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Report {
            input,
            output,
            format,
            range,
        } => {
            let config = load_config(cli.config.as_deref(), &range)?;
            let raw = read_input(input.as_deref())?;
            let snapshot =
                CalendarSnapshot::from_json(&raw).context("Failed to parse calendar snapshot")?;
            tracing::debug!(
                calendars = snapshot.calendars.len(),
                events = snapshot.events.len(),
                "loaded snapshot"
            );

            let report = compute_report(&config, &snapshot.calendars, &snapshot.events)
                .context("Failed to compute availability report")?;

            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&report)?,
                OutputFormat::Text => render::render_report(&report),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Days { range } => {
            let config = load_config(cli.config.as_deref(), &range)?;
            config.validate().context("Invalid configuration")?;
            for date in DateRange::new(config.start_date, config.end_date)? {
                let window = window::resolve(date, &config);
                println!(
                    "{}  {}  {:<7}  {}-{}  {:.2}h",
                    date,
                    date.format("%a"),
                    window.kind,
                    window.start.format("%H:%M"),
                    window.end.format("%H:%M"),
                    window.capacity_minutes() / 60.0
                );
            }
        }
        Commands::Bounds { range } => {
            let config = load_config(cli.config.as_deref(), &range)?;
            let tz = config.validate().context("Invalid configuration")?;
            let (start, end) = dates::fetch_bounds(&config, &tz)?;
            println!("{}", start.to_rfc3339());
            println!("{}", end.to_rfc3339());
        }
    }

    Ok(())
}

/// Load the layered configuration and apply command-line overrides.
fn load_config(path: Option<&Path>, range: &RangeArgs) -> Result<TimeConfig> {
    if let Some(path) = path {
        anyhow::ensure!(
            path.is_file(),
            "Config file not found: {}",
            path.display()
        );
    }
    let mut config = config::load(path).context("Failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(start) = range.start {
        config.start_date = start;
    }
    if let Some(end) = range.end {
        config.end_date = end;
    }
    if let Some(timezone) = &range.timezone {
        config.timezone = timezone.clone();
    }
    Ok(config)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
