use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use u_timetable::grid::TimetableGrid;
use u_timetable::loader::write_assignments_csv;
use u_timetable::scheduler::{
    ScheduleReport, ScheduleRequest, SchedulerOptions, TimetableScheduler,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Full result as JSON.
    Json,
    /// Placed classes as CSV rows.
    Csv,
    /// Weekday × hour table.
    Grid,
}

/// Generate a weekly course timetable from CSV tables.
#[derive(Debug, Parser)]
#[command(name = "u-timetable", version, about)]
struct Cli {
    /// Directory holding faculty.csv, rooms.csv, courses.csv and (optionally) timeslots.csv.
    #[arg(short, long)]
    data_dir: PathBuf,

    /// JSON file with scheduler options. Flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Maximum placements undone per blocked course.
    #[arg(long)]
    backtrack_depth: Option<usize>,

    /// Treat empty faculty availability as "never available".
    #[arg(long)]
    strict_availability: bool,

    /// Use the Mon..Fri 9:00-16:00 week instead of timeslots.csv.
    #[arg(long)]
    standard_week: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Print a placement summary with utilization to stderr.
    #[arg(long)]
    report: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut options = match &cli.options {
        Some(path) => SchedulerOptions::from_json_file(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => SchedulerOptions::default(),
    };
    if let Some(depth) = cli.backtrack_depth {
        options.backtrack_depth = depth;
    }
    if cli.strict_availability {
        options.allow_unconstrained_faculty = false;
    }

    let mut request = ScheduleRequest::from_csv_dir(&cli.data_dir)
        .with_context(|| format!("loading tables from {}", cli.data_dir.display()))?;
    if cli.standard_week {
        request = request.with_standard_week();
    }

    let result = TimetableScheduler::new()
        .with_options(options)
        .schedule_request(&request)?;

    match cli.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout().lock(), &result)?;
            println!();
        }
        OutputFormat::Csv => write_assignments_csv(io::stdout().lock(), &result, &request)?,
        OutputFormat::Grid => print!("{}", TimetableGrid::build(&result, &request)),
    }

    if cli.report {
        eprint!("{}", ScheduleReport::calculate(&result, &request, true));
    }
    Ok(())
}
