//! ncdiff: compare two versions of a structured scientific dataset.
//!
//! Loads a baseline and a new dataset file, runs the four-stage
//! comparison pipeline, and exits with the number of failed stages
//! (0 = full agreement).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{DateTime, Local};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ncd_compare::pipeline::{RunParams, run};
use ncd_compare::sink::Sink;
use ncd_core::{Dataset, load_dataset};

/// Compare two dataset files; rel error is max abs error over max |baseline|.
#[derive(Parser, Debug)]
#[command(name = "ncdiff", version, about)]
struct Args {
    /// Baseline dataset file
    #[arg(long)]
    baseline: PathBuf,

    /// New dataset file to compare against the baseline
    #[arg(long = "new")]
    new: PathBuf,

    /// Specific variables to compare (default: all)
    #[arg(long = "vars", num_args = 1..)]
    vars: Option<Vec<String>>,

    /// One line per stage instead of full detail
    #[arg(short, long)]
    quiet: bool,

    /// Also print the report as JSON
    #[arg(long)]
    json: bool,
}

/// Info lines to stdout, error lines to stderr, matching the report's
/// leveled-line contract.
struct StdStreamSink;

impl Sink for StdStreamSink {
    fn info(&mut self, line: &str) {
        println!("{}", line);
    }

    fn error(&mut self, line: &str) {
        eprintln!("{}", line);
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let baseline = match load(&args.baseline) {
        Some(ds) => ds,
        None => return ExitCode::FAILURE,
    };
    let new = match load(&args.new) {
        Some(ds) => ds,
        None => return ExitCode::FAILURE,
    };

    tracing::info!(
        "comparing {} and {}",
        args.baseline.display(),
        args.new.display()
    );
    if let Some(t) = modified_time(&args.baseline) {
        tracing::info!("baseline modified: {}", t);
    }
    if let Some(t) = modified_time(&args.new) {
        tracing::info!("new modified:      {}", t);
    }

    let params = RunParams {
        quiet: args.quiet,
        variable_filter: args
            .vars
            .map(|v| v.into_iter().collect::<BTreeSet<String>>()),
    };

    let mut sink = StdStreamSink;
    let report = run(&baseline, &new, &params, &mut sink);

    if args.json {
        println!("{}", report.to_json());
    }

    // Exit status is the number of failed stages (at most 4).
    ExitCode::from(report.failed_count() as u8)
}

fn load(path: &Path) -> Option<Dataset> {
    match load_dataset(path) {
        Ok(ds) => Some(ds),
        Err(e) => {
            tracing::error!("cannot load {}: {}", path.display(), e);
            None
        }
    }
}

fn modified_time(path: &Path) -> Option<String> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let local: DateTime<Local> = modified.into();
    Some(local.format("%Y-%m-%d %H:%M:%S").to_string())
}
