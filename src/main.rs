mod aggregate;
mod extract;
mod labels;
mod progress;
mod report;
mod types;

use std::io::stderr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use crate::aggregate::{LabelPolicy, aggregate_creditors, aggregate_debtors};
use crate::extract::{build_corpus, discover_extracts};
use crate::progress::ConsoleProgress;
use crate::report::{reconcile, write_report};
use crate::types::ReportError;

/// Builds the 3-hour participant reconciliation report from a directory of
/// payment extracts.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Directory containing the spreadsheet extracts (.xlsx or .csv)
    #[arg(short, long, value_name = "DIR")]
    source_path: PathBuf,
    /// Directory the two report files are written into
    #[arg(short, long, value_name = "DIR")]
    target_path: PathBuf,
    /// How colliding derived column labels are handled
    #[arg(long, value_enum, default_value_t = LabelCollisions::Merge)]
    label_collisions: LabelCollisions,
    /// Log verbosity: error, warn, info, debug or trace
    #[arg(short, long, default_value = "info")]
    log_level: String
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LabelCollisions {
    /// Sum colliding columns into one
    Merge,
    /// Keep colliding columns apart with a numeric suffix
    Distinct
}

impl From<LabelCollisions> for LabelPolicy {
    fn from(collisions: LabelCollisions) -> Self {
        match collisions {
            LabelCollisions::Merge => LabelPolicy::MergeDuplicates,
            LabelCollisions::Distinct => LabelPolicy::KeepDistinct
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    ensure_directory(&cli.source_path)?;
    ensure_directory(&cli.target_path)?;

    run(&cli.source_path, &cli.target_path, cli.label_collisions.into())?;

    Ok(())
}

fn run(source: &Path, target: &Path, policy: LabelPolicy) -> Result<()> {
    let files = discover_extracts(source)?;
    info!("Discovered {} extract file(s) in [{}]", files.len(), source.display());

    let corpus = build_corpus(&files, &mut ConsoleProgress)?;
    info!("Unified corpus holds {} transaction(s)", corpus.len());

    let debtors = aggregate_debtors(&corpus);
    let creditors = aggregate_creditors(&corpus, policy);
    let table = reconcile(&debtors, &creditors);

    write_report(&table, target)?;
    info!("Report written to [{}]", target.display());

    Ok(())
}

fn ensure_directory(path: &Path) -> Result<(), ReportError> {
    if !path.is_dir() {
        return Err(ReportError::path_not_found(path));
    }

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout stays clean for anything the operator pipes; logs and the
    //      progress line both go to stderr.
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
