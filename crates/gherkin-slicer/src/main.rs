//! Command line entry point for splitting Gherkin feature files.
//!
//! Every input file (or every `.feature` file below an input directory) is
//! split into one file per scenario below the output directory. The path of
//! each written file is printed on stdout.

use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use eyre::{Context, Result};
use tracing::{error, info};

use gherkin_slicer::config::{LogLevel, SlicerConfig};
use gherkin_slicer::discovery::{
    check_clean_target, collect_feature_files, remove_generated_files,
};
use gherkin_slicer::error::ConfigError;
use gherkin_slicer::logging::init_logging;
use gherkin_slicer::slicer::{SliceReport, slice_files};
use gherkin_slicer::writer::{DirectoryWriter, MemorySink};

/// Split Gherkin feature files into one file per scenario.
#[derive(Parser, Debug)]
#[command(name = "gherkin-slicer", version, about)]
struct Args {
    /// Feature files or directories containing them.
    #[arg(required = true)]
    paths: Vec<Utf8PathBuf>,

    /// Directory receiving the sliced files.
    #[arg(long, short)]
    out_dir: Option<Utf8PathBuf>,

    /// Delete existing `.feature` files in the output directory first.
    #[arg(long, conflicts_with = "dry_run")]
    clean: bool,

    /// Print the sliced bodies instead of writing files.
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&SlicerConfig::default());
            error!(error = %e, "invalid configuration");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);

    let clean_target = if args.clean {
        check_clean_target(&config.out_dir, &args.paths)
    } else {
        Ok(())
    };
    if let Err(e) = clean_target {
        error!(error = %e, "invalid configuration");
        return ExitCode::from(2);
    }

    match run(&args, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!(error = ?e, "slicing aborted");
            ExitCode::from(1)
        }
    }
}

fn build_config(args: &Args) -> Result<SlicerConfig, ConfigError> {
    let config = SlicerConfig::from_env()?;
    Ok(config.apply_overrides(args.log_level, args.out_dir.clone()))
}

/// Slice every input, returning whether all of them succeeded.
///
/// Cleaning happens before inputs are collected, and the output directory
/// is never searched for inputs.
fn run(args: &Args, config: &SlicerConfig) -> Result<bool> {
    if args.clean {
        let removed = remove_generated_files(&config.out_dir)
            .wrap_err_with(|| format!("failed to clean {}", config.out_dir))?;
        info!(removed, "removed previously generated files");
    }

    let inputs = collect_feature_files(&args.paths, &config.out_dir)
        .wrap_err("failed to collect inputs")?;
    info!(inputs = inputs.len(), out_dir = %config.out_dir, "slicing feature files");

    let mut stdout = io::stdout().lock();
    let report = if args.dry_run {
        let mut sink = MemorySink::new();
        let report = slice_files(&inputs, &mut sink);
        for (path, body) in sink.units() {
            write!(stdout, "# {path}\n{body}").wrap_err("failed to write dry-run output")?;
        }
        report
    } else {
        let mut writer = DirectoryWriter::new(config.out_dir.clone());
        let report = slice_files(&inputs, &mut writer);
        for path in &report.written {
            writeln!(stdout, "{path}").wrap_err("failed to write output path")?;
        }
        report
    };
    stdout.flush().wrap_err("failed to flush stdout")?;

    summarise(&report);
    Ok(report.is_success())
}

fn summarise(report: &SliceReport) {
    if report.is_success() {
        info!(units = report.written.len(), "done");
    } else {
        error!(
            units = report.written.len(),
            failed = report.failures.len(),
            "some inputs could not be sliced"
        );
    }
}
