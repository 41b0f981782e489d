//! CLI parsing and orchestration. Parses args, loads the report, runs the
//! two-phase marking pass, writes the residual report. Maps errors to exit
//! codes: per-record misses are expected output and never change the exit
//! code; only a fatal report load or a failed residual write is non-zero.

use crate::config;
use crate::languages::LanguageMap;
use crate::mark::{self, MarkError, MarkOptions, RunSummary};
use crate::model::ResidualReport;
use crate::report::{load_report, write_residual};
use clap::Parser;
use std::cell::RefCell;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Report(MarkError),

    #[error("{0}")]
    Residual(MarkError),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) => 1,
            CliRunError::Report(_) => 2,
            CliRunError::Residual(_) => 3,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sitemark")]
#[command(about = "Mark broken reading sources as disabled across plugin files and multi-source configs")]
#[command(
    after_help = "Config file keys (plugins_dir, report_file, residual_file, marker, multisrc_dir) are documented in the README. CLI flags override config."
)]
pub struct Args {
    /// Broken-sites report path. Default: ./broken-sites-report.json.
    pub report: Option<PathBuf>,

    /// Plugin tree root (one directory per language). Default: ./plugins.
    #[arg(short, long)]
    pub plugins: Option<PathBuf>,

    /// Residual report output path. Default: ./missed-sites-report.json.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Marker token injected before a disabled file's extension.
    #[arg(long)]
    pub marker: Option<String>,

    /// Directory name under the plugin root holding multi-source configs.
    #[arg(long)]
    pub multisrc_dir: Option<String>,

    /// Search and report without renaming or rewriting anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Print matching line numbers during the standalone search.
    #[arg(long)]
    pub show_lines: bool,

    /// Suppress progress output (warnings and errors only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Print verbose error chain.
    #[arg(long)]
    pub verbose: bool,
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    let config = config::load_config().map_err(CliRunError::InvalidInput)?;

    let report_path: PathBuf = args
        .report
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.report_file.clone()))
        .unwrap_or_else(|| PathBuf::from("broken-sites-report.json"));
    let plugins_dir: PathBuf = args
        .plugins
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.plugins_dir.clone()))
        .unwrap_or_else(|| PathBuf::from("plugins"));
    let output_path: PathBuf = args
        .output
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.residual_file.clone()))
        .unwrap_or_else(|| PathBuf::from("missed-sites-report.json"));
    let marker = args
        .marker
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.marker.clone()))
        .unwrap_or_else(|| mark::DEFAULT_MARKER.to_string());
    let multisrc_dir = args
        .multisrc_dir
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.multisrc_dir.clone()))
        .unwrap_or_else(|| mark::DEFAULT_MULTISRC_DIR.to_string());

    if marker.trim().is_empty() {
        return Err(CliRunError::InvalidInput(
            "Marker token must not be empty.".to_string(),
        ));
    }
    if !plugins_dir.is_dir() {
        return Err(CliRunError::InvalidInput(format!(
            "Plugin directory does not exist: {}",
            plugins_dir.display()
        )));
    }

    if !args.quiet {
        eprintln!("Loading {}...", report_path.display());
    }
    let records = load_report(&report_path).map_err(CliRunError::Report)?;
    if !args.quiet {
        eprintln!("Successfully indexed {} plugins.", records.len());
    }

    let progress_state: RefCell<Option<indicatif::ProgressBar>> = RefCell::new(None);
    let progress_cb = |n: usize, total: usize| {
        if total == 0 {
            return;
        }
        let mut state = progress_state.borrow_mut();
        let pb = state.get_or_insert_with(|| {
            let bar = indicatif::ProgressBar::new(total as u64);
            bar.set_style(
                indicatif::ProgressStyle::default_bar()
                    .template("{spinner} {msg} [{bar:40}] {pos}/{len} ({elapsed})")
                    .unwrap()
                    .progress_chars("█▉▊▋▌▍▎▏ "),
            );
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });
        pb.set_position(n as u64);
        pb.set_message(format!("Marking site {}/{}", n, total));
    };
    let progress: Option<&dyn Fn(usize, usize)> = if args.quiet { None } else { Some(&progress_cb) };

    let opts = MarkOptions {
        plugins_dir: &plugins_dir,
        multisrc_dir: &multisrc_dir,
        marker: &marker,
        dry_run: args.dry_run,
        show_lines: args.show_lines,
        quiet: args.quiet,
        progress,
    };
    let summary = mark::run(records, &LanguageMap::from_table(), &opts);

    if let Some(pb) = progress_state.borrow_mut().take() {
        pb.disable_steady_tick();
        pb.finish_and_clear();
    }

    print_summary(&summary, args.quiet);

    if summary.residual.is_empty() {
        if !args.quiet {
            eprintln!("All sites marked!");
        }
        return Ok(());
    }

    if args.dry_run {
        eprintln!(
            "Dry run: {} unresolved record(s); residual report not written.",
            summary.residual.len()
        );
        return Ok(());
    }

    let residual = ResidualReport::new(summary.residual);
    write_residual(&output_path, &residual).map_err(CliRunError::Residual)?;
    eprintln!("Detailed report saved to: {}", output_path.display());
    Ok(())
}

fn print_summary(summary: &RunSummary, quiet: bool) {
    if quiet {
        return;
    }
    eprintln!(
        "Processed {} record(s): {} standalone, {} multi-source, {} unresolved.",
        summary.total,
        summary.resolved_standalone,
        summary.resolved_multisrc,
        summary.residual.len()
    );
}
