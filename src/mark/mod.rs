//! Reconciliation orchestrator: two-phase fallback per record.
//!
//! Records are processed strictly one at a time, each fully resolved
//! (standalone phase, then multi-source phase if needed) before the next
//! begins. Several records can touch the same directory or the same
//! `sources.json`, and renames/rewrites are plain filesystem operations;
//! sequential ordering is what keeps them from trampling each other.

mod error;
pub mod multisrc;
pub mod standalone;

pub use error::MarkError;
pub use multisrc::MultisrcOutcome;
pub use standalone::{DeactivateOutcome, DEFAULT_MARKER};

use crate::languages::LanguageMap;
use crate::model::BrokenSiteRecord;
use crate::search::{search, SearchMatch, SearchOptions};
use std::path::Path;

/// Name of the shared-config file the fallback phase scans for.
pub const SOURCES_FILE: &str = "sources.json";

/// Default directory under the plugin root holding multi-source configs.
pub const DEFAULT_MULTISRC_DIR: &str = "multisrc";

/// Options for a marking run. `progress` is called once per record with
/// (1-based index, total), mirroring the input order.
pub struct MarkOptions<'a> {
    pub plugins_dir: &'a Path,
    pub multisrc_dir: &'a str,
    pub marker: &'a str,
    /// Search and report without renaming or rewriting anything.
    pub dry_run: bool,
    /// Print matched line numbers during the standalone search.
    pub show_lines: bool,
    /// Suppress per-record progress output (warnings still print).
    pub quiet: bool,
    pub progress: Option<&'a dyn Fn(usize, usize)>,
}

impl<'a> MarkOptions<'a> {
    pub fn new(plugins_dir: &'a Path) -> Self {
        MarkOptions {
            plugins_dir,
            multisrc_dir: DEFAULT_MULTISRC_DIR,
            marker: DEFAULT_MARKER,
            dry_run: false,
            show_lines: false,
            quiet: false,
            progress: None,
        }
    }
}

/// Counts and residual list for one run. Every input record lands in exactly
/// one bucket; `residual` preserves the input order of its records.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub total: usize,
    pub resolved_standalone: usize,
    pub resolved_multisrc: usize,
    pub residual: Vec<BrokenSiteRecord>,
}

/// Run reconciliation over the records, in order. Never fails: per-record
/// trouble is warned about and ends in `residual`.
pub fn run(records: Vec<BrokenSiteRecord>, langs: &LanguageMap, opts: &MarkOptions) -> RunSummary {
    let mut summary = RunSummary {
        total: records.len(),
        ..RunSummary::default()
    };
    let total = records.len();

    for (idx, record) in records.into_iter().enumerate() {
        if let Some(progress) = opts.progress {
            progress(idx + 1, total);
        }
        match resolve_record(&record, langs, opts) {
            Resolution::Standalone => summary.resolved_standalone += 1,
            Resolution::Multisrc => summary.resolved_multisrc += 1,
            Resolution::Residual => summary.residual.push(record),
        }
    }
    summary
}

enum Resolution {
    Standalone,
    Multisrc,
    Residual,
}

fn resolve_record(
    record: &BrokenSiteRecord,
    langs: &LanguageMap,
    opts: &MarkOptions,
) -> Resolution {
    let Some(dir) = langs.dir_for(&record.lang) else {
        eprintln!("Warning: unknown language '{}' for {}", record.lang, record.url);
        return Resolution::Residual;
    };

    if standalone_phase(record, &opts.plugins_dir.join(dir), opts) {
        return Resolution::Standalone;
    }
    if multisrc_phase(record, opts) {
        return Resolution::Multisrc;
    }
    Resolution::Residual
}

/// Flat search of the language directory; rename every matched file.
/// Returns false when the record still needs the multi-source phase.
fn standalone_phase(record: &BrokenSiteRecord, lang_dir: &Path, opts: &MarkOptions) -> bool {
    let search_opts = SearchOptions {
        capture_line_numbers: opts.show_lines,
        ..SearchOptions::default()
    };
    let matches = search(lang_dir, &record.url, &search_opts);
    if matches.is_empty() {
        eprintln!("Warning: no plugin match for {}", record.url);
        return false;
    }

    let mut resolved = true;
    for m in &matches {
        print_lines(m, opts);
        if opts.dry_run {
            let name = m.path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            if standalone::is_generated(name) {
                eprintln!("Warning: would skip generated file {}", m.path.display());
                resolved = false;
            } else if !opts.quiet {
                if standalone::is_disabled(name, opts.marker) {
                    eprintln!("Already disabled: {}", m.path.display());
                } else {
                    eprintln!("Would rename: {}", m.path.display());
                }
            }
            continue;
        }
        match standalone::deactivate(&m.path, opts.marker) {
            Ok(DeactivateOutcome::Renamed(new_path)) => {
                if !opts.quiet {
                    eprintln!(
                        "Successfully renamed: {} -> {}",
                        m.path.display(),
                        new_path.display()
                    );
                }
            }
            Ok(DeactivateOutcome::AlreadyDisabled) => {
                if !opts.quiet {
                    eprintln!("Already disabled: {}", m.path.display());
                }
            }
            Ok(DeactivateOutcome::Generated) => {
                eprintln!("Warning: skipping generated file {}", m.path.display());
                resolved = false;
            }
            Err(e) => {
                eprintln!("Warning: bad rename for {}: {}", record.url, e);
                resolved = false;
            }
        }
    }
    resolved
}

/// Recursive search of the multi-source root, restricted to sources.json
/// files; patch the matching record in each. Returns false when the record
/// belongs in the residual report.
fn multisrc_phase(record: &BrokenSiteRecord, opts: &MarkOptions) -> bool {
    let root = opts.plugins_dir.join(opts.multisrc_dir);
    let search_opts = SearchOptions {
        recursive: true,
        restrict_to_basename: Some(SOURCES_FILE.to_string()),
        ..SearchOptions::default()
    };
    let matches = search(&root, &record.url, &search_opts);
    if matches.is_empty() {
        eprintln!("Warning: no multi-source match for {}", record.url);
        return false;
    }

    let now_millis = chrono::Utc::now().timestamp_millis();
    let mut resolved = true;
    for m in &matches {
        let outcome = if opts.dry_run {
            multisrc::probe(&m.path, &record.url)
        } else {
            multisrc::deactivate(&m.path, &record.url, now_millis)
        };
        match outcome {
            Ok(MultisrcOutcome::Updated) => {
                if !opts.quiet {
                    let verb = if opts.dry_run { "Would rewrite" } else { "Successfully rewrote" };
                    eprintln!("{}: {} for {}", verb, m.path.display(), record.url);
                }
            }
            Ok(MultisrcOutcome::AlreadyDown) => {
                if !opts.quiet {
                    eprintln!("Already down: {} in {}", record.url, m.path.display());
                }
            }
            Ok(MultisrcOutcome::NotFound) => {
                eprintln!(
                    "Warning: {} not present in {}",
                    record.url,
                    m.path.display()
                );
                resolved = false;
            }
            Err(e) => {
                eprintln!("Warning: {}", e);
                resolved = false;
            }
        }
    }
    resolved
}

fn print_lines(m: &SearchMatch, opts: &MarkOptions) {
    if !opts.show_lines || opts.quiet {
        return;
    }
    for line in &m.lines {
        eprintln!("  {}:{}: {}", m.path.display(), line.number, line.text);
    }
}
