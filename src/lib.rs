//! sitemark: batch CLI that marks broken reading sources as disabled.
//!
//! Given a report of sources known to be unreachable, renames matching
//! standalone plugin files to a `.broken` marker name and flags matching
//! records in shared multi-source `sources.json` configs; everything it
//! cannot resolve lands in a residual report for manual follow-up.

pub mod cli;
pub mod config;
pub mod languages;
pub mod mark;
pub mod model;
pub mod report;
pub mod search;

// Re-exports for CLI and consumers.
pub use languages::LanguageMap;
pub use mark::{
    DeactivateOutcome, MarkError, MarkOptions, MultisrcOutcome, RunSummary, DEFAULT_MARKER,
    DEFAULT_MULTISRC_DIR, SOURCES_FILE,
};
pub use model::{BrokenSiteRecord, BrokenSitesReport, ResidualReport};
pub use report::{load_report, write_residual};
pub use search::{search, LineMatch, SearchMatch, SearchOptions};
