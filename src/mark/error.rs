//! Shared error type for marking. Fatal report errors and per-file I/O
//! failures; per-record resolution misses are outcome enums, not errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkError {
    // Fatal: the run aborts before touching anything.
    #[error("Cannot read report {path}: {source}")]
    ReportRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid report {path}: {source}")]
    ReportParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Per-file: logged, and the record falls through to the next phase or
    // the residual list.
    #[error("Failed to rename {path}: {source}")]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read source list {path}: {source}")]
    SourcesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid source list {path}: {reason}")]
    SourcesParse { path: PathBuf, reason: String },

    #[error("Failed to rewrite source list {path}: {source}")]
    SourcesWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write residual report {path}: {source}")]
    ResidualWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
