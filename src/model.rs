//! Data model for the broken-sites report and the residual report.
//!
//! Field names mirror the JSON documents exchanged with the host app
//! (`brokenSites`, `lang`, `url`), so both files stay readable by the
//! surrounding toolchain.

use serde::{Deserialize, Serialize};

/// One broken source from the input report. Immutable unit of work;
/// `url` is the matching key for both resolution phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenSiteRecord {
    pub lang: String,
    pub url: String,
}

/// Top-level shape of the input report file.
#[derive(Debug, Deserialize)]
pub struct BrokenSitesReport {
    #[serde(rename = "brokenSites")]
    pub broken_sites: Vec<BrokenSiteRecord>,
}

/// Residual report written at the end of a run: everything that failed both
/// resolution phases, in input order. Fully replaces any previous run's file.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResidualReport {
    /// ISO-8601 generation time.
    pub timestamp: String,
    pub total: usize,
    #[serde(rename = "brokenSites")]
    pub broken_sites: Vec<BrokenSiteRecord>,
}

impl ResidualReport {
    pub fn new(broken_sites: Vec<BrokenSiteRecord>) -> Self {
        ResidualReport {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            total: broken_sites.len(),
            broken_sites,
        }
    }
}
