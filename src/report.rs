//! Input report loading and residual report writing.
//!
//! The input report is trusted but required: a missing or malformed document
//! aborts the run before anything is touched. The residual report is the
//! run's actionable artifact and fully replaces any previous run's file.

use crate::mark::MarkError;
use crate::model::{BrokenSiteRecord, BrokenSitesReport, ResidualReport};
use std::path::Path;

/// Load the broken-sites report. Returns records in document order; that
/// order drives the residual report's ordering, keeping runs reproducible.
pub fn load_report(path: &Path) -> Result<Vec<BrokenSiteRecord>, MarkError> {
    let content = std::fs::read_to_string(path).map_err(|e| MarkError::ReportRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let report: BrokenSitesReport =
        serde_json::from_str(&content).map_err(|e| MarkError::ReportParse {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(report.broken_sites)
}

/// Write the residual report, truncating any prior file at the path.
pub fn write_residual(path: &Path, residual: &ResidualReport) -> Result<(), MarkError> {
    let rendered =
        serde_json::to_string_pretty(residual).map_err(|e| MarkError::ResidualWrite {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
    std::fs::write(path, rendered + "\n").map_err(|e| MarkError::ResidualWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sitemark_report_{}", name));
        if dir.exists() {
            fs::remove_dir_all(&dir).unwrap();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn load_preserves_document_order() {
        let dir = fixture_dir("order");
        let path = dir.join("broken-sites-report.json");
        fs::write(
            &path,
            r#"{ "brokenSites": [
                { "lang": "ru", "url": "https://example.com/z" },
                { "lang": "en", "url": "https://example.com/a" }
            ] }"#,
        )
        .unwrap();

        let records = load_report(&path).unwrap();
        assert_eq!(records[0].url, "https://example.com/z");
        assert_eq!(records[1].url, "https://example.com/a");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_report_is_fatal_read_error() {
        let dir = fixture_dir("missing");
        let err = load_report(&dir.join("nope.json")).unwrap_err();
        assert!(matches!(err, MarkError::ReportRead { .. }));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn malformed_report_is_fatal_parse_error() {
        let dir = fixture_dir("malformed");
        let path = dir.join("broken-sites-report.json");
        fs::write(&path, "{ \"brokenSites\": [ { \"lang\": ").unwrap();
        let err = load_report(&path).unwrap_err();
        assert!(matches!(err, MarkError::ReportParse { .. }));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn write_residual_overwrites_previous_run() {
        let dir = fixture_dir("overwrite");
        let path = dir.join("missed-sites-report.json");
        // A longer previous report must be fully replaced, not appended to.
        fs::write(&path, "x".repeat(4096)).unwrap();

        let residual = ResidualReport::new(vec![BrokenSiteRecord {
            lang: "en".to_string(),
            url: "https://example.com/a".to_string(),
        }]);
        write_residual(&path, &residual).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("}\n"));
        let back: ResidualReport = serde_json::from_str(&content).unwrap();
        assert_eq!(back.total, 1);
        assert_eq!(back.broken_sites[0].url, "https://example.com/a");
        fs::remove_dir_all(&dir).unwrap();
    }
}
