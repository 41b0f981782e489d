//! Standalone adapter deactivation: rename `<slug>.<ext>` to
//! `<slug><marker>.<ext>`.
//!
//! The disabled state lives entirely in the filename. Both sides of that
//! encoding (`is_disabled`, `disabled_name`) live here so the representation
//! could later move to sidecar metadata without touching call sites.

use super::MarkError;
use std::path::{Path, PathBuf};

/// Default marker token injected before the extension.
pub const DEFAULT_MARKER: &str = ".broken";

/// Result of a standalone deactivation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeactivateOutcome {
    /// Renamed to the returned path.
    Renamed(PathBuf),
    /// The stem already carried the marker. No-op, counts as success.
    AlreadyDisabled,
    /// Machine-produced adapter (bracketed-token filename). Never renamed:
    /// the generator would recreate it unmarked and mask the disablement.
    /// Not a success; the caller falls through to the multi-source phase.
    Generated,
}

/// A file is disabled iff its stem contains the marker token.
pub fn is_disabled(file_name: &str, marker: &str) -> bool {
    stem_of(file_name).contains(marker)
}

/// Machine-produced adapters use bracketed-token names like `[madara].ts`.
pub fn is_generated(file_name: &str) -> bool {
    stem_of(file_name).ends_with(']')
}

fn stem_of(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

/// New file name with the marker injected before the extension.
fn disabled_name(file_name: &str, marker: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}{}.{}", stem, marker, ext),
        _ => format!("{}{}", file_name, marker),
    }
}

/// Deactivate one standalone adapter file, idempotently. The rename stays
/// within the file's directory, so it is atomic on a single filesystem.
pub fn deactivate(path: &Path, marker: &str) -> Result<DeactivateOutcome, MarkError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    if is_generated(file_name) {
        return Ok(DeactivateOutcome::Generated);
    }
    if is_disabled(file_name, marker) {
        return Ok(DeactivateOutcome::AlreadyDisabled);
    }

    let new_path = path.with_file_name(disabled_name(file_name, marker));
    std::fs::rename(path, &new_path).map_err(|e| MarkError::Rename {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(DeactivateOutcome::Renamed(new_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sitemark_standalone_{}", name));
        if dir.exists() {
            fs::remove_dir_all(&dir).unwrap();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn is_disabled_checks_stem_not_extension() {
        assert!(is_disabled("a.broken.ts", DEFAULT_MARKER));
        assert!(!is_disabled("a.ts", DEFAULT_MARKER));
        // Marker must appear in the stem, not merely anywhere in the name.
        assert!(!is_disabled("a.broken", ".gone"));
    }

    #[test]
    fn is_generated_matches_bracketed_token_names() {
        assert!(is_generated("[madara].ts"));
        assert!(is_generated("novels[v2].js"));
        assert!(!is_generated("wanderinginn.ts"));
        assert!(!is_generated("a.broken.ts"));
    }

    #[test]
    fn disabled_name_injects_marker_before_extension() {
        assert_eq!(disabled_name("a.ts", DEFAULT_MARKER), "a.broken.ts");
        assert_eq!(
            disabled_name("wtrlab.json", DEFAULT_MARKER),
            "wtrlab.broken.json"
        );
        // No extension: marker is appended.
        assert_eq!(disabled_name("README", DEFAULT_MARKER), "README.broken");
    }

    #[test]
    fn deactivate_renames_once() {
        let dir = fixture_dir("rename");
        let path = dir.join("a.ts");
        fs::write(&path, "url").unwrap();

        let outcome = deactivate(&path, DEFAULT_MARKER).unwrap();
        assert_eq!(outcome, DeactivateOutcome::Renamed(dir.join("a.broken.ts")));
        assert!(!path.exists());
        assert!(dir.join("a.broken.ts").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn deactivate_is_idempotent_no_double_marker() {
        let dir = fixture_dir("idempotent");
        let path = dir.join("a.ts");
        fs::write(&path, "url").unwrap();

        deactivate(&path, DEFAULT_MARKER).unwrap();
        let renamed = dir.join("a.broken.ts");
        let second = deactivate(&renamed, DEFAULT_MARKER).unwrap();
        assert_eq!(second, DeactivateOutcome::AlreadyDisabled);
        assert!(renamed.exists());
        assert!(!dir.join("a.broken.broken.ts").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn deactivate_leaves_generated_files_alone() {
        let dir = fixture_dir("generated");
        let path = dir.join("[madara].ts");
        fs::write(&path, "url").unwrap();

        let outcome = deactivate(&path, DEFAULT_MARKER).unwrap();
        assert_eq!(outcome, DeactivateOutcome::Generated);
        assert!(path.exists());
        assert!(fs::read_dir(&dir).unwrap().count() == 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn deactivate_missing_file_is_rename_error() {
        let dir = fixture_dir("missing");
        let path = dir.join("gone.ts");
        let err = deactivate(&path, DEFAULT_MARKER).unwrap_err();
        assert!(matches!(err, MarkError::Rename { .. }));
        fs::remove_dir_all(&dir).unwrap();
    }
}
