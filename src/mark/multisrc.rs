//! Multi-source deactivation: patch one record inside a shared
//! `sources.json` array.
//!
//! The whole document is rewritten with the original key order (serde_json's
//! preserve_order), two-space indentation, and a trailing newline, so the
//! diff against the prior file state stays minimal and reviewable.

use super::MarkError;
use serde_json::Value;
use std::path::Path;

/// Result of a multi-source deactivation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultisrcOutcome {
    /// The first entry with a matching `sourceSite` was marked down and the
    /// file rewritten.
    Updated,
    /// The matching entry already had `options.down == true`. The file is
    /// left byte-for-byte untouched, preserving `downSince`.
    AlreadyDown,
    /// No entry's `sourceSite` equals the url exactly. The substring search
    /// that located this file does not guarantee the record is present; the
    /// caller routes the record to the residual list.
    NotFound,
}

/// Mark the first entry whose `sourceSite` equals `url` as down, setting
/// `options.downSince` to `now_millis`. Idempotent: an already-down entry
/// short-circuits without a rewrite. First match wins; duplicate
/// `sourceSite` values are a data-quality issue outside this tool's remit.
pub fn deactivate(path: &Path, url: &str, now_millis: i64) -> Result<MultisrcOutcome, MarkError> {
    apply(path, url, now_millis, true)
}

/// Same scan as `deactivate`, but never writes. Used by dry runs.
pub fn probe(path: &Path, url: &str) -> Result<MultisrcOutcome, MarkError> {
    apply(path, url, 0, false)
}

fn apply(path: &Path, url: &str, now_millis: i64, write: bool) -> Result<MultisrcOutcome, MarkError> {
    let content = std::fs::read_to_string(path).map_err(|e| MarkError::SourcesRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut doc: Value = serde_json::from_str(&content).map_err(|e| MarkError::SourcesParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let entries = doc.as_array_mut().ok_or_else(|| MarkError::SourcesParse {
        path: path.to_path_buf(),
        reason: "expected a top-level array".to_string(),
    })?;

    let entry = entries.iter_mut().find(|entry| {
        entry.get("sourceSite").and_then(Value::as_str) == Some(url)
    });
    let Some(entry) = entry else {
        return Ok(MultisrcOutcome::NotFound);
    };

    if entry
        .pointer("/options/down")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return Ok(MultisrcOutcome::AlreadyDown);
    }
    if !write {
        return Ok(MultisrcOutcome::Updated);
    }

    let Some(obj) = entry.as_object_mut() else {
        return Ok(MultisrcOutcome::NotFound);
    };
    let options = obj
        .entry("options")
        .or_insert_with(|| Value::Object(Default::default()));
    if let Some(options) = options.as_object_mut() {
        options.insert("down".to_string(), Value::Bool(true));
        options.insert("downSince".to_string(), Value::from(now_millis));
    }

    let rendered = serde_json::to_string_pretty(&doc).map_err(|e| MarkError::SourcesParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    std::fs::write(path, rendered + "\n").map_err(|e| MarkError::SourcesWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(MultisrcOutcome::Updated)
}
