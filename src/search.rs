//! Tree search: find files whose content contains a needle string.
//!
//! Per-entry trouble (unreadable file, binary content, vanished directory) is
//! warned about and skipped, never fatal; an empty result is a normal outcome
//! the caller routes on. Traversal follows the filesystem's directory-entry
//! order, which is stable across repeated calls on an unmodified tree.

use std::path::{Path, PathBuf};

/// One line that contained the needle, 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub number: usize,
    pub text: String,
}

/// One file whose content contained the needle. `lines` is populated only
/// when `SearchOptions::capture_line_numbers` is set.
#[derive(Debug, Clone)]
pub struct SearchMatch {
    pub path: PathBuf,
    pub lines: Vec<LineMatch>,
}

/// Options for a search. Defaults match the standalone-adapter phase: a flat
/// scan of one language directory over plugin source extensions.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Descend into subdirectories. Off by default; each language directory
    /// has a flat per-site layout.
    pub recursive: bool,
    /// Extensions (without the dot) a file must carry to be considered.
    pub file_extensions: Vec<String>,
    /// Only consider files with exactly this name (e.g. "sources.json" for
    /// the multi-source phase).
    pub restrict_to_basename: Option<String>,
    /// Record the 1-based line numbers and trimmed text of matching lines.
    pub capture_line_numbers: bool,
    /// Match the needle byte-for-byte instead of case-folded.
    pub case_sensitive: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            recursive: false,
            file_extensions: vec!["ts".to_string(), "js".to_string(), "json".to_string()],
            restrict_to_basename: None,
            capture_line_numbers: false,
            case_sensitive: false,
        }
    }
}

/// Search `root` for files containing `needle`. Matching is substring
/// containment, case-folded unless `case_sensitive`. Never errors: an
/// unreadable root or entry produces a warning and is skipped.
pub fn search(root: &Path, needle: &str, opts: &SearchOptions) -> Vec<SearchMatch> {
    let mut results = Vec::new();
    search_directory(root, needle, opts, &mut results);
    results
}

fn search_directory(dir: &Path, needle: &str, opts: &SearchOptions, out: &mut Vec<SearchMatch>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Warning: cannot read directory {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("Warning: cannot read entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();

        if path.is_dir() {
            if opts.recursive {
                search_directory(&path, needle, opts, out);
            }
            continue;
        }
        if !path.is_file() {
            continue;
        }

        if !extension_allowed(&path, &opts.file_extensions) {
            continue;
        }
        if let Some(ref basename) = opts.restrict_to_basename {
            let name = path.file_name().and_then(|n| n.to_str());
            if name != Some(basename.as_str()) {
                continue;
            }
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                // Binary or unreadable; skip and keep going.
                eprintln!("Warning: could not read file: {}", path.display());
                continue;
            }
        };

        if let Some(m) = match_file(&path, &content, needle, opts) {
            out.push(m);
        }
    }
}

fn extension_allowed(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => extensions.iter().any(|allowed| allowed == ext),
        None => false,
    }
}

fn match_file(path: &Path, content: &str, needle: &str, opts: &SearchOptions) -> Option<SearchMatch> {
    let (haystack, term) = if opts.case_sensitive {
        (content.to_string(), needle.to_string())
    } else {
        (content.to_lowercase(), needle.to_lowercase())
    };
    if !haystack.contains(&term) {
        return None;
    }

    let mut lines = Vec::new();
    if opts.capture_line_numbers {
        for (idx, line) in content.lines().enumerate() {
            let check = if opts.case_sensitive {
                line.to_string()
            } else {
                line.to_lowercase()
            };
            if check.contains(&term) {
                lines.push(LineMatch {
                    number: idx + 1,
                    text: line.trim().to_string(),
                });
            }
        }
    }

    Some(SearchMatch {
        path: path.to_path_buf(),
        lines,
    })
}
