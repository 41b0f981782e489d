//! Language code to plugin-directory resolution.
//!
//! The canonical table maps display names to short codes (that is how the
//! host app ships it); the on-disk plugin directories are the lowercased
//! display names, so the map is inverted once at startup and kept read-only
//! for the whole run.

use std::collections::HashMap;

/// Canonical display-name -> code table for the supported plugin languages.
const LANGUAGES: &[(&str, &str)] = &[
    ("Arabic", "ar"),
    ("Chinese", "zh"),
    ("English", "en"),
    ("French", "fr"),
    ("German", "de"),
    ("Indonesian", "id"),
    ("Japanese", "ja"),
    ("Korean", "ko"),
    ("Polish", "pl"),
    ("Portuguese", "pt"),
    ("Russian", "ru"),
    ("Spanish", "es"),
    ("Thai", "th"),
    ("Turkish", "tr"),
    ("Ukrainian", "uk"),
    ("Vietnamese", "vi"),
];

/// Read-only code -> directory-name lookup, built once at startup.
/// Constructed explicitly (no ambient state) so the orchestrator can be
/// tested with fixture mappings.
#[derive(Debug, Clone)]
pub struct LanguageMap {
    dirs: HashMap<String, String>,
}

impl LanguageMap {
    /// Invert the canonical table: code -> lowercased display name.
    pub fn from_table() -> Self {
        Self::from_pairs(
            LANGUAGES
                .iter()
                .map(|(name, code)| (*code, name.to_lowercase())),
        )
    }

    /// Build from explicit (code, directory) pairs.
    pub fn from_pairs<I, D>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, D)>,
        D: Into<String>,
    {
        LanguageMap {
            dirs: pairs
                .into_iter()
                .map(|(code, dir)| (code.to_string(), dir.into()))
                .collect(),
        }
    }

    /// Directory name for a language code, or None for an unknown code.
    /// Unknown codes are routed to the residual list by the caller; no
    /// directory is ever guessed.
    pub fn dir_for(&self, code: &str) -> Option<&str> {
        self.dirs.get(code).map(String::as_str)
    }
}

impl Default for LanguageMap {
    fn default() -> Self {
        Self::from_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve_to_lowercase_directories() {
        let map = LanguageMap::from_table();
        assert_eq!(map.dir_for("en"), Some("english"));
        assert_eq!(map.dir_for("ru"), Some("russian"));
        assert_eq!(map.dir_for("zh"), Some("chinese"));
    }

    #[test]
    fn unknown_code_is_none() {
        let map = LanguageMap::from_table();
        assert_eq!(map.dir_for("xx"), None);
        assert_eq!(map.dir_for(""), None);
    }

    #[test]
    fn lookup_is_case_exact_on_codes() {
        // Codes in the table are lowercase; "EN" is not a known code.
        let map = LanguageMap::from_table();
        assert_eq!(map.dir_for("EN"), None);
    }

    #[test]
    fn fixture_pairs_override_table() {
        let map = LanguageMap::from_pairs([("en", "fixtures"), ("xx", "weird")]);
        assert_eq!(map.dir_for("en"), Some("fixtures"));
        assert_eq!(map.dir_for("xx"), Some("weird"));
        assert_eq!(map.dir_for("ru"), None);
    }
}
