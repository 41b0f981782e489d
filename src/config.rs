//! Optional config file loading. Search order: ./sitemark.toml, then
//! $XDG_CONFIG_HOME/sitemark/config.toml (or ~/.config/sitemark/config.toml).

use serde::Deserialize;
use std::path::PathBuf;

/// Config file contents. All fields optional; only present keys override
/// defaults, and CLI flags override both.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Root of the plugin tree (one directory per language).
    pub plugins_dir: Option<PathBuf>,
    /// Input broken-sites report path.
    pub report_file: Option<PathBuf>,
    /// Residual report output path.
    pub residual_file: Option<PathBuf>,
    /// Marker token injected into a disabled file's name (default ".broken").
    pub marker: Option<String>,
    /// Directory name under the plugin root holding multi-source configs.
    pub multisrc_dir: Option<String>,
}

/// Search order: (1) ./sitemark.toml, (2) $XDG_CONFIG_HOME/sitemark/config.toml.
/// Missing file returns Ok(None). Invalid TOML or I/O error reading a present file returns Err.
pub fn load_config() -> Result<Option<Config>, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Cannot determine current directory: {}", e))?;
    let mut paths = vec![cwd.join("sitemark.toml")];
    if let Some(d) = dirs::config_dir() {
        paths.push(d.join("sitemark").join("config.toml"));
    }
    for path in &paths {
        if path.exists() {
            let s = std::fs::read_to_string(path)
                .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
            let config: Config = toml::from_str(&s)
                .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
            return Ok(Some(config));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let c: Config = toml::from_str("").unwrap();
        assert!(c.plugins_dir.is_none());
        assert!(c.report_file.is_none());
        assert!(c.residual_file.is_none());
        assert!(c.marker.is_none());
        assert!(c.multisrc_dir.is_none());
    }

    #[test]
    fn parse_full_config() {
        let s = r#"
            plugins_dir = "plugins"
            report_file = "broken-sites-report.json"
            residual_file = "missed-sites-report.json"
            marker = ".down"
            multisrc_dir = "multi"
        "#;
        let c: Config = toml::from_str(s).unwrap();
        assert_eq!(
            c.plugins_dir.as_deref(),
            Some(std::path::Path::new("plugins"))
        );
        assert_eq!(
            c.report_file.as_deref(),
            Some(std::path::Path::new("broken-sites-report.json"))
        );
        assert_eq!(
            c.residual_file.as_deref(),
            Some(std::path::Path::new("missed-sites-report.json"))
        );
        assert_eq!(c.marker.as_deref(), Some(".down"));
        assert_eq!(c.multisrc_dir.as_deref(), Some("multi"));
    }

    #[test]
    fn parse_partial_config() {
        let c: Config = toml::from_str("marker = \".gone\"").unwrap();
        assert_eq!(c.marker.as_deref(), Some(".gone"));
        assert!(c.plugins_dir.is_none());
        assert!(c.multisrc_dir.is_none());
    }

    #[test]
    fn invalid_toml_errors() {
        assert!(toml::from_str::<Config>("plugins_dir = [").is_err());
    }
}
