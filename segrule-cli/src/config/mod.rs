//! Configuration module
//!
//! ```toml
//! [rules]
//! path = "segrule.rules"
//! lang = "en"
//!
//! [substitution]
//! files = ["quotes.subst"]
//! discover = true
//!
//! [output]
//! format = "json"
//! strip_empty_lines = true
//! break_marker = "\n"
//! ```
//!
//! Relative paths are resolved against the directory of the config file.

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Rule selection
    #[serde(default)]
    pub rules: RulesConfig,

    /// Substitution tables
    #[serde(default)]
    pub substitution: SubstitutionConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Rule selection
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Rule file; discovered next to the input when absent
    pub path: Option<PathBuf>,

    /// Language suffix used by discovery
    pub lang: Option<String>,
}

/// Substitution tables
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SubstitutionConfig {
    /// Tables applied in order
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Look for tables next to the input and the executable
    #[serde(default)]
    pub discover: bool,
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format
    pub format: Option<OutputFormat>,

    /// Drop blank input lines
    #[serde(default)]
    pub strip_empty_lines: bool,

    /// Written after every sentence in text output
    pub break_marker: Option<String>,
}

impl CliConfig {
    /// Parse a configuration from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source)
            .map_err(|e| CliError::ConfigError(e.to_string()))
            .context("Invalid configuration")
    }

    /// Load a configuration file, resolving relative paths against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::from_toml_str(&source)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.rules.path = config.rules.path.map(|p| base.join(p));
        config.substitution.files = config
            .substitution
            .files
            .into_iter()
            .map(|p| base.join(p))
            .collect();

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = CliConfig::from_toml_str(
            r#"
[rules]
path = "my.rules"
lang = "de"

[substitution]
files = ["a.subst", "b.subst"]
discover = true

[output]
format = "html"
strip_empty_lines = true
break_marker = "\n\n"
"#,
        )
        .unwrap();

        assert_eq!(config.rules.path, Some(PathBuf::from("my.rules")));
        assert_eq!(config.rules.lang.as_deref(), Some("de"));
        assert_eq!(config.substitution.files.len(), 2);
        assert!(config.substitution.discover);
        assert_eq!(config.output.format, Some(OutputFormat::Html));
        assert!(config.output.strip_empty_lines);
        assert_eq!(config.output.break_marker.as_deref(), Some("\n\n"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = CliConfig::from_toml_str("[output]\ncolour = true\n");
        let error = result.unwrap_err();
        assert!(error.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(CliConfig::from_toml_str("[output]\nformat = \"pdf\"\n").is_err());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("segrule.toml");
        fs::write(
            &config_path,
            "[rules]\npath = \"custom.rules\"\n[substitution]\nfiles = [\"q.subst\"]\n",
        )
        .unwrap();

        let config = CliConfig::load(&config_path).unwrap();
        assert_eq!(config.rules.path, Some(temp_dir.path().join("custom.rules")));
        assert_eq!(
            config.substitution.files,
            vec![temp_dir.path().join("q.subst")]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = CliConfig::load(Path::new("/nonexistent/segrule.toml"));
        assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
    }
}
