//! Segmenter configuration

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Default configuration constants
pub mod defaults {
    /// Marker inserted for every template break
    pub const BREAK_MARKER: &str = crate::assembler::DEFAULT_BREAK_MARKER;

    /// Substitution tables run before segmentation
    pub const APPLY_SUBSTITUTIONS: bool = true;
}

/// Segmenter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub(crate) break_marker: String,
    pub(crate) apply_substitutions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            break_marker: defaults::BREAK_MARKER.to_string(),
            apply_substitutions: defaults::APPLY_SUBSTITUTIONS,
        }
    }
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse a configuration from TOML, e.g. `break_marker = "\n"`
    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        let config: Config = toml::from_str(source)
            .map_err(|e| Error::Configuration(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Marker inserted for every template break
    pub fn break_marker(&self) -> &str {
        &self.break_marker
    }

    /// Whether substitution tables are applied
    pub fn apply_substitutions(&self) -> bool {
        self.apply_substitutions
    }

    /// Validate the configuration
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.break_marker.is_empty() {
            return Err(Error::Configuration(
                "break_marker must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    break_marker: Option<String>,
    apply_substitutions: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the break marker
    pub fn break_marker(mut self, marker: impl Into<String>) -> Self {
        self.break_marker = Some(marker.into());
        self
    }

    /// Enable or disable substitution tables
    pub fn apply_substitutions(mut self, apply: bool) -> Self {
        self.apply_substitutions = Some(apply);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Config, Error> {
        let defaults = Config::default();
        let config = Config {
            break_marker: self.break_marker.unwrap_or(defaults.break_marker),
            apply_substitutions: self
                .apply_substitutions
                .unwrap_or(defaults.apply_substitutions),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.break_marker(), "\n");
        assert!(config.apply_substitutions());
    }

    #[test]
    fn test_builder() {
        let config = Config::builder()
            .break_marker("<br>")
            .apply_substitutions(false)
            .build()
            .unwrap();
        assert_eq!(config.break_marker(), "<br>");
        assert!(!config.apply_substitutions());
    }

    #[test]
    fn test_empty_marker_is_rejected() {
        let result = Config::builder().break_marker("").build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml_str("break_marker = \"\\r\\n\"\n").unwrap();
        assert_eq!(config.break_marker(), "\r\n");
        assert!(config.apply_substitutions());

        assert!(Config::from_toml_str("break_marker = \"\"").is_err());
        assert!(Config::from_toml_str("break_marker = 3").is_err());
    }
}
