//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Directory holding the documentation corpus.
    #[serde(default = "default_docs_path")]
    pub docs_path: PathBuf,

    /// Path to the changelog file.
    #[serde(default = "default_changelog_path")]
    pub changelog_path: PathBuf,

    /// Corpus search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            _schema: None,
            _comment: None,
            docs_path: default_docs_path(),
            changelog_path: default_changelog_path(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_results == 0 {
            return Err(ConfigError::ValidationError {
                message: "search.max_results must be greater than zero".to_string(),
            });
        }

        if self.search.extensions.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "search.extensions must list at least one extension".to_string(),
            });
        }

        if let Some(bad) = self
            .search
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.contains(['/', '\\', '*', '?', '[', ']']))
        {
            return Err(ConfigError::ValidationError {
                message: format!("Invalid search extension '{bad}'"),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            });
        }

        Ok(())
    }
}

fn default_docs_path() -> PathBuf {
    PathBuf::from("docs")
}

fn default_changelog_path() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

/// Documentation search configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Upper bound on matching lines returned when the caller gives no limit.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// File extensions (without the dot) included in the corpus.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            extensions: default_extensions(),
        }
    }
}

const fn default_max_results() -> usize {
    20
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "txt".to_string()]
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
