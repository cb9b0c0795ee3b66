//! Runner configuration, read from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Log filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Error type for loading a runner configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for the interactive runner.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Use the colorful prompt theme.
    pub colorful: bool,
    /// Offer a way back to the previous question.
    pub allow_back: bool,
    /// `tracing` filter directive, e.g. `"survey_flow=debug"`.
    pub log_filter: String,
    /// Write the collected responses here as JSON instead of stdout.
    pub output: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            colorful: true,
            allow_back: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            output: None,
        }
    }
}

impl RunnerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text, path)?;
        tracing::debug!(path = %path.display(), "loaded runner config");
        Ok(config)
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<RunnerConfig, ConfigError> {
        RunnerConfig::from_toml(text, Path::new("runner.toml"))
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), RunnerConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse(
            r#"
            colorful = false
            output = "answers.json"
            "#,
        )
        .unwrap();
        assert!(!config.colorful);
        assert!(config.allow_back);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.output, Some(PathBuf::from("answers.json")));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = parse("colourful = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("runner.toml"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = RunnerConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(
            RunnerConfig::load_or_default(None).unwrap(),
            RunnerConfig::default()
        );
    }
}
