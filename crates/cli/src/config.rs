//! CLI configuration loading from YAML files

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration file contents.
///
/// Every field is optional; command-line flags override file values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    /// Service endpoint, e.g. `http://localhost:4566`.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Default `AcceptLanguage` applied to operations that declare it
    /// and did not receive one explicitly.
    #[serde(default)]
    pub accept_language: Option<String>,

    /// Skip confirmation prompts for mutating operations.
    #[serde(default)]
    pub assume_yes: bool,
}

impl CliConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config YAML from {}", path.display()))
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "endpoint: http://localhost:4566\naccept_language: en\nassume_yes: true"
        )
        .unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.accept_language.as_deref(), Some("en"));
        assert!(config.assume_yes);
    }

    #[test]
    fn test_missing_fields_default() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "endpoint: http://localhost:4566").unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert!(config.accept_language.is_none());
        assert!(!config.assume_yes);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "endpoint: [unterminated").unwrap();

        assert!(CliConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_no_path_falls_back_to_defaults() {
        let config = CliConfig::load_or_default(None).unwrap();
        assert!(config.endpoint.is_none());
        assert!(!config.assume_yes);
    }
}
