//! Configuration management for Herald
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (HERALD_*)
//! 3. Config file (~/.config/herald/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pool::ReviewerPool;
use crate::selection::Selection;
use crate::{Error, Result};

/// Assignment-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssignmentConfig {
    /// How a new primary reviewer is picked
    pub selection: Selection,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Assignment configuration
    pub assignment: AssignmentConfig,

    /// Core reviewer pools
    pub pool: ReviewerPool,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/herald/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("herald").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - HERALD_SELECTION: `first` or `rotate`
    /// - HERALD_REVIEWERS: comma separated logins replacing the default pool
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(selection) = lookup("HERALD_SELECTION") {
            self.assignment.selection = selection.parse()?;
        }

        if let Some(reviewers) = lookup("HERALD_REVIEWERS") {
            self.pool.default = reviewers
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, selection: Option<Selection>) -> Self {
        if let Some(s) = selection {
            self.assignment.selection = s;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults. An explicit `path`
    /// replaces the default config file location and must exist.
    pub fn load_with_overrides(path: Option<&Path>, selection: Option<Selection>) -> Result<Self> {
        let base = match path {
            Some(p) => Self::load_from_file(p)?,
            None => Self::load()?,
        };

        Ok(base.with_env_overrides()?.with_cli_overrides(selection))
    }

    /// Check that the configuration can drive an assignment
    pub fn validate(&self) -> Result<()> {
        self.pool.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.assignment.selection, Selection::Rotate);
        assert!(config.pool.default.is_empty());
        // No pool configured is a configuration error
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_cli_overrides(Some(Selection::First));
        assert_eq!(config.assignment.selection, Selection::First);

        let config = config.with_cli_overrides(None);
        assert_eq!(config.assignment.selection, Selection::First);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("HERALD_SELECTION", "first"),
            ("HERALD_REVIEWERS", " trodge, c2thorn,,melinath "),
        ]
        .into_iter()
        .collect();

        let config = Config::default()
            .with_overrides_from(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.assignment.selection, Selection::First);
        assert_eq!(config.pool.default, vec!["trodge", "c2thorn", "melinath"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_bad_selection() {
        let result = Config::default().with_overrides_from(|k| {
            (k == "HERALD_SELECTION").then(|| "random".to_string())
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[assignment]
selection = "first"

[pool]
default = ["trodge", "c2thorn"]

[pool.teams]
storage = ["melinath"]

[[pool.vacations]]
login = "c2thorn"
start = "2026-12-20"
end = "2027-01-04"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.assignment.selection, Selection::First);
        assert_eq!(config.pool.default, vec!["trodge", "c2thorn"]);
        assert_eq!(config.pool.members(Some("storage")), ["melinath".to_string()]);
        assert_eq!(config.pool.vacations.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[pool]
default = ["trodge"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        // selection should use default
        assert_eq!(config.assignment.selection, Selection::Rotate);
        assert!(config.pool.teams.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[pool]\ndefault = [\"trodge\"]\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.pool.default, vec!["trodge"]);
    }

    #[test]
    fn test_load_from_file_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[pool\ndefault = ").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from_file(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
