//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.reviewtools.toml` files.

use crate::report::{ReviewOptions, DEFAULT_TITLE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".reviewtools.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Change listing settings.
    #[serde(default)]
    pub changes: ChangesConfig,

    /// Review document settings.
    #[serde(default)]
    pub review: ReviewConfig,
}

/// Settings for listing changed files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangesConfig {
    /// Paths left out of change listings (exact match).
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,
}

impl Default for ChangesConfig {
    fn default() -> Self {
        Self {
            excludes: default_excludes(),
        }
    }
}

fn default_excludes() -> Vec<String> {
    vec!["dist", "package-lock.json"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Review document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Title used when none is given.
    #[serde(default = "default_title")]
    pub title: String,

    /// Add a generation timestamp below the title.
    #[serde(default = "default_true")]
    pub include_timestamp: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            include_timestamp: true,
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_true() -> bool {
    true
}

impl ReviewConfig {
    /// Review options, with per-call overrides applied.
    pub fn options(&self, title: Option<&str>, include_timestamp: Option<bool>) -> ReviewOptions {
        ReviewOptions {
            title: title.unwrap_or(&self.title).to_string(),
            include_timestamp: include_timestamp.unwrap_or(self.include_timestamp),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref excludes) = args.exclude {
            self.changes.excludes = excludes.clone();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.changes.excludes, vec!["dist", "package-lock.json"]);
        assert_eq!(config.review.title, "Code Review");
        assert!(config.review.include_timestamp);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[changes]
excludes = ["target", "Cargo.lock"]

[review]
title = "Nightly Review"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.changes.excludes, vec!["target", "Cargo.lock"]);
        assert_eq!(config.review.title, "Nightly Review");
        assert!(config.review.include_timestamp);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.changes.excludes, default_excludes());
    }

    #[test]
    fn test_review_option_overrides() {
        let review = ReviewConfig::default();

        let opts = review.options(None, None);
        assert_eq!(opts.title, "Code Review");
        assert!(opts.include_timestamp);

        let opts = review.options(Some("PR 7"), Some(false));
        assert_eq!(opts.title, "PR 7");
        assert!(!opts.include_timestamp);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[review]\ninclude_timestamp = false\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.review.include_timestamp);

        std::fs::write(&path, "[review\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    fn args_with_exclude(exclude: Option<Vec<String>>) -> crate::cli::Args {
        crate::cli::Args {
            command: crate::cli::Command::Tools,
            config: None,
            exclude,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_merge_exclude_overrides_config() {
        let mut config: Config = toml::from_str("[changes]\nexcludes = [\"target\"]\n").unwrap();

        config.merge_with_args(&args_with_exclude(Some(vec![
            "build".to_string(),
            "yarn.lock".to_string(),
        ])));

        assert_eq!(config.changes.excludes, vec!["build", "yarn.lock"]);
    }

    #[test]
    fn test_merge_without_exclude_keeps_config() {
        let mut config: Config = toml::from_str("[changes]\nexcludes = [\"target\"]\n").unwrap();

        config.merge_with_args(&args_with_exclude(None));

        assert_eq!(config.changes.excludes, vec!["target"]);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[changes]"));
        assert!(toml_str.contains("[review]"));
    }
}
