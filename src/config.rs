//! Configuration management for verify-hooks.
//!
//! This module handles the `.claude/verify-hooks.yaml` file which stores
//! project-specific settings for the hooks. Every field is optional; a
//! missing file means defaults.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file path relative to project root.
pub const CONFIG_FILE_PATH: &str = ".claude/verify-hooks.yaml";

/// Branch that must not receive direct commits unless configured otherwise.
pub const DEFAULT_PROTECTED_BRANCH: &str = "main";

/// How much of each failing check's output is kept, in characters.
pub const DEFAULT_OUTPUT_TAIL_CHARS: usize = 1500;

/// Project configuration for the hooks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Branch on which staged commits are blocked.
    #[serde(default = "default_protected_branch")]
    pub protected_branch: String,

    /// Characters of combined check output kept in a block reason.
    #[serde(default = "default_output_tail_chars")]
    pub output_tail_chars: usize,

    /// Append every hook invocation to the debug event log.
    #[serde(default)]
    pub debug_logging: bool,

    /// Explicit test command (argv), overriding detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_command: Option<Vec<String>>,

    /// Explicit lint command (argv), overriding detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lint_command: Option<Vec<String>>,
}

fn default_protected_branch() -> String {
    DEFAULT_PROTECTED_BRANCH.to_string()
}

const fn default_output_tail_chars() -> usize {
    DEFAULT_OUTPUT_TAIL_CHARS
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            protected_branch: default_protected_branch(),
            output_tail_chars: DEFAULT_OUTPUT_TAIL_CHARS,
            debug_logging: false,
            test_command: None,
            lint_command: None,
        }
    }
}

impl ProjectConfig {
    /// Load config from a specific base directory, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        let config_path = Self::config_path(base_dir);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        if content.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Load config for a hook run.
    ///
    /// Hooks must always answer, so a missing file gives defaults and an
    /// unreadable one gives defaults plus a warning for stderr.
    pub fn load_or_default(base_dir: &Path) -> (Self, Option<String>) {
        match Self::load_from(base_dir) {
            Ok(config) => (config.unwrap_or_default(), None),
            Err(e) => (
                Self::default(),
                Some(format!("Warning: ignoring {CONFIG_FILE_PATH}: {e}")),
            ),
        }
    }

    /// Save config to a specific base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let config_path = Self::config_path(base_dir);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path for a base directory.
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE_PATH)
    }
}

/// Ensure config exists in a specific directory, writing defaults if not.
///
/// Returns the config and whether it was newly created.
///
/// # Errors
///
/// Returns an error if config cannot be loaded or saved.
pub fn ensure_config_in(base_dir: &Path) -> Result<(ProjectConfig, bool)> {
    if let Some(config) = ProjectConfig::load_from(base_dir)? {
        return Ok((config, false));
    }

    let config = ProjectConfig::default();
    config.save_to(base_dir)?;
    Ok((config, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) {
        let path = ProjectConfig::config_path(dir);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_project_config_default() {
        let config = ProjectConfig::default();
        assert_eq!(config.protected_branch, "main");
        assert_eq!(config.output_tail_chars, 1500);
        assert!(!config.debug_logging);
        assert!(config.test_command.is_none());
        assert!(config.lint_command.is_none());
    }

    #[test]
    fn test_project_config_load_not_found() {
        let dir = TempDir::new().unwrap();
        let result = ProjectConfig::load_from(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_project_config_save_and_load() {
        let dir = TempDir::new().unwrap();

        let config = ProjectConfig {
            protected_branch: "trunk".to_string(),
            output_tail_chars: 400,
            debug_logging: true,
            test_command: Some(vec!["just".to_string(), "test".to_string()]),
            lint_command: None,
        };

        config.save_to(dir.path()).unwrap();

        let loaded = ProjectConfig::load_from(dir.path()).unwrap().unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "protected_branch: develop\n");

        let loaded = ProjectConfig::load_from(dir.path()).unwrap().unwrap();
        assert_eq!(loaded.protected_branch, "develop");
        assert_eq!(loaded.output_tail_chars, DEFAULT_OUTPUT_TAIL_CHARS);
    }

    #[test]
    fn test_empty_config_file_is_default() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "\n");

        let loaded = ProjectConfig::load_from(dir.path()).unwrap().unwrap();
        assert_eq!(loaded, ProjectConfig::default());
    }

    #[test]
    fn test_project_config_yaml_format() {
        let dir = TempDir::new().unwrap();
        ProjectConfig::default().save_to(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join(CONFIG_FILE_PATH)).unwrap();
        assert!(content.contains("protected_branch: main"));
        assert!(content.contains("output_tail_chars: 1500"));
        assert!(!content.contains("test_command"));
    }

    #[test]
    fn test_load_or_default_warns_on_malformed() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "protected_branch: [unterminated\n");

        let (config, warning) = ProjectConfig::load_or_default(dir.path());
        assert_eq!(config, ProjectConfig::default());
        assert!(warning.unwrap().contains(CONFIG_FILE_PATH));
    }

    #[test]
    fn test_load_or_default_missing_is_silent() {
        let dir = TempDir::new().unwrap();
        let (config, warning) = ProjectConfig::load_or_default(dir.path());
        assert_eq!(config, ProjectConfig::default());
        assert!(warning.is_none());
    }

    #[test]
    fn test_ensure_config_creates_new() {
        let dir = TempDir::new().unwrap();

        let (config, created) = ensure_config_in(dir.path()).unwrap();
        assert!(created);
        assert_eq!(config, ProjectConfig::default());
        assert!(ProjectConfig::config_path(dir.path()).exists());
    }

    #[test]
    fn test_ensure_config_loads_existing() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "protected_branch: release\n");

        let (config, created) = ensure_config_in(dir.path()).unwrap();
        assert!(!created);
        assert_eq!(config.protected_branch, "release");
    }

    #[test]
    fn test_config_path() {
        let path = ProjectConfig::config_path(Path::new("/project"));
        assert_eq!(path, PathBuf::from("/project/.claude/verify-hooks.yaml"));
    }
}
