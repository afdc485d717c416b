//! Configuration settings for montage-cli.
//!
//! Settings are loaded from `~/.montage-cli/config.yaml`. Every field has a
//! default, so a partial file (or none at all) is fine.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::MontageError;
use crate::montage::DEFAULT_ENDPOINT;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    pub default_output: OutputFormat,
    pub color: ColorSetting,
    /// Log filter used when `MONTAGE_LOG` is unset, e.g. `warn` or
    /// `montage_cli=debug`.
    pub log_level: String,
    /// Also post results to the macOS notification center.
    pub desktop_notifications: bool,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    Always,
    Never,
}

/// Where to reach Montage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub endpoint: String,
}

/// What to describe a selected task by when starting a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DescribeTaskBy {
    /// The task's own name.
    #[default]
    Task,
    /// The task's containing project, when it has one.
    Project,
}

/// Form defaults for session commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub task_minutes: u32,
    pub break_minutes: u32,
    pub extend_minutes: u32,
    pub break_description: String,
    pub describe_task_by: DescribeTaskBy,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Pretty,
            color: ColorSetting::Auto,
            log_level: "warn".to_string(),
            desktop_notifications: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            task_minutes: 25,
            break_minutes: 5,
            extend_minutes: 5,
            break_description: "Break".to_string(),
            describe_task_by: DescribeTaskBy::Task,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, MontageError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, MontageError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            MontageError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            MontageError::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), MontageError> {
        std::fs::write(path, self.to_yaml()?).map_err(|e| {
            MontageError::Config(format!("Failed to write config file {}: {e}", path.display()))
        })
    }

    /// Render as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, MontageError> {
        serde_yaml::to_string(self).map_err(|e| MontageError::Config(format!("Failed to serialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.general.log_level, "warn");
        assert!(!config.general.desktop_notifications);
        assert_eq!(config.server.endpoint, "http://localhost:4774/graphql");
        assert_eq!(config.session.task_minutes, 25);
        assert_eq!(config.session.break_minutes, 5);
        assert_eq!(config.session.extend_minutes, 5);
        assert_eq!(config.session.break_description, "Break");
        assert_eq!(config.session.describe_task_by, DescribeTaskBy::Task);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from_path(&temp_dir.path().join("config.yaml")).unwrap();
        assert_eq!(config.server.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.server.endpoint = "http://127.0.0.1:9999/graphql".to_string();
        config.session.describe_task_by = DescribeTaskBy::Project;
        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded.server.endpoint, "http://127.0.0.1:9999/graphql");
        assert_eq!(loaded.session.describe_task_by, DescribeTaskBy::Project);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        std::fs::write(
            &config_path,
            "session:\n  break_minutes: 10\n  describe_task_by: project\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.session.break_minutes, 10);
        assert_eq!(config.session.describe_task_by, DescribeTaskBy::Project);
        assert_eq!(config.session.task_minutes, 25);
        assert_eq!(config.server.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "session: [not, a, map]\n").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(MontageError::Config(_))
        ));
    }
}
