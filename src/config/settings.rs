//! Configuration settings for nexus-queue.
//!
//! Settings are loaded from `~/.nexus-queue/config.yaml`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::core::QueueTypeCodec;
use crate::error::QueueError;
use crate::features::reconcile::{QueueEngine, DEFAULT_CAPACITY};
use crate::transport::CommandSink;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Reconciliation engine settings.
    pub engine: EngineConfig,
    /// Extra alias words, consulted before the built-in ones.
    pub aliases: BTreeMap<String, String>,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the `colored` crate.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Reconciliation engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Entries the server queue holds; bounds confirmed plus in-flight.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
            log_level: default_log_level(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
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
    /// Returns an error if the home directory is unknown or the config file
    /// exists but cannot be parsed.
    pub fn load() -> Result<Self, QueueError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds an invalid value.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, QueueError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            QueueError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            QueueError::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero capacity or an empty alias.
    pub fn validate(&self) -> Result<(), QueueError> {
        if self.engine.capacity == 0 {
            return Err(QueueError::Config(
                "engine.capacity must be at least 1".to_string(),
            ));
        }
        if let Some((alias, _)) = self
            .aliases
            .iter()
            .find(|(alias, letters)| alias.is_empty() || letters.is_empty())
        {
            return Err(QueueError::Config(format!(
                "alias '{alias}' must have a name and letters"
            )));
        }
        Ok(())
    }

    /// Codec carrying the configured aliases.
    #[must_use]
    pub fn codec(&self) -> QueueTypeCodec {
        QueueTypeCodec::with_aliases(self.aliases.clone())
    }

    /// Build an engine with the configured capacity and aliases.
    #[must_use]
    pub fn build_engine<S: CommandSink>(&self, sink: S) -> QueueEngine<S> {
        QueueEngine::new(sink)
            .with_codec(self.codec())
            .with_capacity(self.engine.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::decode;
    use crate::transport::RecordingSink;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.engine.capacity, 6);
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        // Should return defaults when file doesn't exist
        assert_eq!(config.engine.capacity, 6);
    }

    #[test]
    fn test_load_aliases_and_capacity() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "engine:\n  capacity: 4\naliases:\n  ship: s\n").unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.engine.capacity, 4);
        assert_eq!(loaded.aliases.get("ship").map(String::as_str), Some("s"));
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r#"
general:
  default_output: json
aliases:
  sail: "s!w"
"#;
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Json);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.engine.capacity, 6);
        assert_eq!(config.codec().decode("sail"), decode("s!w"));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "engine:\n  capacity: 0\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("engine.capacity"));
    }

    #[test]
    fn test_engine_uses_config() {
        let mut config = Config::default();
        config.engine.capacity = 2;
        config.aliases.insert("ship".to_string(), "s".to_string());

        let mut engine = config.build_engine(RecordingSink::new());
        assert_eq!(engine.capacity(), 2);

        engine.track("raise sails", "ship");
        assert_eq!(engine.confirmed()[0].flags, decode("s"));
    }
}
