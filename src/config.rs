use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::export::ReportFormat;
use crate::logging::LogConfig;

/// Main application configuration, read once at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Report output preferences
    pub output: OutputSettings,

    /// Chart rendering settings
    pub chart: ChartSettings,

    /// Logging settings
    pub logging: LogConfig,
}

/// Report output preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Report format used when `--format` is not given
    pub format: ReportFormat,
}

/// Chart rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// File written by `--plot` when no `--plot-file` is given
    pub default_file: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            format: ReportFormat::Text,
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        ChartSettings {
            width: 1200,
            height: 600,
            default_file: PathBuf::from("analysis_plot.png"),
        }
    }
}

impl ChartSettings {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hrcompare")
            .join("config.toml")
    }

    /// Load an explicit config file, or the default one with fallback to defaults
    ///
    /// A missing default file is not an error; a missing explicit file is.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                let path = Self::default_config_path();
                if path.exists() {
                    Self::load_from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogFormat, LogLevel};
    use tempfile::tempdir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(deserialized.output.format, ReportFormat::Text);
        assert_eq!(deserialized.chart.size(), (1200, 600));
        assert_eq!(deserialized.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [output]
            format = "json"

            [logging]
            format = "compact"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.format, ReportFormat::Json);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.chart.default_file, PathBuf::from("analysis_plot.png"));
    }

    #[test]
    fn test_config_file_io() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut saved = AppConfig::default();
        saved.chart.width = 800;
        saved.save_to_file(&config_path).unwrap();

        let loaded = AppConfig::load(Some(config_path.as_path())).unwrap();
        assert_eq!(loaded.chart.width, 800);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp_dir = tempdir().unwrap();
        assert!(AppConfig::load(Some(temp_dir.path().join("absent.toml").as_path())).is_err());
    }
}
