use healthlog_core::ReportStyle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

pub const DEFAULT_SHARE_DAYS: u32 = 30;

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the journal records
    pub data_dir: ConfigValue<PathBuf>,
    /// Days of history included in a share report by default
    pub share_days: ConfigValue<u32>,
    /// Header spelling used for share reports
    pub report_style: ConfigValue<ReportStyle>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    share_days: Option<u32>,
    report_style: Option<ReportStyle>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut share_days = ConfigValue::new(DEFAULT_SHARE_DAYS, ConfigSource::Default);
        let mut report_style = ConfigValue::new(ReportStyle::default(), ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
            tracing::debug!("Loaded config file {}", path.display());

            if let Some(dir) = file_config.data_dir {
                data_dir = ConfigValue::new(resolve_relative(&path, dir), ConfigSource::File);
            }
            if let Some(days) = file_config.share_days {
                share_days = ConfigValue::new(days, ConfigSource::File);
            }
            if let Some(style) = file_config.report_style {
                report_style = ConfigValue::new(style, ConfigSource::File);
            }
            config_file = Some(path);
        }

        // Apply environment variable overrides
        if let Ok(dir) = std::env::var("HEALTHLOG_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(days) = std::env::var("HEALTHLOG_SHARE_DAYS") {
            let parsed = days
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue("HEALTHLOG_SHARE_DAYS", days.clone()))?;
            share_days = ConfigValue::new(parsed, ConfigSource::Environment);
        }
        if let Ok(style) = std::env::var("HEALTHLOG_REPORT_STYLE") {
            let parsed = style
                .parse::<ReportStyle>()
                .map_err(|_| ConfigError::InvalidValue("HEALTHLOG_REPORT_STYLE", style.clone()))?;
            report_style = ConfigValue::new(parsed, ConfigSource::Environment);
        }

        Ok(Self {
            data_dir,
            share_days,
            report_style,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/healthlog/
    /// - macOS: ~/Library/Application Support/healthlog/
    /// - Windows: %APPDATA%/healthlog/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("healthlog")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/healthlog/
    /// - macOS: ~/Library/Application Support/healthlog/
    /// - Windows: %APPDATA%/healthlog/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("healthlog")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// Relative paths in a config file are taken from the file's directory.
fn resolve_relative(config_path: &Path, dir: PathBuf) -> PathBuf {
    if dir.is_relative() {
        config_path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
    } else {
        dir
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(var, value) => {
                write!(f, "Invalid value '{}' for {}", value, var)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config.data_dir.value.ends_with("healthlog"));
        assert_eq!(config.data_dir.source, ConfigSource::Default);
        assert_eq!(config.share_days.value, 30);
        assert_eq!(config.report_style.value, ReportStyle::Legacy);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: /custom/journal").unwrap();
        writeln!(file, "share_days: 14").unwrap();
        writeln!(file, "report_style: current").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.data_dir.value, PathBuf::from("/custom/journal"));
        assert_eq!(config.data_dir.source, ConfigSource::File);
        assert_eq!(config.share_days.value, 14);
        assert_eq!(config.share_days.source, ConfigSource::File);
        assert_eq!(config.report_style.value, ReportStyle::Current);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_relative_data_dir_resolves_against_config_dir() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "data_dir: journal\n").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir.value, temp_dir.path().join("journal"));
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "share_days: 14\n").unwrap();

        std::env::set_var("HEALTHLOG_SHARE_DAYS", "7");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.share_days.value, 7);
        assert_eq!(config.share_days.source, ConfigSource::Environment);

        std::env::remove_var("HEALTHLOG_SHARE_DAYS");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_unknown_report_style_in_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "report_style: fancy\n").unwrap();

        assert!(Config::load(Some(config_path)).is_err());
    }

    #[test]
    fn test_partial_file_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "share_days: 60\n").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir.source, ConfigSource::Default);
        assert_eq!(config.share_days.value, 60);
        assert_eq!(config.report_style.source, ConfigSource::Default);
    }
}
