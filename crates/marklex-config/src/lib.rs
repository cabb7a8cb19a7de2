use marklex_syntax::{HeadingOverflow, LineEndings, ScanOptions, UnterminatedHeader};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
}

/// The `[scan]` table.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub line_endings: LineEndingsSetting,
    pub heading_overflow: HeadingOverflowSetting,
    pub unterminated_header: UnterminatedHeaderSetting,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineEndingsSetting {
    #[default]
    Any,
    Crlf,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeadingOverflowSetting {
    #[default]
    Clamp,
    Error,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnterminatedHeaderSetting {
    #[default]
    Error,
    Accept,
}

impl From<&ScanConfig> for ScanOptions {
    fn from(scan: &ScanConfig) -> Self {
        ScanOptions {
            line_endings: match scan.line_endings {
                LineEndingsSetting::Any => LineEndings::Any,
                LineEndingsSetting::Crlf => LineEndings::Crlf,
            },
            heading_overflow: match scan.heading_overflow {
                HeadingOverflowSetting::Clamp => HeadingOverflow::Clamp,
                HeadingOverflowSetting::Error => HeadingOverflow::Error,
            },
            unterminated_header: match scan.unterminated_header {
                UnterminatedHeaderSetting::Error => UnterminatedHeader::Error,
                UnterminatedHeaderSetting::Accept => UnterminatedHeader::Accept,
            },
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/marklex");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Scanner options described by this config.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::from(&self.scan)
    }
}
