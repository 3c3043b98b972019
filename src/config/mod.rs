// Configuration file (~/.prazo/rc)

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::LabelLanguage;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid value '{value}' for config key '{key}' ({path}:{line})")]
    InvalidValue {
        path: String,
        line: usize,
        key: String,
        value: String,
    },
}

/// When tier cells get ANSI colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" | "on" => Some(ColorMode::Always),
            "never" | "off" => Some(ColorMode::Never),
            _ => None,
        }
    }

    pub fn enabled(&self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Settings read from the rc file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub data_location: Option<PathBuf>,
    pub labels: LabelLanguage,
    pub color: ColorMode,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        home.join(".prazo").join("rc")
    }

    /// Load the rc file, falling back to defaults when it does not exist
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::debug!("Reading config from {}", path.display());
        Self::parse(&content, path)
    }

    /// Parse `key=value` lines; relative `data.location` resolves against the rc directory
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                log::warn!("Ignoring malformed config line {}: {}", idx + 1, line);
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            let invalid = || ConfigError::InvalidValue {
                path: path.display().to_string(),
                line: idx + 1,
                key: key.to_string(),
                value: value.to_string(),
            };

            match key {
                "data.location" => {
                    if value.is_empty() {
                        return Err(invalid());
                    }
                    let location = PathBuf::from(value);
                    config.data_location = Some(if location.is_relative() {
                        base_dir.join(location)
                    } else {
                        location
                    });
                }
                "labels" => config.labels = LabelLanguage::from_str(value).ok_or_else(invalid)?,
                "color" => config.color = ColorMode::from_str(value).ok_or_else(invalid)?,
                other => log::warn!("Unknown config key '{}' ignored", other),
            }
        }

        Ok(config)
    }
}
