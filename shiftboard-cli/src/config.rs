//! Configuration loading and layering.
//!
//! Later sources override earlier ones:
//! 1. Built-in defaults
//! 2. `config.toml` in the config directory (or `--config <path>`)
//! 3. Environment: `SHIFTBOARD_URL`, `SHIFTBOARD_TOKEN`, `SHIFTBOARD_PAGE_SIZE`
//! 4. Command-line flags

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::paths;

pub const DEFAULT_URL: &str = "http://localhost:8000";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_URL: &str = "SHIFTBOARD_URL";
pub const ENV_TOKEN: &str = "SHIFTBOARD_TOKEN";
pub const ENV_PAGE_SIZE: &str = "SHIFTBOARD_PAGE_SIZE";

/// Errors while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid {key} '{value}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub token: Option<String>,
    pub page_size: Option<usize>,
    pub timeout_secs: Option<u64>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub token: Option<String>,
    pub page_size: Option<usize>,
}

/// Effective settings after layering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub url: String,
    pub token: Option<String>,
    pub page_size: usize,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Loads settings from every source.
    ///
    /// A missing default config file is fine; a missing explicit
    /// `config_path` is an error.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => load_file(path)?,
            None => match paths::config_file() {
                Some(path) => load_optional_file(&path)?,
                None => FileConfig::default(),
            },
        };
        Self::resolve(&file, |key| std::env::var(key).ok(), overrides)
    }

    /// Layers `file`, then the environment (read through `env`), then `overrides`.
    pub fn resolve(
        file: &FileConfig,
        env: impl Fn(&str) -> Option<String>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(url) = &file.url {
            settings.url = url.clone();
        }
        if let Some(token) = &file.token {
            settings.token = Some(token.clone());
        }
        if let Some(size) = file.page_size {
            settings.page_size = size;
        }
        if let Some(secs) = file.timeout_secs {
            settings.timeout = Duration::from_secs(secs);
        }

        if let Some(url) = env(ENV_URL).filter(|v| !v.trim().is_empty()) {
            settings.url = url;
        }
        if let Some(token) = env(ENV_TOKEN).filter(|v| !v.trim().is_empty()) {
            settings.token = Some(token);
        }
        if let Some(size) = env(ENV_PAGE_SIZE) {
            settings.page_size = size.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PAGE_SIZE,
                value: size.clone(),
                reason: "expected a whole number",
            })?;
        }

        if let Some(url) = &overrides.url {
            settings.url = url.clone();
        }
        if let Some(token) = &overrides.token {
            settings.token = Some(token.clone());
        }
        if let Some(size) = overrides.page_size {
            settings.page_size = size;
        }

        if settings.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page_size",
                value: "0".to_string(),
                reason: "must be at least 1",
            });
        }

        Ok(settings)
    }
}

fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_file(path, &content)
}

fn load_optional_file(path: &Path) -> Result<FileConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => parse_file(path, &content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileConfig::default()),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse_file(path: &Path, content: &str) -> Result<FileConfig, ConfigError> {
    let config = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("[config] loaded {}", path.display());
    Ok(config)
}
