//! Request-time configuration resolution.
//!
//! Configuration is a small JSON document, taken from the CONFIG environment
//! variable when it holds anything real, and from a config.json file in the
//! working directory otherwise. Strictly either/or, never merged. The file
//! half is re-read on every request so operators can edit it without a
//! restart; the environment half is captured once at startup.

use std::path::{Path, PathBuf};

use thiserror::Error;

use calboard_shared::models::AppConfig;

/// Environment variable holding the JSON configuration document.
pub const CONFIG_ENV: &str = "CONFIG";

/// Fallback configuration file, relative to the working directory.
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CONFIG environment variable is not valid JSON")]
    InvalidEnv(#[source] serde_json::Error),

    #[error("no config file found and CONFIG environment variable not set")]
    MissingSource,

    #[error("failed to read config file {}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {} is not valid JSON", path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where a request's configuration comes from.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    env_json: Option<String>,
    file_path: PathBuf,
}

impl ConfigSource {
    /// Snapshot the CONFIG environment variable and point the fallback at
    /// ./config.json.
    pub fn from_env() -> Self {
        Self::new(std::env::var(CONFIG_ENV).ok(), CONFIG_FILE)
    }

    pub fn new(env_json: Option<String>, file_path: impl Into<PathBuf>) -> Self {
        // An empty value or the `{}` placeholder counts as unset.
        let env_json = env_json.filter(|v| !v.is_empty() && v != "{}");
        Self {
            env_json,
            file_path: file_path.into(),
        }
    }

    /// Resolve the configuration for one request.
    pub fn resolve(&self) -> Result<AppConfig, ConfigError> {
        match &self.env_json {
            Some(raw) => serde_json::from_str(raw).map_err(ConfigError::InvalidEnv),
            None => read_config_file(&self.file_path),
        }
    }
}

fn read_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingSource);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::InvalidFile {
        path: path.to_path_buf(),
        source,
    })
}
