//! Runtime configuration
//!
//! Layers, lowest to highest priority: built-in defaults,
//! `<data_dir>/config.yaml`, environment variables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_FILE, DATA_DIR_NAME, DEFAULT_API_BASE_URL, ENV_API_BASE_URL, ENV_HOME, ENV_LOG_LEVEL,
};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(ConfigError::Invalid {
                field: "log_level",
                reason: format!("unknown level '{}'", other),
            }),
        }
    }
}

/// Contents of `config.yaml`; every key is optional
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_base_url: Option<String>,
    log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend base URL, without trailing slash
    pub api_base_url: String,
    /// Directory holding config, state and log files
    pub data_dir: PathBuf,
    pub log_level: LogLevel,
}

impl Config {
    /// Load configuration from the real environment
    pub fn load() -> Result<Self, ConfigError> {
        let data_dir = std::env::var(ENV_HOME)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        Self::load_from(&data_dir, |key| std::env::var(key).ok())
    }

    /// Load configuration from `data_dir`, reading variables through `env`
    pub fn load_from<F>(data_dir: &Path, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = data_dir.join(CONFIG_FILE);
        let file = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                ConfigFile::default()
            } else {
                serde_yaml::from_str(&content)?
            }
        } else {
            ConfigFile::default()
        };

        let api_base_url = env(ENV_API_BASE_URL)
            .filter(|v| !v.is_empty())
            .or(file.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = normalize_base_url(&api_base_url)?;

        let log_level = match env(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            Some(level) => level.parse()?,
            None => file.log_level.unwrap_or_default(),
        };

        Ok(Config {
            api_base_url,
            data_dir: data_dir.to_path_buf(),
            log_level,
        })
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

fn normalize_base_url(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            field: "api_base_url",
            reason: format!("'{}' is not an http(s) URL", url),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path(), env_of(&[])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_file_then_env_precedence() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "api_base_url: https://movies.example.com/api/\nlog_level: debug\n",
        )
        .unwrap();

        let config = Config::load_from(dir.path(), env_of(&[])).unwrap();
        assert_eq!(config.api_base_url, "https://movies.example.com/api");
        assert_eq!(config.log_level, LogLevel::Debug);

        let config = Config::load_from(
            dir.path(),
            env_of(&[
                (ENV_API_BASE_URL, "http://127.0.0.1:9000"),
                (ENV_LOG_LEVEL, "WARN"),
            ]),
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(dir.path(), env_of(&[(ENV_API_BASE_URL, "ftp://x")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "api_base_url", .. }));
    }

    #[test]
    fn test_rejects_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "api_base_url: [").unwrap();
        let err = Config::load_from(dir.path(), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
