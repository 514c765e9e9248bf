use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::api::ApiConfig;
use crate::application::delivery::SaveTarget;

pub const ENV_API_BASE: &str = "QUICK_GRAB_API_BASE";
pub const ENV_SAVE_DIR: &str = "QUICK_GRAB_SAVE_DIR";
pub const ENV_TIMEOUT_SECS: &str = "QUICK_GRAB_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {source}")]
    InvalidBaseUrl {
        var: &'static str,
        source: url::ParseError,
    },

    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// Save without prompting when set.
    pub save_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            let base = base.trim().to_string();
            Url::parse(&base).map_err(|source| ConfigError::InvalidBaseUrl {
                var: ENV_API_BASE,
                source,
            })?;
            config.api.base_url = base;
        }

        if let Some(value) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    var: ENV_TIMEOUT_SECS,
                    value: value.clone(),
                })?;
            config.api.timeout = Some(Duration::from_secs(secs));
        }

        config.save_dir = lookup(ENV_SAVE_DIR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    pub fn save_target(&self) -> SaveTarget {
        match &self.save_dir {
            Some(dir) => SaveTarget::Directory(dir.clone()),
            None => SaveTarget::Prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::DEFAULT_BASE_URL;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_have_no_timeout_and_prompt() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout, None);
        assert_eq!(config.save_target(), SaveTarget::Prompt);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (ENV_API_BASE, "http://localhost:8080"),
            (ENV_TIMEOUT_SECS, "90"),
            (ENV_SAVE_DIR, "/tmp/grabs"),
        ])
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout, Some(Duration::from_secs(90)));
        assert_eq!(
            config.save_target(),
            SaveTarget::Directory(PathBuf::from("/tmp/grabs"))
        );
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(matches!(
            config_from(&[(ENV_TIMEOUT_SECS, "soon")]),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            config_from(&[(ENV_TIMEOUT_SECS, "0")]),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            config_from(&[(ENV_API_BASE, "not a url")]),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}
