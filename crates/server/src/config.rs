//! Relay configuration read from the process environment.
//!
//! | Variable            | Default                                      |
//! |---------------------|----------------------------------------------|
//! | `AIML_API_KEY`      | unset (chat answers with a config error)     |
//! | `PORT`              | 3001                                         |
//! | `AIML_API_URL`      | https://api.aimlapi.com/v1/chat/completions  |
//! | `AIML_MODEL`        | google/gemma-3n-e4b-it                       |
//! | `AIML_TIMEOUT_SECS` | unset (no timeout)                           |
//! | `CORS_ORIGINS`      | the three local development origins          |

use std::time::Duration;

use llm_client::{LlmClientConfig, DEFAULT_API_URL, DEFAULT_MODEL};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://localhost:3001",
    "http://127.0.0.1:3000",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout: Option<Duration>,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Config::default();

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: raw,
            })?,
            None => defaults.port,
        };

        let timeout = match get("AIML_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "AIML_TIMEOUT_SECS",
                        value: raw,
                    });
                }
            },
            None => None,
        };

        let cors_origins = match get("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.cors_origins,
        };

        Ok(Self {
            port,
            api_key: get("AIML_API_KEY"),
            api_url: get("AIML_API_URL").unwrap_or(defaults.api_url),
            model: get("AIML_MODEL").unwrap_or(defaults.model),
            timeout,
            cors_origins,
        })
    }

    /// Settings for the upstream chat client
    pub fn llm_config(&self) -> LlmClientConfig {
        LlmClientConfig {
            api_url: self.api_url.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 3001);
        assert!(config.api_key.is_none());
        assert_eq!(config.cors_origins.len(), 3);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("AIML_API_KEY", " abc "),
            ("AIML_MODEL", "other/model"),
            ("AIML_TIMEOUT_SECS", "30"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.model, "other/model");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.llm_config().api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_empty_key_is_unset() {
        let config = Config::from_lookup(lookup(&[("AIML_API_KEY", "")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            Config::from_lookup(lookup(&[("PORT", "http")])),
            Err(ConfigError::InvalidValue {
                name: "PORT",
                value: "http".to_string()
            })
        );
        assert!(Config::from_lookup(lookup(&[("AIML_TIMEOUT_SECS", "0")])).is_err());
    }
}
