//! Configuration types for the homework watcher

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::WatcherError;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Seconds to sleep after every iteration
pub const RETRY_PERIOD: u64 = 600;

/// Non-secret service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
    #[serde(default = "default_retry_period")]
    pub retry_period_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
            retry_period_seconds: default_retry_period(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_period() -> u64 {
    RETRY_PERIOD
}

fn default_request_timeout() -> u64 {
    30
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        WatcherError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}

/// Secrets as found in the environment, possibly incomplete
#[derive(Clone, Default)]
pub struct Credentials {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &self.practicum_token.is_some())
            .field("telegram_token", &self.telegram_token.is_some())
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.is_empty());
        Self {
            practicum_token: read(PRACTICUM_TOKEN_VAR),
            telegram_token: read(TELEGRAM_TOKEN_VAR),
            telegram_chat_id: read(TELEGRAM_CHAT_ID_VAR),
        }
    }

    /// Check that every secret is present.
    ///
    /// All missing names are collected so a single report shows the full
    /// deficiency.
    pub fn check_tokens(&self) -> crate::Result<Tokens> {
        tracing::debug!("Checking tokens");
        let mut missing = Vec::new();
        let mut require = |name: &str, value: &Option<String>| match value.as_deref() {
            Some(value) if !value.is_empty() => Some(value.to_string()),
            _ => {
                tracing::error!("Missing {}", name);
                missing.push(name.to_string());
                None
            }
        };

        let practicum = require(PRACTICUM_TOKEN_VAR, &self.practicum_token);
        let telegram = require(TELEGRAM_TOKEN_VAR, &self.telegram_token);
        let chat_id = require(TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id);

        match (practicum, telegram, chat_id) {
            (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) => {
                tracing::debug!("All tokens present");
                Ok(Tokens {
                    practicum_token,
                    telegram_token,
                    telegram_chat_id,
                })
            }
            _ => Err(WatcherError::MissingTokens(missing)),
        }
    }
}

/// A complete set of secrets
#[derive(Clone)]
pub struct Tokens {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Tokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokens")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish_non_exhaustive()
    }
}
