use std::time::Duration;

use thiserror::Error;

use crate::constants::{DEFAULT_API_URL, DEFAULT_DEBOUNCE_MS, DEFAULT_HTTP_TIMEOUT_SECS};
use crate::env_config::{env_non_empty, env_parse_with_default};

pub const ENV_API_KEY: &str = "PLANTDEX_API_KEY";
pub const ENV_API_URL: &str = "PLANTDEX_API_URL";
pub const ENV_DEBOUNCE_MS: &str = "PLANTDEX_DEBOUNCE_MS";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "PLANTDEX_HTTP_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("PLANTDEX_API_KEY environment variable must be set")]
    MissingApiKey,
}

/// Runtime configuration resolved from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_url: String,
    pub debounce: Duration,
    pub http_timeout: Duration,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_url", &self.api_url)
            .field("debounce", &self.debounce)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_owned(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: env_non_empty(ENV_API_KEY),
            api_url: env_non_empty(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
            debounce: Duration::from_millis(env_parse_with_default(
                ENV_DEBOUNCE_MS,
                DEFAULT_DEBOUNCE_MS,
            )),
            http_timeout: Duration::from_secs(env_parse_with_default(
                ENV_HTTP_TIMEOUT_SECS,
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
        }
    }

    /// The API key, required by every network command.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingApiKey`] when no key is configured.
    pub fn require_api_key(&self) -> Result<&str, SettingsError> {
        self.api_key.as_deref().ok_or(SettingsError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api_url, "https://perenual.com/api");
        assert_eq!(settings.debounce, Duration::from_millis(600));
        assert_eq!(settings.require_api_key(), Err(SettingsError::MissingApiKey));
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = Settings { api_key: Some("sk-secret".to_owned()), ..Settings::default() };
        let printed = format!("{settings:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("***"));
        assert_eq!(settings.require_api_key(), Ok("sk-secret"));
    }

    #[test]
    fn test_missing_key_message_names_variable() {
        assert_eq!(
            SettingsError::MissingApiKey.to_string(),
            "PLANTDEX_API_KEY environment variable must be set"
        );
    }
}
