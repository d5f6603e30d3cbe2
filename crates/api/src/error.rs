//! Typed error enum for the API crate.

use plantdex_core::SettingsError;
use thiserror::Error;

/// Errors from Perenual API operations.
///
/// `Display` is the short text shown to the user; `Debug` carries the full
/// diagnostic and is what gets logged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("Network response was not ok: {reason}")]
    HttpStatus { code: u16, reason: String, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl ApiError {
    /// HTTP status code, when the server answered at all.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}
