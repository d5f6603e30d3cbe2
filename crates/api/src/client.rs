use std::time::Duration;

use plantdex_core::{PlantDetail, PlantId, SearchResponse, Settings};

use crate::error::ApiError;

/// Maximum body length kept in error diagnostics.
pub const MAX_BODY_SNIPPET: usize = 200;

/// Client for the Perenual species API.
pub struct PerenualClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl std::fmt::Debug for PerenualClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerenualClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PerenualClient {
    /// Creates a new client with the given API key and base URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::ClientInit(e.to_string()))?;
        Ok(Self { client, api_key, base_url })
    }

    /// Creates a client from resolved settings.
    ///
    /// # Errors
    /// Returns an error if no API key is configured or the HTTP client cannot
    /// be built.
    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        let api_key = settings.require_api_key()?.to_owned();
        Self::new(api_key, settings.api_url.clone(), settings.http_timeout)
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query the species list with a free-text query.
    ///
    /// The query is sent as-is (URL-encoded only); empty queries are not
    /// rejected.
    ///
    /// # Errors
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the body is not a species-list document.
    pub async fn search_species(&self, query: &str) -> Result<SearchResponse, ApiError> {
        tracing::debug!(query, "searching species list");
        let body = self
            .get_text(format!("{}/species-list", self.base_url), &[("q", query)])
            .await?;
        serde_json::from_str(&body).map_err(|e| ApiError::JsonParse {
            context: format!("species-list response (body: {})", truncate(&body, MAX_BODY_SNIPPET)),
            source: e,
        })
    }

    /// Fetch the extended record of one species.
    ///
    /// Returns `Ok(None)` when the API answers with an empty payload (`null`
    /// or `{}`).
    ///
    /// # Errors
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the body is not valid JSON.
    pub async fn species_details(&self, id: PlantId) -> Result<Option<PlantDetail>, ApiError> {
        tracing::debug!(%id, "fetching species details");
        let body =
            self.get_text(format!("{}/species/details/{id}", self.base_url), &[]).await?;
        let context =
            || format!("species-details response (body: {})", truncate(&body, MAX_BODY_SNIPPET));

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| ApiError::JsonParse { context: context(), source: e })?;
        if is_empty_payload(&value) {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ApiError::JsonParse { context: context(), source: e })
    }

    async fn get_text(&self, url: String, params: &[(&str, &str)]) -> Result<String, ApiError> {
        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.text().await?);
        }

        let body =
            response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
        Err(ApiError::HttpStatus {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("unknown status").to_owned(),
            body: truncate(&body, MAX_BODY_SNIPPET).to_owned(),
        })
    }
}

fn is_empty_payload(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
