//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! One call per search, no retry. The API key is passed in at construction
//! and only checked when a request is about to be sent, so a missing key
//! surfaces as [`SearchError::MissingApiKey`] at search time.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::SearchError;
use crate::types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini REST API.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    endpoint: Url,
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<String>,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, SearchError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`SearchError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: Option<String>,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("hospi/0.1 (hospital-search)")
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(&format!("v1beta/models/{model}:generateContent")))
            .map_err(|e| SearchError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key,
            model: model.to_owned(),
            endpoint,
        })
    }

    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`GeminiClient::with_base_url`].
    pub fn from_config(config: &hospi_core::AppConfig) -> Result<Self, SearchError> {
        Self::with_base_url(
            config.gemini_api_key.clone(),
            &config.gemini_model,
            config.gemini_timeout_secs,
            &config.gemini_base_url,
        )
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one `generateContent` request.
    ///
    /// # Errors
    ///
    /// - [`SearchError::MissingApiKey`] if no key was configured; no request is sent.
    /// - [`SearchError::Http`] on network failure.
    /// - [`SearchError::Api`] on a non-2xx status.
    /// - [`SearchError::Deserialize`] if the body does not match the expected shape.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
            context: format!("generateContent(model={})", self.model),
            source: e,
        })
    }

    /// Maps a non-2xx response to [`SearchError::Api`], preferring the message
    /// in Google's error envelope over the bare status reason.
    fn api_error(status: StatusCode, body: &str) -> SearchError {
        let message = serde_json::from_str::<ApiErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| match (envelope.error.status, envelope.error.message) {
                (Some(code), Some(msg)) => Some(format!("{code}: {msg}")),
                (None, Some(msg)) => Some(msg),
                (Some(code), None) => Some(code),
                (None, None) => None,
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        SearchError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
