use thiserror::Error;

/// Errors returned by the Gemini client and the result synthesizer.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No API credential was configured. Detected when a search runs.
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gemini answered with a non-2xx status.
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SearchError {
    /// `true` for local setup problems, `false` for upstream failures.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::InvalidBaseUrl { .. })
    }
}
