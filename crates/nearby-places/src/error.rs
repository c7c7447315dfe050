use thiserror::Error;

/// Errors returned by [`crate::PlacesClient::fetch_places`].
///
/// Every variant is a terminal failure for one fetch; the client never
/// retries on its own.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The service answered with a non-2xx status. The body is not inspected.
    #[error("server error (HTTP {status})")]
    ServerError { status: u16 },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No response arrived within the configured timeout.
    #[error("places request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The service returned a 2xx `{"error": "..."}` envelope.
    #[error("places service error: {0}")]
    Service(String),

    /// The response body was not the expected JSON shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record parsed but carried values that cannot describe a place.
    #[error("invalid place record at index {index}: {reason}")]
    InvalidPlace { index: usize, reason: String },

    #[error("invalid places base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
