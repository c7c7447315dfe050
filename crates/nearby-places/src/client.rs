//! HTTP client for the places-recommendation service.
//!
//! Wraps `reqwest` with base-URL handling, status mapping, and strict
//! decoding of the place list. Any non-2xx status is reported uniformly as
//! [`FetchError::ServerError`].

use std::time::Duration;

use nearby_core::{Category, Coordinate, Place};
use reqwest::{Client, Url};

use crate::error::FetchError;
use crate::types::{PlaceRecord, ServiceErrorBody};

/// Client for the places service.
///
/// Use [`PlacesClient::new`] with the configured base URL; tests point it
/// at a wiremock server.
pub struct PlacesClient {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
}

impl PlacesClient {
    /// Creates a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join("places/..")` appends to the
        // base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| FetchError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url,
            timeout_secs,
        })
    }

    /// Fetches the places the service recommends for `category` near `origin`.
    ///
    /// Issues exactly one GET and preserves the service's ordering.
    ///
    /// # Errors
    ///
    /// - [`FetchError::ServerError`] on any non-2xx status.
    /// - [`FetchError::Timeout`] if no response arrives in time.
    /// - [`FetchError::Http`] on other transport failures.
    /// - [`FetchError::Service`] if the body is an `{"error": ..}` envelope.
    /// - [`FetchError::Deserialize`] if the body is not a list of place records.
    /// - [`FetchError::InvalidPlace`] if a record has out-of-range values.
    pub async fn fetch_places(
        &self,
        category: Category,
        origin: Coordinate,
    ) -> Result<Vec<Place>, FetchError> {
        let url = self.places_url(category, origin);
        tracing::debug!(%url, %category, "requesting places");

        let body = self.request_json(&url).await.inspect_err(|e| {
            tracing::warn!(%category, error = %e, "places request failed");
        })?;

        let places = Self::decode_places(body, &url)?;
        tracing::debug!(%category, count = places.len(), "places received");
        Ok(places)
    }

    /// Builds `{base}/places/{category}?lat=..&lng=..` with encoded query pairs.
    pub(crate) fn places_url(&self, category: Category, origin: Coordinate) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("places").push(category.as_str());
        }
        url.query_pairs_mut()
            .append_pair("lat", &origin.lat().to_string())
            .append_pair("lng", &origin.lng().to_string());
        url
    }

    /// Sends a GET request, maps non-2xx to [`FetchError::ServerError`], and
    /// parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            FetchError::Http(err)
        }
    }

    /// Turns a parsed body into places, surfacing the service's error
    /// envelope before attempting the strict list decode.
    fn decode_places(body: serde_json::Value, url: &Url) -> Result<Vec<Place>, FetchError> {
        if body.is_object() {
            if let Ok(envelope) = serde_json::from_value::<ServiceErrorBody>(body.clone()) {
                return Err(FetchError::Service(envelope.error));
            }
        }

        let records: Vec<PlaceRecord> =
            serde_json::from_value(body).map_err(|e| FetchError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_place(index))
            .collect()
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
