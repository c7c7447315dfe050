//! Adapters over the host's geolocation capability.
//!
//! Every provider resolves exactly once to a [`Coordinate`] or a
//! [`LocationError`]. Capability detection ([`LocationProvider::is_supported`])
//! happens before any request so an absent capability is reported as
//! [`LocationError::Unsupported`] rather than an opaque failure.

use std::time::Duration;

use async_trait::async_trait;
use nearby_core::Coordinate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("geolocation is not supported on this host")]
    Unsupported,

    #[error("permission to read the current location was denied")]
    PermissionDenied,

    #[error("current location is unavailable: {0}")]
    Unavailable(String),

    #[error("location request timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of the user's current position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether the host offers a geolocation capability at all.
    fn is_supported(&self) -> bool {
        true
    }

    /// Requests the current position once.
    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}

#[async_trait]
impl<T> LocationProvider for Box<T>
where
    T: LocationProvider + ?Sized,
{
    fn is_supported(&self) -> bool {
        (**self).is_supported()
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        (**self).current_position().await
    }
}

/// Checks support, then issues one position request bounded by `timeout`.
///
/// # Errors
///
/// Returns [`LocationError::Unsupported`] without calling the provider when
/// the capability is absent, [`LocationError::Timeout`] when `timeout`
/// elapses first, and otherwise whatever the provider resolves to.
pub async fn request_location<L>(
    provider: &L,
    timeout: Option<Duration>,
) -> Result<Coordinate, LocationError>
where
    L: LocationProvider + ?Sized,
{
    if !provider.is_supported() {
        return Err(LocationError::Unsupported);
    }

    match timeout {
        Some(limit) => tokio::time::timeout(limit, provider.current_position())
            .await
            .map_err(|_| LocationError::Timeout(limit))?,
        None => provider.current_position().await,
    }
}

/// A position known up front, e.g. passed on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// Host without any geolocation capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// Body returned by an HTTP geolocation endpoint.
#[derive(Debug, Deserialize)]
struct PositionBody {
    latitude: f64,
    longitude: f64,
}

/// Geolocation backed by an HTTP endpoint that answers
/// `{"latitude": .., "longitude": ..}`.
///
/// 401 and 403 are read as a denied permission; every other failure is
/// reported as [`LocationError::Unavailable`].
pub struct HttpGeolocation {
    client: Client,
    url: String,
}

impl HttpGeolocation {
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the HTTP client cannot be constructed.
    pub fn new(url: &str, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }
}

#[async_trait]
impl LocationProvider for HttpGeolocation {
    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        tracing::debug!(url = %self.url, "requesting current position");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LocationError::PermissionDenied);
        }
        if !status.is_success() {
            return Err(LocationError::Unavailable(format!(
                "geolocation endpoint returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: PositionBody = response
            .json()
            .await
            .map_err(|e| LocationError::Unavailable(format!("malformed position: {e}")))?;

        Coordinate::new(body.latitude, body.longitude)
            .map_err(|e| LocationError::Unavailable(e.to_string()))
    }
}
