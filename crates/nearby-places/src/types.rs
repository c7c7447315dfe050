//! Wire types for the places service response.

use nearby_core::{Coordinate, Place};
use reqwest::Url;
use serde::Deserialize;

use crate::error::FetchError;

/// One element of the `/places/{category}` response array.
///
/// All five fields are required; unknown extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub link: String,
}

/// Error envelope the service sends with a 2xx status, e.g. for an
/// unsupported category.
#[derive(Debug, Deserialize)]
pub(crate) struct ServiceErrorBody {
    pub error: String,
}

impl PlaceRecord {
    /// Validates the record into a [`Place`].
    ///
    /// `index` is the record's position in the response and is only used
    /// for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidPlace`] when the coordinate is out of
    /// range or a non-empty link is not an absolute http(s) URL.
    pub fn into_place(self, index: usize) -> Result<Place, FetchError> {
        let coordinate =
            Coordinate::new(self.lat, self.lng).map_err(|e| FetchError::InvalidPlace {
                index,
                reason: e.to_string(),
            })?;

        let link = self.link.trim();
        let detail_link = if link.is_empty() {
            None
        } else {
            let url = Url::parse(link).map_err(|e| FetchError::InvalidPlace {
                index,
                reason: format!("invalid link '{link}': {e}"),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(FetchError::InvalidPlace {
                    index,
                    reason: format!("link must be http(s), got '{link}'"),
                });
            }
            Some(link.to_string())
        };

        Ok(Place {
            name: self.name,
            address: self.address,
            coordinate,
            detail_link,
        })
    }
}
