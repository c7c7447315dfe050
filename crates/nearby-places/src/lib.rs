//! Client for the remote places-recommendation service.
//!
//! One request per call: `GET {base}/places/{category}?lat=..&lng=..`,
//! answered with a JSON array of place records that are validated into
//! [`nearby_core::Place`] values in service order.

pub mod client;
pub mod error;
pub mod types;

pub use client::PlacesClient;
pub use error::FetchError;
pub use types::PlaceRecord;
