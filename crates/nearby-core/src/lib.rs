//! Domain types and configuration shared by the nearby-places workspace.
//!
//! Holds the coordinate and category value types, the `Place` record, the
//! haversine distance used to annotate results, and environment-driven
//! runtime configuration.

pub mod app_config;
pub mod category;
pub mod config;
pub mod geo;
pub mod place;

pub use app_config::AppConfig;
pub use category::Category;
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_km, format_distance_km, Coordinate, DEFAULT_CENTER, EARTH_RADIUS_KM};
pub use place::Place;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid coordinate ({lat}, {lng}): latitude must be within [-90, 90] and longitude within [-180, 180]")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
