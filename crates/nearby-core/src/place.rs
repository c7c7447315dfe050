use serde::Serialize;

use crate::geo::Coordinate;

/// One merchant returned by the places service.
///
/// Treated as opaque apart from `coordinate`, which feeds the distance
/// annotation and the map markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub coordinate: Coordinate,
    /// Link to the merchant's map page. `None` when the service sent an empty link.
    pub detail_link: Option<String>,
}
