//! View model for the map presentation surface.

use nearby_core::{Coordinate, DEFAULT_CENTER};
use reqwest::Url;
use thiserror::Error;

use crate::state::SessionState;

pub const DEFAULT_MAP_ZOOM: u8 = 15;
pub const USER_MARKER_LABEL: &str = "My location";

const STATIC_MAP_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/staticmap";
const STATIC_MAP_SIZE: &str = "640x400";

#[derive(Debug, Error)]
pub enum MapError {
    #[error("map widget is not loaded")]
    NotLoaded,

    #[error("map rendering failed: {0}")]
    Render(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Place,
    User,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub label: String,
    pub kind: MarkerKind,
}

/// Everything the map surface needs to draw: a center, a zoom level, and
/// labeled points.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MapView {
    /// Centers on the user when their position is known, otherwise on
    /// [`DEFAULT_CENTER`]. Place markers keep service order; the user's own
    /// marker comes last.
    #[must_use]
    pub fn from_state(state: &SessionState, zoom: u8) -> Self {
        let mut markers: Vec<Marker> = state
            .places()
            .iter()
            .map(|p| Marker {
                coordinate: p.coordinate,
                label: p.name.clone(),
                kind: MarkerKind::Place,
            })
            .collect();

        if let Some(user) = state.user_coordinate() {
            markers.push(Marker {
                coordinate: user,
                label: USER_MARKER_LABEL.to_string(),
                kind: MarkerKind::User,
            });
        }

        Self {
            center: state.user_coordinate().unwrap_or(DEFAULT_CENTER),
            zoom,
            markers,
        }
    }
}

/// Presentation sink for a [`MapView`].
pub trait MapSurface {
    /// `false` when the widget failed to load; markers are then not drawn.
    fn is_loaded(&self) -> bool;

    /// Draws `view`, replacing whatever was drawn before.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the surface cannot draw the view.
    fn render(&mut self, view: &MapView) -> Result<(), MapError>;
}

/// Builds a Google Static Maps URL showing `view`.
///
/// # Errors
///
/// Returns [`MapError::Render`] if the endpoint URL cannot be parsed.
pub fn static_map_url(view: &MapView, api_key: &str) -> Result<Url, MapError> {
    let mut url = Url::parse(STATIC_MAP_ENDPOINT).map_err(|e| MapError::Render(e.to_string()))?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("center", &view.center.to_string());
        pairs.append_pair("zoom", &view.zoom.to_string());
        pairs.append_pair("size", STATIC_MAP_SIZE);

        let places: Vec<String> = view
            .markers
            .iter()
            .filter(|m| m.kind == MarkerKind::Place)
            .map(|m| m.coordinate.to_string())
            .collect();
        if !places.is_empty() {
            pairs.append_pair("markers", &format!("color:red|{}", places.join("|")));
        }

        for user in view.markers.iter().filter(|m| m.kind == MarkerKind::User) {
            pairs.append_pair("markers", &format!("color:blue|label:U|{}", user.coordinate));
        }

        pairs.append_pair("key", api_key);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use nearby_core::Place;

    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn state_with_places() -> SessionState {
        let mut state = SessionState::default();
        let ticket = state.begin_location();
        state.apply_location(ticket, Ok(coord(37.5, 127.0)));
        let ticket = state.begin_fetch().unwrap();
        state.apply_fetch(
            ticket,
            Ok(vec![
                Place {
                    name: "A".into(),
                    address: String::new(),
                    coordinate: coord(37.51, 127.01),
                    detail_link: None,
                },
                Place {
                    name: "B".into(),
                    address: String::new(),
                    coordinate: coord(37.49, 126.99),
                    detail_link: None,
                },
            ]),
        );
        state
    }

    #[test]
    fn empty_session_centers_on_default() {
        let view = MapView::from_state(&SessionState::default(), DEFAULT_MAP_ZOOM);
        assert_eq!(view.center, DEFAULT_CENTER);
        assert_eq!(view.zoom, 15);
        assert!(view.markers.is_empty());
    }

    #[test]
    fn located_session_centers_on_user_and_adds_user_marker_last() {
        let view = MapView::from_state(&state_with_places(), 12);
        assert_eq!(view.center, coord(37.5, 127.0));
        let labels: Vec<&str> = view.markers.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["A", "B", USER_MARKER_LABEL]);
        assert_eq!(view.markers[2].kind, MarkerKind::User);
    }

    #[test]
    fn static_map_url_includes_center_markers_and_key() {
        let view = MapView::from_state(&state_with_places(), 15);
        let url = static_map_url(&view, "test-key").unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(url.as_str().starts_with(STATIC_MAP_ENDPOINT));
        assert!(pairs.contains(&("center".into(), "37.5,127".into())));
        assert!(pairs.contains(&("zoom".into(), "15".into())));
        assert!(pairs.contains(&(
            "markers".into(),
            "color:red|37.51,127.01|37.49,126.99".into()
        )));
        assert!(pairs.contains(&("markers".into(), "color:blue|label:U|37.5,127".into())));
        assert!(pairs.contains(&("key".into(), "test-key".into())));
    }

    #[test]
    fn static_map_url_without_places_has_no_place_markers() {
        let view = MapView::from_state(&SessionState::default(), 15);
        let url = static_map_url(&view, "k").unwrap();
        assert!(url.query_pairs().all(|(k, _)| k != "markers"));
    }
}
