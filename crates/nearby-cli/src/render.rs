//! Text presentation of the session for the terminal.

use nearby_core::format_distance_km;
use nearby_session::{
    static_map_url, AnnotatedPlace, MapError, MapSurface, MapView, Notice, RequestStatus,
    SessionState,
};

pub(crate) fn print_notices(notices: &[Notice]) {
    for notice in notices {
        println!("! {notice}");
    }
}

pub(crate) fn print_status(state: &SessionState) {
    println!("{}", status_line(state));
    if let Some(err) = state.last_error() {
        println!("\u{2717} {err}");
    }
}

pub(crate) fn print_places(state: &SessionState) {
    for (i, annotated) in state.annotated_places().iter().enumerate() {
        println!("{}", place_entry(i + 1, annotated));
    }
}

fn status_line(state: &SessionState) -> String {
    let location = state
        .user_coordinate()
        .map_or_else(|| "unknown".to_string(), |c| c.to_string());
    let status = match state.request_status() {
        RequestStatus::Idle => "idle",
        RequestStatus::Pending => "loading",
        RequestStatus::Succeeded => "ready",
        RequestStatus::Failed => "failed",
    };
    format!(
        "category: {}  location: {location}  results: {} ({status})",
        state.selected_category(),
        state.places().len(),
    )
}

fn place_entry(position: usize, annotated: &AnnotatedPlace<'_>) -> String {
    let place = annotated.place;
    let mut entry = format!("{position:>2}. {}", place.name);
    if !place.address.is_empty() {
        entry.push_str(&format!("\n    {}", place.address));
    }
    if let Some(km) = annotated.distance_km {
        entry.push_str(&format!("\n    distance: {}", format_distance_km(km)));
    }
    if let Some(link) = &place.detail_link {
        entry.push_str(&format!("\n    {link}"));
    }
    entry
}

/// Map sink that prints a static map URL. Counts as not loaded when no
/// map-provider key is configured.
pub(crate) struct StaticMapSurface {
    api_key: Option<String>,
}

impl StaticMapSurface {
    pub(crate) fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }
}

impl MapSurface for StaticMapSurface {
    fn is_loaded(&self) -> bool {
        self.api_key.is_some()
    }

    fn render(&mut self, view: &MapView) -> Result<(), MapError> {
        let key = self.api_key.as_deref().ok_or(MapError::NotLoaded)?;
        println!("map: {}", static_map_url(view, key)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nearby_core::{Category, Coordinate, Place};

    use super::*;

    fn place(link: Option<&str>) -> Place {
        Place {
            name: "Cafe Onion".to_string(),
            address: "Seongsu-dong".to_string(),
            coordinate: Coordinate::new(37.5446, 127.0581).unwrap(),
            detail_link: link.map(str::to_string),
        }
    }

    #[test]
    fn place_entry_shows_distance_with_two_decimals() {
        let p = place(Some("https://maps.example.com/p/1"));
        let entry = place_entry(
            1,
            &AnnotatedPlace {
                place: &p,
                distance_km: Some(5.678_9),
            },
        );
        assert_eq!(
            entry,
            " 1. Cafe Onion\n    Seongsu-dong\n    distance: 5.68 km\n    https://maps.example.com/p/1"
        );
    }

    #[test]
    fn place_entry_omits_unknown_distance_and_missing_link() {
        let p = place(None);
        let entry = place_entry(
            2,
            &AnnotatedPlace {
                place: &p,
                distance_km: None,
            },
        );
        assert_eq!(entry, " 2. Cafe Onion\n    Seongsu-dong");
    }

    #[test]
    fn status_line_for_fresh_session() {
        let state = SessionState::new(Category::Cafe);
        assert_eq!(
            status_line(&state),
            "category: cafe  location: unknown  results: 0 (idle)"
        );
    }

    #[test]
    fn surface_without_key_is_not_loaded() {
        let mut surface = StaticMapSurface::new(None);
        assert!(!surface.is_loaded());
        let view = MapView::from_state(&SessionState::default(), 15);
        assert!(matches!(surface.render(&view), Err(MapError::NotLoaded)));
    }
}
