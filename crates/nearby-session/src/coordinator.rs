//! View Coordinator: drives [`SessionState`] from user events.
//!
//! The coordinator is the only writer of the session. It performs the
//! asynchronous work for each event and applies the result through the
//! state's mutators, so a completion is never interleaved with another
//! transition.

use std::time::Duration;

use async_trait::async_trait;
use nearby_core::{Category, Coordinate, Place};
use nearby_places::{FetchError, PlacesClient};

use crate::location::{request_location, LocationError, LocationProvider};
use crate::map::{MapError, MapSurface, MapView, DEFAULT_MAP_ZOOM};
use crate::state::{Applied, Notice, SessionState};

/// Source of place recommendations.
#[async_trait]
pub trait PlacesSource: Send + Sync {
    async fn fetch_places(
        &self,
        category: Category,
        origin: Coordinate,
    ) -> Result<Vec<Place>, FetchError>;
}

#[async_trait]
impl PlacesSource for PlacesClient {
    async fn fetch_places(
        &self,
        category: Category,
        origin: Coordinate,
    ) -> Result<Vec<Place>, FetchError> {
        PlacesClient::fetch_places(self, category, origin).await
    }
}

/// User-triggered events accepted in every phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SelectCategory(Category),
    RequestLocation,
    RequestRecommendations,
}

/// What a `RequestRecommendations` event ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// No position was known; nothing was requested.
    Refused,
    Succeeded { count: usize },
    Failed { message: String },
    /// A newer request completed first; this result was dropped.
    Superseded,
}

pub struct Coordinator<L, P> {
    state: SessionState,
    location: L,
    places: P,
    location_timeout: Option<Duration>,
    map_zoom: u8,
}

impl<L, P> Coordinator<L, P>
where
    L: LocationProvider,
    P: PlacesSource,
{
    #[must_use]
    pub fn new(location: L, places: P, default_category: Category) -> Self {
        Self {
            state: SessionState::new(default_category),
            location,
            places,
            location_timeout: None,
            map_zoom: DEFAULT_MAP_ZOOM,
        }
    }

    /// Bounds each location request; elapsed requests fail with
    /// [`LocationError::Timeout`].
    #[must_use]
    pub fn with_location_timeout(mut self, timeout: Duration) -> Self {
        self.location_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_map_zoom(mut self, zoom: u8) -> Self {
        self.map_zoom = zoom;
        self
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.take_notices()
    }

    pub fn select_category(&mut self, category: Category) {
        tracing::debug!(%category, "category selected");
        self.state.select_category(category);
    }

    /// Acquires the user's position and applies it to the session.
    ///
    /// An unsupported host is detected before any request and leaves the
    /// session untouched apart from a queued notice.
    ///
    /// # Errors
    ///
    /// Returns the [`LocationError`] the provider resolved to; the session
    /// has already been updated and a notice queued.
    pub async fn request_location(&mut self) -> Result<Coordinate, LocationError> {
        if !self.location.is_supported() {
            tracing::warn!("geolocation capability is not available");
            self.state.reject_location_unsupported();
            return Err(LocationError::Unsupported);
        }

        let ticket = self.state.begin_location();
        let result = request_location(&self.location, self.location_timeout).await;

        match &result {
            Ok(coordinate) => tracing::info!(%coordinate, "location acquired"),
            Err(e) => tracing::warn!(error = %e, "location request failed"),
        }

        self.state.apply_location(ticket, result.clone());
        result
    }

    /// Fetches recommendations for the selected category around the
    /// user's position.
    pub async fn request_recommendations(&mut self) -> FetchOutcome {
        let Some(ticket) = self.state.begin_fetch() else {
            tracing::info!("recommendations requested before location was known");
            return FetchOutcome::Refused;
        };

        tracing::info!(
            category = %ticket.category(),
            origin = %ticket.origin(),
            "requesting recommendations"
        );
        let result = self
            .places
            .fetch_places(ticket.category(), ticket.origin())
            .await;

        let outcome = match &result {
            Ok(places) => FetchOutcome::Succeeded {
                count: places.len(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "recommendation fetch failed");
                FetchOutcome::Failed {
                    message: e.to_string(),
                }
            }
        };

        match self.state.apply_fetch(ticket, result) {
            Applied::Current => outcome,
            Applied::Stale => FetchOutcome::Superseded,
        }
    }

    /// Routes one user event to its transition.
    pub async fn dispatch(&mut self, event: Event) {
        match event {
            Event::SelectCategory(category) => self.select_category(category),
            Event::RequestLocation => {
                // Failures are already reflected in the session as notices.
                let _ = self.request_location().await;
            }
            Event::RequestRecommendations => {
                self.request_recommendations().await;
            }
        }
    }

    #[must_use]
    pub fn map_view(&self) -> MapView {
        MapView::from_state(&self.state, self.map_zoom)
    }

    /// Hands the current map view to `surface`.
    ///
    /// Returns `Ok(false)` without drawing when the surface failed to load.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if a loaded surface fails to draw.
    pub fn render(&self, surface: &mut dyn MapSurface) -> Result<bool, MapError> {
        if !surface.is_loaded() {
            tracing::warn!("map surface not loaded; skipping markers");
            return Ok(false);
        }
        let view = self.map_view();
        tracing::debug!(markers = view.markers.len(), zoom = view.zoom, "rendering map");
        surface.render(&view)?;
        Ok(true)
    }
}
