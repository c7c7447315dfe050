//! Session State: the single mutable aggregate of one browsing session.
//!
//! Each user-visible transition has its own mutator. Asynchronous work is
//! split into a `begin_*` half, which moves the session into its pending
//! phase and hands out a ticket, and an `apply_*` half, which applies the
//! completion in one step. Tickets carry a generation number; completions
//! from a superseded request are discarded.

use nearby_core::{distance_km, Category, Coordinate, Place};
use nearby_places::FetchError;

use crate::location::LocationError;

/// Coarse interaction phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LocationPending,
    LocationReady,
    FetchPending,
    FetchSucceeded,
    FetchFailed,
}

/// Outcome of the most recent places fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// User-facing notice raised by a transition that did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The host has no geolocation capability.
    LocationUnsupported,
    /// The position request was denied or failed.
    LocationFailed(String),
    /// Recommendations were requested before a position was known.
    LocationRequired,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::LocationUnsupported => {
                write!(f, "Location is not supported on this device.")
            }
            Notice::LocationFailed(reason) => {
                write!(f, "Could not get your location: {reason}")
            }
            Notice::LocationRequired => write!(f, "Get your location first."),
        }
    }
}

impl From<&LocationError> for Notice {
    fn from(err: &LocationError) -> Self {
        match err {
            LocationError::Unsupported => Notice::LocationUnsupported,
            other => Notice::LocationFailed(other.to_string()),
        }
    }
}

/// Handle for one in-flight location request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationTicket {
    generation: u64,
}

/// Handle for one in-flight places fetch, carrying its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    category: Category,
    origin: Coordinate,
}

impl FetchTicket {
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn origin(&self) -> Coordinate {
        self.origin
    }
}

/// Whether a completion was applied or dropped as superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

/// A place paired with its distance from the user, when the user's
/// position is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotatedPlace<'a> {
    pub place: &'a Place,
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    phase: Phase,
    /// Phase to return to when a location request fails.
    resume_phase: Phase,
    selected_category: Category,
    user_coordinate: Option<Coordinate>,
    places: Vec<Place>,
    request_status: RequestStatus,
    last_error: Option<String>,
    notices: Vec<Notice>,
    location_generation: u64,
    fetch_generation: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Category::default())
    }
}

impl SessionState {
    #[must_use]
    pub fn new(default_category: Category) -> Self {
        Self {
            phase: Phase::Idle,
            resume_phase: Phase::Idle,
            selected_category: default_category,
            user_coordinate: None,
            places: Vec::new(),
            request_status: RequestStatus::Idle,
            last_error: None,
            notices: Vec::new(),
            location_generation: 0,
            fetch_generation: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn request_status(&self) -> RequestStatus {
        self.request_status
    }

    #[must_use]
    pub fn selected_category(&self) -> Category {
        self.selected_category
    }

    #[must_use]
    pub fn user_coordinate(&self) -> Option<Coordinate> {
        self.user_coordinate
    }

    /// Places from the last successful fetch, in service order.
    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Notices raised since the last call to [`SessionState::take_notices`].
    #[must_use]
    pub fn pending_notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Each place with its great-circle distance from the user.
    ///
    /// Distances are `None` until the user's position is known.
    #[must_use]
    pub fn annotated_places(&self) -> Vec<AnnotatedPlace<'_>> {
        self.places
            .iter()
            .map(|place| AnnotatedPlace {
                place,
                distance_km: self
                    .user_coordinate
                    .map(|origin| distance_km(origin, place.coordinate)),
            })
            .collect()
    }

    /// Changes the category used by the next fetch. Never triggers a fetch.
    pub fn select_category(&mut self, category: Category) {
        self.selected_category = category;
    }

    /// Records that the host lacks a geolocation capability. State is unchanged.
    pub fn reject_location_unsupported(&mut self) {
        self.notices.push(Notice::LocationUnsupported);
    }

    /// Moves to [`Phase::LocationPending`] and issues a ticket for the request.
    pub fn begin_location(&mut self) -> LocationTicket {
        if self.phase != Phase::LocationPending {
            self.resume_phase = self.phase;
        }
        self.phase = Phase::LocationPending;
        self.location_generation += 1;
        LocationTicket {
            generation: self.location_generation,
        }
    }

    /// Applies the resolution of a location request.
    ///
    /// On success the coordinate is stored and the session becomes
    /// [`Phase::LocationReady`]. On failure a notice is queued and the session
    /// returns to the phase it was in before the request; `request_status`
    /// and `last_error` are untouched.
    pub fn apply_location(
        &mut self,
        ticket: LocationTicket,
        result: Result<Coordinate, LocationError>,
    ) -> Applied {
        if ticket.generation != self.location_generation {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.location_generation,
                "discarding superseded location result"
            );
            return Applied::Stale;
        }

        match result {
            Ok(coordinate) => {
                self.user_coordinate = Some(coordinate);
                self.phase = Phase::LocationReady;
            }
            Err(err) => {
                self.notices.push(Notice::from(&err));
                self.phase = self.resume_phase;
            }
        }
        Applied::Current
    }

    /// Starts a fetch for the current category and position.
    ///
    /// Returns `None` and queues [`Notice::LocationRequired`] when no
    /// position is known; nothing else changes in that case.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        let Some(origin) = self.user_coordinate else {
            self.notices.push(Notice::LocationRequired);
            return None;
        };

        self.last_error = None;
        self.request_status = RequestStatus::Pending;
        self.set_phase(Phase::FetchPending);
        self.fetch_generation += 1;

        Some(FetchTicket {
            generation: self.fetch_generation,
            category: self.selected_category,
            origin,
        })
    }

    /// Applies the resolution of a fetch in one step.
    ///
    /// Success replaces `places` wholesale. Failure records `last_error` and
    /// keeps the previous `places`. Results for a superseded ticket are
    /// dropped.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Place>, FetchError>,
    ) -> Applied {
        if ticket.generation != self.fetch_generation {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.fetch_generation,
                "discarding superseded places result"
            );
            return Applied::Stale;
        }

        match result {
            Ok(places) => {
                self.places = places;
                self.last_error = None;
                self.request_status = RequestStatus::Succeeded;
                self.set_phase(Phase::FetchSucceeded);
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                self.request_status = RequestStatus::Failed;
                self.set_phase(Phase::FetchFailed);
            }
        }
        Applied::Current
    }

    /// A pending location request owns the visible phase; fetch transitions
    /// only update where it resumes to.
    fn set_phase(&mut self, phase: Phase) {
        if self.phase == Phase::LocationPending {
            self.resume_phase = phase;
        } else {
            self.phase = phase;
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
