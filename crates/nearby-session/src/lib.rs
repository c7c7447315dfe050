//! Interactive session logic for nearby place recommendations.
//!
//! [`SessionState`] is the single owned aggregate of the user's selections,
//! position, and last fetch outcome, mutated through one method per
//! transition. [`Coordinator`] drives it: it asks a [`LocationProvider`] for
//! the user's position, asks a [`PlacesSource`] for recommendations, and hands
//! a [`MapView`] to a [`MapSurface`].

pub mod coordinator;
pub mod location;
pub mod map;
pub mod state;

pub use coordinator::{Coordinator, Event, FetchOutcome, PlacesSource};
pub use location::{
    request_location, FixedLocation, HttpGeolocation, LocationError, LocationProvider, NoLocation,
};
pub use map::{
    static_map_url, MapError, MapSurface, MapView, Marker, MarkerKind, DEFAULT_MAP_ZOOM,
    USER_MARKER_LABEL,
};
pub use state::{
    AnnotatedPlace, Applied, FetchTicket, LocationTicket, Notice, Phase, RequestStatus,
    SessionState,
};
