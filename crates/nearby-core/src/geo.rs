//! Great-circle distance between coordinates.
//!
//! Uses the haversine formula on a sphere of mean Earth radius. Results are
//! returned at full precision; rounding for display lives in
//! [`format_distance_km`].

use serde::Serialize;

use crate::CoreError;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Map center used before the user's own position is known.
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: 37.337,
    lng: 127.268,
};

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] when `lat` is outside
    /// `[-90, 90]` or `lng` is outside `[-180, 180]`.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(CoreError::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Haversine distance between `a` and `b` in kilometres.
///
/// `h` and `1 - h` are clamped into `[0, 1]` so floating-point overshoot near
/// antipodal points cannot produce `NaN`.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = ((d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());

    EARTH_RADIUS_KM * c
}

/// Formats a distance for display, e.g. `"1.23 km"`.
#[must_use]
pub fn format_distance_km(km: f64) -> String {
    format!("{km:.2} km")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).expect("valid test coordinate")
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = coord(37.337, 127.268);
        assert!(distance_km(p, p).abs() < f64::EPSILON);
        assert_eq!(format_distance_km(distance_km(p, p)), "0.00 km");
    }

    #[test]
    fn one_degree_of_longitude_on_equator() {
        let d = distance_km(coord(0.0, 0.0), coord(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.5, "expected ~111.19 km, got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (coord(37.5, 127.0), coord(37.337, 127.268)),
            (coord(-33.86, 151.21), coord(51.5, -0.12)),
            (coord(89.9, 0.0), coord(-89.9, 180.0)),
        ];
        for (a, b) in pairs {
            let ab = distance_km(a, b);
            let ba = distance_km(b, a);
            assert!((ab - ba).abs() < 1e-9, "asymmetric: {ab} vs {ba}");
        }
    }

    #[test]
    fn antipodal_points_are_finite_half_circumference() {
        let d = distance_km(coord(0.0, 0.0), coord(0.0, 180.0));
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);

        let poles = distance_km(coord(90.0, 0.0), coord(-90.0, 0.0));
        assert!(poles.is_finite() && poles >= 0.0);
    }

    #[test]
    fn seoul_to_default_center_is_plausible() {
        let d = distance_km(coord(37.50, 127.00), DEFAULT_CENTER);
        assert!(d > 25.0 && d < 35.0, "expected ~30 km, got {d}");
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert_eq!(
            Coordinate::new(91.0, 0.0),
            Err(CoreError::InvalidCoordinate { lat: 91.0, lng: 0.0 })
        );
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert!(Coordinate::new(0.0, -180.5).is_err());
    }

    #[test]
    fn rejects_nan() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn format_rounds_to_two_decimals() {
        assert_eq!(format_distance_km(1.234_56), "1.23 km");
        assert_eq!(format_distance_km(111.196), "111.20 km");
    }
}
