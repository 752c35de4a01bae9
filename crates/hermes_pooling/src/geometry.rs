//! Great-circle helpers over `geo::Point` (x = longitude, y = latitude).
//!
//! Inputs are not validated: out-of-range or NaN coordinates produce NaN
//! results instead of errors.

use geo::{Bearing, Haversine};

use crate::units::Kilometers;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates.
pub fn distance(a: geo::Point, b: geo::Point) -> Kilometers {
    let (lat1, lon1) = (a.y().to_radians(), a.x().to_radians());
    let (lat2, lon2) = (b.y().to_radians(), b.x().to_radians());
    let sin_dlat = ((lat2 - lat1) * 0.5).sin();
    let sin_dlon = ((lon2 - lon1) * 0.5).sin();
    // Rounding can push `h` past 1 for antipodal points.
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    Kilometers::new(EARTH_RADIUS_KM * c)
}

/// Initial compass bearing from `a` to `b`, in degrees within `[0, 360)`.
pub fn bearing(a: geo::Point, b: geo::Point) -> f64 {
    Haversine.bearing(a, b).rem_euclid(360.0)
}

/// Smallest angle between two bearings, in degrees within `[0, 180]`.
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 { 360.0 - diff } else { diff }
}
