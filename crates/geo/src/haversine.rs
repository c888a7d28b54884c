//! Haversine distance calculation.
//!
//! Great-circle distance between two points on a sphere, given their
//! longitudes and latitudes. All threshold comparisons elsewhere in the
//! workspace use the full-precision result; [`display_km`] exists for the
//! presentation boundary only.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// # Example
/// ```
/// use wombat_geo::{haversine_distance, Coordinate};
///
/// let liberty = Coordinate::new(40.6892, -74.0445);
/// let central_park = Coordinate::new(40.7829, -73.9654);
///
/// let distance = haversine_distance(&liberty, &central_park);
/// assert!((distance - 12.4).abs() < 1.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two coordinates in meters.
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

/// Internal function that calculates distance with a custom radius.
#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a =
        (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}

/// Fast approximate distance for pre-filtering (equirectangular projection).
///
/// Faster than haversine but less accurate over long distances. Use for a
/// quick radius cut before applying haversine for exact distances.
#[inline]
pub fn approximate_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let x = (lon2 - lon1) * ((lat1 + lat2) / 2.0).cos();
    let y = lat2 - lat1;

    (x * x + y * y).sqrt() * EARTH_RADIUS_KM
}

/// Rounds a distance to 2 decimal places for display.
///
/// Must never be applied before a radius threshold check; rounding first
/// would flap entries whose true distance sits within half a rounding step
/// of the threshold.
#[inline]
pub fn display_km(distance_km: f64) -> f64 {
    (distance_km * 100.0).round() / 100.0
}
