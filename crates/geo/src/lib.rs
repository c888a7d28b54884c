//! Geospatial primitives for WanderWombat.
//!
//! This crate provides:
//! - Haversine great-circle distance calculations
//! - Location document parsing (lat/lng objects, GeoJSON points, WKT)
//! - Display rounding that never leaks into threshold math
//! - WASM bindings for the app shell
//!
//! # Example
//!
//! ```
//! use wombat_geo::{haversine_distance, Coordinate};
//!
//! let central_park = Coordinate::new(40.7829, -73.9654);
//! let times_square = Coordinate::new(40.7580, -73.9855);
//!
//! let distance_km = haversine_distance(&central_park, &times_square);
//! assert!((distance_km - 3.2).abs() < 0.5); // ~3.2 km
//! ```

mod document;
mod error;
mod haversine;

#[cfg(feature = "wasm")]
mod wasm;

pub use document::{parse_location_value, parse_wkt_point};
pub use error::{GeoError, Result};
pub use haversine::{
    EARTH_RADIUS_KM, EARTH_RADIUS_M, approximate_distance, display_km, haversine_distance,
    haversine_distance_meters,
};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// Range checking is deliberately not performed here; call
    /// [`Coordinate::is_valid`] where out-of-range input is possible.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if the coordinate lies within valid lat/lng ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
