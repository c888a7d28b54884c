//! WASM bindings for the geo crate.
//!
//! These bindings let the Capacitor app shell call into the same distance
//! math the native builds use, JSON strings across the boundary.

use crate::{Coordinate, display_km, haversine_distance, parse_location_value};
use wasm_bindgen::prelude::*;

/// Calculate distance between two coordinates in kilometers.
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let from = Coordinate::new(lat1, lng1);
    let to = Coordinate::new(lat2, lng2);
    haversine_distance(&from, &to)
}

/// Calculate distance rounded to 2 decimals for display.
#[wasm_bindgen]
pub fn distance_display(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    display_km(distance(lat1, lng1, lat2, lng2))
}

/// Parse a location document and return `{"latitude": .., "longitude": ..}`,
/// or the string "null" if parsing fails.
#[wasm_bindgen]
pub fn parse_location(location_json: &str) -> std::result::Result<String, JsValue> {
    let value: serde_json::Value = serde_json::from_str(location_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;

    match parse_location_value(&value) {
        Some(coord) => {
            let result = serde_json::json!({
                "latitude": coord.latitude,
                "longitude": coord.longitude
            });
            Ok(result.to_string())
        }
        None => Ok("null".to_string()),
    }
}
