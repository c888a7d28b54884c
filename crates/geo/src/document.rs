//! Location document parsing.
//!
//! Attraction records in the remote document store carry their location in
//! one of three shapes, depending on which importer wrote them:
//! - lat/lng object: `{"latitude": 40.78, "longitude": -73.97, ...}`
//! - GeoJSON point: `{"type": "Point", "coordinates": [lng, lat]}`
//! - WKT string: `"POINT(lng lat)"`

use crate::{Coordinate, GeoError, Result};

/// Parse a location from a document-store JSON value.
///
/// This is the main entry point for decoding attraction locations. Returns
/// `None` for null, malformed, or out-of-range values so a bad record can be
/// skipped without failing the whole snapshot.
///
/// # Example
/// ```
/// use wombat_geo::parse_location_value;
/// use serde_json::json;
///
/// // lat/lng object as stored by the app
/// let doc = json!({"latitude": 40.7829, "longitude": -73.9654, "city": "New York"});
/// let coord = parse_location_value(&doc).unwrap();
/// assert!((coord.latitude - 40.7829).abs() < 0.0001);
///
/// // WKT fallback
/// let wkt = json!("POINT(-73.9654 40.7829)");
/// let coord = parse_location_value(&wkt).unwrap();
/// assert!((coord.latitude - 40.7829).abs() < 0.0001);
/// ```
pub fn parse_location_value(value: &serde_json::Value) -> Option<Coordinate> {
    if value.is_null() {
        return None;
    }

    let coord = if let Some(obj) = value.as_object() {
        // lat/lng object takes precedence over GeoJSON: a record carrying
        // both named fields and a coordinates array was written by the app.
        if let (Some(lat), Some(lng)) = (
            obj.get("latitude").and_then(serde_json::Value::as_f64),
            obj.get("longitude").and_then(serde_json::Value::as_f64),
        ) {
            Some(Coordinate::new(lat, lng))
        } else if let Some(coords) = obj.get("coordinates").and_then(|c| c.as_array()) {
            // GeoJSON order is [longitude, latitude]
            if coords.len() >= 2 {
                let lng = coords[0].as_f64()?;
                let lat = coords[1].as_f64()?;
                Some(Coordinate::new(lat, lng))
            } else {
                None
            }
        } else {
            None
        }
    } else {
        value.as_str().and_then(|wkt| parse_wkt_point(wkt).ok())
    };

    coord.filter(Coordinate::is_valid)
}

/// Parse a WKT POINT string.
///
/// Format: `POINT(longitude latitude)`
pub fn parse_wkt_point(wkt: &str) -> Result<Coordinate> {
    let wkt = wkt.trim();

    if !wkt.starts_with("POINT(") && !wkt.starts_with("POINT (") {
        return Err(GeoError::InvalidWkt(format!("Expected POINT, got: {}", wkt)));
    }

    let start = wkt
        .find('(')
        .ok_or_else(|| GeoError::InvalidWkt("Missing '('".into()))?;
    let end = wkt
        .find(')')
        .ok_or_else(|| GeoError::InvalidWkt("Missing ')'".into()))?;

    if start >= end {
        return Err(GeoError::InvalidWkt("Invalid parentheses".into()));
    }

    let coords_str = &wkt[start + 1..end];
    let parts: Vec<&str> = coords_str.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(GeoError::InvalidWkt(format!(
            "Expected 2 coordinates, got {}",
            parts.len()
        )));
    }

    let lng: f64 = parts[0]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid longitude: {}", parts[0])))?;
    let lat: f64 = parts[1]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid latitude: {}", parts[1])))?;

    let coord = Coordinate::new(lat, lng);
    if !coord.is_valid() {
        return Err(GeoError::InvalidCoordinate(format!(
            "Out of range: lat {}, lng {}",
            lat, lng
        )));
    }

    Ok(coord)
}
