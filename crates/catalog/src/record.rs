//! Tolerant decoding of document-store snapshots.
//!
//! Snapshot documents are written by several app versions and importers, so
//! field shapes drift: ids may be strings or numbers, locations come in three
//! formats (see `wombat_geo::parse_location_value`), review counts may be
//! missing. Decoding skips records it cannot make sense of rather than
//! failing the snapshot; the map and list pages prefer a partial catalog
//! over none.

use crate::{Attraction, Category, CatalogError, Result, Review};
use serde_json::Value;
use wombat_geo::parse_location_value;

/// Decode a snapshot array of attraction documents.
///
/// Records missing an id, name, known category, or parseable location are
/// skipped with a debug event. Returns an error only when the snapshot
/// itself is not an array.
pub fn parse_attractions(snapshot: &Value) -> Result<Vec<Attraction>> {
    let docs = snapshot.as_array().ok_or_else(|| {
        CatalogError::InvalidSnapshot(format!("expected array, got {}", type_name(snapshot)))
    })?;

    let mut attractions = Vec::with_capacity(docs.len());
    for doc in docs {
        match parse_attraction(doc) {
            Some(attraction) => attractions.push(attraction),
            None => {
                tracing::debug!(
                    id = %doc.get("id").map(ToString::to_string).unwrap_or_default(),
                    "skipping undecodable attraction document"
                );
            }
        }
    }

    Ok(attractions)
}

/// Decode a single attraction document, `None` if required fields are
/// missing or malformed.
fn parse_attraction(doc: &Value) -> Option<Attraction> {
    let id = string_or_number(doc.get("id")?)?;
    let name = doc.get("name")?.as_str()?.to_string();
    let category = Category::parse(doc.get("category")?.as_str()?)?;
    let coordinate = parse_location_value(doc.get("location")?)?;

    let reviews: Vec<Review> = doc
        .get("reviews")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(parse_review).collect())
        .unwrap_or_default();

    let review_count = doc
        .get("reviewCount")
        .and_then(Value::as_u64)
        .map_or_else(|| reviews.len() as u32, |n| n as u32);

    Some(Attraction {
        id,
        name,
        description: doc
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        category,
        coordinate,
        rating: doc.get("rating").and_then(Value::as_f64).unwrap_or(0.0),
        review_count,
        tags: doc
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        updated_at_ms: doc.get("lastUpdated").and_then(Value::as_i64).unwrap_or(0),
        reviews,
    })
}

fn parse_review(doc: &Value) -> Option<Review> {
    let rating = doc.get("rating")?.as_u64()?;
    if !(1..=5).contains(&rating) {
        return None;
    }

    Some(Review {
        id: string_or_number(doc.get("id")?)?,
        user_name: doc
            .get("userName")
            .and_then(Value::as_str)
            .unwrap_or("Anonymous")
            .to_string(),
        rating: rating as u8,
        comment: doc.get("comment")?.as_str()?.to_string(),
        created_at_ms: doc.get("createdAt").and_then(Value::as_i64).unwrap_or(0),
        helpful: doc.get("helpful").and_then(Value::as_u64).unwrap_or(0) as u32,
    })
}

/// Document ids are strings in newer records, numbers in the seed data.
fn string_or_number(value: &Value) -> Option<String> {
    if let Some(s) = value.as_str() {
        return Some(s.to_string());
    }
    value.as_i64().map(|n| n.to_string())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
