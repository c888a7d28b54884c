//! Attraction catalog records for WanderWombat.
//!
//! This crate owns the client-side view of the remote attraction store:
//! - Tolerant decoding of document-store snapshots
//! - Category filtering and rating/review/recency sorting
//! - Relevance-scored search over names, tags, and descriptions
//! - A TTL-bounded offline cache of the last good snapshot
//!
//! Network fetch belongs to the host; this crate only ever sees full
//! snapshots handed to it as JSON or as already-decoded records.

mod cache;
mod error;
mod filter;
mod record;
mod search;

pub use cache::{CacheConfig, OfflineCache};
pub use error::{CatalogError, Result};
pub use filter::{SortBy, filter_by_category, sort_attractions, top_rated};
pub use record::parse_attractions;
pub use search::{SearchResult, score_attraction, search_attractions};

use serde::{Deserialize, Serialize};
use wombat_geo::Coordinate;

/// Attraction category taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Historical,
    Natural,
    Cultural,
    Entertainment,
    Food,
    Adventure,
}

impl Category {
    /// Parse a category from its document-store string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "historical" => Some(Self::Historical),
            "natural" => Some(Self::Natural),
            "cultural" => Some(Self::Cultural),
            "entertainment" => Some(Self::Entertainment),
            "food" => Some(Self::Food),
            "adventure" => Some(Self::Adventure),
            _ => None,
        }
    }

    /// The document-store string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Historical => "historical",
            Self::Natural => "natural",
            Self::Cultural => "cultural",
            Self::Entertainment => "entertainment",
            Self::Food => "food",
            Self::Adventure => "adventure",
        }
    }
}

/// A visitor review embedded in an attraction record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    /// Display name; "Anonymous" when the reviewer withheld theirs.
    pub user_name: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub comment: String,
    pub created_at_ms: i64,
    /// How many visitors marked this review helpful.
    pub helpful: u32,
}

impl Review {
    /// Validate the review against submission rules: rating in 1..=5 and a
    /// non-empty comment.
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(CatalogError::InvalidReview(format!(
                "rating must be 1-5, got {}",
                self.rating
            )));
        }
        if self.comment.trim().is_empty() {
            return Err(CatalogError::InvalidReview("comment is empty".into()));
        }
        Ok(())
    }
}

/// An attraction record as decoded from the remote document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attraction {
    /// Unique document id.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub coordinate: Coordinate,
    /// Average star rating, one decimal place.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Last document update, epoch milliseconds.
    #[serde(default)]
    pub updated_at_ms: i64,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Attraction {
    /// Mean of the embedded review ratings, rounded to one decimal place.
    /// Falls back to the stored rating when no reviews are embedded.
    pub fn average_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return self.rating;
        }
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        let mean = f64::from(total) / self.reviews.len() as f64;
        (mean * 10.0).round() / 10.0
    }

    /// Add a validated review: newest first, counter bumped, average
    /// recomputed. An empty user name becomes "Anonymous".
    pub fn add_review(&mut self, mut review: Review) -> Result<()> {
        review.validate()?;
        if review.user_name.trim().is_empty() {
            review.user_name = "Anonymous".to_string();
        }
        self.reviews.insert(0, review);
        self.review_count += 1;
        self.rating = self.average_rating();
        Ok(())
    }

    /// Mark a review helpful by id. Returns the new helpful count, or `None`
    /// if the review is unknown.
    pub fn mark_helpful(&mut self, review_id: &str) -> Option<u32> {
        let review = self.reviews.iter_mut().find(|r| r.id == review_id)?;
        review.helpful += 1;
        Some(review.helpful)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;

    pub fn attraction(id: &str, name: &str, category: Category, lat: f64, lng: f64) -> Attraction {
        Attraction {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            category,
            coordinate: Coordinate::new(lat, lng),
            rating: 4.0,
            review_count: 10,
            tags: Vec::new(),
            updated_at_ms: 0,
            reviews: Vec::new(),
        }
    }

    pub fn review(id: &str, rating: u8, comment: &str) -> Review {
        Review {
            id: id.to_string(),
            user_name: "Visitor".to_string(),
            rating,
            comment: comment.to_string(),
            created_at_ms: 1_700_000_000_000,
            helpful: 0,
        }
    }
}
