//! Category filtering and list sorting.
//!
//! The list pages show either the whole catalog or one category, sorted by
//! rating, review volume, or recency. Ordering is deterministic: every sort
//! breaks ties by attraction id.

use crate::{Attraction, Category};
use std::cmp::Ordering;

/// Sort orders offered by the top-rated page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// Highest average rating first.
    Rating,
    /// Most reviewed first.
    Reviews,
    /// Most recently updated first.
    Recent,
}

/// Keep attractions of one category; `None` means the "all" segment.
pub fn filter_by_category(attractions: &[Attraction], category: Option<Category>) -> Vec<Attraction> {
    match category {
        None => attractions.to_vec(),
        Some(cat) => attractions
            .iter()
            .filter(|a| a.category == cat)
            .cloned()
            .collect(),
    }
}

/// Sort a list in place by the given order, ties broken by id.
pub fn sort_attractions(attractions: &mut [Attraction], sort_by: SortBy) {
    attractions.sort_by(|a, b| {
        let primary = match sort_by {
            SortBy::Rating => b
                .rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal),
            SortBy::Reviews => b.review_count.cmp(&a.review_count),
            SortBy::Recent => b.updated_at_ms.cmp(&a.updated_at_ms),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });
}

/// The top-rated page: optional category filter, then sort, then cap.
pub fn top_rated(
    attractions: &[Attraction],
    category: Option<Category>,
    sort_by: SortBy,
    limit: usize,
) -> Vec<Attraction> {
    let mut filtered = filter_by_category(attractions, category);
    sort_attractions(&mut filtered, sort_by);
    filtered.truncate(limit);
    filtered
}
