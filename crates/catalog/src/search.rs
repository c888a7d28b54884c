//! Relevance-scored catalog search.
//!
//! The search bar matches against attraction names, tags, and descriptions.
//! Each field is scored on a tier ladder (exact > prefix > word boundary >
//! substring > subsequence) and weighted so a name hit always outranks a tag
//! hit, which outranks a description hit.

use crate::Attraction;
use serde::{Deserialize, Serialize};

/// Tier ladder for a single field match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    None = 0,
    Subsequence = 10,
    Contains = 20,
    WordBoundary = 30,
    StartsWith = 40,
    Exact = 50,
}

const NAME_WEIGHT: u32 = 100;
const TAG_WEIGHT: u32 = 10;
const DESCRIPTION_WEIGHT: u32 = 1;

/// A matched attraction with its relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub attraction: Attraction,
    /// Relevance score (higher is better); zero scores never appear in
    /// search output.
    pub score: u32,
}

/// Score one attraction against a query. Zero means no match anywhere.
pub fn score_attraction(attraction: &Attraction, query: &str) -> u32 {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 0;
    }

    let name = field_tier(&attraction.name, &query) as u32 * NAME_WEIGHT;
    let tag = attraction
        .tags
        .iter()
        .map(|t| field_tier(t, &query) as u32)
        .max()
        .unwrap_or(0)
        * TAG_WEIGHT;
    let description = field_tier(&attraction.description, &query) as u32 * DESCRIPTION_WEIGHT;

    name.max(tag).max(description)
}

/// Search the catalog, best matches first, ties broken by id.
pub fn search_attractions(attractions: &[Attraction], query: &str) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = attractions
        .iter()
        .filter_map(|attraction| {
            let score = score_attraction(attraction, query);
            (score > 0).then(|| SearchResult {
                attraction: attraction.clone(),
                score,
            })
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.attraction.id.cmp(&b.attraction.id))
    });

    results
}

/// Tier for a single text field against an already-lowercased query.
fn field_tier(text: &str, query: &str) -> Tier {
    let text = text.to_lowercase();

    if text == *query {
        return Tier::Exact;
    }
    if text.starts_with(query) {
        return Tier::StartsWith;
    }
    if text.split_whitespace().any(|word| word.starts_with(query)) {
        return Tier::WordBoundary;
    }
    if text.contains(query) {
        return Tier::Contains;
    }
    if is_subsequence(&text, query) {
        return Tier::Subsequence;
    }

    Tier::None
}

/// True if every query character appears in the text in order.
fn is_subsequence(text: &str, query: &str) -> bool {
    let mut chars = text.chars();
    query.chars().all(|q| chars.any(|c| c == q))
}
