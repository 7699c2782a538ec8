//! Client-side search.
//!
//! A stable substring filter over the normalized card set: the query is
//! trimmed and lowercased, and a card matches when the query occurs in its
//! claim, its space-joined tags, or its issue title. Result order follows
//! the input order; nothing is re-ranked.

use crate::models::NormalizedCard;

/// Lowercased, trimmed form of `query`, or `None` if it matches everything.
pub fn normalize_query(query: &str) -> Option<String> {
    let q = query.trim();
    if q.is_empty() {
        None
    } else {
        Some(q.to_lowercase())
    }
}

/// Whether `card` matches an already-normalized needle.
pub fn matches(card: &NormalizedCard, needle: &str) -> bool {
    card.claim.to_lowercase().contains(needle)
        || card.tags_joined().to_lowercase().contains(needle)
        || card.issue_title.to_lowercase().contains(needle)
}

/// Indices into `all` of the cards matching `query`, in order.
pub fn filter_indices(all: &[NormalizedCard], query: &str) -> Vec<usize> {
    match normalize_query(query) {
        None => (0..all.len()).collect(),
        Some(needle) => all
            .iter()
            .enumerate()
            .filter(|(_, card)| matches(card, &needle))
            .map(|(i, _)| i)
            .collect(),
    }
}

/// The cards of `all` matching `query`, in order, borrowed from `all`.
pub fn filter_cards<'a>(all: &'a [NormalizedCard], query: &str) -> Vec<&'a NormalizedCard> {
    filter_indices(all, query)
        .into_iter()
        .map(|i| &all[i])
        .collect()
}
