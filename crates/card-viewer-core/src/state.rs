//! The owned view state.
//!
//! [`ViewState`] holds the immutable full card set (shared, never mutated
//! after load) and the currently displayed subset as indices into it.
//! Applying a query never edits a state in place; it yields a new one.

use std::sync::Arc;

use crate::filter::filter_indices;
use crate::models::{NormalizedCard, RawCard};
use crate::normalize::normalize_all;

#[derive(Debug, Clone)]
pub struct ViewState {
    all: Arc<[NormalizedCard]>,
    displayed: Vec<usize>,
    query: String,
}

impl ViewState {
    /// Builds the initial state from a fetched response; everything is displayed.
    pub fn from_raw(raws: &[RawCard]) -> Self {
        Self::new(normalize_all(raws))
    }

    pub fn new(cards: Vec<NormalizedCard>) -> Self {
        let displayed = (0..cards.len()).collect();
        Self {
            all: cards.into(),
            displayed,
            query: String::new(),
        }
    }

    /// Recomputes the displayed subset for `query` against the full set.
    pub fn with_query(&self, query: &str) -> Self {
        Self {
            all: Arc::clone(&self.all),
            displayed: filter_indices(&self.all, query),
            query: query.to_string(),
        }
    }

    pub fn all(&self) -> &[NormalizedCard] {
        &self.all
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn displayed_len(&self) -> usize {
        self.displayed.len()
    }

    /// Displayed cards, in full-set order.
    pub fn displayed(&self) -> impl Iterator<Item = &NormalizedCard> + '_ {
        self.displayed.iter().map(move |&i| &self.all[i])
    }
}
