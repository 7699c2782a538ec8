//! Core data models used throughout Card Viewer.
//!
//! A [`RawCard`] is whatever the backend sent for one card: an untrusted
//! JSON value that may use either camel-case or snake-case keys. A
//! [`NormalizedCard`] is the canonical view model every other stage reads.

use serde::Serialize;

/// One card exactly as received from `/api/cards`.
pub type RawCard = serde_json::Value;

/// A single supporting quote attached to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evidence {
    pub quote: String,
}

/// Canonical, always fully-defined card view model.
///
/// Produced by [`normalize`](crate::normalize::normalize); never mutated
/// after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCard {
    /// Claim text; empty when the raw card had none.
    pub claim: String,
    /// Tags in source order.
    pub tags: Vec<String>,
    /// Link type, rendered as the leading pill when present.
    pub link_type: Option<String>,
    pub then_start: Option<String>,
    pub then_end: Option<String>,
    /// Issue title, or `Issue {beehiivId}` when only the id is known.
    pub issue_title: String,
    pub beehiiv_id: Option<String>,
    /// ISO-like publish timestamp; only the date part is displayed.
    pub publish_date: Option<String>,
    /// All evidence items in source order (uncapped).
    pub evidence: Vec<Evidence>,
    pub issue_url: Option<String>,
}

impl NormalizedCard {
    /// Tags joined by a single space, as used for search matching.
    pub fn tags_joined(&self) -> String {
        self.tags.join(" ")
    }
}
