//! Card source abstraction and `/api/cards` response decoding.
//!
//! The [`CardSource`] trait is the boundary to the backend. The native
//! host implements it over HTTP; [`memory::StaticCardSource`] serves
//! fixed bodies for tests and demos. Both funnel the response body
//! through [`decode_cards_response`] so every host agrees on what counts
//! as a failure.
//!
//! # Wire format
//!
//! ```json
//! { "success": true, "cards": [ { "claim": "...", "tags": ["..."] } ] }
//! { "success": false, "error": "db down" }
//! ```

pub mod memory;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::models::RawCard;

/// Message used when a failure carries no more specific description.
pub const GENERIC_FAILURE: &str = "Failed to load cards";

/// Why the card list could not be loaded.
///
/// `Display` is the message shown after `Error: ` on the status line; the
/// variant keeps the kind of failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The endpoint could not be reached (connect, timeout, body read).
    #[error("{}", or_generic(.0))]
    Fetch(String),

    /// The endpoint answered with `success: false`.
    #[error("{}", .0.as_deref().map_or(GENERIC_FAILURE, |m| or_generic(m)))]
    Response(Option<String>),

    /// The body was not a valid response document.
    #[error("{}", or_generic(.0))]
    Parse(String),
}

fn or_generic(msg: &str) -> &str {
    if msg.is_empty() {
        GENERIC_FAILURE
    } else {
        msg
    }
}

impl LoadError {
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Fetch(_) => "fetch",
            LoadError::Response(_) => "response",
            LoadError::Parse(_) => "parse",
        }
    }

    /// The most specific human-readable message available.
    pub fn status_message(&self) -> String {
        self.to_string()
    }

    /// Text for the status line.
    pub fn status_line(&self) -> String {
        format!("Error: {}", self)
    }
}

#[derive(Debug, Deserialize)]
struct CardsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    cards: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// Decodes a `/api/cards` body into raw cards.
pub fn decode_cards_response(body: &[u8]) -> Result<Vec<RawCard>, LoadError> {
    let response: CardsResponse = serde_json::from_slice(body)
        .map_err(|e| LoadError::Parse(format!("response is not valid JSON: {}", e)))?;

    if !response.success {
        let message = response.error.and_then(|e| match e {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        });
        return Err(LoadError::Response(message));
    }

    match response.cards {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(cards)) => Ok(cards),
        Some(_) => Err(LoadError::Parse("`cards` is not an array".to_string())),
    }
}

/// Supplies the full raw card list, once.
#[async_trait]
pub trait CardSource: Send + Sync {
    /// Human-readable description of where cards come from.
    fn describe(&self) -> String;

    /// Fetches and decodes the card list.
    async fn fetch_cards(&self) -> Result<Vec<RawCard>, LoadError>;
}
