//! In-memory [`CardSource`] for tests and offline demos.

use async_trait::async_trait;

use crate::models::RawCard;

use super::{decode_cards_response, CardSource, LoadError};

/// Serves a fixed response body (or a fixed transport failure).
pub struct StaticCardSource {
    result: Result<Vec<u8>, LoadError>,
}

impl StaticCardSource {
    /// A source whose response body is `body`.
    pub fn from_body(body: impl Into<Vec<u8>>) -> Self {
        Self {
            result: Ok(body.into()),
        }
    }

    /// A successful response carrying `cards`.
    pub fn from_cards(cards: Vec<RawCard>) -> Self {
        let body = serde_json::json!({ "success": true, "cards": cards });
        Self::from_body(body.to_string())
    }

    /// A source that fails before any body is received.
    pub fn failing(error: LoadError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl CardSource for StaticCardSource {
    fn describe(&self) -> String {
        "static".to_string()
    }

    async fn fetch_cards(&self) -> Result<Vec<RawCard>, LoadError> {
        match &self.result {
            Ok(body) => decode_cards_response(body),
            Err(e) => Err(e.clone()),
        }
    }
}
