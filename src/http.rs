//! HTTP [`CardSource`] backed by `GET /api/cards`.
//!
//! Transport failures (connect, timeout, body read) become
//! [`LoadError::Fetch`]. The HTTP status code is not inspected: a 500
//! carrying `{"success": false, "error": "..."}` still surfaces the
//! server's message, and a non-JSON error page surfaces as a parse
//! failure.

use async_trait::async_trait;
use card_viewer_core::models::RawCard;
use card_viewer_core::source::{decode_cards_response, CardSource, LoadError};
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ViewerError;

pub struct HttpCardSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCardSource {
    pub fn new(config: &ApiConfig) -> Result<Self, ViewerError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            url: config.cards_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CardSource for HttpCardSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_cards(&self) -> Result<Vec<RawCard>, LoadError> {
        debug!(url = %self.url, "fetching cards");
        let resp = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| LoadError::Fetch(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| LoadError::Fetch(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "cards response received");

        decode_cards_response(&body)
    }
}
