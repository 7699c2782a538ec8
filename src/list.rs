//! One-shot card listing.
//!
//! Fetches once, optionally applies a query, and prints either the
//! rendered cards as text or the displayed normalized cards as JSON.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use card_viewer_core::models::NormalizedCard;
use card_viewer_core::source::CardSource;
use card_viewer_core::surface::memory::MemorySurface;

use crate::config::Config;
use crate::controller::Controller;
use crate::terminal::card_text;

pub async fn run_list(
    config: &Config,
    source: Arc<dyn CardSource>,
    query: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut controller = Controller::new(source, MemorySurface::new(), config.search.debounce());
    controller.start().await?;
    if let Some(q) = query {
        controller.apply_query(q)?;
    }

    let mut out = std::io::stdout().lock();

    if json {
        let cards: Vec<&NormalizedCard> = controller
            .state()
            .map(|s| s.displayed().collect())
            .unwrap_or_default();
        writeln!(out, "{}", serde_json::to_string_pretty(&cards)?)?;
        return Ok(());
    }

    let surface = controller.surface();
    for card in surface.cards() {
        write!(out, "{}", card_text(card))?;
    }
    writeln!(out, "{}", surface.status())?;
    Ok(())
}
