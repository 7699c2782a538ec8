//! Host surface abstraction.
//!
//! A [`Surface`] is wherever rendered cards end up: a browser container,
//! a terminal, or memory. It exposes the three operations the full-render
//! contract needs and nothing else.

pub mod memory;

use tracing::debug;

use crate::models::NormalizedCard;
use crate::pills::extract_pills;
use crate::render::{render_card, CardTemplate, Node};

/// Guidance shown when there is nothing to display.
pub const EMPTY_STATUS: &str =
    "No cards yet. Run an import (POST /api/run-import) to populate the collection.";

/// Shown while the initial fetch is in flight.
pub const LOADING_STATUS: &str = "Loading cards\u{2026}";

/// Destination of rendered card fragments and the status line.
pub trait Surface {
    /// Discards every previously rendered card fragment.
    fn clear_cards(&mut self);

    /// Appends one rendered card after those already present.
    fn append_card(&mut self, card: Node);

    /// Replaces the status line.
    fn set_status(&mut self, status: &str);
}

/// Status line for a render pass of `count` cards.
pub fn count_status(count: usize) -> String {
    match count {
        0 => EMPTY_STATUS.to_string(),
        1 => "Showing 1 card".to_string(),
        n => format!("Showing {} cards", n),
    }
}

/// One full render pass: clear, append each card in order, update status.
///
/// Returns the number of cards rendered.
pub fn render_pass<'a, S, I>(surface: &mut S, template: &CardTemplate, cards: I) -> usize
where
    S: Surface + ?Sized,
    I: IntoIterator<Item = &'a NormalizedCard>,
{
    surface.clear_cards();
    let mut count = 0;
    for card in cards {
        let pills = extract_pills(card);
        surface.append_card(render_card(template, card, &pills));
        count += 1;
    }
    surface.set_status(&count_status(count));
    debug!(count, "render pass complete");
    count
}

#[cfg(test)]
mod tests {
    use super::memory::MemorySurface;
    use super::*;

    fn cards(n: usize) -> Vec<NormalizedCard> {
        (0..n)
            .map(|i| NormalizedCard {
                claim: format!("claim {}", i),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_render_pass_replaces_previous_cards() {
        let template = CardTemplate::default();
        let mut surface = MemorySurface::new();

        render_pass(&mut surface, &template, &cards(3));
        assert_eq!(surface.cards().len(), 3);
        assert_eq!(surface.status(), "Showing 3 cards");

        let fewer = cards(1);
        render_pass(&mut surface, &template, &fewer);
        assert_eq!(surface.cards().len(), 1);
        assert_eq!(surface.status(), "Showing 1 card");
        assert_eq!(surface.render_passes(), 2);
    }

    #[test]
    fn test_render_pass_preserves_order() {
        let template = CardTemplate::default();
        let mut surface = MemorySurface::new();
        let all = cards(4);
        render_pass(&mut surface, &template, all.iter().rev());

        let claims = surface.claims();
        assert_eq!(claims, vec!["claim 3", "claim 2", "claim 1", "claim 0"]);
    }

    #[test]
    fn test_empty_pass_shows_guidance() {
        let template = CardTemplate::default();
        let mut surface = MemorySurface::new();
        render_pass(&mut surface, &template, &cards(2));
        render_pass(&mut surface, &template, &cards(0));

        assert!(surface.cards().is_empty());
        assert_eq!(surface.status(), EMPTY_STATUS);
    }
}
