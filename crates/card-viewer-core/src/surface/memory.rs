//! In-memory [`Surface`] implementation for tests and headless hosts.

use crate::render::{Node, SLOT_CLAIM};

use super::Surface;

/// Records rendered fragments, the status line, and how many render
/// passes (clears) have happened.
#[derive(Debug, Default)]
pub struct MemorySurface {
    cards: Vec<Node>,
    status: String,
    passes: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Node] {
        &self.cards
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Number of times the card container was cleared.
    pub fn render_passes(&self) -> usize {
        self.passes
    }

    /// Claim slot text of each rendered card, in display order.
    pub fn claims(&self) -> Vec<String> {
        self.cards
            .iter()
            .filter_map(Node::as_element)
            .filter_map(|el| el.find_by_class(SLOT_CLAIM))
            .map(|el| el.text_content())
            .collect()
    }
}

impl Surface for MemorySurface {
    fn clear_cards(&mut self) {
        self.cards.clear();
        self.passes += 1;
    }

    fn append_card(&mut self, card: Node) {
        self.cards.push(card);
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}
