//! Plain-text [`Surface`] for the CLI.
//!
//! Reads the rendered card tree back out of its slots and prints one block
//! per card. Pills are bracketed, the type pill uppercased; a hidden link
//! slot prints nothing.

use std::io::Write;

use card_viewer_core::render::{
    Element, Node, SLOT_CLAIM, SLOT_EVIDENCE_LIST, SLOT_EVIDENCE_SUMMARY, SLOT_ISSUE, SLOT_LINK,
    SLOT_PILLS, SLOT_THEN,
};
use card_viewer_core::surface::Surface;
use tracing::warn;

pub struct TerminalSurface<W: Write> {
    out: W,
    passes: usize,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, passes: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!(error = %e, "failed to write to terminal");
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear_cards(&mut self) {
        if self.passes > 0 {
            self.emit("\n");
        }
        self.passes += 1;
    }

    fn append_card(&mut self, card: Node) {
        let text = card_text(&card);
        self.emit(&text);
    }

    fn set_status(&mut self, status: &str) {
        self.emit(&format!("{}\n", status));
    }
}

fn slot_text(root: &Element, class: &str) -> String {
    root.find_by_class(class)
        .map(Element::text_content)
        .unwrap_or_default()
}

/// Formats one rendered card as an indented text block.
pub fn card_text(card: &Node) -> String {
    let Some(root) = card.as_element() else {
        return format!("{}\n", card.text_content());
    };

    let mut out = format!("* {}\n", slot_text(root, SLOT_CLAIM));

    if let Some(pills) = root.find_by_class(SLOT_PILLS) {
        let labels: Vec<String> = pills
            .children
            .iter()
            .filter_map(Node::as_element)
            .map(|pill| {
                if pill.has_class("pill-type") {
                    format!("[{}]", pill.text_content().to_uppercase())
                } else {
                    format!("[{}]", pill.text_content())
                }
            })
            .collect();
        if !labels.is_empty() {
            out.push_str(&format!("    {}\n", labels.join(" ")));
        }
    }

    out.push_str(&format!(
        "    {}  |  {}\n",
        slot_text(root, SLOT_THEN),
        slot_text(root, SLOT_ISSUE)
    ));
    out.push_str(&format!("    {}\n", slot_text(root, SLOT_EVIDENCE_SUMMARY)));

    if let Some(list) = root.find_by_class(SLOT_EVIDENCE_LIST) {
        for item in &list.children {
            out.push_str(&format!("      - \"{}\"\n", item.text_content()));
        }
    }

    if let Some(link) = root.find_by_class(SLOT_LINK) {
        if let (false, Some(href)) = (link.is_hidden(), link.get_attr("href")) {
            out.push_str(&format!("    {}\n", href));
        }
    }

    out
}
