//! Card rendering.
//!
//! Rendering is split in two steps:
//!
//! 1. [`project`] maps a [`NormalizedCard`] plus its pills to a
//!    [`CardView`]: the exact strings each template slot receives.
//! 2. [`render_card`] clones the shared [`CardTemplate`] and writes the
//!    view into its slots, yielding a self-contained [`Node`] tree.
//!
//! Because every card starts from a fresh clone, nothing populated for one
//! card can leak into the next.

use serde::Serialize;

use crate::models::NormalizedCard;
use crate::pills::Pill;

/// Shown in the time-range slot when neither endpoint is known.
pub const PLACEHOLDER: &str = "\u{2014}";

/// Maximum number of evidence items listed per card.
pub const MAX_EVIDENCE_ITEMS: usize = 4;

/// Number of leading characters of the publish date that are displayed.
const PUBLISH_DATE_CHARS: usize = 10;

// Slot classes the renderer writes into.
pub const SLOT_CLAIM: &str = "card-claim";
pub const SLOT_PILLS: &str = "card-pills";
pub const SLOT_THEN: &str = "card-then";
pub const SLOT_ISSUE: &str = "card-issue";
pub const SLOT_EVIDENCE_SUMMARY: &str = "card-evidence-summary";
pub const SLOT_EVIDENCE_LIST: &str = "card-evidence-list";
pub const SLOT_LINK: &str = "card-link";

const ALL_SLOTS: &[&str] = &[
    SLOT_CLAIM,
    SLOT_PILLS,
    SLOT_THEN,
    SLOT_ISSUE,
    SLOT_EVIDENCE_SUMMARY,
    SLOT_EVIDENCE_LIST,
    SLOT_LINK,
];

// ============ View tree ============

/// A node of a declarative view tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: adds a `class` attribute.
    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    /// Builder: sets an attribute.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: appends a child.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn is_hidden(&self) -> bool {
        self.get_attr("hidden").is_some()
    }

    /// Replaces all children with a single text node.
    pub fn set_text(&mut self, text: &str) {
        self.children = vec![Node::Text(text.to_string())];
    }

    /// Depth-first search (self included) for an element carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Element(el) => el.find_by_class(class),
            Node::Text(_) => None,
        })
    }

    pub fn find_by_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            Node::Element(el) => el.find_by_class_mut(class),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Node {
    pub fn text(text: &str) -> Self {
        Node::Text(text.to_string())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Serializes the tree as HTML, escaping text and attribute values.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape_html(t)),
            Node::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_html(value));
                        out.push('"');
                    }
                }
                out.push('>');
                for child in &el.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ============ Template ============

/// The shared card skeleton every rendered card is cloned from.
#[derive(Debug, Clone)]
pub struct CardTemplate {
    root: Element,
}

impl CardTemplate {
    /// Wraps custom template markup. Slots the markup lacks are skipped
    /// during population; see [`CardTemplate::missing_slots`].
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Slot classes not found anywhere in the template.
    pub fn missing_slots(&self) -> Vec<&'static str> {
        ALL_SLOTS
            .iter()
            .copied()
            .filter(|slot| self.root.find_by_class(slot).is_none())
            .collect()
    }

    fn instantiate(&self) -> Element {
        self.root.clone()
    }
}

impl Default for CardTemplate {
    fn default() -> Self {
        let root = Element::new("article")
            .class("card")
            .child(Element::new("p").class(SLOT_CLAIM))
            .child(Element::new("div").class(SLOT_PILLS))
            .child(
                Element::new("div")
                    .class("card-meta")
                    .child(Element::new("span").class(SLOT_THEN))
                    .child(Element::new("span").class(SLOT_ISSUE)),
            )
            .child(
                Element::new("details")
                    .class("card-evidence")
                    .child(Element::new("summary").class(SLOT_EVIDENCE_SUMMARY))
                    .child(Element::new("ul").class(SLOT_EVIDENCE_LIST)),
            )
            .child(
                Element::new("a")
                    .class(SLOT_LINK)
                    .attr("target", "_blank")
                    .attr("rel", "noopener")
                    .child(Node::text("Read issue")),
            );
        Self { root }
    }
}

// ============ Projection ============

/// Exact slot contents for one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub claim: String,
    pub pills: Vec<Pill>,
    pub then: String,
    pub issue_line: String,
    pub evidence_summary: String,
    /// At most [`MAX_EVIDENCE_ITEMS`] quotes.
    pub evidence_items: Vec<String>,
    /// `None` hides the link control.
    pub link: Option<String>,
}

/// Formats the time range: `start–end`, a single endpoint, or the placeholder.
pub fn format_then(start: Option<&str>, end: Option<&str>) -> String {
    match (start, end) {
        (Some(s), Some(e)) if s != e => format!("{}\u{2013}{}", s, e),
        (Some(s), _) => s.to_string(),
        (None, Some(e)) => e.to_string(),
        (None, None) => PLACEHOLDER.to_string(),
    }
}

/// `{title} · {YYYY-MM-DD}` when a publish date is known, else the title.
pub fn format_issue_line(issue_title: &str, publish_date: Option<&str>) -> String {
    match publish_date {
        Some(date) => {
            let day: String = date.chars().take(PUBLISH_DATE_CHARS).collect();
            format!("{} \u{b7} {}", issue_title, day)
        }
        None => issue_title.to_string(),
    }
}

/// `Evidence ({n})`, or plain `Evidence` when there is none.
pub fn format_evidence_summary(count: usize) -> String {
    if count == 0 {
        "Evidence".to_string()
    } else {
        format!("Evidence ({})", count)
    }
}

/// Computes every slot's content for a card.
pub fn project(card: &NormalizedCard, pills: &[Pill]) -> CardView {
    CardView {
        claim: card.claim.clone(),
        pills: pills.to_vec(),
        then: format_then(card.then_start.as_deref(), card.then_end.as_deref()),
        issue_line: format_issue_line(&card.issue_title, card.publish_date.as_deref()),
        evidence_summary: format_evidence_summary(card.evidence.len()),
        evidence_items: card
            .evidence
            .iter()
            .take(MAX_EVIDENCE_ITEMS)
            .map(|e| e.quote.clone())
            .collect(),
        link: card.issue_url.clone().filter(|url| !url.is_empty()),
    }
}

/// Clones the template and populates it with `view`.
pub fn populate(template: &CardTemplate, view: &CardView) -> Node {
    let mut root = template.instantiate();

    if let Some(slot) = root.find_by_class_mut(SLOT_CLAIM) {
        slot.set_text(&view.claim);
    }
    if let Some(slot) = root.find_by_class_mut(SLOT_PILLS) {
        slot.children = view
            .pills
            .iter()
            .map(|pill| {
                Node::from(
                    Element::new("span")
                        .class(pill.kind.class())
                        .child(Node::text(&pill.text)),
                )
            })
            .collect();
    }
    if let Some(slot) = root.find_by_class_mut(SLOT_THEN) {
        slot.set_text(&view.then);
    }
    if let Some(slot) = root.find_by_class_mut(SLOT_ISSUE) {
        slot.set_text(&view.issue_line);
    }
    if let Some(slot) = root.find_by_class_mut(SLOT_EVIDENCE_SUMMARY) {
        slot.set_text(&view.evidence_summary);
    }
    if let Some(slot) = root.find_by_class_mut(SLOT_EVIDENCE_LIST) {
        slot.children = view
            .evidence_items
            .iter()
            .map(|quote| Node::from(Element::new("li").child(Node::text(quote))))
            .collect();
    }
    if let Some(slot) = root.find_by_class_mut(SLOT_LINK) {
        match &view.link {
            Some(url) => {
                slot.set_attr("href", url);
                slot.remove_attr("hidden");
            }
            None => {
                slot.remove_attr("href");
                slot.set_attr("hidden", "");
            }
        }
    }

    Node::Element(root)
}

/// Projects and populates in one step.
pub fn render_card(template: &CardTemplate, card: &NormalizedCard, pills: &[Pill]) -> Node {
    populate(template, &project(card, pills))
}
