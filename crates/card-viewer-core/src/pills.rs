//! Pill extraction.
//!
//! A card shows at most one type pill (its link type) followed by up to
//! [`MAX_TAG_PILLS`] tag pills in source order. Truncation is silent and
//! tags are not deduplicated.

use serde::Serialize;

use crate::models::NormalizedCard;

/// Maximum number of tag pills shown per card.
pub const MAX_TAG_PILLS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PillKind {
    Type,
    Tag,
}

impl PillKind {
    /// CSS class distinguishing the two pill styles.
    pub fn class(self) -> &'static str {
        match self {
            PillKind::Type => "pill pill-type",
            PillKind::Tag => "pill pill-tag",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pill {
    pub text: String,
    pub kind: PillKind,
}

/// Derives the ordered pill list for a card.
pub fn extract_pills(card: &NormalizedCard) -> Vec<Pill> {
    let type_pill = card
        .link_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| Pill {
            text: t.to_string(),
            kind: PillKind::Type,
        });

    type_pill
        .into_iter()
        .chain(card.tags.iter().take(MAX_TAG_PILLS).map(|tag| Pill {
            text: tag.clone(),
            kind: PillKind::Tag,
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(link_type: Option<&str>, tags: &[&str]) -> NormalizedCard {
        NormalizedCard {
            link_type: link_type.map(String::from),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_pills() {
        assert!(extract_pills(&card(None, &[])).is_empty());
    }

    #[test]
    fn test_type_pill_first() {
        let pills = extract_pills(&card(Some("supports"), &["a", "b"]));
        assert_eq!(pills[0].kind, PillKind::Type);
        assert_eq!(pills[0].text, "supports");
        assert_eq!(pills[1].text, "a");
        assert_eq!(pills[2].text, "b");
    }

    #[test]
    fn test_capped_at_one_type_plus_eight_tags() {
        let tags: Vec<String> = (0..12).map(|i| format!("t{}", i)).collect();
        let refs: Vec<&str> = tags.iter().map(String::as_str).collect();
        let pills = extract_pills(&card(Some("contradicts"), &refs));

        assert_eq!(pills.len(), 9);
        assert_eq!(pills[0].kind, PillKind::Type);
        let tag_texts: Vec<&str> = pills[1..].iter().map(|p| p.text.as_str()).collect();
        assert_eq!(tag_texts, refs[..8].to_vec());
        assert!(pills[1..].iter().all(|p| p.kind == PillKind::Tag));
    }

    #[test]
    fn test_duplicates_kept() {
        let pills = extract_pills(&card(None, &["x", "x"]));
        assert_eq!(pills.len(), 2);
    }

    #[test]
    fn test_empty_link_type_yields_no_type_pill() {
        let pills = extract_pills(&card(Some(""), &["a"]));
        assert_eq!(pills.len(), 1);
        assert_eq!(pills[0].kind, PillKind::Tag);
    }
}
