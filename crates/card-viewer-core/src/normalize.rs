//! Raw card normalization.
//!
//! The backend has emitted cards under two naming conventions over time
//! (`thenStart` and `then_start`, `issueUrl` and `issue_url`, ...). Rather
//! than branching per field, every logical field is resolved through
//! [`FIELD_TABLE`]: an ordered list of candidate source keys plus an
//! optional computed fallback. Supporting a third convention is a table
//! edit.
//!
//! # Resolution
//!
//! 1. Try each candidate key in order; the first one that is present and
//!    carries a usable value wins (`null` and `""` are skipped).
//! 2. If no key matched and the rule has a [`Fallback`], compute it.
//! 3. Otherwise the field takes its empty value (`""`, `[]`, or `None`).
//!
//! Normalization is total: any JSON value, including non-objects, yields
//! a fully-defined [`NormalizedCard`].

use serde_json::{Map, Value};

use crate::models::{Evidence, NormalizedCard, RawCard};

/// Logical card fields, independent of any wire naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Claim,
    Tags,
    LinkType,
    ThenStart,
    ThenEnd,
    IssueTitle,
    BeehiivId,
    PublishDate,
    Evidence,
    IssueUrl,
}

/// Computed value used when none of a field's keys resolved.
#[derive(Debug, Clone, Copy)]
pub enum Fallback {
    /// `"{prefix}{value of field}"`, only when that field itself resolves.
    Prefixed { prefix: &'static str, from: Field },
}

/// How one logical field is read from a raw card.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    /// Candidate keys, highest precedence first.
    pub keys: &'static [&'static str],
    pub fallback: Option<Fallback>,
}

const fn rule(field: Field, keys: &'static [&'static str]) -> FieldRule {
    FieldRule {
        field,
        keys,
        fallback: None,
    }
}

/// The field-resolution table. Camel-case keys take precedence.
pub const FIELD_TABLE: &[FieldRule] = &[
    rule(Field::Claim, &["claim"]),
    rule(Field::Tags, &["tags"]),
    rule(Field::LinkType, &["linkType", "link_type"]),
    rule(Field::ThenStart, &["thenStart", "then_start"]),
    rule(Field::ThenEnd, &["thenEnd", "then_end"]),
    FieldRule {
        field: Field::IssueTitle,
        keys: &["issueTitle", "issue_title"],
        fallback: Some(Fallback::Prefixed {
            prefix: "Issue ",
            from: Field::BeehiivId,
        }),
    },
    rule(Field::BeehiivId, &["beehiivId", "beehiiv_id"]),
    rule(Field::PublishDate, &["publishDate", "publish_date"]),
    rule(Field::Evidence, &["evidence"]),
    rule(Field::IssueUrl, &["issueUrl", "issue_url", "url"]),
];

/// Looks up the rule for `field`.
pub fn rule_for(field: Field) -> Option<&'static FieldRule> {
    FIELD_TABLE.iter().find(|r| r.field == field)
}

/// Normalizes one raw card. Never fails.
pub fn normalize(raw: &RawCard) -> NormalizedCard {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    NormalizedCard {
        claim: resolve_text(obj, Field::Claim).unwrap_or_default(),
        tags: resolve(obj, Field::Tags).map(tag_list).unwrap_or_default(),
        link_type: resolve_text(obj, Field::LinkType),
        then_start: resolve_text(obj, Field::ThenStart),
        then_end: resolve_text(obj, Field::ThenEnd),
        issue_title: resolve_text(obj, Field::IssueTitle).unwrap_or_default(),
        beehiiv_id: resolve_text(obj, Field::BeehiivId),
        publish_date: resolve_text(obj, Field::PublishDate),
        evidence: resolve(obj, Field::Evidence)
            .map(evidence_list)
            .unwrap_or_default(),
        issue_url: resolve_text(obj, Field::IssueUrl),
    }
}

/// Normalizes a whole response, preserving order.
pub fn normalize_all(raws: &[RawCard]) -> Vec<NormalizedCard> {
    raws.iter().map(normalize).collect()
}

/// Renders a JSON value as display text.
///
/// Strings are taken verbatim, scalars use their JSON spelling (so `null`
/// becomes `"null"`), and compound values are compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_usable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn resolve(obj: &Map<String, Value>, field: Field) -> Option<&Value> {
    let rule = rule_for(field)?;
    rule.keys
        .iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| is_usable(value))
}

fn resolve_text(obj: &Map<String, Value>, field: Field) -> Option<String> {
    if let Some(value) = resolve(obj, field) {
        return Some(stringify(value));
    }
    match rule_for(field)?.fallback? {
        Fallback::Prefixed { prefix, from } => {
            resolve(obj, from).map(|value| format!("{}{}", prefix, stringify(value)))
        }
    }
}

fn tag_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(stringify).collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn evidence_list(value: &Value) -> Vec<Evidence> {
    match value {
        Value::Array(items) => items.iter().map(evidence_item).collect(),
        _ => Vec::new(),
    }
}

fn evidence_item(item: &Value) -> Evidence {
    let quote = match item.get("quote") {
        Some(quote) if !quote.is_null() => stringify(quote),
        _ => stringify(item),
    };
    Evidence { quote }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_fully_defined() {
        let card = normalize(&json!({}));
        assert_eq!(card, NormalizedCard::default());
    }

    #[test]
    fn test_non_object_is_total() {
        for raw in [json!(null), json!(42), json!("card"), json!([1, 2])] {
            assert_eq!(normalize(&raw), NormalizedCard::default());
        }
    }

    #[test]
    fn test_camel_case_wins() {
        let card = normalize(&json!({"thenStart": "2024", "then_start": "2023"}));
        assert_eq!(card.then_start.as_deref(), Some("2024"));
    }

    #[test]
    fn test_snake_case_used_when_camel_missing_or_null() {
        let card = normalize(&json!({
            "thenStart": null,
            "then_start": "2023",
            "then_end": "2024",
            "link_type": "supports",
            "issue_title": "Weekly",
            "publish_date": "2024-03-05T10:00:00Z",
            "issue_url": "https://example.com/p/1",
        }));
        assert_eq!(card.then_start.as_deref(), Some("2023"));
        assert_eq!(card.then_end.as_deref(), Some("2024"));
        assert_eq!(card.link_type.as_deref(), Some("supports"));
        assert_eq!(card.issue_title, "Weekly");
        assert_eq!(card.publish_date.as_deref(), Some("2024-03-05T10:00:00Z"));
        assert_eq!(card.issue_url.as_deref(), Some("https://example.com/p/1"));
    }

    #[test]
    fn test_issue_title_falls_back_to_id() {
        let card = normalize(&json!({"beehiiv_id": "post_42"}));
        assert_eq!(card.issue_title, "Issue post_42");
        assert_eq!(card.beehiiv_id.as_deref(), Some("post_42"));

        let numeric = normalize(&json!({"beehiivId": 7}));
        assert_eq!(numeric.issue_title, "Issue 7");
    }

    #[test]
    fn test_explicit_title_beats_fallback() {
        let card = normalize(&json!({"issueTitle": "Daily", "beehiivId": "x"}));
        assert_eq!(card.issue_title, "Daily");
    }

    #[test]
    fn test_generic_url_is_last_resort() {
        let card = normalize(&json!({"url": "https://a.example"}));
        assert_eq!(card.issue_url.as_deref(), Some("https://a.example"));

        let card = normalize(&json!({"url": "https://a.example", "issue_url": "https://b.example"}));
        assert_eq!(card.issue_url.as_deref(), Some("https://b.example"));
    }

    #[test]
    fn test_evidence_shapes() {
        let card = normalize(&json!({
            "evidence": [
                {"quote": "first"},
                "second",
                null,
                {"source": "x"},
                3
            ]
        }));
        let quotes: Vec<&str> = card.evidence.iter().map(|e| e.quote.as_str()).collect();
        assert_eq!(quotes, vec!["first", "second", "null", r#"{"source":"x"}"#, "3"]);
    }

    #[test]
    fn test_tags_shapes() {
        assert_eq!(normalize(&json!({"tags": ["a", "b"]})).tags, vec!["a", "b"]);
        assert_eq!(normalize(&json!({"tags": "solo"})).tags, vec!["solo"]);
        assert!(normalize(&json!({"tags": {"a": 1}})).tags.is_empty());
    }

    #[test]
    fn test_empty_string_falls_through() {
        let card = normalize(&json!({"linkType": "", "link_type": "refutes"}));
        assert_eq!(card.link_type.as_deref(), Some("refutes"));
    }

    #[test]
    fn test_every_field_has_a_rule() {
        for field in [
            Field::Claim,
            Field::Tags,
            Field::LinkType,
            Field::ThenStart,
            Field::ThenEnd,
            Field::IssueTitle,
            Field::BeehiivId,
            Field::PublishDate,
            Field::Evidence,
            Field::IssueUrl,
        ] {
            assert!(rule_for(field).is_some(), "missing rule for {:?}", field);
        }
    }
}
