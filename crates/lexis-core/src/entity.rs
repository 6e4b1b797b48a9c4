use lexis_types::{LegacyEntry, ParsedEntity, StructuredEntry};
use serde_json::Value;

use crate::error::CoreError;

/// Keys that mark the bilingual sense-tree shape.
const STRUCTURED_KEYS: &[&str] = &[
    "senseGroups",
    "sense_groups",
    "senses",
    "groups",
    "phrases",
    "commonPhrases",
    "common_phrases",
    "variants",
    "variantForms",
    "variant_forms",
    "forms",
    "phonetics",
];

/// Keys that mark the flat legacy shape.
const LEGACY_KEYS: &[&str] = &["term", "word", "definitions", "meanings", "example", "phonetic"];

/// Detect the entry shape of a JSON object. Order matters: markdown-only,
/// then structured, then legacy; the first match wins.
pub fn parse_entity(value: &Value) -> Option<ParsedEntity> {
    let object = value.as_object()?;

    if let Some(markdown) = object.get("markdown").and_then(Value::as_str) {
        if !markdown.trim().is_empty() {
            return Some(ParsedEntity::MarkdownOnly {
                markdown: markdown.to_string(),
            });
        }
    }

    if STRUCTURED_KEYS.iter().any(|key| object.contains_key(*key)) {
        match serde_json::from_value::<StructuredEntry>(value.clone()) {
            Ok(entry) => return Some(ParsedEntity::Structured(entry)),
            Err(e) => tracing::debug!("structured entry keys present but decoding failed: {e}"),
        }
    }

    if LEGACY_KEYS.iter().any(|key| object.contains_key(*key)) {
        match serde_json::from_value::<LegacyEntry>(value.clone()) {
            Ok(entry) => return Some(ParsedEntity::Legacy(entry)),
            Err(e) => tracing::debug!("legacy entry keys present but decoding failed: {e}"),
        }
    }

    None
}

/// Parse JSON text into an entry, reporting why it failed.
pub fn parse_entity_str(text: &str) -> Result<ParsedEntity, CoreError> {
    let value: Value = serde_json::from_str(text)?;
    parse_entity(&value).ok_or_else(|| {
        let keys = value
            .as_object()
            .map(|o| o.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_else(|| "not an object".to_string());
        CoreError::UnrecognizedEntry(keys)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_markdown_wins_over_other_keys() {
        let value = json!({ "markdown": "# run", "term": "run", "senseGroups": [] });
        assert_eq!(
            parse_entity(&value),
            Some(ParsedEntity::MarkdownOnly {
                markdown: "# run".to_string()
            })
        );
    }

    #[test]
    fn test_empty_markdown_falls_through() {
        let value = json!({ "markdown": "  ", "term": "run", "definitions": ["to move"] });
        match parse_entity(&value) {
            Some(ParsedEntity::Legacy(entry)) => assert_eq!(entry.definitions, vec!["to move"]),
            other => panic!("expected legacy entry, got {other:?}"),
        }
    }

    #[test]
    fn test_structured_before_legacy() {
        let value = json!({ "term": "run", "phrases": ["run out"], "definitions": [] });
        assert!(matches!(parse_entity(&value), Some(ParsedEntity::Structured(_))));
    }

    #[test]
    fn test_broken_structured_falls_back_to_legacy() {
        let value = json!({ "term": "run", "phrases": 5, "example": "I run." });
        match parse_entity(&value) {
            Some(ParsedEntity::Legacy(entry)) => assert_eq!(entry.example.as_deref(), Some("I run.")),
            other => panic!("expected legacy entry, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(parse_entity(&json!({ "status": "pending" })), None);
        assert_eq!(parse_entity(&json!([1, 2])), None);
        assert!(matches!(
            parse_entity_str(r#"{"status":"pending"}"#),
            Err(CoreError::UnrecognizedEntry(_))
        ));
        assert!(matches!(parse_entity_str("{"), Err(CoreError::InvalidJson(_))));
    }
}
