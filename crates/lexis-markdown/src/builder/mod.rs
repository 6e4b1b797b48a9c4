//! Entry Markdown Builder.
//!
//! Every entry shape renders into one canonical document: the shape's
//! section injectors run over a [`NormalizationState`], then the result goes
//! through the normalization pipeline.

mod legacy;
mod state;
mod structured;

pub use state::{HeadingSet, Injector, LabelSet, NormalizationState, headings_for, labels_for};

use lexis_core::parse_entity;
use lexis_types::{LabelLanguage, ParsedEntity};
use serde_json::Value;

use crate::normalize::normalize_dictionary_markdown;
use legacy::LEGACY_INJECTORS;
use state::run_injectors;
use structured::STRUCTURED_INJECTORS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuilderOptions {
    pub language: LabelLanguage,
}

impl BuilderOptions {
    pub fn new(language: LabelLanguage) -> Self {
        Self { language }
    }
}

/// Render an entry with the default (Chinese) headings and labels.
pub fn build_dictionary_entry_markdown(entry: &ParsedEntity) -> String {
    build_entry_markdown_with(entry, &BuilderOptions::default())
}

pub fn build_entry_markdown_with(entry: &ParsedEntity, options: &BuilderOptions) -> String {
    let markdown = match entry {
        ParsedEntity::MarkdownOnly { markdown } => markdown.clone(),
        ParsedEntity::Structured(entry) => {
            run_injectors(entry, options.language, STRUCTURED_INJECTORS)
        }
        ParsedEntity::Legacy(entry) => run_injectors(entry, options.language, LEGACY_INJECTORS),
    };
    normalize_dictionary_markdown(&markdown).trim_end().to_string()
}

/// Ordered shape detection over a JSON value.
pub fn from_value(value: &Value) -> Option<ParsedEntity> {
    parse_entity(value)
}

/// Render a JSON value; objects that are not entries render as `""`.
pub fn build_markdown_from_value(value: &Value, options: &BuilderOptions) -> String {
    match from_value(value) {
        Some(entry) => build_entry_markdown_with(&entry, options),
        None => {
            tracing::debug!("value is not a dictionary entry, nothing to render");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run_entry() -> Value {
        json!({
            "term": "run",
            "phonetics": { "british": "/rʌn/", "american": "/rʌn/" },
            "senseGroups": [{
                "senses": [{
                    "category": "v.",
                    "definition": "to move swiftly",
                    "definitionTranslation": "快跑",
                    "synonyms": ["dash", "sprint"],
                    "examples": [{ "source": "I run every day.", "translation": "我每天跑步。" }]
                }]
            }],
            "variants": ["runs", { "form": "ran", "label": "过去式" }],
            "phrases": [{ "phrase": "run out", "meaning": "用完" }, "run into"]
        })
    }

    #[test]
    fn test_structured_entry() {
        let markdown = build_markdown_from_value(&run_entry(), &BuilderOptions::default());
        let expected = "\
# run

## 发音
- 英式: /rʌn/
- 美式: /rʌn/

## 释义
1.1. v. · to move swiftly
     **释义**: 快跑
     **同义词**: dash、sprint
     **例句**: I run every day.
     **翻译**: 我每天跑步。

## 词形变化
- runs
- 过去式: ran

## 常用短语
- run out — 用完
- run into";
        assert_eq!(markdown, expected);
    }

    #[test]
    fn test_structured_entry_in_english() {
        let markdown =
            build_markdown_from_value(&run_entry(), &BuilderOptions::new(LabelLanguage::En));
        assert!(markdown.contains("## Pronunciation\n- British: /rʌn/"));
        assert!(markdown.contains("     **Meaning**: 快跑"));
        assert!(markdown.contains("     **Example**: I run every day.\n     **Translation**: 我每天跑步。"));
        assert!(markdown.contains("## Variant Forms"));
        assert!(markdown.ends_with("## Common Phrases\n- run out — 用完\n- run into"));
    }

    #[test]
    fn test_group_titles_and_numbering() {
        let entry = json!({
            "term": "light",
            "senseGroups": [
                { "title": "noun", "senses": [{ "definition": "brightness" }] },
                { "title": "adjective", "senses": [
                    { "category": "adj.", "definition": "not heavy" },
                    { "category": "adj.", "definition": "pale" }
                ]}
            ]
        });
        let markdown = build_markdown_from_value(&entry, &BuilderOptions::default());
        assert_eq!(
            markdown,
            "# light\n\n## 释义\n\n### noun\n1.1. brightness\n\n### adjective\n2.1. adj. · not heavy\n2.2. adj. · pale"
        );
    }

    #[test]
    fn test_flat_sense_list() {
        let entry = json!({
            "term": "run",
            "senses": [
                { "category": "v.", "definition": "to move fast" },
                { "definition": "to operate" }
            ]
        });
        assert_eq!(
            build_markdown_from_value(&entry, &BuilderOptions::default()),
            "# run\n\n## 释义\n1.1. v. · to move fast\n1.2. to operate"
        );
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let entry = json!({ "term": "run", "phonetics": { "uk": " " }, "phrases": [] , "senses": [] });
        assert_eq!(build_markdown_from_value(&entry, &BuilderOptions::default()), "# run");
    }

    #[test]
    fn test_legacy_entry() {
        let entry = json!({
            "word": "run",
            "phonetic": "/rʌn/",
            "definitions": ["to move fast", " ", "to flee"],
            "example": "I run every day."
        });
        assert_eq!(
            build_markdown_from_value(&entry, &BuilderOptions::default()),
            "# run\n\n- 音标: /rʌn/\n\n1. to move fast\n2. to flee\n\n**例句**: I run every day."
        );
    }

    #[test]
    fn test_markdown_only_round_trip() {
        let entry = ParsedEntity::MarkdownOnly {
            markdown: "# Title   ".to_string(),
        };
        assert_eq!(build_dictionary_entry_markdown(&entry), "# Title");
    }

    #[test]
    fn test_non_entry_renders_empty() {
        assert_eq!(
            build_markdown_from_value(&json!({ "status": "ok" }), &BuilderOptions::default()),
            ""
        );
    }
}
