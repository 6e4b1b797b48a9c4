use lexis_types::LabelLanguage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Language of the headings and labels in rendered entries
    pub label_language: LabelLanguage,
}

impl MarkdownConfig {
    pub fn new() -> Self {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let label_language = crate::parsed_or(lookup, "LEXIS_LABEL_LANGUAGE", LabelLanguage::Zh);
        Self { label_language }
    }
}
