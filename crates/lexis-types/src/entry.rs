use serde::{Deserialize, Deserializer, Serialize};

/// A dictionary entry recovered from the lookup stream.
///
/// Exactly one shape applies to a given JSON object; detection order is
/// markdown-only, then structured, then legacy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ParsedEntity {
    MarkdownOnly { markdown: String },
    Structured(StructuredEntry),
    Legacy(LegacyEntry),
}

impl ParsedEntity {
    pub fn term(&self) -> Option<&str> {
        match self {
            ParsedEntity::MarkdownOnly { .. } => None,
            ParsedEntity::Structured(entry) => Some(entry.term.as_str()),
            ParsedEntity::Legacy(entry) => Some(entry.term.as_str()),
        }
    }
}

/// Bilingual sense-tree entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StructuredEntry {
    #[serde(alias = "word", alias = "headword")]
    pub term: String,
    pub phonetics: Phonetics,
    #[serde(
        alias = "senses",
        alias = "groups",
        alias = "sense_groups",
        deserialize_with = "groups_or_flat_senses"
    )]
    pub sense_groups: Vec<SenseGroup>,
    #[serde(alias = "variantForms", alias = "variant_forms", alias = "forms")]
    pub variants: Vec<VariantForm>,
    #[serde(alias = "commonPhrases", alias = "common_phrases")]
    pub phrases: Vec<Phrase>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phonetics {
    #[serde(alias = "uk", alias = "British")]
    pub british: Option<String>,
    #[serde(alias = "us", alias = "American")]
    pub american: Option<String>,
}

impl Phonetics {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.british) && is_blank(&self.american)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenseGroup {
    pub title: Option<String>,
    #[serde(alias = "definitions", alias = "items")]
    pub senses: Vec<Sense>,
}

/// A group object must carry its sense list; anything else is read as a
/// bare sense.
#[derive(Deserialize)]
struct ListedGroup {
    #[serde(default)]
    title: Option<String>,
    #[serde(alias = "definitions", alias = "items")]
    senses: Vec<Sense>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GroupOrSense {
    Group(ListedGroup),
    Sense(Sense),
}

/// Accept both `[{ title, senses: [..] }]` and a flat `[{ definition }]`
/// list. Consecutive bare senses share one untitled group.
fn groups_or_flat_senses<'de, D>(deserializer: D) -> Result<Vec<SenseGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<GroupOrSense>::deserialize(deserializer)?;
    let mut groups: Vec<SenseGroup> = Vec::new();
    let mut collecting = false;

    for item in items {
        match item {
            GroupOrSense::Group(group) => {
                groups.push(SenseGroup {
                    title: group.title,
                    senses: group.senses,
                });
                collecting = false;
            }
            GroupOrSense::Sense(sense) => match groups.last_mut() {
                Some(last) if collecting => last.senses.push(sense),
                _ => {
                    groups.push(SenseGroup {
                        title: None,
                        senses: vec![sense],
                    });
                    collecting = true;
                }
            },
        }
    }

    Ok(groups)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sense {
    #[serde(alias = "partOfSpeech", alias = "part_of_speech", alias = "pos")]
    pub category: String,
    #[serde(alias = "meaning")]
    pub definition: String,
    #[serde(alias = "translation", alias = "definition_translation")]
    pub definition_translation: Option<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    #[serde(alias = "relatedWords", alias = "related_words")]
    pub related: Vec<String>,
    pub relations: Option<Relations>,
    pub examples: Vec<Example>,
}

impl Sense {
    /// Relations declared inline and under `relations`, merged.
    pub fn merged_relations(&self) -> Relations {
        let mut merged = Relations {
            synonyms: self.synonyms.clone(),
            antonyms: self.antonyms.clone(),
            related: self.related.clone(),
        };
        if let Some(nested) = &self.relations {
            extend_unique(&mut merged.synonyms, &nested.synonyms);
            extend_unique(&mut merged.antonyms, &nested.antonyms);
            extend_unique(&mut merged.related, &nested.related);
        }
        merged
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Relations {
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    #[serde(alias = "relatedWords", alias = "related_words")]
    pub related: Vec<String>,
}

impl Relations {
    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty() && self.antonyms.is_empty() && self.related.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Example {
    #[serde(alias = "sentence", alias = "en", alias = "text")]
    pub source: String,
    #[serde(alias = "zh")]
    pub translation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantForm {
    Plain(String),
    Labeled {
        form: String,
        #[serde(default, alias = "type")]
        label: Option<String>,
    },
}

impl VariantForm {
    pub fn form(&self) -> &str {
        match self {
            VariantForm::Plain(form) => form,
            VariantForm::Labeled { form, .. } => form,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Phrase {
    Plain(String),
    Detailed {
        #[serde(alias = "term", alias = "text")]
        phrase: String,
        #[serde(default, alias = "translation", alias = "definition")]
        meaning: Option<String>,
    },
}

impl Phrase {
    pub fn text(&self) -> &str {
        match self {
            Phrase::Plain(text) => text,
            Phrase::Detailed { phrase, .. } => phrase,
        }
    }

    pub fn meaning(&self) -> Option<&str> {
        match self {
            Phrase::Plain(_) => None,
            Phrase::Detailed { meaning, .. } => meaning.as_deref().filter(|m| !m.trim().is_empty()),
        }
    }
}

/// Flat entry shape produced by older lookup backends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyEntry {
    #[serde(alias = "word")]
    pub term: String,
    pub phonetic: Option<String>,
    #[serde(alias = "meanings")]
    pub definitions: Vec<String>,
    pub example: Option<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn extend_unique(target: &mut Vec<String>, extra: &[String]) {
    for item in extra {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}
