//! Frozen bilingual vocabularies. Label sets hold folded forms
//! (see [`lexis_core::preprocess::fold_label`]).

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

const ENGLISH_LABELS: &[&str] = &[
    "definition",
    "definitions",
    "meaning",
    "meanings",
    "translation",
    "translations",
    "example",
    "examples",
    "synonym",
    "synonyms",
    "antonym",
    "antonyms",
    "related",
    "relatedwords",
    "phonetic",
    "phonetics",
    "pronunciation",
    "british",
    "american",
    "partofspeech",
    "usage",
    "usagenote",
    "usagenotes",
    "note",
    "notes",
    "collocation",
    "collocations",
    "phrase",
    "phrases",
    "commonphrases",
    "variant",
    "variants",
    "variantforms",
    "sense",
    "senses",
    "origin",
    "etymology",
    "practiceprompts",
    "explanation",
];

const CHINESE_LABELS: &[&str] = &[
    "释义",
    "定义",
    "含义",
    "意思",
    "例句",
    "例子",
    "示例",
    "翻译",
    "译文",
    "中文翻译",
    "同义词",
    "近义词",
    "反义词",
    "相关词",
    "相关词汇",
    "音标",
    "发音",
    "英式",
    "美式",
    "英音",
    "美音",
    "词性",
    "用法",
    "用法说明",
    "注释",
    "注意",
    "备注",
    "搭配",
    "固定搭配",
    "短语",
    "常用短语",
    "词组",
    "变形",
    "词形变化",
    "变体",
    "词源",
    "练习",
];

const EXAMPLE_LABELS: &[&str] = &["example", "examples", "例句", "例子", "示例"];

const TRANSLATION_LABELS: &[&str] = &["translation", "翻译", "译文", "中文翻译"];

/// Section headings that may arrive glued to their first body line.
const SECTION_HEADINGS: &[&str] = &[
    "Definitions",
    "Meanings",
    "Examples",
    "Synonyms",
    "Antonyms",
    "Related Words",
    "Common Phrases",
    "Phrases",
    "Variant Forms",
    "Variants",
    "Phonetics",
    "Pronunciation",
    "Usage Notes",
    "Usage",
    "Etymology",
    "Collocations",
    "释义",
    "例句",
    "同义词",
    "反义词",
    "相关词",
    "常用短语",
    "词形变化",
    "发音",
    "用法说明",
    "用法",
    "词源",
    "搭配",
];

/// Headings whose trailing `- item` belongs on its own list line.
const LIST_TITLES: &[&str] = &[
    "definitions",
    "examples",
    "synonyms",
    "antonyms",
    "phrases",
    "commonphrases",
    "variantforms",
    "collocations",
    "释义",
    "例句",
    "同义词",
    "反义词",
    "常用短语",
    "词形变化",
    "搭配",
];

static STATIC_LABELS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ENGLISH_LABELS
        .iter()
        .chain(CHINESE_LABELS.iter())
        .copied()
        .collect()
});

static DYNAMIC_LABELS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"^(?:s|sense)\d+", r"^example\d+$", r"^practiceprompts\d+"]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("Valid dynamic label regex"))
        .collect()
});

static NUMBERED_EXAMPLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^example\d+$").expect("Valid numbered example regex"));

static SORTED_SECTION_HEADINGS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut headings = SECTION_HEADINGS.to_vec();
    headings.sort_by_key(|h| std::cmp::Reverse(h.chars().count()));
    headings
});

static LIST_TITLE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| LIST_TITLES.iter().copied().collect());

pub fn is_static_label(folded: &str) -> bool {
    STATIC_LABELS.contains(folded)
}

pub fn is_dynamic_label(folded: &str) -> bool {
    DYNAMIC_LABELS.iter().any(|re| re.is_match(folded))
}

pub fn is_example_label(folded: &str) -> bool {
    EXAMPLE_LABELS.contains(&folded) || NUMBERED_EXAMPLE.is_match(folded)
}

pub fn is_translation_label(folded: &str) -> bool {
    TRANSLATION_LABELS.contains(&folded)
}

/// Section headings, longest first.
pub fn section_headings() -> &'static [&'static str] {
    &SORTED_SECTION_HEADINGS
}

pub fn is_list_title(folded: &str) -> bool {
    LIST_TITLE_SET.contains(folded)
}
