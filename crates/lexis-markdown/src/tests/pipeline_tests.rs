use crate::normalize::{PASSES, normalize_dictionary_markdown};

const CORPUS: &[(&str, &str)] = &[
    (
        "- **例句**: She bought X. 翻译: 她买了X。",
        "- **例句**: She bought X.\n  翻译: 她买了X。",
    ),
    (
        "- **例句**: She smiled. (她笑了。)",
        "- **例句**: She smiled.\n  **翻译**: 她笑了。",
    ),
    ("# Title   ", "# Title"),
    (
        "Use `Config.Value` here.Then",
        "Use `Config.Value` here. Then",
    ),
    (
        "## 释义1.to move## 例句She runs.",
        "## 释义\n1. to move\n\n## 例句\nShe runs.",
    ),
    (
        "```\n##Title\na,b\n```\nafter,b",
        "```\n##Title\na,b\n```\nafter, b",
    ),
    (
        "Synonyms: dash  Antonyms: walk",
        "Synonyms: dash\nAntonyms: walk",
    ),
    ("##\nDefinitions - to run", "## Definitions\n- to run"),
    (
        "Sensess1Verb:to move",
        "Senses\n**Sense 1 · Verb**: to move",
    ),
    ("1.Item\n2.Other", "1. Item\n2. Other"),
    (
        "Version 3.5 costs 1,000 dollars.See www.example.com",
        "Version 3.5 costs 1,000 dollars. See www.example.com",
    ),
    (
        "- **例句**: 她[[喜欢]]读书。",
        "- **例句**: 她 [[喜欢]] 读书。",
    ),
    (
        "1. to run - **Example**: I run. (我跑。)",
        "1. to run\n   **Example**: I run.\n   **Translation**: 我跑。",
    ),
    ("\r\n\r\n##Title\r\ntext\r\n\r\n\r\n", "## Title\ntext"),
    ("#run## Definitions", "# run\n\n## Definitions"),
    ("##Synonyms##3释义", "## Synonyms##3释义"),
    ("hello.world", "hello. world"),
];

#[test]
fn test_corpus_expectations() {
    for (input, expected) in CORPUS {
        assert_eq!(
            normalize_dictionary_markdown(input),
            *expected,
            "input: {input:?}"
        );
    }
}

#[test]
fn test_pipeline_is_idempotent() {
    for (input, _) in CORPUS {
        let once = normalize_dictionary_markdown(input);
        let twice = normalize_dictionary_markdown(&once);
        assert_eq!(once, twice, "input: {input:?}");
    }
}

mod generated {
    use super::*;
    use proptest::prelude::*;

    /// Fragments that exercise every pass when glued together at random.
    const ATOMS: &[&str] = &[
        "#", "##", "###", " ", "  ", "\t", "\n", "\n\n", "\r\n", "```", "`", "**", ":", "：",
        "-", "—", "•", "1.", "2)", "3.5", "1,000", ".", ",", "!", "?", ";", "(", ")", "（",
        "）", "[[", "]]", "{{", "}}", "例句", "翻译", "释义", "同义词", "Example", "Translation",
        "Synonyms", "Definitions", "Examples", "s1Verb", "senses", "relatedWords", "run",
        "She", "U", "S", "她", "跑", "。", "http://a.b/c", "me@x.io", "#tag#",
    ];

    fn markdownish() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(ATOMS), 0..32).prop_map(|atoms| atoms.concat())
    }

    proptest! {
        #[test]
        fn test_pipeline_is_idempotent_on_generated_text(text in markdownish()) {
            let once = normalize_dictionary_markdown(&text);
            let twice = normalize_dictionary_markdown(&once);
            prop_assert_eq!(twice, once, "input: {:?}", text);
        }
    }
}

#[test]
fn test_fence_content_is_untouched() {
    let text = "```\n`config.value.with.dots`\n1.Item\nexample:  x  Synonyms: y\n```";
    assert_eq!(normalize_dictionary_markdown(text), text);
    assert_eq!(
        normalize_dictionary_markdown("see `config.value.with.dots` now"),
        "see `config.value.with.dots` now"
    );
}

#[test]
fn test_label_promotion_leaves_translation_text_alone() {
    let output = normalize_dictionary_markdown("- **例句**: She bought X. 翻译: 她买了X。");
    let second = output.lines().nth(1);
    assert_eq!(second, Some("  翻译: 她买了X。"));
}

#[test]
fn test_pass_names_are_unique() {
    let mut names: Vec<_> = PASSES.iter().map(|p| p.name).collect();
    let count = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), count);
    assert_eq!(count, 14);
}
