use lexis_core::chars::{FULL_WIDTH_SEPARATOR, MIDDLE_DOT_SEPARATOR};
use lexis_types::{Phrase, Sense, StructuredEntry, VariantForm};

use super::state::{Injector, NormalizationState};

type State<'a> = NormalizationState<'a, StructuredEntry>;

pub const STRUCTURED_INJECTORS: &[Injector<StructuredEntry>] = &[
    inject_term,
    inject_phonetics,
    inject_definitions,
    inject_variants,
    inject_phrases,
];

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn inject_term(mut state: State<'_>) -> State<'_> {
    let entry = state.entry;
    let term = entry.term.trim();
    if !term.is_empty() {
        state.push(format!("# {term}"));
    }
    state
}

fn inject_phonetics(mut state: State<'_>) -> State<'_> {
    let entry = state.entry;
    let phonetics = &entry.phonetics;
    if phonetics.is_empty() {
        return state;
    }
    let accents = [
        (state.labels.british, non_blank(&phonetics.british)),
        (state.labels.american, non_blank(&phonetics.american)),
    ];

    state.start_section();
    state.push(format!("## {}", state.headings.pronunciation));
    for (label, value) in accents {
        if let Some(value) = value {
            state.push(format!("- {label}: {value}"));
        }
    }
    state
}

fn inject_definitions(mut state: State<'_>) -> State<'_> {
    let entry = state.entry;
    let has_senses = entry.sense_groups.iter().any(|group| !group.senses.is_empty());
    if !has_senses {
        return state;
    }

    state.start_section();
    state.push(format!("## {}", state.headings.definitions));

    for (g, group) in entry.sense_groups.iter().enumerate() {
        if group.senses.is_empty() {
            continue;
        }
        if let Some(title) = non_blank(&group.title) {
            state.start_section();
            state.push(format!("### {title}"));
        }
        for (s, sense) in group.senses.iter().enumerate() {
            push_sense(&mut state, g + 1, s + 1, sense);
        }
    }
    state
}

/// `{g}.{s}. {category} · {definition}` with its detail lines indented to
/// the definition text.
fn push_sense(state: &mut State<'_>, group: usize, index: usize, sense: &Sense) {
    let marker = format!("{group}.{index}. ");
    let indent = " ".repeat(marker.chars().count());
    let category = sense.category.trim();
    let definition = sense.definition.trim();

    let head = match (category.is_empty(), definition.is_empty()) {
        (false, false) => format!("{marker}{category}{MIDDLE_DOT_SEPARATOR}{definition}"),
        (false, true) => format!("{marker}{category}"),
        (true, _) => format!("{marker}{definition}"),
    };
    state.push(head.trim_end().to_string());

    let labels = state.labels;
    if let Some(translation) = non_blank(&sense.definition_translation) {
        state.push(format!(
            "{indent}**{}**: {translation}",
            labels.definition_translation
        ));
    }

    let relations = sense.merged_relations();
    if !relations.is_empty() {
        for (label, words) in [
            (labels.synonyms, &relations.synonyms),
            (labels.antonyms, &relations.antonyms),
            (labels.related, &relations.related),
        ] {
            let words: Vec<&str> = words
                .iter()
                .map(|w| w.trim())
                .filter(|w| !w.is_empty())
                .collect();
            if !words.is_empty() {
                state.push(format!(
                    "{indent}**{label}**: {}",
                    words.join(FULL_WIDTH_SEPARATOR)
                ));
            }
        }
    }

    for example in &sense.examples {
        let source = example.source.trim();
        if source.is_empty() {
            continue;
        }
        state.push(format!("{indent}**{}**: {source}", labels.example));
        if let Some(translation) = non_blank(&example.translation) {
            state.push(format!("{indent}**{}**: {translation}", labels.translation));
        }
    }
}

fn inject_variants(mut state: State<'_>) -> State<'_> {
    let lines: Vec<String> = state
        .entry
        .variants
        .iter()
        .filter_map(|variant| {
            let form = variant.form().trim();
            if form.is_empty() {
                return None;
            }
            match variant {
                VariantForm::Labeled {
                    label: Some(label), ..
                } if !label.trim().is_empty() => Some(format!("- {}: {form}", label.trim())),
                _ => Some(format!("- {form}")),
            }
        })
        .collect();
    if lines.is_empty() {
        return state;
    }

    state.start_section();
    state.push(format!("## {}", state.headings.variants));
    state.lines.extend(lines);
    state
}

fn inject_phrases(mut state: State<'_>) -> State<'_> {
    let lines: Vec<String> = state
        .entry
        .phrases
        .iter()
        .filter_map(|phrase: &Phrase| {
            let text = phrase.text().trim();
            if text.is_empty() {
                return None;
            }
            Some(match phrase.meaning() {
                Some(meaning) => format!("- {text} — {}", meaning.trim()),
                None => format!("- {text}"),
            })
        })
        .collect();
    if lines.is_empty() {
        return state;
    }

    state.start_section();
    state.push(format!("## {}", state.headings.phrases));
    state.lines.extend(lines);
    state
}
