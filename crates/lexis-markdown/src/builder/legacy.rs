use lexis_types::LegacyEntry;

use super::state::{Injector, NormalizationState};

type State<'a> = NormalizationState<'a, LegacyEntry>;

pub const LEGACY_INJECTORS: &[Injector<LegacyEntry>] =
    &[inject_term, inject_phonetic, inject_definitions, inject_example];

fn inject_term(mut state: State<'_>) -> State<'_> {
    let entry = state.entry;
    let term = entry.term.trim();
    if !term.is_empty() {
        state.push(format!("# {term}"));
    }
    state
}

fn inject_phonetic(mut state: State<'_>) -> State<'_> {
    let entry = state.entry;
    let Some(phonetic) = entry.phonetic.as_deref().map(str::trim).filter(|p| !p.is_empty()) else {
        return state;
    };
    state.start_section();
    state.push(format!("- {}: {phonetic}", state.labels.phonetic));
    state
}

fn inject_definitions(mut state: State<'_>) -> State<'_> {
    let entry = state.entry;
    let definitions: Vec<&str> = entry
        .definitions
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .collect();
    if definitions.is_empty() {
        return state;
    }

    state.start_section();
    for (i, definition) in definitions.iter().enumerate() {
        state.push(format!("{}. {definition}", i + 1));
    }
    state
}

fn inject_example(mut state: State<'_>) -> State<'_> {
    let entry = state.entry;
    let Some(example) = entry.example.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
        return state;
    };
    state.start_section();
    state.push(format!("**{}**: {example}", state.labels.example));
    state
}
