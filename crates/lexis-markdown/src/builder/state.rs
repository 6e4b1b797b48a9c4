use lexis_types::LabelLanguage;

/// Section headings emitted by the builder.
#[derive(Debug)]
pub struct HeadingSet {
    pub pronunciation: &'static str,
    pub definitions: &'static str,
    pub variants: &'static str,
    pub phrases: &'static str,
}

/// Inline field labels emitted by the builder.
#[derive(Debug)]
pub struct LabelSet {
    pub british: &'static str,
    pub american: &'static str,
    pub phonetic: &'static str,
    pub definition_translation: &'static str,
    pub synonyms: &'static str,
    pub antonyms: &'static str,
    pub related: &'static str,
    pub example: &'static str,
    pub translation: &'static str,
}

static ZH_HEADINGS: HeadingSet = HeadingSet {
    pronunciation: "发音",
    definitions: "释义",
    variants: "词形变化",
    phrases: "常用短语",
};

static EN_HEADINGS: HeadingSet = HeadingSet {
    pronunciation: "Pronunciation",
    definitions: "Definitions",
    variants: "Variant Forms",
    phrases: "Common Phrases",
};

static ZH_LABELS: LabelSet = LabelSet {
    british: "英式",
    american: "美式",
    phonetic: "音标",
    definition_translation: "释义",
    synonyms: "同义词",
    antonyms: "反义词",
    related: "相关词",
    example: "例句",
    translation: "翻译",
};

static EN_LABELS: LabelSet = LabelSet {
    british: "British",
    american: "American",
    phonetic: "Phonetic",
    definition_translation: "Meaning",
    synonyms: "Synonyms",
    antonyms: "Antonyms",
    related: "Related",
    example: "Example",
    translation: "Translation",
};

pub fn headings_for(language: LabelLanguage) -> &'static HeadingSet {
    match language {
        LabelLanguage::Zh => &ZH_HEADINGS,
        LabelLanguage::En => &EN_HEADINGS,
    }
}

pub fn labels_for(language: LabelLanguage) -> &'static LabelSet {
    match language {
        LabelLanguage::Zh => &ZH_LABELS,
        LabelLanguage::En => &EN_LABELS,
    }
}

/// Value threaded through the section injectors. Each injector takes the
/// state by value and returns it with its section appended.
pub struct NormalizationState<'a, E> {
    pub entry: &'a E,
    pub headings: &'static HeadingSet,
    pub labels: &'static LabelSet,
    pub lines: Vec<String>,
}

/// A section injector. Injectors with nothing to render return the state
/// unchanged.
pub type Injector<E> = for<'a> fn(NormalizationState<'a, E>) -> NormalizationState<'a, E>;

impl<'a, E> NormalizationState<'a, E> {
    pub fn new(entry: &'a E, language: LabelLanguage) -> Self {
        Self {
            entry,
            headings: headings_for(language),
            labels: labels_for(language),
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Separate a new section from whatever came before with one blank line.
    pub fn start_section(&mut self) {
        if self.lines.last().is_some_and(|line| !line.is_empty()) {
            self.lines.push(String::new());
        }
    }

    pub fn into_markdown(self) -> String {
        self.lines.join("\n")
    }
}

/// Fold the injectors over a fresh state.
pub fn run_injectors<E>(entry: &E, language: LabelLanguage, injectors: &[Injector<E>]) -> String {
    injectors
        .iter()
        .fold(NormalizationState::new(entry, language), |state, inject| {
            inject(state)
        })
        .into_markdown()
}
