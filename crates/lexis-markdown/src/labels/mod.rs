//! Label Candidate Resolver.
//!
//! A label is a short field name such as `例句`, `Synonyms` or `s1Verb` that
//! introduces a value after a colon. The resolver decides membership by
//! folding the raw text and checking every folded form against the static
//! bilingual vocabulary and the numbered patterns.

mod humanize;
pub mod vocabulary;

pub use humanize::{humanize_label, split_words};

use lexis_core::chars::{is_colon, is_han};
use lexis_core::preprocess::fold_label;

use self::vocabulary::{is_dynamic_label, is_example_label, is_static_label, is_translation_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Example,
    Translation,
    Other,
}

/// Normalized forms of one raw label.
#[derive(Debug, Clone)]
pub struct LabelCandidate {
    compact: String,
    tokens: Vec<String>,
}

impl LabelCandidate {
    pub fn new(raw: &str) -> Self {
        Self {
            compact: fold_label(raw),
            tokens: tokenize(raw),
        }
    }

    /// Exact member of the static vocabulary.
    pub fn is_exact(&self) -> bool {
        is_static_label(&self.compact)
    }

    pub fn is_dynamic(&self) -> bool {
        is_dynamic_label(&self.compact)
    }

    pub fn is_label(&self) -> bool {
        if self.compact.is_empty() {
            return false;
        }
        self.is_exact()
            || self.is_dynamic()
            || (self.tokens.len() > 1 && self.tokens.iter().all(|t| is_static_label(t)))
    }

    pub fn kind(&self) -> Option<LabelKind> {
        if !self.is_label() {
            return None;
        }
        let forms = || std::iter::once(&self.compact).chain(self.tokens.iter());
        if forms().any(|f| is_example_label(f)) {
            Some(LabelKind::Example)
        } else if forms().any(|f| is_translation_label(f)) {
            Some(LabelKind::Translation)
        } else {
            Some(LabelKind::Other)
        }
    }
}

/// Folded tokens split on separators and Han/non-Han transitions.
fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_han = false;

    for c in raw.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        let han = is_han(c);
        if !current.is_empty() && han != current_han {
            tokens.push(std::mem::take(&mut current));
        }
        current_han = han;
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
        .iter()
        .map(|t| fold_label(t))
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn is_label(raw: &str) -> bool {
    LabelCandidate::new(raw).is_label()
}

pub fn label_kind(raw: &str) -> Option<LabelKind> {
    LabelCandidate::new(raw).kind()
}

/// A label that opens a line's content, e.g. `**例句**: ` or `Translation：`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadingLabel<'a> {
    pub label: &'a str,
    pub kind: LabelKind,
    pub bold: bool,
    /// Byte offset of the value after the colon and any whitespace
    pub value_start: usize,
}

const MAX_BARE_LABEL_CHARS: usize = 32;

/// Parse a label at the very start of `content`. A colon is required.
pub fn leading_label(content: &str) -> Option<LeadingLabel<'_>> {
    let (label, after, bold) = if let Some(inner) = content.strip_prefix("**") {
        let close = inner.find("**")?;
        let label = &inner[..close];
        let mut after = 2 + close + 2;
        let trimmed = label.trim_end();
        let label = match trimmed.chars().last() {
            Some(c) if is_colon(c) => &trimmed[..trimmed.len() - c.len_utf8()],
            _ => {
                let c = content[after..].chars().next().filter(|c| is_colon(*c))?;
                after += c.len_utf8();
                label
            }
        };
        (label.trim(), after, true)
    } else {
        let (colon_at, colon) = content.char_indices().find(|(_, c)| is_colon(*c))?;
        let label = &content[..colon_at];
        let well_formed = label
            .chars()
            .all(|c| c.is_alphanumeric() || c == ' ' || c == '·' || c == '_');
        if !well_formed || label.chars().count() > MAX_BARE_LABEL_CHARS {
            return None;
        }
        (label.trim(), colon_at + colon.len_utf8(), false)
    };

    let kind = label_kind(label)?;
    let value_start = after + (content[after..].len() - content[after..].trim_start().len());
    Some(LeadingLabel {
        label,
        kind,
        bold,
        value_start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_forms() {
        assert!(is_label("Synonyms"));
        assert!(is_label("Related Words"));
        assert!(is_label("Sense 1 · Verb"));
        assert!(is_label("例句 Example"));
        assert!(is_label("**释义**"));
        assert!(!is_label("Register"));
        assert!(!is_label("counterexample"));
        assert!(!is_label(""));
    }

    #[test]
    fn test_label_kind() {
        assert_eq!(label_kind("例句"), Some(LabelKind::Example));
        assert_eq!(label_kind("Example 2"), Some(LabelKind::Example));
        assert_eq!(label_kind("翻译"), Some(LabelKind::Translation));
        assert_eq!(label_kind("Synonyms"), Some(LabelKind::Other));
        assert_eq!(label_kind("hello"), None);
    }

    #[test]
    fn test_leading_label() {
        let label = leading_label("**例句**: She ran.").unwrap();
        assert_eq!(label.label, "例句");
        assert_eq!(label.kind, LabelKind::Example);
        assert!(label.bold);
        assert_eq!(&"**例句**: She ran."[label.value_start..], "She ran.");

        let label = leading_label("**Translation:** 她跑了").unwrap();
        assert_eq!(label.label, "Translation");
        assert_eq!(label.kind, LabelKind::Translation);

        let label = leading_label("翻译：她跑了").unwrap();
        assert_eq!(label.label, "翻译");
        assert!(!label.bold);
        assert_eq!(&"翻译：她跑了"[label.value_start..], "她跑了");

        assert_eq!(leading_label("**例句** She ran."), None);
        assert_eq!(leading_label("She said: hi"), None);
        assert_eq!(leading_label("http://example.com"), None);
    }
}
