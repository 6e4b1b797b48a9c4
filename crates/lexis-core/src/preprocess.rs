use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Fold text into a comparison key: NFKC (full-width letters and colons
    /// become ASCII), lowercase, separators and punctuation dropped.
    fn fold(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        text.nfkc()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_alphanumeric())
            .collect()
    }
}

pub struct LabelPreprocessor;
impl Preprocessor for LabelPreprocessor {}

/// Fold with the default label preprocessor.
pub fn fold_label(text: &str) -> String {
    LabelPreprocessor.fold(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_strips_separators() {
        assert_eq!(fold_label("**Sense 1 · Verb**"), "sense1verb");
        assert_eq!(fold_label("  例句： "), "例句");
        assert_eq!(fold_label("Related_Words"), "relatedwords");
        assert_eq!(fold_label("ＥＸＡＭＰＬＥ"), "example");
        assert_eq!(fold_label(""), "");
    }
}
