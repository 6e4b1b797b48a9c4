use lexis_core::parse_entity_str;
use lexis_markdown::{BuilderOptions, build_entry_markdown_with, normalize_dictionary_markdown};

/// `lexis render`: JSON entry in, canonical markdown out.
pub fn render(text: &str, options: &BuilderOptions) -> anyhow::Result<String> {
    let entry = parse_entity_str(text.trim())?;
    Ok(build_entry_markdown_with(&entry, options))
}

/// `lexis normalize`: markdown in, repaired markdown out.
pub fn normalize(text: &str) -> String {
    normalize_dictionary_markdown(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_types::LabelLanguage;

    #[test]
    fn test_render_legacy_entry() {
        let options = BuilderOptions::new(LabelLanguage::En);
        let markdown = render(
            r#"{"term":"run","phonetic":"rʌn","definitions":["to move fast"]}"#,
            &options,
        )
        .unwrap();
        assert!(markdown.starts_with("# run"));
        assert!(markdown.contains("to move fast"));
    }

    #[test]
    fn test_render_rejects_unknown_json() {
        let options = BuilderOptions::default();
        let err = render(r#"{"status":"pending"}"#, &options).unwrap_err();
        assert!(err.to_string().contains("status"));
    }

    #[test]
    fn test_normalize_trims_heading() {
        assert_eq!(normalize("# Title   "), "# Title");
    }
}
