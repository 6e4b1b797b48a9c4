use lexis_core::{decode_json_string, find_field_value};

use crate::normalize::normalize_dictionary_markdown;

/// Best-effort preview of a partially received response.
///
/// JSON-looking text yields the normalized `markdown` field, or `None` while
/// that field has not started. Anything else is treated as markdown.
pub fn extract_markdown_preview(text: &str) -> Option<String> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        let field = find_field_value(text, "markdown")?;
        return Some(normalize_dictionary_markdown(&decode_json_string(&field.raw)));
    }
    Some(normalize_dictionary_markdown(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_preview() {
        assert_eq!(
            extract_markdown_preview(r##"{"markdown":"# Tit"##).as_deref(),
            Some("# Tit")
        );
        assert_eq!(
            extract_markdown_preview(r###"{"markdown":"##Title\n- a"###).as_deref(),
            Some("## Title\n- a")
        );
    }

    #[test]
    fn test_missing_and_null_field() {
        assert_eq!(extract_markdown_preview(r#"{"term":"foo""#), None);
        assert_eq!(
            extract_markdown_preview(r#"{"markdown":null}"#).as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_plain_markdown_preview() {
        assert_eq!(
            extract_markdown_preview("# Title   \n\n\n- a").as_deref(),
            Some("# Title\n\n- a")
        );
    }
}
