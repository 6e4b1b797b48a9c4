//! Spacing around word-segmentation markers (`[[词]]`, `{{word}}`,
//! `#词#`) in example and translation lines.

use once_cell::sync::Lazy;
use regex::Regex;

use lexis_core::chars::{is_ascii_word, is_closing_bracket, is_cjk_punctuation, is_han};

use super::{is_heading, line_prefix, map_prose_lines};
use crate::labels::{LabelKind, leading_label};

static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[[^\]\n]+\]\]|\{\{[^}\n]+\}\}|#[^#\s]+#").expect("Valid segmentation marker regex")
});

pub fn space_segmentation_markers(text: &str) -> String {
    map_prose_lines(text, |line| {
        if is_heading(line) {
            return line.to_string();
        }
        let prefix = line_prefix(line);
        let content = &line[prefix.content_start..];
        let Some(label) = leading_label(content) else {
            return line.to_string();
        };
        if !matches!(label.kind, LabelKind::Example | LabelKind::Translation) {
            return line.to_string();
        }

        let value_start = prefix.content_start + label.value_start;
        let value = &line[value_start..];
        if !MARKER.is_match(value) {
            return line.to_string();
        }
        format!("{}{}", &line[..value_start], space_value(value))
    })
}

fn space_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    let mut last = 0;

    for marker in MARKER.find_iter(value) {
        out.push_str(&space_scripts(&value[last..marker.start()]));
        if out.chars().last().is_some_and(|c| !hugs_marker(c)) {
            out.push(' ');
        }
        out.push_str(marker.as_str());
        if value[marker.end()..].chars().next().is_some_and(|c| !hugs_marker(c)) {
            out.push(' ');
        }
        last = marker.end();
    }
    out.push_str(&space_scripts(&value[last..]));

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Neighbours that need no space next to a marker.
fn hugs_marker(c: char) -> bool {
    c.is_whitespace() || is_cjk_punctuation(c) || c.is_ascii_punctuation() || is_closing_bracket(c)
}

/// A space between adjacent Han and ASCII alphanumerics.
fn space_scripts(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if let Some(p) = prev {
            if (is_han(p) && is_ascii_word(c)) || (is_ascii_word(p) && is_han(c)) {
                out.push(' ');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_spacing() {
        assert_eq!(
            space_segmentation_markers("- **例句**: 她[[喜欢]]读书。"),
            "- **例句**: 她 [[喜欢]] 读书。"
        );
        assert_eq!(
            space_segmentation_markers("  **翻译**: 我用#电脑#写code"),
            "  **翻译**: 我用 #电脑# 写 code"
        );
        assert_eq!(
            space_segmentation_markers("**Example**: I {{like}}, really"),
            "**Example**: I {{like}}, really"
        );
    }

    #[test]
    fn test_lines_without_markers_are_untouched() {
        let line = "- **例句**: 她买了X。";
        assert_eq!(space_segmentation_markers(line), line);
        let line = "- **Synonyms**: a[[b]]";
        assert_eq!(space_segmentation_markers(line), line);
    }

    #[test]
    fn test_idempotent() {
        let once = space_segmentation_markers("- **例句**: 她[[喜欢]]读书。");
        assert_eq!(space_segmentation_markers(&once), once);
    }
}
