//! Bilingual example layout: every example line is followed by its
//! translation on a line of its own, indented to the example's content.

use lexis_core::chars::{is_cjk_sentence_end, is_dash, is_han, is_han_text};

use super::{FenceTracker, find_inline_labels, is_heading, line_prefix};
use crate::labels::{LabelKind, humanize_label, label_kind, leading_label};

pub fn layout_translations(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut fences = FenceTracker::default();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;

        if !fences.is_prose(line) || is_heading(line) {
            out.push(line.to_string());
            continue;
        }
        let prefix = line_prefix(line);
        let content = &line[prefix.content_start..];
        let Some(example) = leading_label(content).filter(|l| l.kind == LabelKind::Example) else {
            out.push(line.to_string());
            continue;
        };
        let indent = " ".repeat(prefix.indent);
        let value_start = prefix.content_start + example.value_start;

        if let Some(split) = split_inline_translation(line, value_start, &indent) {
            out.push(split);
            continue;
        }

        if let Some(next) = lines.get(i).filter(|next| is_translation_line(next)) {
            out.push(line.to_string());
            out.push(format!("{indent}{}", next.trim_start()));
            // the translation line is consumed here; it cannot open a fence
            i += 1;
            continue;
        }

        let translation_label = if example.label.chars().any(is_han) {
            "翻译"
        } else {
            "Translation"
        };
        match parenthetical_translation(line, value_start) {
            Some((example_end, translation)) => {
                out.push(line[..example_end].trim_end().to_string());
                out.push(format!("{indent}**{translation_label}**: {translation}"));
            }
            None => out.push(line.to_string()),
        }
    }

    out.join("\n")
}

/// `**例句**: I ran. translation: 我跑了。` → two lines.
fn split_inline_translation(line: &str, value_start: usize, indent: &str) -> Option<String> {
    let label = find_inline_labels(line, value_start)
        .into_iter()
        .find(|l| label_kind(&l.label) == Some(LabelKind::Translation))?;

    let example = line[..label.range.start].trim_end();
    let example = example
        .strip_suffix(is_dash)
        .map_or(example, |rest| rest.trim_end());
    let translation = line[label.range.end..].trim();

    Some(format!(
        "{example}\n{indent}**{}**: {translation}",
        humanize_label(&label.label)
    ))
}

/// A translation-label line without a list marker.
fn is_translation_line(line: &str) -> bool {
    let prefix = line_prefix(line);
    !prefix.list_item
        && leading_label(&line[prefix.content_start..])
            .is_some_and(|l| l.kind == LabelKind::Translation)
}

/// A trailing `(她笑了。)`, `（…）` or `【…】` holding Chinese text.
/// Returns where the example text ends and the bracket content.
fn parenthetical_translation(line: &str, value_start: usize) -> Option<(usize, &str)> {
    let trimmed = line.trim_end();
    let close = trimmed.chars().last()?;
    let openers: &[char] = match close {
        ')' | '）' => &['(', '（'],
        '】' => &['【'],
        _ => return None,
    };

    let body_end = trimmed.len() - close.len_utf8();
    let open_at = trimmed[..body_end].rfind(openers)?;
    if open_at < value_start || trimmed[value_start..open_at].trim().is_empty() {
        return None;
    }

    let open_len = trimmed[open_at..].chars().next()?.len_utf8();
    let inner = trimmed[open_at + open_len..body_end].trim();
    let chinese = is_han_text(inner) || inner.chars().last().is_some_and(is_cjk_sentence_end);
    if inner.is_empty() || !chinese {
        return None;
    }

    Some((open_at, inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parenthetical_promotion() {
        assert_eq!(
            layout_translations("- **例句**: She smiled. (她笑了。)"),
            "- **例句**: She smiled.\n  **翻译**: 她笑了。"
        );
        assert_eq!(
            layout_translations("**Example**: He left【他走了】"),
            "**Example**: He left\n**Translation**: 他走了"
        );
    }

    #[test]
    fn test_english_parenthetical_is_kept() {
        let line = "- **例句**: She smiled (politely).";
        assert_eq!(layout_translations(line), line);
        let line = "- **例句**: She smiled (politely)";
        assert_eq!(layout_translations(line), line);
    }

    #[test]
    fn test_inline_translation_label() {
        assert_eq!(
            layout_translations("- **Example**: I ran. - translation: 我跑了。"),
            "- **Example**: I ran.\n  **Translation**: 我跑了。"
        );
    }

    #[test]
    fn test_next_line_is_reindented() {
        assert_eq!(
            layout_translations("1. **例句**: I ran.\n翻译: 我跑了。"),
            "1. **例句**: I ran.\n   翻译: 我跑了。"
        );
    }

    #[test]
    fn test_idempotent() {
        let once = layout_translations("- **例句**: She smiled. (她笑了。)");
        assert_eq!(layout_translations(&once), once);
    }
}
