//! Inline label line-breaking.
//!
//! `Synonyms: dash  Antonyms: walk` → one label per line, later segments
//! indented to the content column of the original line.

use lexis_core::chars::{is_closing_bracket, is_colon, is_dash, is_sentence_punctuation};

use super::{InlineLabel, find_inline_labels, is_heading, line_prefix, map_prose_lines};

pub fn break_inline_labels(text: &str) -> String {
    map_prose_lines(text, |line| {
        if is_heading(line) || line.trim_start().starts_with('|') {
            return line.to_string();
        }
        break_line(line)
    })
}

fn break_line(line: &str) -> String {
    let prefix = line_prefix(line);
    let breaks: Vec<usize> = find_inline_labels(line, prefix.content_start)
        .into_iter()
        .filter(|label| label.range.start > prefix.content_start)
        .filter(|label| should_break(line, label))
        .map(|label| label.range.start)
        .collect();

    if breaks.is_empty() {
        return line.to_string();
    }

    let indent = " ".repeat(prefix.indent);
    let mut starts = vec![0];
    starts.extend(breaks.iter().copied());
    let mut ends = breaks.clone();
    ends.push(line.len());

    starts
        .iter()
        .zip(ends.iter())
        .enumerate()
        .map(|(n, (&start, &end))| {
            let segment = strip_dangling_dash(&line[start..end]);
            if n == 0 {
                segment.to_string()
            } else {
                format!("{indent}{}", segment.trim_start())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn should_break(line: &str, label: &InlineLabel) -> bool {
    let before = &line[..label.range.start];
    let trimmed = before.trim_end();
    let gap = before[trimmed.len()..].chars().count();

    if gap >= 2 {
        return true;
    }
    if gap >= 1 && trimmed.chars().last().is_some_and(is_dash) {
        return true;
    }
    if gap == 1 {
        let lowercase_bare = !label.bold
            && label
                .label
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_lowercase());
        return !lowercase_bare;
    }
    trimmed.chars().last().is_some_and(|prev| {
        is_sentence_punctuation(prev) || is_closing_bracket(prev) || is_colon(prev)
    })
}

/// Trailing whitespace and a dangling `-`/`–`/`—` separator are removed.
fn strip_dangling_dash(segment: &str) -> &str {
    let trimmed = segment.trim_end();
    match trimmed.strip_suffix(is_dash) {
        Some(rest) if rest.ends_with(char::is_whitespace) || rest.is_empty() => rest.trim_end(),
        _ => trimmed,
    }
}
