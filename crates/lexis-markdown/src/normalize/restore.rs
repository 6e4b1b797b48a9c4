//! Label restoration.
//!
//! Streaming models often drop the markup around a field name and glue it
//! to the preceding word: `Sensess1Verb:to move`. A token directly followed
//! by a colon is checked for a label, either as a whole or as a suffix, and
//! rewritten as `**Label**: `.

use std::cmp::Reverse;

use lexis_core::chars::{
    is_closing_bracket, is_colon, is_han, is_opening_bracket, is_sentence_punctuation,
};

use super::{code_spans, in_spans, is_heading, is_label_char, line_prefix, map_prose_lines};
use crate::labels::{LabelCandidate, humanize_label, split_words};

pub fn restore_labels(text: &str) -> String {
    map_prose_lines(text, |line| {
        if is_heading(line) {
            line.to_string()
        } else {
            restore_line(line)
        }
    })
}

fn restore_line(line: &str) -> String {
    let mut line = line.to_string();
    let mut from = line_prefix(&line).content_start;

    while let Some((start, end)) = next_label_token(&line, from) {
        let token = &line[start..end];
        let colon_len = line[end..].chars().next().map_or(0, char::len_utf8);
        let rest = line[end + colon_len..].trim_start();

        let rewritten = if whole_token_needs_markup(token) {
            Some(format!("**{}**:", humanize_label(token)))
        } else {
            pick_split(token).map(|(k, suffix)| {
                format!("{} **{}**:", &token[..k], humanize_label(suffix))
            })
        };

        match rewritten {
            Some(label) => {
                let head = format!("{}{}", &line[..start], label);
                from = head.len();
                line = if rest.is_empty() {
                    head
                } else {
                    format!("{head} {rest}")
                };
            }
            None => from = end,
        }
    }

    line
}

/// Next run of ASCII alphanumerics and Han directly followed by a colon,
/// with a safe character (or nothing) in front of it.
fn next_label_token(line: &str, from: usize) -> Option<(usize, usize)> {
    let spans = code_spans(line);
    let mut i = from;

    while i < line.len() {
        let c = line[i..].chars().next()?;
        if !is_label_char(c) {
            i += c.len_utf8();
            continue;
        }

        let start = i;
        let end = line[start..]
            .char_indices()
            .find(|(_, c)| !is_label_char(*c))
            .map_or(line.len(), |(offset, _)| start + offset);
        i = end;

        let followed_by_colon = line[end..].chars().next().is_some_and(is_colon);
        let safe_prefix = line[..start].chars().last().is_none_or(|prev| {
            prev.is_whitespace()
                || is_opening_bracket(prev)
                || is_closing_bracket(prev)
                || is_sentence_punctuation(prev)
                || is_colon(prev)
        });
        if followed_by_colon && safe_prefix && !in_spans(&spans, start) {
            return Some((start, end));
        }
    }

    None
}

/// A whole-token label gets markup only when it hides several words, like
/// `relatedWords` or `s1Verb`.
fn whole_token_needs_markup(token: &str) -> bool {
    token.is_ascii() && LabelCandidate::new(token).is_label() && split_words(token).len() > 1
}

/// Find the label suffix of a glued token. Returns the byte index where the
/// suffix starts. Candidates rank by exact vocabulary match, then an
/// uppercase or Han first character, then length, then position.
pub(crate) fn pick_split(token: &str) -> Option<(usize, &str)> {
    let mut best: Option<((bool, bool, usize, Reverse<usize>), usize)> = None;

    for (k, first) in token.char_indices().skip(1) {
        let prefix = &token[..k];
        let suffix = &token[k..];
        let prefix_chars = prefix.chars().count();
        let prefix_last = prefix.chars().last();

        let long_enough =
            prefix_chars >= 3 || (prefix_chars >= 2 && prefix_last.is_some_and(is_han));
        if !long_enough {
            continue;
        }

        let candidate = LabelCandidate::new(suffix);
        if !candidate.is_label() {
            continue;
        }

        let strong_start = first.is_uppercase() || is_han(first);
        let boundary = strong_start
            || prefix_last.is_some_and(|c| is_han(c) || c.is_ascii_digit())
            || candidate.is_dynamic();
        if !boundary {
            continue;
        }

        let score = (
            candidate.is_exact(),
            strong_start,
            suffix.chars().count(),
            Reverse(k),
        );
        if best.as_ref().is_none_or(|(top, _)| score > *top) {
            best = Some((score, k));
        }
    }

    best.map(|(_, k)| (k, &token[k..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_split() {
        assert_eq!(pick_split("Sensess1Verb"), Some((6, "s1Verb")));
        assert_eq!(pick_split("usageExamples"), Some((5, "Examples")));
        assert_eq!(pick_split("counterexample"), None);
        assert_eq!(pick_split("这个例句"), Some((6, "例句")));
        assert_eq!(pick_split("例句"), None);
        assert_eq!(pick_split("Footnote"), None);
    }

    #[test]
    fn test_restore_whole_token() {
        assert_eq!(
            restore_labels("Senses s1Verb:to move"),
            "Senses **Sense 1 · Verb**: to move"
        );
        assert_eq!(
            restore_labels("- relatedWords: jog"),
            "- **Related Words**: jog"
        );
    }

    #[test]
    fn test_restore_glued_suffix() {
        assert_eq!(
            restore_labels("Sensess1Verb:to move"),
            "Senses **Sense 1 · Verb**: to move"
        );
        assert_eq!(restore_labels("这个例句：她笑了"), "这个 **例句**: 她笑了");
    }

    #[test]
    fn test_restore_leaves_plain_labels() {
        for line in [
            "例句：她买了X。",
            "- **例句**: She bought X. 翻译: 她买了X。",
            "Note: see above",
            "see http://example.com",
            "`usageExamples: x`",
            "## relatedWords: x",
        ] {
            assert_eq!(restore_labels(line), line);
        }
    }

    #[test]
    fn test_restore_is_idempotent() {
        let once = restore_labels("a usageExamples: run fast");
        assert_eq!(once, "a usage **Examples**: run fast");
        assert_eq!(restore_labels(&once), once);
    }
}
