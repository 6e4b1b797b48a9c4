//! Markdown Normalization Pipeline.
//!
//! An ordered list of named text-repair passes folded left to right. Every
//! line pass leaves ```` ``` ```` fenced blocks untouched, and a pass that
//! panics is skipped so the rest of the pipeline still runs.

mod headings;
mod inline_labels;
mod layout;
mod lists;
mod punctuation;
mod restore;
mod segmentation;
mod translation;

use std::ops::Range;
use std::panic::{AssertUnwindSafe, catch_unwind};

use lexis_core::chars::{is_colon, is_han};

pub use headings::{
    blank_line_before_headings, break_glued_headings, isolate_section_headings,
    merge_split_headings, space_heading_markers, split_list_headings,
};
pub use inline_labels::break_inline_labels;
pub use layout::{collapse_blank_lines, normalize_line_endings};
pub use lists::space_ordinal_markers;
pub use punctuation::space_punctuation;
pub use restore::restore_labels;
pub use segmentation::space_segmentation_markers;
pub use translation::layout_translations;

/// A named text transformation.
pub struct Pass {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

pub const PASSES: &[Pass] = &[
    Pass {
        name: "line_endings",
        apply: normalize_line_endings,
    },
    Pass {
        name: "heading_markers",
        apply: space_heading_markers,
    },
    Pass {
        name: "split_headings",
        apply: merge_split_headings,
    },
    Pass {
        name: "glued_headings",
        apply: break_glued_headings,
    },
    Pass {
        name: "section_headings",
        apply: isolate_section_headings,
    },
    Pass {
        name: "list_headings",
        apply: split_list_headings,
    },
    Pass {
        name: "ordinal_markers",
        apply: space_ordinal_markers,
    },
    Pass {
        name: "restore_labels",
        apply: restore_labels,
    },
    Pass {
        name: "inline_labels",
        apply: break_inline_labels,
    },
    Pass {
        name: "translation_layout",
        apply: layout_translations,
    },
    Pass {
        name: "segmentation_spacing",
        apply: space_segmentation_markers,
    },
    Pass {
        name: "punctuation_spacing",
        apply: space_punctuation,
    },
    Pass {
        name: "heading_spacing",
        apply: blank_line_before_headings,
    },
    Pass {
        name: "collapse_blank_lines",
        apply: collapse_blank_lines,
    },
];

/// Rounds of the whole pass list before giving up on a stable result.
const MAX_ROUNDS: usize = 8;

/// Canonicalize dictionary markdown. Idempotent.
///
/// A later pass can leave work for an earlier one (a split line that now
/// starts with `#`), so the pass list is repeated until the text is stable.
pub fn normalize_dictionary_markdown(text: &str) -> String {
    let mut current = run_passes(text, PASSES);
    for _ in 1..MAX_ROUNDS {
        let next = run_passes(&current, PASSES);
        if next == current {
            return current;
        }
        current = next;
    }
    tracing::debug!(rounds = MAX_ROUNDS, "normalization did not settle");
    current
}

pub(crate) fn run_passes(text: &str, passes: &[Pass]) -> String {
    passes.iter().fold(text.to_string(), |current, pass| {
        match catch_unwind(AssertUnwindSafe(|| (pass.apply)(&current))) {
            Ok(next) => next,
            Err(_) => {
                tracing::warn!(pass = pass.name, "normalization pass panicked, skipping");
                current
            }
        }
    })
}

// Shared line helpers

pub(crate) fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// Tracks whether the current line sits inside a fenced code block.
#[derive(Default)]
pub(crate) struct FenceTracker {
    open: bool,
}

impl FenceTracker {
    /// True for lines that passes may rewrite. Fence delimiters and fenced
    /// content are not prose.
    pub fn is_prose(&mut self, line: &str) -> bool {
        if is_fence(line) {
            self.open = !self.open;
            return false;
        }
        !self.open
    }
}

/// Rewrite every prose line with `f`; `f` may return several lines.
pub(crate) fn map_prose_lines(text: &str, mut f: impl FnMut(&str) -> String) -> String {
    let mut fences = FenceTracker::default();
    text.split('\n')
        .map(|line| {
            if fences.is_prose(line) {
                f(line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn is_heading(line: &str) -> bool {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return false;
    }
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    (1..=6).contains(&hashes)
        && trimmed[hashes..]
            .chars()
            .next()
            .is_none_or(|c| c == ' ' || c == '\t')
}

/// Where a line's content begins and how wide its prefix is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LinePrefix {
    /// Byte offset of the first content character
    pub content_start: usize,
    /// Column width of everything before the content
    pub indent: usize,
    pub list_item: bool,
}

/// Parse leading whitespace and an optional list marker (`-`, `*`, `+`,
/// `•`, `1.`, `1.2)`), which must be followed by a space.
pub(crate) fn line_prefix(line: &str) -> LinePrefix {
    let lead = line.len() - line.trim_start().len();
    let rest = &line[lead..];

    let marker_len = if let Some(c) = rest.chars().next().filter(|c| matches!(c, '-' | '*' | '+' | '•')) {
        Some(c.len_utf8())
    } else {
        ordinal_marker_len(rest)
    };

    let marker = marker_len.filter(|len| rest[*len..].starts_with([' ', '\t']));
    match marker {
        Some(len) => {
            let after = &rest[len..];
            let gap = after.len() - after.trim_start().len();
            let content_start = lead + len + gap;
            LinePrefix {
                content_start,
                indent: line[..content_start].chars().count(),
                list_item: true,
            }
        }
        None => LinePrefix {
            content_start: lead,
            indent: lead,
            list_item: false,
        },
    }
}

/// Length of `\d+(\.\d+)*[.)]` at the start of `text`.
fn ordinal_marker_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;
    loop {
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == start {
            return None;
        }
        match bytes.get(i) {
            Some(b'.') if bytes.get(i + 1).is_some_and(u8::is_ascii_digit) => i += 1,
            Some(b'.') | Some(b')') => return Some(i + 1),
            _ => return None,
        }
    }
}

/// Byte ranges of inline code spans (matching backtick runs).
pub(crate) fn code_spans(line: &str) -> Vec<Range<usize>> {
    let bytes = line.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        let open = i;
        while i < bytes.len() && bytes[i] == b'`' {
            i += 1;
        }
        let run = i - open;

        let mut j = i;
        let mut close = None;
        while j < bytes.len() {
            if bytes[j] == b'`' {
                let start = j;
                while j < bytes.len() && bytes[j] == b'`' {
                    j += 1;
                }
                if j - start == run {
                    close = Some(j);
                    break;
                }
            } else {
                j += 1;
            }
        }

        match close {
            Some(end) => {
                spans.push(open..end);
                i = end;
            }
            None => break,
        }
    }

    spans
}

pub(crate) fn in_spans(spans: &[Range<usize>], index: usize) -> bool {
    spans.iter().any(|span| span.contains(&index))
}

/// A label found inside a line, after its content start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InlineLabel {
    /// Byte range of the whole label including the colon
    pub range: Range<usize>,
    pub label: String,
    pub bold: bool,
}

/// Characters that may not directly precede a bare label.
fn blocks_bare_label(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || is_han(c)
        || matches!(c, '*' | '`' | '#' | '/' | '@' | '-' | '_' | '\\')
}

/// Find `**Label**:` / `**Label:**` and bare `Label:` occurrences starting
/// at or after `from`, outside inline code.
pub(crate) fn find_inline_labels(line: &str, from: usize) -> Vec<InlineLabel> {
    let spans = code_spans(line);
    let mut found = Vec::new();
    let mut i = from;

    while i < line.len() {
        let rest = &line[i..];
        let Some(c) = rest.chars().next() else { break };

        if in_spans(&spans, i) {
            i += c.len_utf8();
            continue;
        }

        if rest.starts_with("**") {
            if let Some(label) = bold_label_at(line, i) {
                i = label.range.end;
                found.push(label);
                continue;
            }
        }

        let prev = line[..i].chars().last();
        if is_label_char(c) && !prev.is_some_and(blocks_bare_label) {
            if let Some(label) = bare_label_at(line, i) {
                i = label.range.end;
                found.push(label);
                continue;
            }
        }

        i += c.len_utf8();
    }

    found
}

pub(crate) fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_han(c)
}

fn bold_label_at(line: &str, start: usize) -> Option<InlineLabel> {
    let inner_start = start + 2;
    let close = line[inner_start..].find("**")? + inner_start;
    let inner = &line[inner_start..close];
    if inner.is_empty() || inner.contains('\n') {
        return None;
    }
    let trimmed = inner.trim_end();
    let (label, end) = match trimmed.chars().last() {
        Some(c) if is_colon(c) => (&trimmed[..trimmed.len() - c.len_utf8()], close + 2),
        _ => {
            let c = line[close + 2..].chars().next().filter(|c| is_colon(*c))?;
            (inner, close + 2 + c.len_utf8())
        }
    };
    if !crate::labels::is_label(label) {
        return None;
    }
    Some(InlineLabel {
        range: start..end,
        label: label.trim().to_string(),
        bold: true,
    })
}

fn bare_label_at(line: &str, start: usize) -> Option<InlineLabel> {
    let token_len = line[start..]
        .char_indices()
        .find(|(_, c)| !is_label_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(line.len() - start);
    let token_end = start + token_len;
    let colon = line[token_end..].chars().next().filter(|c| is_colon(*c))?;
    let token = &line[start..token_end];
    if !crate::labels::is_label(token) {
        return None;
    }
    Some(InlineLabel {
        range: start..token_end + colon.len_utf8(),
        label: token.to_string(),
        bold: false,
    })
}
