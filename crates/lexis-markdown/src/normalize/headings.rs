use once_cell::sync::Lazy;
use regex::Regex;

use lexis_core::chars::{is_ascii_letter, is_colon, is_word_content};
use lexis_core::preprocess::fold_label;

use super::{FenceTracker, code_spans, in_spans, is_fence, is_heading, line_prefix, map_prose_lines};
use crate::labels::vocabulary::{is_list_title, section_headings};

static HEADING_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s{0,3})(#{1,6})([^#\s])").expect("Valid heading marker regex"));

static LONE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{0,3}#{1,6}$").expect("Valid lone marker regex"));

static GLUED_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^\s#])[ \t]*(#{2,6})[ \t]+\S").expect("Valid glued heading regex")
});

static GLUED_SINGLE_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([:：)）\]】])[ \t]*(#)[ \t]+\S").expect("Valid glued single heading regex")
});

static HEADING_PARTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s{0,3}#{1,6}[ \t]+)(.+)$").expect("Valid heading parts regex"));

static LIST_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s{0,3}#{1,6}[ \t]+)(.+?)[ \t]*[-–—][ \t]*(\S.*)$")
        .expect("Valid list heading regex")
});

/// `##Title` → `## Title`. `#tag#` segmentation markers are left alone.
pub fn space_heading_markers(text: &str) -> String {
    map_prose_lines(text, |line| {
        let Some(caps) = HEADING_MARKER.captures(line) else {
            return line.to_string();
        };
        let hashes = &caps[2];
        let after = caps.get(2).map_or(line.len(), |m| m.end());
        if hashes.len() == 1 && opens_segmentation_marker(&line[after..]) {
            return line.to_string();
        }
        format!("{}{} {}", &caps[1], hashes, &line[after..])
    })
}

/// `rest` follows a single `#`: true for `tag#…` where the closing `#` is
/// not itself the start of a `##` run.
fn opens_segmentation_marker(rest: &str) -> bool {
    let Some(close) = rest.find(|c: char| c == '#' || c.is_whitespace()) else {
        return false;
    };
    close > 0 && rest[close..].starts_with('#') && !rest[close + 1..].starts_with('#')
}

/// A heading marker alone on its line takes the following line as title.
pub fn merge_split_headings(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut fences = FenceTracker::default();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;
        if !fences.is_prose(line) || !LONE_MARKER.is_match(line) {
            out.push(line.to_string());
            continue;
        }
        let Some(next) = lines.get(i) else {
            out.push(line.to_string());
            continue;
        };
        let mergeable = !next.trim().is_empty()
            && !line_prefix(next).list_item
            && !is_heading(next)
            && !is_fence(next);
        if mergeable {
            out.push(format!("{} {}", line.trim_end(), next.trim()));
            i += 1;
        } else {
            out.push(line.to_string());
        }
    }

    out.join("\n")
}

/// Move a heading glued to the end of prose onto its own line. Runs of two
/// or more `#` always break; a single `#` only after a colon or closing
/// bracket.
pub fn break_glued_headings(text: &str) -> String {
    map_prose_lines(text, |line| {
        let mut pieces = Vec::new();
        let mut rest = line.to_string();
        while let Some(at) = glued_heading_start(&rest) {
            let (head, tail) = rest.split_at(at);
            pieces.push(head.trim_end().to_string());
            rest = tail.to_string();
        }
        pieces.push(rest);
        pieces.join("\n")
    })
}

/// Byte offset of the first glued heading marker outside inline code.
fn glued_heading_start(line: &str) -> Option<usize> {
    let spans = code_spans(line);
    [&*GLUED_HEADING, &*GLUED_SINGLE_HEADING]
        .iter()
        .flat_map(|re| re.captures_iter(line))
        .filter_map(|caps| caps.get(2).map(|m| m.start()))
        .filter(|start| *start > 0 && !in_spans(&spans, *start))
        .min()
}

/// `## 释义1. 移动` → `## 释义` + `1. 移动`.
pub fn isolate_section_headings(text: &str) -> String {
    map_prose_lines(text, |line| {
        let Some(caps) = HEADING_PARTS.captures(line) else {
            return line.to_string();
        };
        let prefix = &caps[1];
        let title = &caps[2];

        let Some(heading) = section_headings()
            .iter()
            .find(|h| starts_with_heading(title, h))
        else {
            return line.to_string();
        };

        let remainder = &title[heading.len()..];
        match section_body(heading, remainder) {
            Some(body) => format!("{prefix}{}\n{body}", &title[..heading.len()]),
            None => line.to_string(),
        }
    })
}

fn starts_with_heading(title: &str, heading: &str) -> bool {
    title
        .get(..heading.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(heading))
}

/// The body glued after a heading word, if it really is a separate body.
fn section_body<'a>(heading: &str, remainder: &'a str) -> Option<&'a str> {
    let first = remainder.chars().next()?;
    if first.is_whitespace() {
        return None;
    }
    if heading.is_ascii() {
        if is_ascii_letter(first) {
            return None;
        }
    } else if matches!(first, '与' | '和' | '及' | '、') {
        return None;
    }

    let body = remainder.strip_prefix(is_colon).unwrap_or(remainder).trim_start();
    // a body starting with `#` would become an unspaced heading line
    if body.starts_with('#') || !body.chars().any(is_word_content) {
        return None;
    }
    Some(body)
}

/// `## Synonyms - fast` → `## Synonyms` + `- fast` for list-like titles.
pub fn split_list_headings(text: &str) -> String {
    map_prose_lines(text, |line| {
        let Some(caps) = LIST_HEADING.captures(line) else {
            return line.to_string();
        };
        if !is_list_title(&fold_label(&caps[2])) {
            return line.to_string();
        }
        format!("{}{}\n- {}", &caps[1], &caps[2], &caps[3])
    })
}

/// Every heading is preceded by a blank line.
pub fn blank_line_before_headings(text: &str) -> String {
    let mut fences = FenceTracker::default();
    let mut out: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if fences.is_prose(line)
            && is_heading(line)
            && out.last().is_some_and(|prev| !prev.trim().is_empty())
        {
            out.push("");
        }
        out.push(line);
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_marker_spacing() {
        assert_eq!(space_heading_markers("##Title"), "## Title");
        assert_eq!(space_heading_markers("  #Run"), "  # Run");
        assert_eq!(space_heading_markers("#tag# word"), "#tag# word");
        assert_eq!(space_heading_markers("#run## Definitions"), "# run## Definitions");
        assert_eq!(space_heading_markers("#a#"), "#a#");
        assert_eq!(space_heading_markers("## Fine"), "## Fine");
        assert_eq!(space_heading_markers("```\n#include\n```"), "```\n#include\n```");
    }

    #[test]
    fn test_merge_split_headings() {
        assert_eq!(merge_split_headings("##\nDefinitions"), "## Definitions");
        assert_eq!(merge_split_headings("##\n- item"), "##\n- item");
        assert_eq!(merge_split_headings("##\n\nText"), "##\n\nText");
        assert_eq!(merge_split_headings("#"), "#");
    }

    #[test]
    fn test_break_glued_headings() {
        assert_eq!(
            break_glued_headings("to move fast## Examples"),
            "to move fast\n## Examples"
        );
        assert_eq!(
            break_glued_headings("## Definitions ## Examples"),
            "## Definitions\n## Examples"
        );
        assert_eq!(break_glued_headings("Note: # Usage"), "Note:\n# Usage");
        assert_eq!(break_glued_headings("C# is fun"), "C# is fun");
        assert_eq!(break_glued_headings("use `a ## b` here"), "use `a ## b` here");
        assert_eq!(break_glued_headings("## Title"), "## Title");
    }

    #[test]
    fn test_isolate_section_headings() {
        assert_eq!(isolate_section_headings("## 释义1. 移动"), "## 释义\n1. 移动");
        assert_eq!(
            isolate_section_headings("## Examples:She runs."),
            "## Examples\nShe runs."
        );
        assert_eq!(isolate_section_headings("## Examples"), "## Examples");
        assert_eq!(isolate_section_headings("## Usage Notes"), "## Usage Notes");
        assert_eq!(isolate_section_headings("## Phrasebook"), "## Phrasebook");
        assert_eq!(isolate_section_headings("## 例句与翻译"), "## 例句与翻译");
        assert_eq!(isolate_section_headings("## 释义："), "## 释义：");
        assert_eq!(
            isolate_section_headings("## Synonyms##3释义"),
            "## Synonyms##3释义"
        );
    }

    #[test]
    fn test_split_list_headings() {
        assert_eq!(
            split_list_headings("## Synonyms - quick - fast"),
            "## Synonyms\n- quick - fast"
        );
        assert_eq!(split_list_headings("## 常用短语 — run out"), "## 常用短语\n- run out");
        assert_eq!(split_list_headings("## Well-known"), "## Well-known");
    }

    #[test]
    fn test_blank_line_before_headings() {
        assert_eq!(blank_line_before_headings("text\n## H"), "text\n\n## H");
        assert_eq!(blank_line_before_headings("# T\n\n## H"), "# T\n\n## H");
    }
}
