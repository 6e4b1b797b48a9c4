use super::{FenceTracker, map_prose_lines};

/// `\r\n` and lone `\r` become `\n`; trailing whitespace is dropped.
pub fn normalize_line_endings(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    map_prose_lines(&unified, |line| line.trim_end().to_string())
}

/// Collapse runs of blank prose lines into one and trim the document.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut fences = FenceTracker::default();
    let mut lines: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if !fences.is_prose(line) {
            lines.push(line);
            continue;
        }
        let line = line.trim_end();
        if line.is_empty() && lines.last().is_none_or(|prev| prev.trim().is_empty()) {
            continue;
        }
        lines.push(line);
    }

    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endings() {
        assert_eq!(normalize_line_endings("a  \r\nb\rc\t"), "a\nb\nc");
        assert_eq!(normalize_line_endings("# Title   "), "# Title");
    }

    #[test]
    fn test_fenced_whitespace_is_kept() {
        let text = "```\ncode  \n```";
        assert_eq!(normalize_line_endings(text), text);
    }

    #[test]
    fn test_collapse() {
        assert_eq!(collapse_blank_lines("\n\na\n\n\n\nb\n\n"), "a\n\nb");
        assert_eq!(collapse_blank_lines("```\n\n\n```"), "```\n\n\n```");
    }
}
