use lexis_core::chars::is_word_content;

use super::FenceTracker;

/// Insert a space after `, . ! ? ;` squeezed between two words.
///
/// Left alone: inline code (a backtick span may cross lines), numbers
/// (`3.5`, `1,000`), abbreviations (`U.S`) and any word that looks like a
/// URL, e-mail address, host, path or `#tag#` marker.
pub fn space_punctuation(text: &str) -> String {
    let mut fences = FenceTracker::default();
    let mut in_code = false;
    text.split('\n')
        .map(|line| {
            if fences.is_prose(line) {
                space_line(line, &mut in_code)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn space_line(line: &str, in_code: &mut bool) -> String {
    let chars: Vec<char> = line.chars().collect();
    let protected = protected_words(&chars);
    let mut out = String::with_capacity(line.len() + 4);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '`' {
            // a run of backticks toggles code state once
            while i < chars.len() && chars[i] == '`' {
                out.push('`');
                i += 1;
            }
            *in_code = !*in_code;
            continue;
        }

        out.push(c);
        if !*in_code && !protected[i] && needs_space(&chars, i) {
            out.push(' ');
        }
        i += 1;
    }

    out
}

fn needs_space(chars: &[char], i: usize) -> bool {
    let c = chars[i];
    if !matches!(c, ',' | '.' | '!' | '?' | ';') {
        return false;
    }
    let (Some(&prev), Some(&next)) = (i.checked_sub(1).and_then(|p| chars.get(p)), chars.get(i + 1))
    else {
        return false;
    };
    if !is_word_content(prev) || !is_word_content(next) {
        return false;
    }

    // thousands separators: `1,000`
    if c == ',' && prev.is_ascii_digit() && next.is_ascii_digit() {
        return false;
    }
    if c == '.' {
        let decimal = prev.is_ascii_digit() && next.is_ascii_digit();
        let abbreviation = prev.is_ascii_uppercase() && next.is_ascii_uppercase();
        if decimal || abbreviation {
            return false;
        }
    }
    true
}

/// Marks characters belonging to whitespace-delimited words that contain
/// `://`, `@`, `www.`, a path separator or `#`.
fn protected_words(chars: &[char]) -> Vec<bool> {
    let mut protected = vec![false; chars.len()];
    let mut start = 0;

    while start < chars.len() {
        if chars[start].is_whitespace() {
            start += 1;
            continue;
        }
        let end = chars[start..]
            .iter()
            .position(|c| c.is_whitespace())
            .map_or(chars.len(), |offset| start + offset);
        let word: String = chars[start..end].iter().collect();
        let protect = word.contains("://")
            || word.contains("www.")
            || word.contains(['@', '/', '\\', '#']);
        if protect {
            protected[start..end].fill(true);
        }
        start = end;
    }

    protected
}
