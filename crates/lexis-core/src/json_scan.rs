//! Field extraction from partial JSON.
//!
//! The lookup service streams a JSON document one fragment at a time. The
//! scanner recovers the raw string value of a single field while the
//! enclosing object is still incomplete, without parsing anything else.

/// Raw (still escaped) value of a string field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub raw: String,
    /// An unescaped closing quote was seen
    pub closed: bool,
}

/// Locate `"field": ...` in `buffer` and read its string value.
///
/// Returns `None` while the key is absent or its value has not started yet.
/// A `null` value yields an empty closed value.
pub fn find_field_value(buffer: &str, field: &str) -> Option<FieldValue> {
    let needle = format!("\"{field}\"");
    let mut search_from = 0;

    while let Some(offset) = buffer[search_from..].find(&needle) {
        let key_start = search_from + offset;
        let after_key = key_start + needle.len();
        search_from = after_key;

        if is_escaped(buffer, key_start) {
            continue;
        }

        let rest = buffer[after_key..].trim_start();
        if rest.is_empty() {
            return None;
        }
        let Some(value) = rest.strip_prefix(':') else {
            // Quoted text that is not a key
            continue;
        };

        let value = value.trim_start();
        if value.is_empty() {
            return None;
        }
        if value.starts_with("null") {
            return Some(FieldValue {
                raw: String::new(),
                closed: true,
            });
        }
        if let Some(body) = value.strip_prefix('"') {
            return Some(read_string(body));
        }
        // Partial `nu`, numbers, objects: nothing usable yet
        return None;
    }

    None
}

/// Odd number of backslashes right before `index` means the quote is escaped.
fn is_escaped(buffer: &str, index: usize) -> bool {
    let backslashes = buffer[..index]
        .bytes()
        .rev()
        .take_while(|b| *b == b'\\')
        .count();
    backslashes % 2 == 1
}

fn read_string(body: &str) -> FieldValue {
    let mut raw = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                raw.push('\\');
                match chars.next() {
                    Some(escaped) => raw.push(escaped),
                    None => break,
                }
            }
            '"' => return FieldValue { raw, closed: true },
            _ => raw.push(c),
        }
    }

    FieldValue { raw, closed: false }
}

/// Expand JSON escapes in a raw string value. Never fails: a dangling
/// backslash or truncated `\u` escape is kept literally.
pub fn decode_json_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('u') => match read_hex4(&mut chars) {
                Ok(unit) => out.push(decode_unit(unit, &mut chars)),
                Err(consumed) => {
                    out.push_str("\\u");
                    out.push_str(&consumed);
                }
            },
            // `"`, `\`, `/` and unknown escapes keep their character
            Some(other) => out.push(other),
        }
    }

    out
}

fn decode_unit(unit: u32, chars: &mut std::str::Chars<'_>) -> char {
    if (0xD800..0xDC00).contains(&unit) {
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
            if let Ok(low) = read_hex4(&mut lookahead) {
                if (0xDC00..0xE000).contains(&low) {
                    *chars = lookahead;
                    let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER);
                }
            }
        }
        return char::REPLACEMENT_CHARACTER;
    }
    char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Read four hex digits; on failure return what was consumed.
fn read_hex4(chars: &mut std::str::Chars<'_>) -> Result<u32, String> {
    let mut consumed = String::new();
    let mut value = 0u32;
    for _ in 0..4 {
        match chars.clone().next() {
            Some(c) if c.is_ascii_hexdigit() => {
                chars.next();
                consumed.push(c);
                value = value * 16 + c.to_digit(16).unwrap_or(0);
            }
            _ => return Err(consumed),
        }
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_value_is_open() {
        let value = find_field_value(r##"{"markdown":"# Tit"##, "markdown").unwrap();
        assert_eq!(value.raw, "# Tit");
        assert!(!value.closed);

        let value = find_field_value(r##"{"markdown":"# Title"}"##, "markdown").unwrap();
        assert_eq!(value.raw, "# Title");
        assert!(value.closed);
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(find_field_value(r#"{"term":"foo""#, "markdown"), None);
        assert_eq!(find_field_value("", "markdown"), None);
    }

    #[test]
    fn test_value_not_started() {
        assert_eq!(find_field_value(r#"{"markdown""#, "markdown"), None);
        assert_eq!(find_field_value(r#"{"markdown": "#, "markdown"), None);
        assert_eq!(find_field_value(r#"{"markdown": nu"#, "markdown"), None);
    }

    #[test]
    fn test_null_value() {
        let value = find_field_value(r#"{"markdown": null}"#, "markdown").unwrap();
        assert_eq!(value.raw, "");
        assert!(value.closed);
    }

    #[test]
    fn test_escapes_are_preserved_while_scanning() {
        let value = find_field_value(r#"{"markdown":"say \"hi\"\nnext"}"#, "markdown").unwrap();
        assert_eq!(value.raw, r#"say \"hi\"\nnext"#);
        assert!(value.closed);
    }

    #[test]
    fn test_dangling_backslash_stays_open() {
        let value = find_field_value(r#"{"markdown":"line\"#, "markdown").unwrap();
        assert_eq!(value.raw, "line\\");
        assert!(!value.closed);
    }

    #[test]
    fn test_key_inside_value_is_skipped() {
        let buffer = r#"{"note":"\"markdown\" is a field","markdown":"ok"}"#;
        let value = find_field_value(buffer, "markdown").unwrap();
        assert_eq!(value.raw, "ok");

        let buffer = r#"{"kind":"markdown","markdown":"real"}"#;
        assert_eq!(find_field_value(buffer, "markdown").unwrap().raw, "real");
    }

    #[test]
    fn test_decode_standard_escapes() {
        assert_eq!(decode_json_string(r#"a\nb\tc\"d\\e\/f"#), "a\nb\tc\"d\\e/f");
        assert_eq!(decode_json_string(r"\u4f8b\u53e5"), "例句");
        assert_eq!(decode_json_string(r"\ud83d\ude00"), "😀");
    }

    #[test]
    fn test_decode_is_total() {
        assert_eq!(decode_json_string("end\\"), "end\\");
        assert_eq!(decode_json_string(r"\u12"), "\\u12");
        assert_eq!(decode_json_string(r"\u12zz"), "\\u12zz");
        assert_eq!(decode_json_string(r"\ud83d"), "\u{FFFD}");
        assert_eq!(decode_json_string(r"\q"), "q");
    }
}
