use lexis_core::chars::{MIDDLE_DOT_SEPARATOR, is_han};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Class {
    Lower,
    Upper,
    Digit,
    Han,
    Other,
}

fn class_of(c: char) -> Class {
    if is_han(c) {
        Class::Han
    } else if c.is_ascii_digit() {
        Class::Digit
    } else if c.is_uppercase() {
        Class::Upper
    } else if c.is_alphabetic() {
        Class::Lower
    } else {
        Class::Other
    }
}

/// Split a raw label into words on separators, camelCase humps,
/// letter/digit changes, script changes and acronym ends (`XMLFile`).
pub fn split_words(raw: &str) -> Vec<String> {
    let chars: Vec<char> = raw.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        let class = class_of(c);
        if class == Class::Other {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let prev_class = class_of(prev);
            let next_class = chars.get(i + 1).map(|n| class_of(*n));
            let boundary = match (prev_class, class) {
                (Class::Other, _) => false,
                (Class::Lower, Class::Upper) => true,
                (Class::Upper, Class::Upper) => next_class == Some(Class::Lower),
                (Class::Han, Class::Han) => false,
                (Class::Han, _) | (_, Class::Han) => true,
                (Class::Digit, Class::Digit) => false,
                (Class::Digit, _) | (_, Class::Digit) => true,
                _ => false,
            };
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_number(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

fn join_title(words: &[String]) -> String {
    words
        .iter()
        .map(|w| title_case(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display form of a raw label: `s1Verb` → `Sense 1 · Verb`,
/// `example2` → `Example 2`, `relatedWords` → `Related Words`.
pub fn humanize_label(raw: &str) -> String {
    let words = split_words(raw);
    let Some(first) = words.first() else {
        return raw.trim().to_string();
    };
    let head = first.to_lowercase();

    if words.len() >= 2 && is_number(&words[1]) {
        let number = &words[1];
        let rest = &words[2..];
        if head == "s" || head == "sense" {
            return if rest.is_empty() {
                format!("Sense {number}")
            } else {
                format!("Sense {number}{MIDDLE_DOT_SEPARATOR}{}", join_title(rest))
            };
        }
        if head == "example" {
            return if rest.is_empty() {
                format!("Example {number}")
            } else {
                format!("Example {number} {}", join_title(rest))
            };
        }
    }

    if words.iter().all(|w| w.chars().all(is_han)) {
        return words.concat();
    }
    join_title(&words)
}
