//! Character classifiers shared by the scanner and the markdown passes.

/// Separator used when joining related words on one line.
pub const FULL_WIDTH_SEPARATOR: &str = "、";

/// Separator between a sense number and its category.
pub const MIDDLE_DOT_SEPARATOR: &str = " · ";

pub fn is_ascii_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// ASCII letter or digit
pub fn is_ascii_word(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Han ideographs, including the extension blocks and the iteration marks.
pub fn is_han(c: char) -> bool {
    matches!(c,
        '\u{3005}'
        | '\u{3007}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2A6DF}'
        | '\u{2A700}'..='\u{2EBEF}'
        | '\u{30000}'..='\u{3134F}'
    )
}

pub fn is_cjk_punctuation(c: char) -> bool {
    if c == '\u{3005}' || c == '\u{3007}' {
        return false;
    }
    matches!(c,
        '\u{3000}'..='\u{303F}'
        | '\u{FF01}'..='\u{FF0F}'
        | '\u{FF1A}'..='\u{FF20}'
        | '\u{FF3B}'..='\u{FF40}'
        | '\u{FF5B}'..='\u{FF65}'
        | '\u{2014}'
        | '\u{2026}'
        | '\u{2018}'
        | '\u{2019}'
        | '\u{201C}'
        | '\u{201D}'
        | '\u{00B7}'
        | '\u{30FB}'
    )
}

pub fn is_cjk_sentence_end(c: char) -> bool {
    matches!(c, '。' | '！' | '？' | '…' | '．')
}

/// Letters, digits and Han characters count as word content.
pub fn is_word_content(c: char) -> bool {
    is_ascii_word(c) || is_han(c)
}

pub fn is_opening_bracket(c: char) -> bool {
    matches!(
        c,
        '(' | '[' | '{' | '（' | '【' | '「' | '『' | '《' | '〈' | '［' | '｛' | '“' | '‘'
    )
}

pub fn is_closing_bracket(c: char) -> bool {
    matches!(
        c,
        ')' | ']' | '}' | '）' | '】' | '」' | '』' | '》' | '〉' | '］' | '｝' | '”' | '’'
    )
}

pub fn is_colon(c: char) -> bool {
    matches!(c, ':' | '：')
}

/// Punctuation that ends a clause, ASCII or full-width.
pub fn is_sentence_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | '!' | '?' | ';' | '。' | '，' | '！' | '？' | '；' | '、' | '…'
    )
}

pub fn is_dash(c: char) -> bool {
    matches!(c, '-' | '–' | '—')
}

/// True when the text contains Han characters and no ASCII letters.
pub fn is_han_text(text: &str) -> bool {
    text.chars().any(is_han) && !text.chars().any(is_ascii_letter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_han_detection() {
        assert!(is_han('例'));
        assert!(is_han('々'));
        assert!(!is_han('a'));
        assert!(!is_han('。'));
        assert!(!is_han('ア'));
    }

    #[test]
    fn test_cjk_punctuation() {
        assert!(is_cjk_punctuation('。'));
        assert!(is_cjk_punctuation('，'));
        assert!(is_cjk_punctuation('（'));
        assert!(is_cjk_punctuation('“'));
        assert!(!is_cjk_punctuation('々'));
        assert!(!is_cjk_punctuation('.'));
    }

    #[test]
    fn test_word_content() {
        assert!(is_word_content('a'));
        assert!(is_word_content('7'));
        assert!(is_word_content('她'));
        assert!(!is_word_content(' '));
        assert!(!is_word_content('é'));
        assert!(!is_word_content('，'));
    }

    #[test]
    fn test_han_text() {
        assert!(is_han_text("她笑了。"));
        assert!(!is_han_text("see above"));
        assert!(!is_han_text("美国 USA"));
        assert!(!is_han_text("。"));
    }
}
