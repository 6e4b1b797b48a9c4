use once_cell::sync::Lazy;
use regex::Regex;

use super::map_prose_lines;

static GLUED_ORDINAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(\d{1,3}(?:\.\d{1,3})*)\.([^\s\d.])").expect("Valid ordinal regex")
});

/// `1.Item` → `1. Item`. Decimals (`3.5`) and bare `1.1.` are left alone.
pub fn space_ordinal_markers(text: &str) -> String {
    map_prose_lines(text, |line| {
        GLUED_ORDINAL.replace(line, "${1}${2}. ${3}").into_owned()
    })
}
