//! XML escaping for text and attribute values

use std::borrow::Cow;

use quick_xml::escape::escape;

/// Escape a string for use in XML text or attribute values
///
/// The five XML special characters become entity references. Control
/// characters other than tab, newline and carriage return are not allowed in
/// XML 1.0 and are written in the OOXML `_xHHHH_` form instead.
pub(crate) fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_restricted) {
        return escape(s);
    }
    Cow::Owned(escape(&encode(s, false)).into_owned())
}

/// Escape the text of a shared string item
///
/// Readers decode `_xHHHH_` in string items, so text that already contains
/// that pattern has its leading underscore written as `_x005F_`.
pub(crate) fn escape_string_item(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_restricted) && !contains_escape_pattern(s) {
        return escape(s);
    }
    Cow::Owned(escape(&encode(s, true)).into_owned())
}

fn encode(s: &str, protect_literals: bool) -> String {
    let mut encoded = String::with_capacity(s.len() + 8);
    for (i, c) in s.char_indices() {
        if is_restricted(c) {
            encoded.push_str(&format!("_x{:04X}_", c as u32));
        } else if protect_literals && is_escape_pattern(&s[i..]) {
            encoded.push_str("_x005F_");
        } else {
            encoded.push(c);
        }
    }
    encoded
}

/// True if `s` starts with `_xHHHH_`
fn is_escape_pattern(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 7
        && b[0] == b'_'
        && b[1] == b'x'
        && b[2..6].iter().all(u8::is_ascii_hexdigit)
        && b[6] == b'_'
}

fn contains_escape_pattern(s: &str) -> bool {
    s.match_indices('_').any(|(i, _)| is_escape_pattern(&s[i..]))
}

/// True if a `<t>` element holding `s` needs `xml:space="preserve"`
pub(crate) fn needs_space_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
}

fn is_restricted(c: char) -> bool {
    c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')
}
