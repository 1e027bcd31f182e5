//! Line grammar and quoting rules.
//!
//! A line matches when it is, in order: optional whitespace, a key
//! (`[A-Za-z_][A-Za-z0-9_]*`), optional whitespace, `=`, optional whitespace,
//! and the value running to the end of the line. Whitespace includes the
//! byte-order mark, so a BOM at the start of a file never hides the first key.

use crate::expand::{is_line_terminator, is_name_char, is_name_start};

/// Split a line into its key and raw value, or `None` if it is not a
/// key/value line.
///
/// The value keeps trailing spaces. It ends at the first line terminator
/// (`\r`, U+2028, U+2029), and only whitespace may follow that terminator.
pub(crate) fn match_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start_matches(is_space);

    let key_len = key_length(rest)?;
    let (key, rest) = rest.split_at(key_len);

    let rest = rest.trim_start_matches(is_space).strip_prefix('=')?;
    let value = rest.trim_start_matches(is_space);

    match value.find(is_line_terminator) {
        Some(end) if value[end..].chars().all(is_space) => Some((key, &value[..end])),
        Some(_) => None,
        None => Some((key, value)),
    }
}

/// Length in bytes of the key at the start of `text`.
fn key_length(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if !is_name_start(*bytes.first()?) {
        return None;
    }
    Some(1 + bytes[1..].iter().take_while(|&&b| is_name_char(b)).count())
}

/// Whether a raw value is wrapped in matching quotes.
///
/// Escaped backslash pairs are removed before checking so that a value such
/// as `"a\\"` still counts as quoted, while `"a\"` does not.
pub(crate) fn is_quoted(value: &str) -> bool {
    let stripped = value.replace("\\\\", "");
    let mut chars = stripped.chars();

    let (Some(open), Some(close)) = (chars.next(), chars.next_back()) else {
        return false;
    };
    if !is_quote(open) || open != close {
        return false;
    }
    match chars.next_back() {
        None => true,
        Some(before) => before != '\\',
    }
}

/// Remove one quote character from each end of a value and expand `\n`
/// escapes into newlines.
///
/// The quote characters need not match each other; expansion may have
/// changed the value since quoting was detected.
pub(crate) fn unquote(value: &str) -> String {
    let value = value.strip_prefix(is_quote).unwrap_or(value);
    let value = value.strip_suffix(is_quote).unwrap_or(value);
    value.replace("\\n", "\n")
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Unicode space separators, ASCII whitespace, line terminators, and the BOM.
fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}
