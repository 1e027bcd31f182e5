//! Variable expansion for env values.
//!
//! Responsibilities:
//! - Resolve `$NAME` and `${NAME}` references against a `VarLookup`.
//! - Honor `\\` (literal backslash) and `\$` (literal dollar) escapes.
//! - Re-scan substituted text so references may chain through each other.
//! - Stop as soon as a substitution leaves the text unchanged.
//!
//! Does NOT handle:
//! - Quote stripping or `\n` expansion (see `parser`).
//!
//! Invariants:
//! - Expansion is total: unresolved references become the empty string.
//! - References are resolved rightmost first, so text substituted on the
//!   right is fully expanded before a pending reference on its left.
//! - At most `MAX_SUBSTITUTIONS` substitutions happen per escape-delimited
//!   segment; self-referential values stop there instead of looping.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::ops::Range;

use indexmap::IndexMap;

use crate::constants::MAX_SUBSTITUTIONS;

const ESCAPED_BACKSLASH: &str = "\\\\";
const ESCAPED_DOLLAR: &str = "\\$";

/// Source of replacement values for variable references.
///
/// Lookups are case-sensitive.
pub trait VarLookup {
    /// Returns the value bound to `name`, if any.
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> VarLookup for IndexMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<S: BuildHasher> VarLookup for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl VarLookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<T: VarLookup + ?Sized> VarLookup for &T {
    fn lookup(&self, name: &str) -> Option<&str> {
        (**self).lookup(name)
    }
}

/// Returns `value` with every `$NAME` / `${NAME}` reference replaced by its
/// value in `replacements`.
///
/// `\\` collapses to a single backslash and `\$` to a literal dollar sign;
/// neither takes part in expansion.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// let replacements = HashMap::from([("DEL".to_string(), "-".to_string())]);
/// assert_eq!(envfile::replace_vars("0${DEL}9", &replacements), "0-9");
/// ```
pub fn replace_vars<L: VarLookup + ?Sized>(value: &str, replacements: &L) -> String {
    value
        .split(ESCAPED_BACKSLASH)
        .map(|segment| {
            segment
                .split(ESCAPED_DOLLAR)
                .map(|part| expand_segment(part, replacements))
                .collect::<Vec<_>>()
                .join("$")
        })
        .collect::<Vec<_>>()
        .join("\\")
}

/// Expand one escape-free segment until no reference remains.
fn expand_segment<L: VarLookup + ?Sized>(segment: &str, replacements: &L) -> String {
    let mut text = segment.to_string();

    for _ in 0..MAX_SUBSTITUTIONS {
        let Some(reference) = find_next_reference(&text) else {
            return text;
        };
        let value = replacements.lookup(&text[reference.name]).unwrap_or("");
        if text[reference.span.clone()] == *value {
            // Substituting a reference with itself is a fixed point.
            return text;
        }
        text.replace_range(reference.span, value);
    }

    if let Some(reference) = find_next_reference(&text) {
        tracing::warn!(
            variable = &text[reference.name],
            limit = MAX_SUBSTITUTIONS,
            "Variable expansion hit the substitution limit; leaving remaining references unexpanded"
        );
    }
    text
}

/// Byte ranges of a variable reference within a string.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Reference {
    /// The whole reference, including `$` and any braces.
    span: Range<usize>,
    /// The variable name.
    name: Range<usize>,
}

/// Find the next reference to substitute: the last reference on its line.
///
/// A reference is chosen when no other reference follows it before the next
/// line terminator. Without newlines in `text` this is the rightmost
/// reference; otherwise the earliest line holding a reference wins.
///
/// All delimiters are ASCII, so the returned ranges always fall on UTF-8
/// character boundaries.
fn find_next_reference(text: &str) -> Option<Reference> {
    let bytes = text.as_bytes();
    let mut references = bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'$')
        .filter_map(|(dollar, _)| reference_at(bytes, dollar))
        .peekable();

    while let Some(reference) = references.next() {
        match references.peek() {
            None => return Some(reference),
            Some(next)
                if text[reference.span.end..next.span.start].contains(is_line_terminator) =>
            {
                return Some(reference);
            }
            Some(_) => {}
        }
    }
    None
}

/// Parse a reference starting at the `$` at index `dollar`.
fn reference_at(bytes: &[u8], dollar: usize) -> Option<Reference> {
    let after = dollar + 1;

    if bytes.get(after) == Some(&b'{') {
        let name_start = after + 1;
        let name_end = scan_name(bytes, name_start)?;
        if bytes.get(name_end) != Some(&b'}') {
            return None;
        }
        return Some(Reference {
            span: dollar..name_end + 1,
            name: name_start..name_end,
        });
    }

    let name_end = scan_name(bytes, after)?;
    Some(Reference {
        span: dollar..name_end,
        name: after..name_end,
    })
}

/// Returns the end of the maximal name starting at `start`, if one starts there.
fn scan_name(bytes: &[u8], start: usize) -> Option<usize> {
    let first = *bytes.get(start)?;
    if !is_name_start(first) {
        return None;
    }
    let rest = bytes[start + 1..]
        .iter()
        .take_while(|&&b| is_name_char(b))
        .count();
    Some(start + 1 + rest)
}

pub(crate) fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

pub(crate) fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub(crate) fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        let replacements = vars(&[("A", "x")]);
        assert_eq!(replace_vars("plain text, no refs", &replacements), "plain text, no refs");
        assert_eq!(replace_vars("", &replacements), "");
    }

    #[test]
    fn test_braced_and_bare_references() {
        let replacements = vars(&[("DEL", "-"), ("NAME", "world")]);
        assert_eq!(replace_vars("0${DEL}9", &replacements), "0-9");
        assert_eq!(replace_vars("hello $NAME!", &replacements), "hello world!");
        assert_eq!(replace_vars("${NAME}${DEL}${NAME}", &replacements), "world-world");
    }

    #[test]
    fn test_substituted_text_extends_bare_reference_on_its_left() {
        // `$NAME` on the right becomes `world`, turning `$DEL` into `$DELworld`.
        let replacements = vars(&[("DEL", "-"), ("NAME", "world")]);
        assert_eq!(replace_vars("$NAME$DEL$NAME", &replacements), "world");
    }

    #[test]
    fn test_bare_reference_takes_longest_name() {
        let replacements = vars(&[("A", "short"), ("AB", "long")]);
        assert_eq!(replace_vars("$AB", &replacements), "long");
        assert_eq!(replace_vars("${A}B", &replacements), "shortB");
    }

    #[test]
    fn test_chained_expansion() {
        let replacements = vars(&[("A", "1"), ("B", "${A}2")]);
        assert_eq!(replace_vars("${B}3", &replacements), "123");
    }

    #[test]
    fn test_unresolved_reference_becomes_empty() {
        let replacements = HashMap::new();
        assert_eq!(replace_vars("${MISSING}", &replacements), "");
        assert_eq!(replace_vars("a$MISSING-b", &replacements), "a-b");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let replacements = vars(&[("name", "lower")]);
        assert_eq!(replace_vars("$NAME|$name", &replacements), "|lower");
    }

    #[test]
    fn test_escaped_dollar_is_literal() {
        let replacements = vars(&[("A", "x")]);
        assert_eq!(replace_vars("\\$A", &replacements), "$A");
        assert_eq!(replace_vars("\\${A}", &replacements), "${A}");
        assert_eq!(replace_vars("\\$A$A", &replacements), "$Ax");
    }

    #[test]
    fn test_escaped_backslash_then_reference() {
        let replacements = vars(&[("A", "x")]);
        assert_eq!(replace_vars("\\\\$A", &replacements), "\\x");
        assert_eq!(replace_vars("a\\\\b", &replacements), "a\\b");
    }

    #[test]
    fn test_malformed_references_are_left_alone() {
        let replacements = vars(&[("A", "x")]);
        assert_eq!(replace_vars("${A", &replacements), "${A");
        assert_eq!(replace_vars("${1A}", &replacements), "${1A}");
        assert_eq!(replace_vars("$1", &replacements), "$1");
        assert_eq!(replace_vars("cost: $", &replacements), "cost: $");
        assert_eq!(replace_vars("${}", &replacements), "${}");
    }

    #[test]
    fn test_substituted_text_can_form_new_reference() {
        // A bare `$` followed by a substituted name becomes a reference.
        let replacements = vars(&[("A", "B"), ("B", "done")]);
        assert_eq!(replace_vars("$$A", &replacements), "done");
    }

    #[test]
    fn test_non_ascii_text_around_references() {
        let replacements = vars(&[("CITY", "Zürich")]);
        assert_eq!(replace_vars("ö-$CITY-ü", &replacements), "ö-Zürich-ü");
        assert_eq!(replace_vars("$CITYé", &replacements), "Züriché");
    }

    #[test]
    fn test_self_reference_stops_at_limit() {
        let replacements = vars(&[("A", "x$A")]);
        let expanded = replace_vars("$A", &replacements);
        assert_eq!(expanded, format!("{}$A", "x".repeat(MAX_SUBSTITUTIONS)));
    }

    #[test]
    fn test_indexmap_and_btreemap_lookups() {
        let mut ordered = IndexMap::new();
        ordered.insert("A".to_string(), "1".to_string());
        assert_eq!(replace_vars("$A", &ordered), "1");

        let mut sorted = BTreeMap::new();
        sorted.insert("A".to_string(), "2".to_string());
        assert_eq!(replace_vars("$A", &sorted), "2");
    }

    #[test]
    fn test_find_next_reference_picks_rightmost() {
        let text = "$A ${B} $C";
        let reference = find_next_reference(text).unwrap();
        assert_eq!(&text[reference.name.clone()], "C");
        assert_eq!(reference.span, 8..10);

        let text = "${B} $";
        let reference = find_next_reference(text).unwrap();
        assert_eq!(&text[reference.name], "B");
    }

    #[test]
    fn test_find_next_reference_stops_at_line_terminator() {
        let text = "$A $B\n$C";
        let reference = find_next_reference(text).unwrap();
        assert_eq!(&text[reference.name], "B");

        let text = "$A\r\n$C";
        let reference = find_next_reference(text).unwrap();
        assert_eq!(&text[reference.name], "A");
    }

    #[test]
    fn test_substituted_newline_limits_rescan_to_first_line() {
        let replacements = vars(&[("A", "x$"), ("B", "$B")]);
        assert_eq!(replace_vars("$A\n$B$B$", &replacements), "x$\n$B$B$");
    }

    #[test]
    fn test_identity_replacement_stops_immediately() {
        let replacements = vars(&[("A", "x"), ("B", "$B")]);
        assert_eq!(replace_vars("$B", &replacements), "$B");
        assert_eq!(replace_vars("${B}", &replacements), "$B");
        // The fixed point is reached before `$A` on the left is visited.
        assert_eq!(replace_vars("$A$B", &replacements), "$A$B");
    }
}
