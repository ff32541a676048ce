//! Line shape predicates shared by the parsers
//!
//! Whitespace here is the ASCII class `[\t\n\x0C\r ]`; vertical tab and
//! Unicode spaces are ordinary token characters. All predicates are anchored
//! at both ends of the line they are given.

/// Whitespace class used by every line grammar
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

/// Length in bytes of the leading whitespace run
pub fn space_len(s: &str) -> usize {
    s.len() - s.trim_start_matches(is_space).len()
}

/// Splits off a non-empty leading token: the maximal run of non-whitespace.
pub fn leading_token(s: &str) -> Option<(&str, &str)> {
    let end = s.find(is_space).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some(s.split_at(end))
}

/// Matches `<space>+<rest>` where `rest` is non-empty, returning `rest`.
///
/// The whitespace run is greedy but yields its last character when nothing
/// else would be left, so `"   "` gives `" "`.
pub fn after_space(s: &str) -> Option<&str> {
    let n = space_len(s);
    match n {
        0 => None,
        n if n < s.len() => Some(&s[n..]),
        n if n >= 2 => Some(&s[n - 1..]),
        _ => None,
    }
}
