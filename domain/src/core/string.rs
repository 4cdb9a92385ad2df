//! String utilities for the domain layer.
//!
//! Every length limit in this crate is counted in characters (Unicode scalar
//! values), not bytes: a 15-character Chinese title is 45 bytes of UTF-8.

/// Number of characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Return the prefix of `s` holding at most `max_chars` characters.
///
/// Returns a sub-slice of the original string, so the cut always lands on a
/// UTF-8 character boundary.
pub fn clip_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Trim whitespace and any matching pair of surrounding quote marks.
///
/// Models often echo a requested title as `"标题"` or `「标题」`.
pub fn strip_quotes(s: &str) -> &str {
    const PAIRS: &[(char, char)] = &[
        ('"', '"'),
        ('\'', '\''),
        ('“', '”'),
        ('「', '」'),
        ('《', '》'),
    ];

    let trimmed = s.trim();
    for (open, close) in PAIRS {
        if let Some(inner) = trimmed
            .strip_prefix(*open)
            .and_then(|rest| rest.strip_suffix(*close))
        {
            return inner.trim();
        }
    }
    trimmed
}
