//! Small text helpers shared by the extractors.

use sha2::{Digest, Sha256};

/// Trims and collapses internal whitespace runs to single spaces.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase alphabetic tokens; digits and punctuation split tokens.
pub(crate) fn tokens(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphabetic())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// `true` when `term` occurs in `tokens`. Multi-word terms must appear as a
/// contiguous phrase.
pub(crate) fn contains_term(tokens: &[String], term: &str) -> bool {
    let words: Vec<&str> = term.split_whitespace().collect();
    match words.as_slice() {
        [] => false,
        [single] => tokens.iter().any(|t| t == single),
        phrase => tokens
            .windows(phrase.len())
            .any(|w| w.iter().zip(phrase).all(|(a, b)| a == b)),
    }
}

/// Truncates to at most `max` characters on a char boundary.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push('…');
    out
}

/// SHA-256 over the normalized title and snippet, hex-encoded.
pub(crate) fn content_hash(title: Option<&str>, snippet: Option<&str>) -> String {
    let input = format!(
        "{}\x00{}",
        collapse_whitespace(title.unwrap_or("")).to_lowercase(),
        collapse_whitespace(snippet.unwrap_or("")).to_lowercase(),
    );
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

/// Case-insensitive count of non-overlapping occurrences of `needle`.
pub(crate) fn count_occurrences(haystack: &str, needle: &str) -> usize {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    haystack.to_lowercase().matches(needle.as_str()).count()
}
