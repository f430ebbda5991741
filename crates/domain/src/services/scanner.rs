//! Lexical scanner: which word-list terms appear in a message.

use std::collections::HashSet;

lazy_static::lazy_static! {
    /// Tokens are alphanumeric runs (apostrophes kept so "don't" stays one
    /// token); punctuation-only spans never produce a token.
    static ref TOKEN_REGEX: regex::Regex = regex::Regex::new(r"[A-Za-z0-9']+").unwrap();
}

/// Splits text into word tokens. Shared with the lexicon scorer so both
/// sides of the screen agree on what a "word" is.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

/// Scans message text against a moderation word list.
///
/// Comparison is case-insensitive; the returned terms preserve the surface
/// casing of their first occurrence and are deduplicated case-insensitively.
/// An empty word list or empty text yields an empty result. Pure function:
/// no side effects, never fails.
pub fn scan(text: &str, word_list: &[String]) -> Vec<String> {
    if text.is_empty() || word_list.is_empty() {
        return Vec::new();
    }

    let listed: HashSet<String> = word_list.iter().map(|w| w.to_lowercase()).collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut matched = Vec::new();
    for token in TOKEN_REGEX.find_iter(text) {
        let lowered = token.as_str().to_lowercase();
        if listed.contains(&lowered) && seen.insert(lowered) {
            matched.push(token.as_str().to_string());
        }
    }
    matched
}
