use once_cell::sync::Lazy;
use regex::Regex;

/// Everything outside a-z, 0-9, the Latin-1 supplement letters, comma and space.
static NON_WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("[^a-z0-9\u{00C0}-\u{00FF}, ]+").expect("non-word pattern is valid")
});

/// Canonical comparison form of a value. Used as the exact-set key and as the
/// label reported for cosine matches.
pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}

/// Lowercases and drops every character outside the gram alphabet.
pub fn simplify(value: &str) -> String {
    NON_WORD_REGEX
        .replace_all(&normalize(value), "")
        .into_owned()
}
