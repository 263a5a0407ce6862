//! Script checks for the Devanagari side of a sentence pair.

use std::sync::LazyLock;

use regex::Regex;

/// Devanagari block, whitespace, a small punctuation set, danda and double
/// danda, Devanagari digits, ZWNJ and ZWJ. Matched against the whole string.
static ALLOWED_DEVANAGARI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[\x{0900}-\x{097F}\s.,;:'\-()\[\]/?!\x{0964}\x{0965}\x{0966}-\x{096F}\x{200C}\x{200D}]+$",
    )
    .expect("valid allowed-characters regex")
});

/// True when the text carries any ASCII Latin letter.
pub fn contains_latin(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}

/// True when every character is allowed. Empty text does not match.
pub fn is_allowed_devanagari(text: &str) -> bool {
    ALLOWED_DEVANAGARI.is_match(text)
}
