//! Aadhaar number text patterns
//!
//! Whitespace normalization and the two number shapes the maskers look for:
//! the full 12-digit number in 4-4-4 groups, and a lone 4-digit chunk.

use regex::Regex;
use std::sync::LazyLock;

/// 4-4-4 digits, each separator an optional whitespace or hyphen.
///
/// The `regex` crate has no lookaround, so the "not adjacent to other digits"
/// condition is expressed with non-digit or text-boundary guards.
static FULL_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\D)(\d{4}[\s-]?\d{4}[\s-]?\d{4})(?:\D|$)").expect("valid full-number regex")
});

static CHUNK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid chunk regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Trim and collapse every whitespace run to a single space
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Find a full Aadhaar number in already-normalized text
pub fn find_full_number(normalized: &str) -> Option<&str> {
    FULL_NUMBER
        .captures(normalized)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether normalized text is exactly one 4-digit chunk
pub fn is_chunk(normalized: &str) -> bool {
    CHUNK.is_match(normalized)
}
