//! Text cleaning and small string helpers shared by the extractors.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Legal boilerplate that should never be mistaken for company prose.
pub static LEGAL_BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)terms of service|privacy policy|effective:\s*\w+|by using our (?:services|site)|disclaimer|copyright\s*©|all rights reserved",
    )
    .expect("valid regex")
});

static CSS_SHAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\[data-[a-z-]+[^\]]*\]|\{[^}]*\}|transition-duration|font-family\s*:|padding\s*:|margin\s*:|#[0-9a-fA-F]{3,6}\b|\.\d+px|rgba?\s*\(",
    )
    .expect("valid regex")
});

static CSS_UNIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:px|em|rem|ms|vh|vw)\s*[;}]").expect("valid regex"));

/// Collapse all whitespace runs to single spaces and trim.
pub fn clean(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").trim().to_string()
}

/// True when text reads like leaked CSS/code rather than prose. Inline style
/// blocks regularly end up in `textContent` on builder-generated sites.
pub fn looks_like_code_or_css(text: &str) -> bool {
    CSS_SHAPE_RE.is_match(text)
        || CSS_UNIT_RE.is_match(text)
        || (text.contains('{') && text.contains('}'))
}

/// Truncate to at most `max_chars` characters, on a char boundary.
pub fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Case-insensitive, whitespace-normalized key for dedup.
pub fn normalize_key(s: &str) -> String {
    clean(s).to_lowercase()
}

/// Lowercased first-`n`-characters fingerprint for near-duplicate detection.
pub fn fingerprint(s: &str, n: usize) -> String {
    truncate(&normalize_key(s), n).to_string()
}

/// Push `value` unless an equivalent entry exists or the cap is reached.
/// Returns true when the value was added.
pub fn push_unique(list: &mut Vec<String>, value: impl Into<String>, cap: usize) -> bool {
    if list.len() >= cap {
        return false;
    }
    let value = clean(&value.into());
    if value.is_empty() {
        return false;
    }
    let key = value.to_lowercase();
    if list.iter().any(|existing| existing.to_lowercase() == key) {
        return false;
    }
    list.push(value);
    true
}

/// Count whitespace-separated words.
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}
