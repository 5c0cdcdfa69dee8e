//! Contact extraction: email, phone, and postal address.
//!
//! The address cascade runs from high-confidence signals (microdata, labeled
//! values, map links) down to whole-page regex sweeps. Later tiers accept
//! more false positives, so each candidate must still look like a postal
//! address and not like navigation text.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use crate::dom::{element_text, is_inside_noise};
use crate::page::PageDoc;
use crate::text::{clean, truncate, word_count};

/// Street-suffix form: `12 Main Street, Springfield, IL 62704`.
static ADDRESS_STRICT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\d+[\s\w.#]+(?:street|st\.?|avenue|ave\.?|blvd\.?|boulevard|drive|dr\.?|road|rd\.?|lane|ln\.?|way|suite|ste\.?|floor|fl\.?|building|bldg\.?)[\s\w.]*,?\s*[^,]+,\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?",
    )
    .expect("valid regex")
});

/// Number-first form without a street suffix. Deliberately case-sensitive so
/// the two-letter state stays uppercase.
static ADDRESS_LOOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\s+[\w\s.#]+,\s*[^,]+,\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?").expect("valid regex")
});

/// Anything street-number-ish followed by city and state-zip.
static ADDRESS_ANY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+[\s\w.#]{3,40},\s*[^,]{2,30},\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?")
        .expect("valid regex")
});

/// Just `City, State 62704` with a spelled-out state.
static CITY_STATE_ZIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z][A-Za-z\s\-']{2,45},\s*[A-Za-z]+(?:\s+[A-Za-z]+)?\s+\d{5}(?:-\d{4})?")
        .expect("valid regex")
});

/// Street line ending in a bare state abbreviation, no city comma.
static STATE_STREET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+[\s\w.#]+(?:FL|CA|NY|TX|IL|OH|GA|NC|PA|MI|NJ)\s+\d{5}").expect("valid regex")
});

/// `Address: ...` labels. Runs on raw element text so the newline terminator
/// still exists.
static ADDRESS_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:main\s+)?address\s*[:=]\s*([^\n|]+?)(?:\s*\||\s*\n|$)")
        .expect("valid regex")
});

static NAV_WORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:home|about us|services|contact us|login|sign (?:up|in)|directory|track your refund|learning|learn more|menu|client (?:login|hub)|schedule)\b",
    )
    .expect("valid regex")
});

static HAS_CITY_STATE_ZIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",\s*[A-Za-z]+(?:\s+[A-Za-z]+)?\s+\d{5}").expect("valid regex")
});

static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{5}").expect("valid regex"));

/// Context phrases that mark an address as legal boilerplate (registered
/// agents, DMCA contacts) rather than the company's own location. Checked
/// against a ±120-char window around whole-page matches.
pub const LEGAL_CONTEXT_MARKERS: [&str; 4] = [
    "legal@",
    "terms of service",
    "privacy policy",
    "copyright agent",
];

const BAD_EMAIL_PREFIXES: [&str; 2] = ["legal@", "privacy@"];

const CONTACT_SECTION_SEL: &str =
    "[class*='contact'], [id*='contact'], [class*='address'], footer, [class*='footer']";

const MAX_ADDRESS_LEN: usize = 200;

/// Email, phone, and postal address found on one page.
#[derive(Debug, Clone, Default)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Run the full contact cascade over one page.
pub fn extract_contact(doc: &PageDoc) -> ContactInfo {
    ContactInfo {
        email: extract_email(doc),
        phone: extract_phone(doc),
        address: extract_address(doc),
    }
}

// ---------------------------------------------------------------------------
// Email
// ---------------------------------------------------------------------------

fn extract_email(doc: &PageDoc) -> Option<String> {
    let sel = Selector::parse(r#"a[href^="mailto:"]"#).unwrap();
    for el in doc.document().select(&sel) {
        if is_inside_noise(&el) {
            continue;
        }
        let href = el.value().attr("href")?;
        let email = href
            .trim_start_matches("mailto:")
            .split('?')
            .next()
            .unwrap_or("")
            .trim()
            .to_string();
        if !email.contains('@') || !email.contains('.') {
            continue;
        }
        let lower = email.to_lowercase();
        if BAD_EMAIL_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            continue;
        }
        return Some(email);
    }
    None
}

// ---------------------------------------------------------------------------
// Phone
// ---------------------------------------------------------------------------

/// Normalize to `(AAA) BBB-CCCC` when a plain ten-digit US number is
/// recoverable; anything else passes through cleaned but unchanged.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    let ten = if digits.len() == 11 && digits.starts_with('1') {
        Some(&digits[1..])
    } else if digits.len() == 10 {
        Some(digits.as_str())
    } else {
        None
    };

    match ten {
        Some(d) => format!("({}) {}-{}", &d[0..3], &d[3..6], &d[6..10]),
        None => clean(raw),
    }
}

fn extract_phone(doc: &PageDoc) -> Option<String> {
    let sel = Selector::parse(r#"a[href^="tel:"]"#).unwrap();
    let mut fallback: Option<String> = None;

    for el in doc.document().select(&sel) {
        let href = el.value().attr("href").unwrap_or("");
        let number = href.trim_start_matches("tel:").trim();
        if number.is_empty() {
            continue;
        }
        if fallback.is_none() {
            let text = element_text(el);
            fallback = Some(if text.is_empty() {
                number.to_string()
            } else {
                text
            });
        }
        if is_inside_noise(&el) {
            continue;
        }
        return Some(normalize_phone(number));
    }

    // Every tel link sat inside noise; keep a raw number rather than nothing.
    fallback
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// Navigation menus love commas and title-case, so regex hits need a final
/// sanity check before being trusted as an address.
fn looks_like_nav_not_address(s: &str) -> bool {
    if HAS_CITY_STATE_ZIP_RE.is_match(s) {
        return false;
    }
    if NAV_WORDS_RE.is_match(s) {
        return true;
    }
    word_count(s) <= 4 && !ZIP_RE.is_match(s)
}

fn accept(candidate: &str) -> Option<String> {
    let cleaned = clean(candidate);
    if cleaned.len() < 10 || looks_like_nav_not_address(&cleaned) {
        return None;
    }
    Some(truncate(&cleaned, MAX_ADDRESS_LEN).to_string())
}

fn find_in(text: &str, re: &Regex) -> Option<String> {
    re.find_iter(text).find_map(|m| accept(m.as_str()))
}

fn address_from_itemprop(doc: &PageDoc) -> Option<String> {
    let sel = Selector::parse(r#"[itemprop="address"]"#).unwrap();
    for el in doc.document().select(&sel) {
        if is_inside_noise(&el) {
            continue;
        }
        let text = element_text(el);
        if (10..=350).contains(&text.len()) {
            if let Some(addr) = accept(&text) {
                return Some(addr);
            }
        }
    }
    None
}

fn address_from_label(doc: &PageDoc) -> Option<String> {
    let sel = Selector::parse(CONTACT_SECTION_SEL).unwrap();
    for el in doc.document().select(&sel) {
        if is_inside_noise(&el) {
            continue;
        }
        let raw: String = el.text().collect();
        for cap in ADDRESS_LABEL_RE.captures_iter(&raw) {
            let value = clean(&cap[1]);
            if (10..=250).contains(&value.len()) {
                if let Some(addr) = accept(&value) {
                    return Some(addr);
                }
            }
        }
    }
    None
}

fn address_from_map_links(doc: &PageDoc) -> Option<String> {
    let sel = Selector::parse(
        "a[href*='maps.google'], a[href*='google.com/maps'], a[href*='goo.gl/maps'], a[href*='maps.apple']",
    )
    .unwrap();
    for el in doc.document().select(&sel) {
        if is_inside_noise(&el) {
            continue;
        }
        let text = element_text(el);
        if text.len() < 250 && text.chars().any(|c| c.is_ascii_digit()) {
            if let Some(addr) = accept(&text) {
                return Some(addr);
            }
        }
    }
    None
}

fn address_from_address_tags(doc: &PageDoc) -> Option<String> {
    let sel = Selector::parse("address").unwrap();
    for el in doc.document().select(&sel) {
        if is_inside_noise(&el) {
            continue;
        }
        let text = element_text(el);
        if (15..=350).contains(&text.len()) {
            if let Some(addr) = accept(&text) {
                return Some(addr);
            }
        }
    }
    None
}

fn address_from_sections(doc: &PageDoc, re: &Regex) -> Option<String> {
    let sel = Selector::parse(CONTACT_SECTION_SEL).unwrap();
    for el in doc.document().select(&sel) {
        if is_inside_noise(&el) {
            continue;
        }
        if let Some(addr) = find_in(&element_text(el), re) {
            return Some(addr);
        }
    }
    None
}

fn snap_start(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn snap_end(s: &str, mut i: usize) -> usize {
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Whole-page sweep. The page text here includes modals and legal copy, so
/// any hit whose surrounding window reads like boilerplate is rejected.
fn address_from_full_text(doc: &PageDoc) -> Option<String> {
    let full = doc.full_text();
    for m in ADDRESS_ANY_RE.find_iter(full) {
        let start = snap_start(full, m.start().saturating_sub(120));
        let end = snap_end(full, (m.end() + 120).min(full.len()));
        let window = full[start..end].to_lowercase();
        if LEGAL_CONTEXT_MARKERS.iter().any(|mk| window.contains(mk)) {
            continue;
        }
        if let Some(addr) = accept(m.as_str()) {
            return Some(addr);
        }
    }
    None
}

fn extract_address(doc: &PageDoc) -> Option<String> {
    let main = doc.main_text();

    address_from_itemprop(doc)
        .or_else(|| address_from_label(doc))
        .or_else(|| address_from_map_links(doc))
        .or_else(|| address_from_address_tags(doc))
        .or_else(|| address_from_sections(doc, &ADDRESS_STRICT_RE))
        .or_else(|| address_from_sections(doc, &ADDRESS_LOOSE_RE))
        .or_else(|| find_in(main, &ADDRESS_STRICT_RE))
        .or_else(|| find_in(main, &ADDRESS_LOOSE_RE))
        .or_else(|| find_in(main, &STATE_STREET_RE))
        .or_else(|| find_in(main, &ADDRESS_ANY_RE))
        .or_else(|| find_in(main, &CITY_STATE_ZIP_RE))
        .or_else(|| address_from_sections(doc, &CITY_STATE_ZIP_RE))
        .or_else(|| address_from_full_text(doc))
}
