//! DOM helpers: visibility/noise classification and body-text walkers.
//!
//! Extraction never trusts raw `textContent` of the whole page. The strict
//! walker drops script/style plus modal, cookie-consent, and similar overlay
//! containers whose text poisons heuristics (legal boilerplate, vendor
//! addresses). A looser pass exists for pages where the strict one leaves
//! almost nothing.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::text::clean;

/// Class/id fragments that mark an element as overlay or legal chrome.
static NOISE_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)modal|jetstream|terms|privacy|legal|disclaimer|accessibility\s*statement")
        .expect("valid regex")
});

/// Containers where `display:none` is normal progressive disclosure, not noise.
static REVEAL_CONTEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)team|about|accordion|collapse|tab-content|carousel|slider")
        .expect("valid regex")
});

/// Class/id fragments stripped by the strict body-text pass.
const STRICT_NOISE_FRAGMENTS: [&str; 4] = ["modal", "jetstream", "cookie", "gdpr"];

const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

// ---------------------------------------------------------------------------
// Element helpers
// ---------------------------------------------------------------------------

/// Combined class + id attribute haystack for substring/regex checks.
pub fn class_id(el: &ElementRef) -> String {
    let class = el.value().attr("class").unwrap_or("");
    let id = el.value().attr("id").unwrap_or("");
    format!("{class} {id}")
}

/// Cleaned text content of an element's subtree.
pub fn element_text(el: ElementRef) -> String {
    clean(&el.text().collect::<String>())
}

/// All ancestor elements, nearest first.
pub fn ancestor_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.ancestors().filter_map(ElementRef::wrap)
}

/// Nearest ancestor (not including `el`) matching the predicate.
pub fn closest<'a, F>(el: ElementRef<'a>, pred: F) -> Option<ElementRef<'a>>
where
    F: Fn(&ElementRef<'a>) -> bool,
{
    ancestor_elements(el).find(|a| pred(a))
}

fn has_inline_display_none(el: &ElementRef) -> bool {
    el.value()
        .attr("style")
        .map(|s| {
            let s = s.to_lowercase();
            s.contains("display:none") || s.contains("display: none")
        })
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Noise classification
// ---------------------------------------------------------------------------

/// Whether this element is overlay/legal noise or invisibly hidden.
///
/// `display:none` alone is not noise inside carousels, accordions, and team
/// grids, where sites routinely hide inactive panes that still hold real
/// content.
pub fn is_noise(el: &ElementRef) -> bool {
    if NOISE_CLASS_RE.is_match(&class_id(el)) {
        return true;
    }

    if has_inline_display_none(el) {
        let revealed = REVEAL_CONTEXT_RE.is_match(&class_id(el))
            || ancestor_elements(*el).any(|a| REVEAL_CONTEXT_RE.is_match(&class_id(&a)));
        return !revealed;
    }

    false
}

/// Whether this element or any ancestor classifies as noise.
pub fn is_inside_noise(el: &ElementRef) -> bool {
    is_noise(el) || ancestor_elements(*el).any(|a| is_noise(&a))
}

// ---------------------------------------------------------------------------
// Body text
// ---------------------------------------------------------------------------

fn collect_text<F>(el: ElementRef, skip: &F, out: &mut String)
where
    F: Fn(&ElementRef) -> bool,
{
    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            if skip(&child_el) {
                continue;
            }
            collect_text(child_el, skip, out);
        } else if let Node::Text(t) = child.value() {
            out.push_str(&t.text);
            out.push(' ');
        }
    }
}

fn body_element(doc: &Html) -> ElementRef<'_> {
    let body_sel = Selector::parse("body").unwrap();
    doc.select(&body_sel).next().unwrap_or(doc.root_element())
}

/// Visible body text with overlay/cookie containers stripped.
///
/// Falls back to a looser pass (only script/style and explicit
/// `display:none` removed) when the strict pass yields under 150 chars,
/// which happens on pages built almost entirely from modal-classed markup.
pub fn main_body_text(doc: &Html) -> String {
    let body = body_element(doc);

    let strict = |el: &ElementRef| {
        let tag = el.value().name();
        if SKIPPED_TAGS.contains(&tag) {
            return true;
        }
        let hay = class_id(el);
        STRICT_NOISE_FRAGMENTS.iter().any(|f| hay.contains(f))
    };

    let mut out = String::new();
    collect_text(body, &strict, &mut out);
    let text = clean(&out);
    if text.len() >= 150 {
        return text;
    }

    let loose = |el: &ElementRef| {
        SKIPPED_TAGS.contains(&el.value().name()) || has_inline_display_none(el)
    };

    let mut out = String::new();
    collect_text(body, &loose, &mut out);
    clean(&out)
}

/// Raw text of the whole body, nothing filtered. Last-resort scans only.
pub fn full_text(doc: &Html) -> String {
    element_text(body_element(doc))
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// Absolute same-origin link targets in document order, deduplicated.
///
/// Fragments are kept as-is; callers that treat `/about` and `/about#team`
/// as one page normalize on their side.
pub fn same_origin_links(doc: &Html, base: &Url) -> Vec<String> {
    let anchor_sel = Selector::parse("a[href]").unwrap();
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in doc.select(&anchor_sel) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
        {
            continue;
        }
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        if resolved.origin() != base.origin() {
            continue;
        }
        let absolute = resolved.to_string();
        if seen.insert(absolute.clone()) {
            links.push(absolute);
        }
    }

    links
}
