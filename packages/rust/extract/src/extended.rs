//! Page-level odds and ends: headings, paragraphs, FAQ pairs, and the
//! certification and values lists for the extended knowledge block.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};
use siteprofiler_shared::FaqEntry;

use crate::dom::{element_text, is_inside_noise};
use crate::page::PageDoc;
use crate::text::{clean, LEGAL_BOILERPLATE_RE};

const PARAGRAPH_CAP: usize = 20;
const FAQ_CAP: usize = 20;
const CERT_CAP: usize = 15;
const VALUE_CAP: usize = 15;

static CHUNK_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}|\n").expect("valid regex"));

/// All h1-h4 texts under 150 characters, in document order.
pub fn extract_headings(page: &PageDoc) -> Vec<String> {
    let sel = Selector::parse("h1, h2, h3, h4").unwrap();
    page.document()
        .select(&sel)
        .map(element_text)
        .filter(|t| !t.is_empty() && t.len() < 150)
        .collect()
}

/// Up to 20 visible paragraphs, skipping legal boilerplate. Falls back to
/// splitting the main body text when the page has no paragraph markup.
pub fn extract_paragraphs(page: &PageDoc) -> Vec<String> {
    let sel = Selector::parse("p").unwrap();
    let mut texts: Vec<String> = Vec::new();
    for el in page.document().select(&sel) {
        if texts.len() >= PARAGRAPH_CAP {
            break;
        }
        if is_inside_noise(&el) {
            continue;
        }
        let t = element_text(el);
        if t.len() > 30 && !LEGAL_BOILERPLATE_RE.is_match(&t) {
            texts.push(t);
        }
    }
    if texts.is_empty() {
        for chunk in CHUNK_SPLIT_RE
            .split(page.main_text())
            .map(str::trim)
            .filter(|c| c.len() > 40 && c.len() < 2000)
            .take(PARAGRAPH_CAP)
        {
            if !LEGAL_BOILERPLATE_RE.is_match(chunk) {
                texts.push(chunk.to_string());
            }
        }
    }
    texts
}

/// Question/answer pairs: FAQ-classed blocks, definition lists, and
/// accordion headings whose immediate sibling holds the answer.
pub fn extract_faq(page: &PageDoc) -> Vec<FaqEntry> {
    let sel =
        Selector::parse("[class*='faq'], [id*='faq'] dt, [class*='accordion'] h3, .faq-item h4")
            .unwrap();
    let answer_sel = Selector::parse("dd, .answer, p, div").unwrap();
    let mut faq: Vec<FaqEntry> = Vec::new();
    for el in page.document().select(&sel) {
        let question = element_text(el);
        let answer = el
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .next()
            .filter(|sib| answer_sel.matches(sib))
            .map(element_text)
            .unwrap_or_default();
        if !question.is_empty() && !answer.is_empty() {
            faq.push(FaqEntry { question, answer });
        }
    }
    faq.truncate(FAQ_CAP);
    faq
}

/// Certification and award mentions, from badge-like blocks and their image
/// alt text.
pub fn extract_certifications_awards(page: &PageDoc) -> Vec<String> {
    let sel = Selector::parse(
        "[class*='certified'], [class*='award'], [class*='accreditation'], [class*='badge']",
    )
    .unwrap();
    let img_sel = Selector::parse("img").unwrap();
    let mut items: Vec<String> = Vec::new();
    for el in page.document().select(&sel) {
        let t = element_text(el);
        if !t.is_empty() && t.len() < 150 {
            push_if_new(&mut items, &t);
        }
        let alt = el
            .select(&img_sel)
            .next()
            .and_then(|img| img.value().attr("alt"))
            .or_else(|| el.value().attr("title"));
        if let Some(alt) = alt {
            let alt = clean(alt);
            if !alt.is_empty() && alt.len() < 150 {
                push_if_new(&mut items, &alt);
            }
        }
    }
    items.truncate(CERT_CAP);
    items
}

/// Value and culture phrases from mission/vision/community sections.
pub fn extract_values_community(page: &PageDoc) -> Vec<String> {
    let sel = Selector::parse(
        "[class*='value'], [class*='mission'], [class*='vision'], [class*='culture'], [class*='community']",
    )
    .unwrap();
    let h_sel = Selector::parse("h2, h3, h4, li").unwrap();
    let mut items: Vec<String> = Vec::new();
    for el in page.document().select(&sel) {
        for h in el.select(&h_sel) {
            let t = element_text(h);
            if t.len() > 2 && t.len() < 100 {
                push_if_new(&mut items, &t);
            }
        }
    }
    items.truncate(VALUE_CAP);
    items
}

fn push_if_new(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}
