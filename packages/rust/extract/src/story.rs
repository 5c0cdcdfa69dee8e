//! Founding story and about-page narrative extraction.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::dom::{element_text, is_inside_noise};
use crate::page::PageDoc;
use crate::text::{LEGAL_BOILERPLATE_RE, clean, looks_like_code_or_css, truncate};

static STORY_KEYWORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:founded|established|started|began|since\s+\d{4}|our\s+story|our\s+journey|history|years?\s+of\s+experience|family[\s-]owned|generations?)\b")
        .expect("valid regex")
});

static YEAR_FOUNDED_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)year\s+founded\s*[:=]?\s*\d{4}").expect("valid regex"));

// A run of words with no sentence punctuation is a heading pile-up, not prose.
static HEADING_SHAPED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\s,'-]+!?\s*$").expect("valid regex"));

static FOUNDER_STARTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bfounder\b.*\bstarted\b|\bstarted\s+his\s+own\b|\bstarted\s+.*\s+practice\b|\bfounded\b.*\b\d{4}\b")
        .expect("valid regex")
});

static FOUNDER_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Founder\s+\w+\s+\w+\s+started|started\s+his\s+own\s+\w+\s+practice)\b")
        .expect("valid regex")
});

static ANY_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid regex"));

static GENERIC_PROSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)we |our |company|team|years|experience|help|clients").expect("valid regex")
});

const ABOUT_SECTION_SEL: &str = "[class*='about'], [id*='about'], [class*='story'], [id*='story'], [class*='history'], [class*='mission'], [class*='intro'], [class*='who-we'], [class*='founding'], [class*='our-story'], [class*='company-detail'], [class*='journey']";

const MAIN_PARAGRAPH_SEL: &str = "main p, article p, [role='main'] p";

const MAIN_SUBSECTION_SEL: &str = "main [class*='about'], main [class*='story'], main [class*='history'], main [class*='founding'], [class*='founding-story']";

const STORY_CAP: usize = 1500;
const OVERVIEW_CAP: usize = 800;

/// Narrative text pulled from about/story sections.
#[derive(Debug, Default, Clone)]
pub struct AboutStory {
    pub story: Option<String>,
    pub overview: Option<String>,
}

fn reject(text: &str) -> bool {
    LEGAL_BOILERPLATE_RE.is_match(text) || looks_like_code_or_css(text)
}

/// Section texts worth considering, longest-section-first ordering is not
/// needed since document order tends to put the real about copy first.
fn section_candidates(page: &PageDoc) -> Vec<String> {
    let sel = Selector::parse(ABOUT_SECTION_SEL).unwrap();
    let mut out = Vec::new();
    for el in page.document().select(&sel) {
        if is_inside_noise(&el) {
            continue;
        }
        let text = element_text(el);
        if text.len() < 60 || text.len() > 5000 || reject(&text) {
            continue;
        }
        out.push(text);
    }
    out
}

fn story_from_sections(candidates: &[String]) -> Option<String> {
    for text in candidates {
        if !STORY_KEYWORDS_RE.is_match(text) && !YEAR_FOUNDED_LABEL_RE.is_match(text) {
            continue;
        }
        let story = truncate(text, STORY_CAP).trim().to_string();
        if story.len() < 100 {
            continue;
        }
        // An about section that renders as a stack of headings has no prose.
        if HEADING_SHAPED_RE.is_match(truncate(&story, 80)) {
            continue;
        }
        return Some(story);
    }
    None
}

fn following_paragraphs(el: ElementRef<'_>, count: usize) -> Vec<String> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|sib| sib.value().name() == "p")
        .take(count)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

fn story_from_paragraphs(page: &PageDoc) -> Option<String> {
    let sel = Selector::parse(MAIN_PARAGRAPH_SEL).unwrap();
    for p in page.document().select(&sel) {
        if is_inside_noise(&p) {
            continue;
        }
        let text = element_text(p);
        if text.len() < 80 || text.len() > 1500 || reject(&text) {
            continue;
        }
        if !STORY_KEYWORDS_RE.is_match(&text) {
            continue;
        }
        let mut parts = vec![text];
        parts.extend(following_paragraphs(p, 2));
        let combined = clean(&parts.join(" "));
        return Some(truncate(&combined, STORY_CAP).to_string());
    }
    None
}

fn story_from_founder_paragraph(page: &PageDoc) -> Option<String> {
    let sel = Selector::parse("body p").unwrap();
    for p in page.document().select(&sel) {
        if is_inside_noise(&p) {
            continue;
        }
        let text = element_text(p);
        if text.len() < 80 || text.len() > 2500 || reject(&text) {
            continue;
        }
        if !FOUNDER_STARTED_RE.is_match(&text) || !ANY_YEAR_RE.is_match(&text) {
            continue;
        }
        let mut parts = vec![text];
        parts.extend(following_paragraphs(p, 2));
        let combined = clean(&parts.join(" "));
        return Some(truncate(&combined, STORY_CAP).to_string());
    }
    None
}

fn story_from_main_subsections(page: &PageDoc) -> Option<String> {
    let sel = Selector::parse(MAIN_SUBSECTION_SEL).unwrap();
    for el in page.document().select(&sel) {
        if is_inside_noise(&el) {
            continue;
        }
        let text = element_text(el);
        if text.len() < 100 || text.len() > 4000 || reject(&text) {
            continue;
        }
        if !STORY_KEYWORDS_RE.is_match(&text) {
            continue;
        }
        return Some(truncate(&text, STORY_CAP).to_string());
    }
    None
}

// Last structural resort: on short pages the main text itself is the story.
fn story_from_main_text(page: &PageDoc) -> Option<String> {
    let text = page.main_text();
    if text.len() < 80 || text.len() > 2500 || reject(text) {
        return None;
    }
    let keyworded = STORY_KEYWORDS_RE.is_match(text);
    let generic = GENERIC_PROSE_RE.is_match(text) && text.len() >= 150;
    if !keyworded && !generic {
        return None;
    }
    Some(truncate(text, STORY_CAP).to_string())
}

fn story_from_full_text(page: &PageDoc) -> Option<String> {
    let full = page.full_text();
    let m = FOUNDER_PHRASE_RE.find(full)?;
    let window = truncate(&full[m.start()..], 1100);
    let snippet = match window.rfind('.') {
        Some(idx) if idx > 150 => &window[..=idx],
        _ => window,
    };
    let snippet = snippet.trim();
    if snippet.len() < 100
        || !ANY_YEAR_RE.is_match(snippet)
        || LEGAL_BOILERPLATE_RE.is_match(snippet)
    {
        return None;
    }
    Some(truncate(snippet, STORY_CAP).to_string())
}

/// Pull founding story and a general overview paragraph from about-style
/// content, trying progressively weaker locations.
pub fn extract_about_story(page: &PageDoc) -> AboutStory {
    let candidates = section_candidates(page);

    let story = story_from_sections(&candidates)
        .or_else(|| story_from_paragraphs(page))
        .or_else(|| story_from_founder_paragraph(page))
        .or_else(|| story_from_main_subsections(page))
        .or_else(|| story_from_main_text(page))
        .or_else(|| story_from_full_text(page));

    let overview = candidates
        .iter()
        .find(|text| text.len() > 80)
        .map(|text| truncate(text, OVERVIEW_CAP).to_string())
        .or_else(|| {
            let lead = truncate(page.main_text(), 1500);
            if lead.len() > 80 && !reject(lead) {
                Some(truncate(lead, OVERVIEW_CAP).to_string())
            } else {
                None
            }
        });

    AboutStory { story, overview }
}
