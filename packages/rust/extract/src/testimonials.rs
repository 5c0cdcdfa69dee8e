//! Testimonial quotes, highest-confidence source first: schema.org reviews,
//! then review-classed markup, then heading-anchored sections, and only when
//! those fail, loose sentiment scans over plain text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::dom::{closest, element_text, is_inside_noise};
use crate::jsonld;
use crate::page::PageDoc;
use crate::text::{clean, fingerprint, truncate};

const QUOTE_CAP: usize = 15;

// The class list folds substring-equivalent variants together; anything with
// review/testimonial/client/quote in a class or id is a candidate block.
const REVIEW_BLOCK_SEL: &str = "[class*='testimonial'], [class*='review'], [class*='rating'], [class*='client'], [class*='quote'], [class*='social-proof'], [id*='testimonial'], [id*='review'], blockquote";

static REVIEW_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)review|testimonial|client|what\s+(?:our\s+)?clients?\s+(?:are\s+)?say|kind\s+words|from\s+our\s+clients|what\s+people\s+say")
        .expect("valid regex")
});

// Ratings, timestamps, and widget chrome that sit next to real quotes.
static SECTION_JUNK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d+\s*[/*]|stars?|years?\s+ago|verified|schedule\s+appointment").expect("valid regex")
});

static CARD_JUNK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d+\s*/\s*5|^[\d\s*]+$|stars?|years?\s+ago$").expect("valid regex")
});

static QUOTE_LIKE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:rely on|recommend|great|thank you|professional|excellent|happy|satisfied|finally)\b")
        .expect("valid regex")
});

static NAV_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:home|about|contact|login|menu|read more)").expect("valid regex")
});

static LEAF_QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:rely on|recommend|great|thank you|professional|excellent|happy|satisfied|finally a company)\b")
        .expect("valid regex")
});

static LEAF_JUNK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d|stars?|years?\s+ago|verified|client\s+login|schedule\s+appointment")
        .expect("valid regex")
});

static LEAD_TRIM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^a-zA-Z]+").expect("valid regex"));

static TAIL_TRIM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s',.-]+$").expect("valid regex"));

const NEEDLE_PHRASES: [&str; 4] = [
    "company you can rely on",
    "rely on",
    "highly recommend",
    "would recommend",
];

#[derive(Default)]
struct QuoteCollector {
    quotes: Vec<String>,
    seen: HashSet<String>,
}

impl QuoteCollector {
    fn add(&mut self, text: &str) {
        let t = clean(text);
        if t.len() < 15 || t.len() > 800 {
            return;
        }
        if !self.seen.insert(fingerprint(&t, 80)) {
            return;
        }
        self.quotes.push(t);
    }
}

/// Up to 15 short quotes, deduplicated on their first 80 characters.
pub fn extract_testimonials(page: &PageDoc) -> Vec<String> {
    let mut col = QuoteCollector::default();

    for quote in jsonld::review_quotes(page) {
        col.add(&quote);
    }

    let microdata_sel = Selector::parse("[itemprop='reviewBody'], [itemprop='review']").unwrap();
    for el in page.document().select(&microdata_sel) {
        let t = element_text(el);
        if t.len() > 15 {
            col.add(&t);
        }
    }

    let block_sel = Selector::parse(REVIEW_BLOCK_SEL).unwrap();
    for el in page.document().select(&block_sel) {
        if is_inside_noise(&el) {
            continue;
        }
        let t = element_text(el);
        if t.len() > 20 {
            col.add(&t);
        }
    }

    heading_sections(page, &mut col);
    card_quotes(page, &mut col);

    if col.quotes.is_empty() {
        sentiment_paragraphs(page, &mut col);
    }
    if col.quotes.is_empty() {
        leaf_scan(page, &mut col);
    }
    if col.quotes.is_empty() {
        phrase_needle(page, &mut col);
    }

    col.quotes.truncate(QUOTE_CAP);
    col.quotes
}

// "What Our Clients Say" and friends: take the paragraphs of the section the
// heading sits in.
fn heading_sections(page: &PageDoc, col: &mut QuoteCollector) {
    let h_sel = Selector::parse("h1, h2, h3, h4").unwrap();
    let parent_sel = Selector::parse("section, article, div[class]").unwrap();
    let child_sel =
        Selector::parse("p, blockquote, [class*='quote'], [class*='review'], [class*='content']")
            .unwrap();
    for el in page.document().select(&h_sel) {
        if !REVIEW_HEADING_RE.is_match(&element_text(el)) {
            continue;
        }
        let Some(parent) = closest(el, |a| parent_sel.matches(a)) else {
            continue;
        };
        for child in parent.select(&child_sel) {
            let txt = element_text(child);
            if txt.len() >= 20 && txt.len() <= 600 && !SECTION_JUNK_RE.is_match(truncate(&txt, 50))
            {
                col.add(&txt);
            }
        }
    }
}

// Quote paragraphs inside review-like cards.
fn card_quotes(page: &PageDoc, col: &mut QuoteCollector) {
    let block_sel =
        Selector::parse("[class*='review'], [class*='testimonial'], [class*='client']").unwrap();
    let quote_sel =
        Selector::parse("[class*='quote'], [class*='text'], [class*='content'], p").unwrap();
    for el in page.document().select(&block_sel) {
        if is_inside_noise(&el) {
            continue;
        }
        for quote_el in el.select(&quote_sel) {
            let q = element_text(quote_el);
            if q.len() >= 15 && q.len() <= 500 && !CARD_JUNK_RE.is_match(&q) {
                col.add(&q);
            }
        }
    }
}

// Any paragraph with quote-like sentiment words.
fn sentiment_paragraphs(page: &PageDoc, col: &mut QuoteCollector) {
    let p_sel = Selector::parse("p").unwrap();
    for el in page.document().select(&p_sel) {
        if is_inside_noise(&el) {
            continue;
        }
        let t = element_text(el);
        if t.len() >= 25 && t.len() <= 400 && QUOTE_LIKE_RE.is_match(&t) && !NAV_PREFIX_RE.is_match(&t)
        {
            col.add(&t);
        }
    }
}

// Same idea over leaf-ish elements of any tag.
fn leaf_scan(page: &PageDoc, col: &mut QuoteCollector) {
    let sel = Selector::parse("p, span, div, li, td").unwrap();
    for el in page.document().select(&sel) {
        let t = element_text(el);
        if t.len() < 20 || t.len() > 350 {
            continue;
        }
        if !LEAF_QUOTE_RE.is_match(&t) || LEAF_JUNK_RE.is_match(&t) {
            continue;
        }
        if is_leaf_like(el) || t.len() < 100 {
            col.add(&t);
        }
    }
}

// No child elements, or a wrapper whose text is all in its first child.
fn is_leaf_like(el: ElementRef<'_>) -> bool {
    let mut children = el.children().filter_map(ElementRef::wrap);
    let Some(first) = children.next() else {
        return true;
    };
    element_text(el) == element_text(first)
}

// Full-text search as the last resort; catches quotes buried in odd markup.
fn phrase_needle(page: &PageDoc, col: &mut QuoteCollector) {
    let full = page.full_text();
    let lower = full.to_lowercase();
    for phrase in NEEDLE_PHRASES {
        let Some(idx) = lower.find(phrase) else { continue };
        let start = idx.saturating_sub(5);
        let end = (idx + phrase.len() + 80).min(full.len());
        let Some(raw) = full.get(start..end) else { break };
        let snippet = raw.trim();
        let snippet = LEAD_TRIM_RE.replace(snippet, "");
        let snippet = TAIL_TRIM_RE.replace(&snippet, "");
        if snippet.len() >= 15 && snippet.len() <= 300 {
            col.add(&snippet);
        }
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn page(html: &str) -> PageDoc {
        PageDoc::parse(html, Url::parse("https://acme.example/").unwrap())
    }

    #[test]
    fn jsonld_reviews_come_first() {
        let p = page(concat!(
            r#"<html><head><script type="application/ld+json">"#,
            r#"{"@type":"Review","reviewBody":"They kept our irrigation running through the worst drought in a decade.","author":{"name":"P. Okafor"}}"#,
            r#"</script></head><body></body></html>"#,
        ));
        assert_eq!(
            extract_testimonials(&p),
            vec!["They kept our irrigation running through the worst drought in a decade. — P. Okafor"]
        );
    }

    #[test]
    fn classed_cards_are_collected_and_deduplicated() {
        let p = page(concat!(
            r#"<body><main>"#,
            r#"<div class="testimonial-card"><p class="quote">Their crew showed up on time, explained every step, and left the site cleaner than they found it.</p><span class="author">R. Alvarez</span></div>"#,
            r#"<div class="testimonial-card"><p class="quote">We switched after years of patchy service and could not be more satisfied with the results.</p></div>"#,
            r#"</main></body>"#,
        ));
        let quotes = extract_testimonials(&p);
        assert_eq!(quotes.len(), 2);
        assert!(quotes[0].contains("explained every step"));
        assert!(quotes[0].contains("R. Alvarez"));
        assert!(quotes[1].starts_with("We switched"));
    }

    #[test]
    fn heading_anchored_section_paragraphs() {
        let p = page(concat!(
            r#"<body><section class="content-area"><h2>What Our Clients Say</h2>"#,
            r#"<p>The team rebuilt our aging pump house in two days and the water pressure has been flawless since.</p>"#,
            r#"<p>5/5 stars</p>"#,
            r#"<p>Honest pricing and no surprises, which is rare in this trade.</p>"#,
            r#"</section></body>"#,
        ));
        let quotes = extract_testimonials(&p);
        assert_eq!(quotes.len(), 2);
        assert!(quotes[0].contains("flawless"));
        assert!(quotes[1].starts_with("Honest pricing"));
    }

    #[test]
    fn ratings_inside_cards_are_filtered() {
        let filler =
            "The depot keeps spare pumps, tanks, and fittings stocked for every common well size. "
                .repeat(10);
        let html = format!(
            concat!(
                r#"<body><div class="review"><p>{}</p>"#,
                r#"<p>5 / 5 from our eighty four clients</p>"#,
                r#"<p>Prompt, professional, and fairly priced from the first call to the final invoice.</p>"#,
                r#"</div></body>"#,
            ),
            filler
        );
        let quotes = extract_testimonials(&page(&html));
        assert_eq!(
            quotes,
            vec!["Prompt, professional, and fairly priced from the first call to the final invoice."]
        );
    }

    #[test]
    fn sentiment_paragraphs_back_fill_plain_pages() {
        let p = page(concat!(
            r#"<body><main><p>Navigation item</p>"#,
            r#"<p>We would recommend this crew to any neighbor who needs a well serviced quickly.</p>"#,
            r#"</main></body>"#,
        ));
        let quotes = extract_testimonials(&p);
        assert_eq!(
            quotes,
            vec!["We would recommend this crew to any neighbor who needs a well serviced quickly."]
        );
    }

    #[test]
    fn phrase_search_recovers_buried_quotes() {
        let pad = "Measured flow rates are logged at every visit and archived for the owner. ".repeat(3);
        let html = format!(
            concat!(
                "<body><main><p>{}Families across the county highly recommend our annual ",
                "service plan because the techs arrive with parts in hand and finish the ",
                "same morning. {}</p></main></body>",
            ),
            pad, pad
        );
        let quotes = extract_testimonials(&page(&html));
        assert_eq!(quotes.len(), 1);
        assert!(quotes[0].contains("highly recommend our annual service plan"));
    }
}
