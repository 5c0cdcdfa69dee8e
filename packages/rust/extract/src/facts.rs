//! Plain-text facts: founding year, headcount, legal entity type.

use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::dom::{element_text, is_inside_noise};
use crate::page::PageDoc;

static YEAR_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)year\s+founded\s*[:=]\s*(\d{4})").expect("valid regex"));

static FOUNDED_IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:founded|established)\s+in\s+(\d{4})\b").expect("valid regex")
});

/// Looser phrasings, tried in order. Earlier entries are more trustworthy.
static SECONDARY_YEAR_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:founded|established|started|began|incorporated|opened|created)\s+(?:in\s+)?(\d{4})\b",
        r"(?i)\b(?:in\s+business|operating|trading|serving(?:\s+\w+){0,3}|proudly\s+serving|family[\s-]owned(?:\s+\w+){0,3})\s+since\s+(\d{4})\b",
        r"(?i)\bsince\s+(\d{4})\b",
        r"(?i)\b(\d{4})\s*[-–—]\s*(?:present|today)\b",
        r"(?i)\best\.?\s*(\d{4})\b",
        r"\b(\d{4})\s*[-–]\s*\d{4}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

static COPYRIGHT_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)©\s*(?:copyright\s*)?(\d{4})").expect("valid regex"));

static EMPLOYEE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:team\s+of\s+)?(\d{1,5})\+?\s*(?:employees?|people|staff|members?)\b|(\d{1,5})\+?\s*-\s*(?:employee|person)\b",
    )
    .expect("valid regex")
});

static LEGAL_ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(Incorporated|Inc\.?|L\.L\.C\.?|LLC|Limited|Ltd\.?|Corporation|Corp\.?|Company|Co\.|LLP|LP)(?:[\s,;)]|$)",
    )
    .expect("valid regex")
});

const ABOUT_SECTION_SEL: &str = "[class*='about'], [id*='about'], [class*='story'], [id*='story'], [class*='history'], [class*='company'], [class*='detail']";

const FOOTER_SEL: &str = "footer, [class*='footer']";

/// Facts recoverable from page text alone.
#[derive(Debug, Clone, Default)]
pub struct TextFacts {
    pub year_founded: Option<String>,
    pub employee_count: Option<String>,
    pub legal_entity_type: Option<String>,
}

/// Extract all text facts from one page.
pub fn extract_facts(doc: &PageDoc) -> TextFacts {
    TextFacts {
        year_founded: extract_year_founded(doc),
        employee_count: extract_employee_count(doc.main_text()),
        legal_entity_type: extract_legal_entity(doc.main_text()),
    }
}

// ---------------------------------------------------------------------------
// Founding year
// ---------------------------------------------------------------------------

/// A plausible founding year: not before 1900, not after next year.
fn valid_year(year: &str) -> bool {
    let current = Utc::now().year();
    year.parse::<i32>()
        .map(|y| (1900..=current + 1).contains(&y))
        .unwrap_or(false)
}

fn first_valid(text: &str, re: &Regex) -> Option<String> {
    re.captures_iter(text)
        .map(|cap| cap[1].to_string())
        .find(|y| valid_year(y))
}

fn secondary_scan(text: &str) -> Option<String> {
    SECONDARY_YEAR_RES
        .iter()
        .find_map(|re| first_valid(text, re))
}

fn section_texts(doc: &PageDoc, selector: &str) -> Vec<String> {
    let sel = Selector::parse(selector).unwrap();
    doc.document()
        .select(&sel)
        .filter(|el| !is_inside_noise(el))
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Founded year from `<dt>Founded</dt><dd>1998</dd>` definition pairs.
fn year_from_definition_lists(doc: &PageDoc) -> Option<String> {
    let dt_sel = Selector::parse("dt").unwrap();
    let year_re = Regex::new(r"(\d{4})").expect("valid regex");

    for dt in doc.document().select(&dt_sel) {
        let label = element_text(dt).to_lowercase();
        if !label.contains("founded") && !label.contains("established") && !label.contains("year")
        {
            continue;
        }
        let dd = dt
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "dd");
        if let Some(dd) = dd {
            if let Some(year) = first_valid(&element_text(dd), &year_re) {
                return Some(year);
            }
        }
    }
    None
}

fn extract_year_founded(doc: &PageDoc) -> Option<String> {
    let main = doc.main_text();

    first_valid(main, &YEAR_LABEL_RE)
        .or_else(|| first_valid(main, &FOUNDED_IN_RE))
        .or_else(|| {
            section_texts(doc, ABOUT_SECTION_SEL).iter().find_map(|t| {
                first_valid(t, &YEAR_LABEL_RE)
                    .or_else(|| first_valid(t, &FOUNDED_IN_RE))
                    .or_else(|| secondary_scan(t))
            })
        })
        .or_else(|| {
            section_texts(doc, FOOTER_SEL)
                .iter()
                .find_map(|t| secondary_scan(t))
        })
        .or_else(|| secondary_scan(main))
        .or_else(|| year_from_definition_lists(doc))
        .or_else(|| secondary_scan(doc.full_text()))
        .or_else(|| first_valid(doc.full_text(), &COPYRIGHT_YEAR_RE))
}

// ---------------------------------------------------------------------------
// Headcount and entity type
// ---------------------------------------------------------------------------

fn extract_employee_count(text: &str) -> Option<String> {
    EMPLOYEE_RE.captures(text).and_then(|cap| {
        cap.get(1)
            .or_else(|| cap.get(2))
            .map(|m| m.as_str().to_string())
    })
}

fn extract_legal_entity(text: &str) -> Option<String> {
    LEGAL_ENTITY_RE
        .captures(text)
        .map(|cap| cap[1].replace('.', ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn page(html: &str) -> PageDoc {
        PageDoc::parse(html, Url::parse("https://example.com/").unwrap())
    }

    fn body(text: &str) -> PageDoc {
        page(&format!("<body><main><p>{text}</p></main></body>"))
    }

    #[test]
    fn explicit_label_wins() {
        let p = body("Year founded: 1998. We have grown every year since 2010.");
        assert_eq!(extract_year_founded(&p).as_deref(), Some("1998"));
    }

    #[test]
    fn founded_in_phrase() {
        let p = body("Acme was founded in 2005 by two brothers with one truck between them.");
        assert_eq!(extract_year_founded(&p).as_deref(), Some("2005"));
    }

    #[test]
    fn serving_since_phrase() {
        let p = body("Proudly serving the valley since 1987, we treat every home like our own.");
        assert_eq!(extract_year_founded(&p).as_deref(), Some("1987"));
    }

    #[test]
    fn implausible_years_are_rejected() {
        let p = body("Established in 1776 according to our marketing team. Est. 2012 in reality.");
        assert_eq!(extract_year_founded(&p).as_deref(), Some("2012"));
    }

    #[test]
    fn definition_list_pair() {
        // "Year" alone never matches the phrase patterns, so only the
        // dt/dd tier can produce this answer.
        let p = page(concat!(
            "<body><main><p>Firm details are listed below for reference purposes.</p>",
            "<dl><dt>Year</dt><dd>2003</dd><dt>Staff</dt><dd>14</dd></dl></main></body>",
        ));
        assert_eq!(extract_year_founded(&p).as_deref(), Some("2003"));
    }

    #[test]
    fn copyright_year_is_last_resort() {
        let p = page(concat!(
            "<body><main><p>We make small-batch hot sauce with local peppers and no shortcuts. ",
            "Every bottle is filled, capped, and labeled by hand in our kitchen.</p></main>",
            "<footer>© 2019 Pepper Works</footer></body>",
        ));
        assert_eq!(extract_year_founded(&p).as_deref(), Some("2019"));
    }

    #[test]
    fn employee_count_variants() {
        assert_eq!(
            extract_employee_count("A team of 25 employees serves three counties."),
            Some("25".into())
        );
        assert_eq!(
            extract_employee_count("We are a 12-person shop."),
            Some("12".into())
        );
        assert_eq!(extract_employee_count("Our staff loves dogs."), None);
    }

    #[test]
    fn legal_entity_dots_removed() {
        assert_eq!(
            extract_legal_entity("Acme Holdings L.L.C. was formed in Delaware."),
            Some("LLC".into())
        );
        assert_eq!(
            extract_legal_entity("Contact Acme Inc. for details."),
            Some("Inc".into())
        );
        assert_eq!(extract_legal_entity("We fix bikes."), None);
    }
}
