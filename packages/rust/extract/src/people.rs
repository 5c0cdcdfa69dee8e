//! Key-people extraction: team cards, heading scans, and narrative mentions.
//!
//! Strategies run from high-confidence team sections down to bare narrative
//! regexes; each lower strategy only runs while the ones above found little.
//! Quoted customers are the main false-positive source here, so every pass
//! skips anything inside a testimonial or review block.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};
use siteprofiler_shared::KeyPerson;
use url::Url;

use crate::dom::{ancestor_elements, element_text, is_inside_noise};
use crate::page::PageDoc;
use crate::text::{clean, normalize_key, truncate};

const PEOPLE_CAP: usize = 30;

// Sections that are clearly team/leadership, scanned first.
const SECTION_HIGH_SEL: &str = "[class*='team'], [class*='staff'], [class*='leadership'], [class*='our-team'], [class*='meet-the'], [class*='key-people'], [class*='agent'], [class*='partner'], [id*='team'], [id*='leadership'], [id*='staff'], [id*='agent']";

// About/people/bio sections can hold non-people content, scanned second.
const SECTION_REST_SEL: &str = "[class*='about'], [class*='people'], [class*='member'], [class*='employee'], [class*='profile'], [class*='bio'], [class*='board'], [class*='management'], [class*='executive'], [class*='crew'], [class*='who-we'], [id*='about'], [id*='people']";

const BIO_SECTION_SEL: &str = "[class*='team'], [class*='staff'], [class*='leadership'], [class*='about'], [class*='people'], [class*='member'], [class*='profile'], [class*='bio'], [class*='board'], [class*='management'], [class*='executive']";

static CARD_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        "[class*='card'], [class*='item'], [class*='member'], [class*='person'], [class*='agent'], [class*='partner'], figure, [class*='profile-card']",
    )
    .unwrap()
});

static NAME_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h2, h3, h4, h5, .name, [class*='name'], [class*='person-name'], strong")
        .unwrap()
});

static LOOSE_NAME_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h2, h3, h4, h5, .name, [class*='name'], [class*='person-name'], strong, dt")
        .unwrap()
});

static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("[class*='title'], [class*='role'], .title, .role").unwrap()
});

static ABOUT_CONTEXT_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        "[class*='about'], [class*='team'], [class*='leadership'], [class*='staff'], [id*='about'], [id*='team']",
    )
    .unwrap()
});

static TESTIMONIAL_WRAP_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[class*='testimonial'], [class*='review']").unwrap());

static MAILTO_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href^='mailto:']").unwrap());

static TEL_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href^='tel:']").unwrap());

static BIO_TEXT_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        "[class*='bio'], [class*='description'], [class*='about'], .bio, .description, [class*='content']",
    )
    .unwrap()
});

static SIBLING_BIO_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("[class*='bio'], [class*='description'], [class*='content']").unwrap()
});

static NAV_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:home|about|contact|services|our team|menu|login|sign|faq|blog|read more|learn more|view profile|see all|follow|subscribe)$")
        .expect("valid regex")
});

static PLACE_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:valley|hills|beach|city|town|area|park|lake|springs|heights|village|hill\s+country)\b")
        .expect("valid regex")
});

static PLACE_SINGLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:locations?|offices?|areas?|services?)$").expect("valid regex"));

// Headings, CTAs, and service names that show up where names would be.
const NOT_PERSON_PHRASES: [&str; 14] = [
    "contact form",
    "ready to",
    "learn more",
    "schedule",
    "get in touch",
    "our services",
    "join our",
    "experience the",
    "the difference",
    "client login",
    "request a quote",
    "read more",
    "see all",
    "why ",
];

static NOT_PERSON_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:our|the|why|join|schedule|contact|ready|learn|see|get|request)\s")
        .expect("valid regex")
});

static NOT_PERSON_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s(?:services|systems|inspection|form|appointment|newsletter|difference)$")
        .expect("valid regex")
});

static DASH_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+[—–\-]\s+(.+)$").expect("valid regex"));

static COMMA_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,2})\s*,\s*(.+)$").expect("valid regex")
});

static PERSON_TITLE_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)founder|owner|partner|cpa|ceo|cto|president|director|manager|agent|chief")
        .expect("valid regex")
});

static TITLE_IN_DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:CEO|CFO|CTO|COO|President|Director|Manager|Lead|Founding Partner|Founder|Owner|Partner|CPA|VP|Vice President|Head of|Chief|Consultant|Specialist|Coordinator|Engineer|Technician|Analyst)\b[\s\w&-]*")
        .expect("valid regex")
});

static TESTIMONIAL_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)what\s+our\s+clients\s+(?:are\s+)?say|testimonial|^reviews?$")
        .expect("valid regex")
});

static BIO_LEAD_JUNK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:read bio|contact|email|phone)").expect("valid regex"));

static DIGITS_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\-.\s()]+$").expect("valid regex"));

static PHONE_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{3}[-.\s]?\d{3}[-.\s]?\d{4})\b").expect("valid regex"));

static EMAIL_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid regex"));

static BUTTON_WORDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)read bio|learn more|contact|email|phone").expect("valid regex"));

static LINE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n|\.\s+").expect("valid regex"));

static LINE_DASH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,2})\s+[—–\-]\s+(.{2,80})$").expect("valid regex")
});

static LINE_COMMA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,2})\s*,\s*(.{2,80})$").expect("valid regex")
});

// Name capture stays case-sensitive so a lowercase "is" cannot be swallowed
// into the name; only the title alternation is case-insensitive.
static TITLE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(Founder|Owner|President|CEO|CTO|COO|Partner|Director|Manager|Lead)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})\b")
        .expect("valid regex")
});

static NAME_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,2})\s+(?:is\s+)?(?:a\s+)?(?:the\s+)?((?i:founder|owner|president|ceo|cto|partner|director|manager))\b")
        .expect("valid regex")
});

static BIO_LINK_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)read\s+bio|view\s+bio|full\s+bio|learn\s+more|see\s+full|profile|about\s+them")
        .expect("valid regex")
});

static BIO_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)team|about|leadership|staff|profile|bio").expect("valid regex"));

/// A person name paired with the profile link found in their card, for the
/// bio-resolution pass to fetch later.
#[derive(Debug, Clone)]
pub struct BioLink {
    pub name: String,
    pub url: Url,
}

/// People named on the page, at most 30, deduplicated case-insensitively.
///
/// `exclude_headings` carries page headings already classified as content
/// themes so a hero title is never mistaken for a staff member.
pub fn extract_key_people(page: &PageDoc, exclude_headings: &[String]) -> Vec<KeyPerson> {
    let mut found = PeopleCollector::new(exclude_headings);

    let high_sel = Selector::parse(SECTION_HIGH_SEL).unwrap();
    for section in page.document().select(&high_sel) {
        process_section(section, &mut found);
    }
    if found.people.len() < 3 {
        let rest_sel = Selector::parse(SECTION_REST_SEL).unwrap();
        for section in page.document().select(&rest_sel) {
            process_section(section, &mut found);
        }
    }
    if found.people.is_empty() {
        heading_scan(page, &mut found);
    }
    if found.people.is_empty() {
        contact_adjacent_scan(page, &mut found);
    }
    if found.people.len() < 3 {
        listed_name_title_scan(page, &mut found);
    }
    if found.people.len() < 5 {
        narrative_scan(page, &mut found);
    }

    let mut people = found.people;
    people.truncate(PEOPLE_CAP);
    people
}

fn process_section(section: ElementRef<'_>, found: &mut PeopleCollector<'_>) {
    if is_inside_noise(&section) {
        return;
    }

    for card in section.select(&CARD_SEL) {
        if in_testimonial_section(card) {
            continue;
        }
        let Some(name_el) = card.select(&NAME_SEL).next() else {
            continue;
        };
        let (name, dash_title) = split_name_title(&element_text(name_el));
        if name.len() < 2 || name.len() > 80 {
            continue;
        }
        let (email, phone) = contact_from_container(card);
        let bio = bio_from_container(card, &name);
        let title = card
            .select(&TITLE_SEL)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
            .or(dash_title);
        found.add(&name, title, bio, email, phone);
    }

    // Headings outside card markup, for sections laid out as flat lists.
    for el in section.select(&LOOSE_NAME_SEL) {
        if in_testimonial_section(el) {
            continue;
        }
        if ancestor_elements(el).any(|a| CARD_SEL.matches(&a)) {
            continue;
        }
        let raw = element_text(el);
        let (name, dash_title) = split_name_title(&raw);
        if name.len() < 2 || name.len() > 80 {
            continue;
        }
        let Some(parent) = el.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        let (email, phone) = contact_from_container(parent);
        let next_text = el
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .next()
            .map(element_text)
            .unwrap_or_default();
        let parent_text = element_text(parent).replacen(&raw, "", 1).trim().to_string();
        let desc = if next_text.len() > 15 { next_text } else { parent_text };
        let bio = bio_from_container(parent, &name)
            .or_else(|| (desc.len() > 20).then(|| truncate(&desc, 600).to_string()));
        found.add(&name, dash_title, bio, email, phone);
    }
}

/// No team-like sections at all: treat any h3/h4/h5 as a candidate name.
fn heading_scan(page: &PageDoc, found: &mut PeopleCollector<'_>) {
    let sel = Selector::parse("h3, h4, h5").unwrap();
    for el in page.document().select(&sel) {
        if in_testimonial_section(el) {
            continue;
        }
        let (name, dash_title) = split_name_title(&element_text(el));
        if name.len() < 2 || name.len() > 80 {
            continue;
        }
        let Some(parent) = el.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        let (email, phone) = contact_from_container(parent);
        let desc = el
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| element_text(parent));
        found.add(
            &name,
            dash_title,
            Some(truncate(&desc, 600).to_string()),
            email,
            phone,
        );
    }
}

/// A name-shaped heading with a mailto/tel in the same container is a person
/// even without team markup.
fn contact_adjacent_scan(page: &PageDoc, found: &mut PeopleCollector<'_>) {
    let sel = Selector::parse("h2, h3, h4, h5, strong").unwrap();
    let container_sel = Selector::parse("section, article, div[class], aside").unwrap();
    for el in page.document().select(&sel) {
        if in_testimonial_section(el) {
            continue;
        }
        let (name, dash_title) = split_name_title(&element_text(el));
        let words = name.split_whitespace().count();
        if !(2..=4).contains(&words) || name.len() > 50 {
            continue;
        }
        if looks_like_place(&name) {
            continue;
        }
        let container = ancestor_elements(el)
            .find(|a| container_sel.matches(a))
            .or_else(|| el.parent().and_then(ElementRef::wrap));
        let Some(container) = container else { continue };
        let (email, phone) = contact_from_container(container);
        if email.is_none() && phone.is_none() {
            continue;
        }
        let title = container
            .select(&TITLE_SEL)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
            .or(dash_title);
        found.add(&name, title, None, email, phone);
    }
}

/// "Name - Title" / "Name, Title" lines in about/team copy.
fn listed_name_title_scan(page: &PageDoc, found: &mut PeopleCollector<'_>) {
    let sel = Selector::parse("p, li, td").unwrap();
    for el in page.document().select(&sel) {
        if is_inside_noise(&el) || in_testimonial_section(el) {
            continue;
        }
        if !ancestor_elements(el).any(|a| ABOUT_CONTEXT_SEL.matches(&a)) {
            continue;
        }
        let raw: String = el.text().collect();
        for line in LINE_SPLIT_RE.split(&raw) {
            let line = clean(line);
            if let Some(caps) = LINE_DASH_RE.captures(&line) {
                let name = clean(&caps[1]);
                let title = clean(&caps[2]);
                if name.len() >= 4 && !looks_like_place(&name) && PERSON_TITLE_WORD_RE.is_match(&title)
                {
                    found.add(&name, Some(title), None, None, None);
                }
            }
            if let Some(caps) = LINE_COMMA_RE.captures(&line) {
                let name = clean(&caps[1]);
                let title = clean(&caps[2]);
                if name.len() >= 4
                    && !looks_like_place(&name)
                    && !not_a_person(&name)
                    && PERSON_TITLE_WORD_RE.is_match(&title)
                {
                    found.add(&name, Some(title), None, None, None);
                }
            }
        }
    }
}

/// "Founder Doug Cohen" and "Jane Doe is the ceo" mentions in about text.
fn narrative_scan(page: &PageDoc, found: &mut PeopleCollector<'_>) {
    for el in page.document().select(&ABOUT_CONTEXT_SEL) {
        if in_testimonial_section(el) {
            continue;
        }
        let text = element_text(el);
        for caps in TITLE_NAME_RE.captures_iter(&text) {
            let title = caps[1].to_string();
            let name = clean(&caps[2]);
            if (4..=40).contains(&name.len()) && !looks_like_place(&name) && !not_a_person(&name) {
                found.add(&name, Some(title), None, None, None);
            }
        }
        for caps in NAME_TITLE_RE.captures_iter(&text) {
            let name = clean(&caps[1]);
            let title = caps[2].to_string();
            if (4..=40).contains(&name.len()) && !looks_like_place(&name) && !not_a_person(&name) {
                found.add(&name, Some(title), None, None, None);
            }
        }
    }
}

/// Profile links from person cards whose on-page bio is missing or short.
///
/// Only same-origin links count, and only the first qualifying link per card.
pub fn bio_links(page: &PageDoc) -> Vec<BioLink> {
    let section_sel = Selector::parse(BIO_SECTION_SEL).unwrap();
    let card_sel =
        Selector::parse("[class*='card'], [class*='item'], [class*='member'], [class*='person']")
            .unwrap();
    let name_sel = Selector::parse("h2, h3, h4, h5, .name, [class*='name'], strong").unwrap();
    let link_sel = Selector::parse("a[href]").unwrap();

    let mut links = Vec::new();
    for section in page.document().select(&section_sel) {
        if is_inside_noise(&section) {
            continue;
        }
        for card in section.select(&card_sel) {
            let Some(name_el) = card.select(&name_sel).next() else {
                continue;
            };
            let name = element_text(name_el);
            if name.len() < 2 || name.len() > 80 {
                continue;
            }
            if bio_from_container(card, &name).is_some_and(|b| b.len() > 100) {
                continue;
            }
            for a in card.select(&link_sel) {
                let Some(href) = a.value().attr("href") else {
                    continue;
                };
                if href.starts_with('#') || href.starts_with("javascript:") {
                    continue;
                }
                let Ok(full) = page.url().join(href) else {
                    continue;
                };
                if full.origin() != page.url().origin() {
                    continue;
                }
                if BIO_LINK_TEXT_RE.is_match(&element_text(a)) || BIO_HREF_RE.is_match(href) {
                    links.push(BioLink { name, url: full });
                    break;
                }
            }
        }
    }
    links
}

struct PeopleCollector<'a> {
    people: Vec<KeyPerson>,
    seen: HashSet<String>,
    exclude: &'a [String],
}

impl<'a> PeopleCollector<'a> {
    fn new(exclude: &'a [String]) -> Self {
        Self {
            people: Vec::new(),
            seen: HashSet::new(),
            exclude,
        }
    }

    fn add(
        &mut self,
        name: &str,
        title: Option<String>,
        description: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    ) {
        let n = clean(name);
        if n.len() < 2 || n.len() > 80 {
            return;
        }
        if NAV_NAME_RE.is_match(&n) {
            return;
        }
        if self.exclude.iter().any(|h| h == &n) {
            return;
        }
        if looks_like_place(&n) || not_a_person(&n) {
            return;
        }
        let key = normalize_key(&n);
        if self.seen.contains(&key) {
            return;
        }
        self.seen.insert(key.clone());

        let mut title = title;
        if title.is_none() {
            if let Some(desc) = description.as_deref() {
                if let Some(m) = TITLE_IN_DESC_RE.find(desc) {
                    title = Some(m.as_str().trim().to_string());
                }
            }
        }
        let description = description
            .map(|d| truncate(&clean(&d), 600).to_string())
            .filter(|d| {
                let lowered = d.trim().to_lowercase();
                d.trim().len() >= 25 && lowered != key
            });

        self.people.push(KeyPerson {
            title,
            description,
            email,
            phone,
            ..KeyPerson::named(n)
        });
    }
}

/// Split "Name - Title" or "Name, Title" into parts. The comma form demands
/// a title keyword, since "Austin, Texas" splits the same way.
fn split_name_title(raw: &str) -> (String, Option<String>) {
    let t = clean(raw);
    if let Some(caps) = DASH_SPLIT_RE.captures(&t) {
        let name = clean(&caps[1]);
        let title = clean(&caps[2]);
        if (2..=60).contains(&name.len()) && (2..=80).contains(&title.len()) {
            return (name, Some(title));
        }
    }
    if let Some(caps) = COMMA_SPLIT_RE.captures(&t) {
        let name = clean(&caps[1]);
        let title = clean(&caps[2]);
        if (4..=50).contains(&name.len())
            && (2..=80).contains(&title.len())
            && PERSON_TITLE_WORD_RE.is_match(&title)
        {
            return (name, Some(title));
        }
    }
    (t, None)
}

fn looks_like_place(s: &str) -> bool {
    let t = s.trim();
    if t.contains(char::is_whitespace) {
        return PLACE_WORD_RE.is_match(t);
    }
    PLACE_SINGLE_RE.is_match(t)
}

fn not_a_person(s: &str) -> bool {
    let t = s.trim().to_lowercase();
    if t.chars().any(|c| c.is_ascii_digit()) {
        return true;
    }
    let words = t.split_whitespace().count();
    if !(2..=4).contains(&words) {
        return true;
    }
    if NOT_PERSON_PHRASES.iter().any(|p| t.contains(p)) {
        return true;
    }
    NOT_PERSON_PREFIX_RE.is_match(&t) || NOT_PERSON_SUFFIX_RE.is_match(&t)
}

/// True when the element sits inside a testimonial/review block, either by
/// class or under an ancestor headed "What Our Clients Say" and similar.
fn in_testimonial_section(el: ElementRef<'_>) -> bool {
    if std::iter::once(el)
        .chain(ancestor_elements(el))
        .any(|a| TESTIMONIAL_WRAP_SEL.matches(&a))
    {
        return true;
    }
    for parent in ancestor_elements(el) {
        let heading_hit = parent
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|c| matches!(c.value().name(), "h1" | "h2" | "h3" | "h4"))
            .any(|h| TESTIMONIAL_HEADING_RE.is_match(&element_text(h)));
        if heading_hit {
            return true;
        }
    }
    false
}

/// First mailto address and first tel link with enough digits; a bare
/// phone-shaped string in the container text backstops a missing tel link.
fn contact_from_container(container: ElementRef<'_>) -> (Option<String>, Option<String>) {
    let mut email = None;
    for a in container.select(&MAILTO_SEL) {
        if let Some(href) = a.value().attr("href") {
            let addr = href.strip_prefix("mailto:").unwrap_or(href);
            let addr = addr.split_once('?').map_or(addr, |(a, _)| a).trim();
            if !addr.is_empty() && addr.len() < 120 {
                email = Some(addr.to_string());
                break;
            }
        }
    }

    let mut phone = None;
    for a in container.select(&TEL_SEL) {
        if let Some(href) = a.value().attr("href") {
            let number = href.strip_prefix("tel:").unwrap_or(href);
            let digits = number.chars().filter(char::is_ascii_digit).count();
            if digits >= 10 {
                phone = Some(number.trim().to_string());
                break;
            }
        }
    }
    if phone.is_none() {
        let text: String = container.text().collect();
        if let Some(caps) = PHONE_TEXT_RE.captures(&text) {
            phone = Some(caps[1].to_string());
        }
    }

    (email, phone)
}

fn bio_from_container(container: ElementRef<'_>, person_name: &str) -> Option<String> {
    // Bio-classed descendants, longest wins.
    let mut bio = String::new();
    for el in container.select(&BIO_TEXT_SEL) {
        let t = element_text(el);
        if t.len() > 30
            && t.len() < 2000
            && !t.starts_with(person_name)
            && !BIO_LEAD_JUNK_RE.is_match(truncate(&t, 30))
            && t.len() > bio.len()
        {
            bio = t;
        }
    }
    if !bio.is_empty() {
        return Some(truncate(&bio, 600).to_string());
    }

    // Paragraphs, skipping phone-number cells and name captions.
    let p_sel = Selector::parse("p").unwrap();
    let first_name = person_name
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();
    let paragraphs: Vec<String> = container
        .select(&p_sel)
        .map(element_text)
        .filter(|t| {
            t.len() > 40
                && t.len() < 1500
                && !DIGITS_ONLY_RE.is_match(t)
                && !t.to_lowercase().starts_with(&first_name)
        })
        .collect();
    if !paragraphs.is_empty() {
        return Some(truncate(&paragraphs.join(" "), 600).to_string());
    }

    // Expandable bios often live in a sibling of the card or of its parent.
    let mut bio = String::new();
    let mut consider = |t: String| {
        if t.len() > 50
            && t.len() < 2000
            && !BIO_LEAD_JUNK_RE.is_match(truncate(&t, 40))
            && t.len() > bio.len()
        {
            bio = t;
        }
    };
    for sib in container.next_siblings().filter_map(ElementRef::wrap) {
        consider(element_text(sib));
    }
    if let Some(parent) = container.parent().and_then(ElementRef::wrap) {
        for sib in parent.next_siblings().filter_map(ElementRef::wrap) {
            for el in sib.select(&SIBLING_BIO_SEL) {
                consider(element_text(el));
            }
        }
    }
    if !bio.is_empty() {
        return Some(truncate(&bio, 600).to_string());
    }

    // Last resort: card text with the name, contact strings, and link labels
    // stripped out.
    let full = element_text(container);
    let name_pattern = regex::escape(person_name)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(r"\s+");
    let mut rest = full;
    if let Ok(re) = Regex::new(&format!("(?i){name_pattern}")) {
        rest = re.replace_all(&rest, "").to_string();
    }
    let rest = EMAIL_TOKEN_RE.replace_all(&rest, "");
    let rest = PHONE_TEXT_RE.replace_all(&rest, "");
    let rest = BUTTON_WORDS_RE.replace_all(&rest, "");
    let rest = rest.trim();
    if rest.len() > 50 {
        return Some(truncate(rest, 600).to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> PageDoc {
        PageDoc::parse(html, Url::parse("https://acme.example/").unwrap())
    }

    #[test]
    fn team_cards_yield_people_with_contact_and_bio() {
        let p = page(concat!(
            r#"<body><section class="team-grid">"#,
            r#"<div class="member-card"><h3>Jane Doe</h3>"#,
            r#"<div class="title">Managing Partner</div>"#,
            r#"<p class="bio">Jane has guided the firm's audit practice for fifteen years and leads client onboarding.</p>"#,
            r#"<a href="mailto:jane@acme.com">Email</a>"#,
            r#"<a href="tel:+15125551234">Call</a></div>"#,
            r#"<div class="member-card"><h3>John Roe</h3>"#,
            r#"<div class="title">Senior Accountant</div>"#,
            r#"<p class="bio">John keeps quarterly filings on schedule for more than eighty small businesses.</p>"#,
            r#"<a href="mailto:john@acme.com">Email</a>"#,
            r#"<span>512-555-0100</span></div>"#,
            r#"</section></body>"#,
        ));
        let people = extract_key_people(&p, &[]);
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].name, "Jane Doe");
        assert_eq!(people[0].title.as_deref(), Some("Managing Partner"));
        assert_eq!(people[0].email.as_deref(), Some("jane@acme.com"));
        assert_eq!(people[0].phone.as_deref(), Some("+15125551234"));
        assert!(people[0].description.as_deref().unwrap().contains("audit practice"));
        assert_eq!(people[1].name, "John Roe");
        assert_eq!(people[1].phone.as_deref(), Some("512-555-0100"));
    }

    #[test]
    fn testimonial_quotes_are_not_people() {
        let p = page(concat!(
            r#"<body><section class="team">"#,
            r#"<div class="card"><h3>Ann Smith</h3>"#,
            r#"<p class="bio">Ann leads scheduling and keeps four crews busy across the county all year.</p>"#,
            r#"<a href="mailto:ann@acme.com">Email Ann</a></div>"#,
            r#"</section>"#,
            r#"<section class="about-us">"#,
            r#"<div class="testimonial-strip"><div class="card"><h4>Bob Jones</h4>"#,
            r#"<p>Great service, highly recommend to anyone needing well work done fast.</p></div></div>"#,
            r#"<h2>What Our Clients Say</h2>"#,
            r#"<div class="card"><h4>Carol White</h4>"#,
            r#"<p>Very happy with the responsiveness and care on our project.</p></div>"#,
            r#"</section></body>"#,
        ));
        let people = extract_key_people(&p, &[]);
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].name, "Ann Smith");
        assert_eq!(people[0].email.as_deref(), Some("ann@acme.com"));
    }

    #[test]
    fn lone_heading_with_mailto_is_a_person() {
        let p = page(concat!(
            r#"<body><main><h3>Jane Doe</h3>"#,
            r#"<a href="mailto:jane@acme.com">jane@acme.com</a>"#,
            r#"<p>We answer every inquiry within one business day.</p></main></body>"#,
        ));
        let people = extract_key_people(&p, &[]);
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].name, "Jane Doe");
        assert_eq!(people[0].email.as_deref(), Some("jane@acme.com"));
        assert!(people[0].description.is_none());
    }

    #[test]
    fn place_and_cta_headings_are_rejected() {
        let p = page(concat!(
            r#"<body><section class="team-section">"#,
            r#"<div class="item"><h3>Cedar Valley</h3></div>"#,
            r#"<div class="item"><h3>Get In Touch</h3></div>"#,
            r#"<div class="item"><h3>Our Services</h3></div>"#,
            r#"<div class="item"><h3>Maria Lopez</h3></div>"#,
            r#"</section></body>"#,
        ));
        let people = extract_key_people(&p, &[]);
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].name, "Maria Lopez");
    }

    #[test]
    fn narrative_mentions_fill_in_when_cards_are_sparse() {
        let p = page(concat!(
            r#"<body><section class="about-story">"#,
            r#"<p>Founder Doug Cohen started his own accounting practice in 1998.</p>"#,
            r#"<p>Maria Vega is the director of client operations.</p>"#,
            r#"</section></body>"#,
        ));
        let people = extract_key_people(&p, &[]);
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].name, "Doug Cohen");
        assert_eq!(people[0].title.as_deref(), Some("Founder"));
        assert_eq!(people[1].name, "Maria Vega");
        assert_eq!(people[1].title.as_deref(), Some("director"));
    }

    #[test]
    fn bio_links_found_for_cards_without_bios() {
        let p = page(concat!(
            r#"<body><section class="team">"#,
            r#"<div class="card"><h3>Omar Haddad</h3>"#,
            r#"<p class="bio">Omar has drilled and serviced wells across three counties for two decades, and now trains every new crew member we hire on safety and workmanship.</p>"#,
            r#"<a href="/team/omar">Read Bio</a></div>"#,
            r#"<div class="card"><h3>Jane Doe</h3>"#,
            r#"<a href="/team/jane">Read Bio</a></div>"#,
            r#"<div class="card"><h3>Eve Short</h3>"#,
            r#"<a href="https://other.example/profile">Profile</a></div>"#,
            r#"</section></body>"#,
        ));
        let links = bio_links(&p);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "Jane Doe");
        assert_eq!(links[0].url.as_str(), "https://acme.example/team/jane");
    }

    #[test]
    fn name_title_splitting() {
        assert_eq!(
            split_name_title("Jane Doe — Managing Partner"),
            ("Jane Doe".to_string(), Some("Managing Partner".to_string()))
        );
        assert_eq!(
            split_name_title("Sam Lee, CPA"),
            ("Sam Lee".to_string(), Some("CPA".to_string()))
        );
        // A lone capitalized word before the comma is not a name.
        assert_eq!(split_name_title("Austin, Texas"), ("Austin, Texas".to_string(), None));
    }
}
