//! Composed narrative fields: company pitch, long-form overview, and the
//! writing/art style descriptions.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use crate::dom::{element_text, is_inside_noise};
use crate::page::PageDoc;
use crate::story::AboutStory;
use crate::text::{clean, truncate};

static PITCH_NAV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:home|about|contact|login)").expect("valid regex"));

static OVERVIEW_NAV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:home|about|contact|login|sign|menu|privacy|terms)").expect("valid regex")
});

static DESCRIPTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)specialize|provide|offer|serve|help|assist|dedicated|focused|expert|experience|years")
        .expect("valid regex")
});

static SPECIALIZE_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:specialize[sd]?|provides?|offers?|dedicated to|focused on|expert in)\s+([^.,]+)")
        .expect("valid regex")
});

static TARGET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:serves?|caters? to|works? with|helps?|assists?)\s+([^.,]+(?:,?\s+and\s+[^.,]+)*)")
        .expect("valid regex")
});

static EXPERIENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\s+years?\s+of\s+(?:experience|service|expertise)").expect("valid regex")
});

static PARTNER_WITH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:partnered|partnership|partner)\s+with\s+([^.,]+)").expect("valid regex")
});

static FAMILY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"family[-\s]?(?:owned|operated)").expect("valid regex"));

static VALUE_PROP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)pride|dedicated|commitment|ensure|provide|deliver|expert|professional|quality|excellence")
        .expect("valid regex")
});

static YEAR_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}").expect("valid regex"));

static WS_PROFESSIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)professional|expert|quality|trust|ensure|provide|experience")
        .expect("valid regex")
});

static WS_INFORMATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)inform|educate|guide|explain|learn|understand").expect("valid regex")
});

static WS_AUDIENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\byou\b|\byour\b|client|customer|we (?:serve|help|provide)")
        .expect("valid regex")
});

static WS_TRUST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)confident|reassuring|trust|experience|expertise|values").expect("valid regex")
});

static WS_LONGEVITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:over|more than|nearly)\s+\d+\s+years|\d+\+?\s+years\s+of\s+(?:experience|service)|since\s+(?:19|20)\d{2}|established\s+(?:in\s+)?(?:19|20)\d{2}")
        .expect("valid regex")
});

static WS_FAMILY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)family[-\s]owned|family\s+run|locally owned").expect("valid regex")
});

static WS_TECHNICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)technical|specialist|certified|compliance|industry|solution|implementation")
        .expect("valid regex")
});

static WS_ACCESSIBLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)simple|easy|understand|explain|guide|help you").expect("valid regex")
});

static WS_HOMEOWNER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)homeowner|residential|household").expect("valid regex"));

static WS_COMMERCIAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)commercial|business|contractor|enterprise|B2B").expect("valid regex")
});

static WS_SERVICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)service|offering|package|plan").expect("valid regex"));

static WS_SERVICE_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)service|offer|what we|package|plan").expect("valid regex")
});

const PITCH_PARAGRAPH_SEL: &str = "main p, article p, [role='main'] p, .hero p, [class*='hero'] p";

const OVERVIEW_PARAGRAPH_SEL: &str =
    "main p, article p, [role='main'] p, .hero p, [class*='hero'] p, [class*='intro'] p, [class*='about'] p";

const PITCH_CAP: usize = 500;
const OVERVIEW_CAP: usize = 1000;

fn first_h1(page: &PageDoc) -> Option<String> {
    let sel = Selector::parse("h1").unwrap();
    page.document()
        .select(&sel)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}

/// Short elevator pitch built from the meta description, the h1, and the
/// first lead paragraphs.
pub fn company_pitch(page: &PageDoc, meta_description: &str) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if meta_description.len() >= 40 {
        parts.push(truncate(meta_description, 300).to_string());
    }
    if let Some(h1) = first_h1(page) {
        if h1.len() > 10 && h1.len() < 200 && !parts.iter().any(|p| p.contains(&h1)) {
            parts.push(h1);
        }
    }
    let sel = Selector::parse(PITCH_PARAGRAPH_SEL).unwrap();
    for el in page.document().select(&sel).take(3) {
        if is_inside_noise(&el) {
            continue;
        }
        let p = element_text(el);
        if p.len() < 40 || p.len() > 400 || PITCH_NAV_RE.is_match(truncate(&p, 20)) {
            continue;
        }
        if !parts.iter().any(|x| x.contains(truncate(&p, 50))) {
            parts.push(p);
        }
    }
    if parts.len() < 2 {
        let lead = truncate(page.main_text(), 800);
        if lead.len() > 60 && !parts.iter().any(|p| p == lead) {
            parts.push(lead.to_string());
        }
    }
    if parts.is_empty() {
        if meta_description.is_empty() {
            return None;
        }
        return Some(truncate(meta_description, 300).to_string());
    }
    Some(truncate(&parts.join(" "), PITCH_CAP).trim().to_string())
}

/// Context already extracted from the page that the overview composer stitches
/// together.
#[derive(Debug)]
pub struct OverviewInputs<'a> {
    pub title: Option<&'a str>,
    pub meta_description: Option<&'a str>,
    pub about: &'a AboutStory,
    pub industry: Option<&'a str>,
    pub business_model: Option<&'a str>,
    pub location: Option<&'a str>,
    pub year_founded: Option<&'a str>,
}

fn append_sentence(overview: &mut String, piece: &str) {
    if !overview.is_empty() {
        overview.push(' ');
    }
    overview.push_str(piece);
}

fn append_specialization(overview: &mut String, specialization: &str) {
    if specialization.starts_with("providing") || specialization.starts_with("specializing") {
        append_sentence(overview, specialization);
    } else {
        append_sentence(overview, &format!("specializing in {specialization}"));
    }
}

/// Compose a multi-sentence company overview from name, location, founding
/// year, self-descriptions, and who-we-serve phrasing found in the main text.
pub fn comprehensive_overview(page: &PageDoc, inputs: &OverviewInputs<'_>) -> Option<String> {
    let company_name = inputs
        .title
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| first_h1(page))
        .unwrap_or_default();

    let mut parts: Vec<String> = Vec::new();
    if !company_name.is_empty() {
        match inputs.location.filter(|l| !l.is_empty()) {
            Some(location) => {
                let verb = if location.contains(',') { "based in" } else { "located in" };
                parts.push(format!("{company_name} is {verb} {location}."));
            }
            None => parts.push(format!("{company_name} is")),
        }
    }
    if let Some(year) = inputs.year_founded {
        if !parts.iter().any(|p| p.contains(year)) {
            if let Some(m) = YEAR_DIGITS_RE.find(year) {
                parts.push(format!("Since its founding in {},", m.as_str()));
            }
        }
    }

    let main_lower = page.main_text().to_lowercase();
    let mut characteristics: Vec<&str> = Vec::new();
    if FAMILY_RE.is_match(&main_lower) {
        characteristics.push("a family-owned and operated company");
    }
    if main_lower.contains("premier") {
        characteristics.push("a premier");
    } else if main_lower.contains("leading") {
        characteristics.push("a leading");
    } else if main_lower.contains("trusted partner") {
        characteristics.push("a trusted partner");
    }

    let mut specialization = String::new();
    if let Some(industry) = inputs.industry.filter(|i| !i.is_empty()) {
        specialization = industry.to_lowercase();
        if specialization.contains("services") {
            specialization = format!("providing {specialization}");
        } else if !specialization.contains("providing") && !specialization.contains("specializing")
        {
            specialization = format!("specializing in {specialization}");
        }
    } else if let Some(model) = inputs.business_model.filter(|m| !m.is_empty()) {
        specialization = truncate(&model.to_lowercase(), 150).to_string();
    }

    let sel = Selector::parse(OVERVIEW_PARAGRAPH_SEL).unwrap();
    let mut hero: Vec<String> = Vec::new();
    for el in page.document().select(&sel).take(5) {
        if is_inside_noise(&el) {
            continue;
        }
        let p = element_text(el);
        if p.len() < 60 || p.len() > 500 || OVERVIEW_NAV_RE.is_match(truncate(&p, 30)) {
            continue;
        }
        if !DESCRIPTIVE_RE.is_match(&p) {
            continue;
        }
        if !hero.iter().any(|x| x.contains(truncate(&p, 50))) {
            hero.push(p);
        }
    }
    if let Some(meta) = inputs.meta_description.filter(|m| m.len() >= 60) {
        let meta_lower = meta.to_lowercase();
        if !meta_lower.contains("cookie") && !meta_lower.contains("privacy policy") {
            hero.insert(0, meta.to_string());
        }
    }

    let mut overview = parts.join(" ");
    if let Some(first) = characteristics.first() {
        if !overview.contains(first) {
            append_sentence(&mut overview, first);
        }
    }

    if let Some(first_para) = hero.first() {
        let core = SPECIALIZE_PHRASE_RE
            .find(first_para)
            .map(|m| m.as_str())
            .unwrap_or(first_para);
        let spec_head = specialization.split_whitespace().next().unwrap_or("");
        if !specialization.is_empty() && !core.to_lowercase().contains(spec_head) {
            append_specialization(&mut overview, &specialization);
        } else {
            append_sentence(&mut overview, core);
        }
    } else if !specialization.is_empty() {
        append_specialization(&mut overview, &specialization);
    }

    if let Some(caps) = TARGET_RE.captures(&main_lower) {
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        if raw.len() < 200 {
            let target = clean(raw);
            if !overview.to_lowercase().contains(truncate(&target, 20)) {
                overview.push_str(&format!(" The company serves {target}."));
            }
        }
    }
    if let Some(m) = EXPERIENCE_RE.find(&main_lower) {
        if !overview.contains(m.as_str()) {
            overview.push_str(&format!(" With {},", m.as_str()));
        }
    }
    if let Some(caps) = PARTNER_WITH_RE.captures(&main_lower) {
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        if raw.len() < 100 {
            let partner = clean(raw);
            if !overview.to_lowercase().contains(truncate(&partner, 20)) {
                overview.push_str(&format!(" The company has partnered with {partner}."));
            }
        }
    }
    if hero.len() > 1 {
        let value_prop = hero[1..hero.len().min(3)].join(" ");
        if value_prop.len() > 50
            && value_prop.len() < 400
            && VALUE_PROP_RE.is_match(&value_prop)
            && !overview
                .to_lowercase()
                .contains(&truncate(&value_prop, 50).to_lowercase())
        {
            append_sentence(&mut overview, &value_prop);
        }
    }

    if overview.len() < 100 {
        if let Some(about_overview) = &inputs.about.overview {
            overview = about_overview.clone();
        }
    }
    let mut overview = clean(&overview);
    if overview.len() < 80 {
        if let Some(meta) = inputs.meta_description.filter(|m| m.len() >= 60) {
            overview = meta.to_string();
        } else if let Some(about_overview) =
            inputs.about.overview.as_deref().filter(|o| o.len() >= 60)
        {
            overview = about_overview.to_string();
        } else {
            let p_sel = Selector::parse("main p, article p, [role='main'] p").unwrap();
            if let Some(p) = page.document().select(&p_sel).next().map(element_text) {
                if p.len() >= 60 {
                    overview = p;
                }
            }
        }
    }
    let overview = truncate(&overview, OVERVIEW_CAP).trim().to_string();
    if overview.is_empty() { None } else { Some(overview) }
}

/// Describe the site's writing style from tone words, trust signals, CTA
/// phrasing, and page structure.
pub fn writing_style(
    page: &PageDoc,
    ctas: &[String],
    has_faq: bool,
    has_testimonials: bool,
) -> Option<String> {
    let text = truncate(page.main_text(), 4500);
    if text.len() < 120 {
        let title = page.title().unwrap_or_default();
        let desc = page.meta_description().unwrap_or_default();
        if title.is_empty() && desc.is_empty() {
            return None;
        }
        let blended = clean(&format!("{title} {desc}"));
        return Some(format!(
            "Professional, informative tone. {}.",
            truncate(&blended, 350)
        ));
    }

    let sentence_lengths: Vec<usize> = text
        .split(['.', '!', '?'])
        .map(|s| s.split_whitespace().count())
        .filter(|&n| n >= 4)
        .collect();
    let avg_len = if sentence_lengths.is_empty() {
        0.0
    } else {
        sentence_lengths.iter().sum::<usize>() as f64 / sentence_lengths.len() as f64
    };

    let mut parts: Vec<String> = Vec::new();

    let mut tone_words: Vec<&str> = Vec::new();
    if WS_PROFESSIONAL_RE.is_match(text) {
        tone_words.push("professional");
    }
    if WS_INFORMATIVE_RE.is_match(text) || (avg_len > 14.0 && text.len() > 500) {
        tone_words.push("informative");
    }
    if WS_AUDIENCE_RE.is_match(text) {
        tone_words.push("customer-centric");
    }
    if !tone_words.is_empty() {
        let rest: Vec<&str> = tone_words
            .iter()
            .copied()
            .filter(|w| *w != "professional")
            .collect();
        let tail = if rest.is_empty() {
            "informative".to_string()
        } else {
            rest.join(", ")
        };
        parts.push(format!("Professional, {tail}."));
    }

    let mut trust_signals: Vec<&str> = Vec::new();
    if WS_TRUST_RE.is_match(text) {
        trust_signals.push("aiming to build trust");
    }
    if WS_LONGEVITY_RE.is_match(text) {
        trust_signals.push("highlighting experience and longevity");
    }
    if WS_FAMILY_RE.is_match(text) {
        trust_signals.push("family-owned or local values");
    }
    if !trust_signals.is_empty() {
        let joined = trust_signals[..trust_signals.len().min(2)].join(" and ");
        parts.push(format!("The tone is confident and reassuring, {joined}."));
    }

    if ctas.is_empty() {
        parts.push("The language is clear and direct.".to_string());
    } else {
        let examples: Vec<String> = ctas.iter().take(2).map(|c| format!("\"{c}\"")).collect();
        parts.push(format!(
            "The language is clear and direct, with strong calls to action like {}.",
            examples.join(" and ")
        ));
    }

    if WS_TECHNICAL_RE.is_match(text) && WS_ACCESSIBLE_RE.is_match(text) {
        parts.push("It balances technical or industry terms with accessible explanations.".to_string());
    }
    let mut audience: Vec<&str> = Vec::new();
    if WS_HOMEOWNER_RE.is_match(text) {
        audience.push("homeowners");
    }
    if WS_COMMERCIAL_RE.is_match(text) {
        audience.push("commercial clients or businesses");
    }
    if audience.len() >= 2 {
        parts.push(format!("Content caters to both {}.", audience.join(" and ")));
    } else if audience.len() == 1 {
        parts.push(format!("Content is geared toward {}.", audience[0]));
    }

    let heading_sel = Selector::parse("h1, h2, h3").unwrap();
    let has_service_content = WS_SERVICE_RE.is_match(text)
        && page
            .document()
            .select(&heading_sel)
            .map(element_text)
            .any(|h| WS_SERVICE_HEADING_RE.is_match(&h));
    let mut structure_bits: Vec<&str> = Vec::new();
    if has_faq {
        structure_bits.push("FAQs");
    }
    if has_testimonials {
        structure_bits.push("testimonials");
    }
    if has_service_content {
        structure_bits.push("clear service descriptions");
    }
    if !structure_bits.is_empty() {
        parts.push(format!(
            "The content is well-structured with {} to educate and guide potential clients.",
            structure_bits.join(", ")
        ));
    }

    Some(parts.join(" "))
}

/// Describe the visual style, either from explicit brand/design copy or
/// inferred from the page structure.
pub fn art_style(page: &PageDoc) -> String {
    let sel = Selector::parse(
        "[class*='brand'], [class*='style'], [class*='design'], [class*='aesthetic'], [class*='visual']",
    )
    .unwrap();
    for el in page.document().select(&sel) {
        if is_inside_noise(&el) {
            continue;
        }
        let text = element_text(el);
        if text.len() > 30 && text.len() < 500 {
            return truncate(&text, 300).to_string();
        }
    }
    let hero_sel = Selector::parse("[class*='hero'], [class*='banner']").unwrap();
    let card_sel = Selector::parse("[class*='card'], [class*='grid']").unwrap();
    let has_hero = page.document().select(&hero_sel).next().is_some();
    let has_cards = page.document().select(&card_sel).count() > 2;
    if has_hero && has_cards {
        "Clean, modern web design with hero sections and card-based layout.".to_string()
    } else if has_hero {
        "Modern layout with prominent hero or banner section.".to_string()
    } else {
        "Professional web presence.".to_string()
    }
}
