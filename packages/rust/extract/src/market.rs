//! Market and customer signals: audiences, needs, personas, channels,
//! funnels, partners, and industry groupings.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use crate::dom::{element_text, is_inside_noise};
use crate::page::PageDoc;
use crate::text::{LEGAL_BOILERPLATE_RE, clean, truncate};

static CTA_WORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)contact|sign up|subscribe|get started|learn more|book|schedule|request|demo|free trial|buy now|add to cart")
        .expect("valid regex")
});

static NAV_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:home|about|contact|menu)$").expect("valid regex"));

static AUDIENCE_PHRASES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (
            r"(?i)\b(?:we serve|serving|for)\s+(?:both\s+)?(?:residential and commercial|homeowners and (?:commercial|business))",
            "Residential and commercial clients",
        ),
        (r"(?i)\bhomeowners?\b", "Homeowners"),
        (r"(?i)\b(?:small\s+)?business(?:es)?\b", "Small businesses"),
        (r"(?i)\bcontractors?\b", "Contractors"),
        (r"(?i)\benterprises?\b|\bB2B\b", "Enterprises / B2B"),
        (r"(?i)\b(?:individuals?|families?|consumers?|B2C)\b", "Individuals"),
        (r"(?i)\bfamilies\b", "Families"),
        (r"(?i)\bproperty\s+owners?\b", "Property owners"),
        (r"(?i)\bvehicle\s+owners?\b|\bcar\s+owners?\b", "Vehicle owners"),
        (r"(?i)\brental\s+property\s+owners?\b", "Rental property owners"),
        (r"(?i)\bspanish[- ]?speaking\s+community\b", "Spanish-speaking community"),
        (r"(?i)\b(?:local|regional)\s+communities?\b", "Local communities"),
        (r"(?i)\bgovernment\s+(?:agencies?|contracts?)\b", "Government"),
        (r"(?i)\bnonprofits?\b", "Nonprofits"),
        (r"(?i)\bagricultural\s+clients?\b|\bagriculture\b", "Agricultural clients"),
        (r"(?i)\bpublic\s*/\s*community\s+entities?\b", "Public/Community entities"),
    ]
    .into_iter()
    .map(|(re, label)| (Regex::new(re).expect("valid regex"), label))
    .collect()
});

static TRADES_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)plumb|drill|well|water|repair|hvac|roof|landscap|lawn|clean|moving|handyman")
        .expect("valid regex")
});

static PROFESSIONAL_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)consulting|accounting|legal|marketing|software|agency|tax|cpa")
        .expect("valid regex")
});

static IDEAL_PERSONA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:ideal\s+(?:customer|client|persona)|who\s+we\s+serve|our\s+clients?\s+include)[^.]{20,400}\.")
        .expect("valid regex")
});

static NEED_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)need|want|seek|require|looking for|protect|ensure|help|assist|peace of mind|confidence|support|guidance|coverage|protection")
        .expect("valid regex")
});

static NEED_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:customers?|clients?|you)\s+(?:need|want|seek|require|look for)[^.!?]{10,150}[.!?]")
        .expect("valid regex")
});

static PROBLEM_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:struggl|challeng|problem|difficult|complex|overwhelm)[^.!?]{5,120}[.!?]")
        .expect("valid regex")
});

static CHANNEL_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)contact us|get in touch|reach us|call us|phone|tel:").expect("valid regex")
});

static CHANNEL_ONLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)email|@|contact form|message us").expect("valid regex"));

static CHANNEL_IN_PERSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)visit|location|address|in[- ]?person|office|walk[- ]?in").expect("valid regex")
});

static CHANNEL_CHAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)chat|live chat|messenger").expect("valid regex"));

static CHANNEL_SOCIAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)social|facebook|linkedin|twitter|instagram").expect("valid regex")
});

static FUNNEL_PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)quote\s*form|get\s*a\s*quote|request\s*quote",
        r"(?i)contact\s*form|contact\s*us|get\s*in\s*touch",
        r"(?i)sign\s*up|newsletter|subscribe",
        r"(?i)schedule|appointment|book\s*a\s*call|consultation",
        r"(?i)request\s*(?:a\s*)?(?:demo|estimate|assessment)",
        r"(?i)apply\s*now|application",
        r"(?i)callback|request\s*call",
    ]
    .into_iter()
    .map(|re| Regex::new(re).expect("valid regex"))
    .collect()
});

static PARTNER_MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:partner|powered by|integrat(?:ion|es)|via|using)\s+(?:with\s+)?([A-Z][A-Za-z0-9.\s]+?)(?:\s+(?:and|,)|\.|$)")
        .expect("valid regex")
});

const INDUSTRY_WORDS: [&str; 23] = [
    "medical",
    "healthcare",
    "law",
    "legal",
    "construction",
    "real estate",
    "insurance",
    "tax",
    "accounting",
    "restaurant",
    "retail",
    "manufacturing",
    "technology",
    "finance",
    "education",
    "government",
    "nonprofit",
    "contractors",
    "trades",
    "homeowners",
    "businesses",
    "individuals",
    "families",
];

const AUDIENCE_SECTION_SEL: &str = "[class*='audience'], [class*='who-we'], [class*='clients'], [class*='customers'], [class*='serve'], [class*='target']";

const PERSONA_SECTION_SEL: &str = "[class*='persona'], [class*='audience'], [class*='who-we'], [class*='our-clients'], [class*='ideal'], [class*='target-audience'], [class*='market'], [class*='customers']";

const NEED_SECTION_SEL: &str = "[class*='need'], [class*='why-choose'], [class*='problem'], [class*='solution'], [class*='benefit'], [class*='customer']";

const MAX_CTAS: usize = 15;
const MAX_BUYERS: usize = 12;
const MAX_NEEDS: usize = 10;
const MAX_CHANNELS: usize = 8;
const MAX_FUNNELS: usize = 10;
const MAX_PARTNERS: usize = 15;
const MAX_GROUPINGS: usize = 12;

/// Link and button labels that read like calls to action.
pub fn extract_ctas(page: &PageDoc) -> Vec<String> {
    let sel = Selector::parse("a, button").unwrap();
    let mut ctas: Vec<String> = Vec::new();
    for el in page.document().select(&sel) {
        let text = element_text(el);
        if !text.is_empty()
            && text.len() < 80
            && CTA_WORDS_RE.is_match(&text)
            && !ctas.iter().any(|c| c == &text)
        {
            ctas.push(text);
        }
    }
    ctas.truncate(MAX_CTAS);
    ctas
}

fn add_buyer(buyers: &mut Vec<String>, label: &str) {
    if label.len() > 1
        && label.len() < 80
        && !buyers.iter().any(|b| b.to_lowercase() == label.to_lowercase())
    {
        buyers.push(label.to_string());
    }
}

/// Audiences the site says it serves, from dedicated sections, recognizable
/// phrases, and finally the page title.
pub fn extract_target_buyers(page: &PageDoc) -> Vec<String> {
    let mut buyers: Vec<String> = Vec::new();
    let main_text = truncate(page.main_text(), 6000);

    let section_sel = Selector::parse(AUDIENCE_SECTION_SEL).unwrap();
    let item_sel = Selector::parse("li, p, h3, h4, [class*='item']").unwrap();
    for section in page.document().select(&section_sel) {
        if is_inside_noise(&section) {
            continue;
        }
        for node in section.select(&item_sel) {
            let text = element_text(node);
            if text.len() >= 2 && text.len() <= 80 && !NAV_ONLY_RE.is_match(&text) {
                add_buyer(&mut buyers, &text);
            }
        }
    }

    for (re, label) in AUDIENCE_PHRASES.iter() {
        if re.is_match(main_text) {
            add_buyer(&mut buyers, label);
        }
    }

    if buyers.is_empty() {
        let title = page.title().unwrap_or_default();
        let combined = format!("{title} {}", truncate(main_text, 1000)).to_lowercase();
        for (re, label) in AUDIENCE_PHRASES.iter() {
            if re.is_match(&combined) {
                add_buyer(&mut buyers, label);
            }
        }
        if buyers.is_empty() && !title.is_empty() {
            if TRADES_TITLE_RE.is_match(&title) {
                add_buyer(&mut buyers, "Homeowners");
            }
            if PROFESSIONAL_TITLE_RE.is_match(&title) {
                add_buyer(&mut buyers, "Small businesses");
            }
        }
    }

    buyers.truncate(MAX_BUYERS);
    buyers
}

/// Ideal customer persona, from persona sections down to a sentence composed
/// out of the target buyers.
pub fn extract_persona(page: &PageDoc, buyers: &[String]) -> Option<String> {
    let section_sel = Selector::parse(PERSONA_SECTION_SEL).unwrap();
    for el in page.document().select(&section_sel) {
        if is_inside_noise(&el) {
            continue;
        }
        let text = element_text(el);
        if text.len() >= 80 && text.len() <= 1200 && !LEGAL_BOILERPLATE_RE.is_match(&text) {
            return Some(truncate(&text, 700).to_string());
        }
    }

    let serve_sel =
        Selector::parse("[class*='serve'], [class*='clients'], [class*='customers']").unwrap();
    let p_sel = Selector::parse("p").unwrap();
    for el in page.document().select(&serve_sel) {
        if is_inside_noise(&el) {
            continue;
        }
        let paragraphs: Vec<String> = el
            .select(&p_sel)
            .map(element_text)
            .filter(|t| t.len() >= 50 && t.len() <= 500)
            .collect();
        if !paragraphs.is_empty() {
            let joined = paragraphs[..paragraphs.len().min(2)].join(" ");
            return Some(truncate(&joined, 600).to_string());
        }
    }

    if let Some(m) = IDEAL_PERSONA_RE.find(page.main_text()) {
        return Some(truncate(&clean(m.as_str()), 600).to_string());
    }

    if !buyers.is_empty() {
        let listed = buyers[..buyers.len().min(8)].join(", ");
        return Some(format!(
            "Target audience includes {listed}. Clients seek the services and expertise offered, with personalized support and clear guidance."
        ));
    }
    None
}

fn add_need(needs: &mut Vec<String>, raw: &str) {
    let text = truncate(&clean(raw), 200).to_string();
    if text.len() < 15 {
        return;
    }
    let probe = truncate(&text, 30).to_lowercase();
    if needs.iter().any(|n| n.to_lowercase().contains(&probe)) {
        return;
    }
    needs.push(text);
}

/// Customer needs and pain points from benefit sections and need/problem
/// phrasing in the body copy.
pub fn extract_customer_needs(page: &PageDoc) -> Vec<String> {
    let mut needs: Vec<String> = Vec::new();
    let main_text = truncate(page.main_text(), 8000);

    let section_sel = Selector::parse(NEED_SECTION_SEL).unwrap();
    let item_sel = Selector::parse("li, p").unwrap();
    for section in page.document().select(&section_sel) {
        if is_inside_noise(&section) {
            continue;
        }
        for node in section.select(&item_sel) {
            let text = element_text(node);
            if text.len() >= 20 && text.len() <= 300 && NEED_KEYWORD_RE.is_match(&text) {
                add_need(&mut needs, &text);
            }
        }
    }
    for m in NEED_PHRASE_RE.find_iter(main_text).take(5) {
        add_need(&mut needs, m.as_str());
    }
    for m in PROBLEM_PHRASE_RE.find_iter(main_text).take(3) {
        add_need(&mut needs, m.as_str());
    }

    needs.truncate(MAX_NEEDS);
    needs
}

/// Contact channels inferred from body copy and contact sections.
pub fn extract_channels(page: &PageDoc) -> Vec<String> {
    fn push(label: &str, channels: &mut Vec<String>) {
        if !channels.iter().any(|c| c.eq_ignore_ascii_case(label)) {
            channels.push(label.to_string());
        }
    }
    let mut channels: Vec<String> = Vec::new();
    let main_text = page.main_text();
    if CHANNEL_PHONE_RE.is_match(main_text) {
        push("Phone", &mut channels);
    }
    if CHANNEL_ONLINE_RE.is_match(main_text) {
        push("Online", &mut channels);
    }
    if CHANNEL_IN_PERSON_RE.is_match(main_text) {
        push("In-person", &mut channels);
    }
    if CHANNEL_CHAT_RE.is_match(main_text) {
        push("Chat", &mut channels);
    }
    if CHANNEL_SOCIAL_RE.is_match(main_text) {
        push("Social media", &mut channels);
    }
    let section_sel = Selector::parse("[class*='contact'], [class*='channel']").unwrap();
    for el in page.document().select(&section_sel) {
        let text = element_text(el).to_lowercase();
        if text.contains("online") {
            push("Online", &mut channels);
        }
        if text.contains("phone") {
            push("Phone", &mut channels);
        }
    }
    channels.truncate(MAX_CHANNELS);
    channels
}

fn add_funnel(funnels: &mut Vec<String>, label: &str) {
    if label.len() >= 3
        && label.len() <= 80
        && !funnels.iter().any(|f| f.to_lowercase() == label.to_lowercase())
    {
        funnels.push(label.to_string());
    }
}

/// Lead funnels: forms on the page plus recognizable funnel phrases.
pub fn extract_funnels(page: &PageDoc) -> Vec<String> {
    let mut funnels: Vec<String> = Vec::new();
    let form_sel = Selector::parse("form").unwrap();
    let placeholder_sel = Selector::parse("[placeholder]").unwrap();
    let submit_sel = Selector::parse("[type='submit'], button").unwrap();
    for form in page.document().select(&form_sel) {
        let submit = form.select(&submit_sel).next().map(element_text).unwrap_or_default();
        let placeholder = form
            .select(&placeholder_sel)
            .next()
            .and_then(|el| el.value().attr("placeholder"))
            .unwrap_or_default();
        let action = form.value().attr("action").unwrap_or_default();
        let label = if !submit.is_empty() {
            submit
        } else if !placeholder.is_empty() {
            clean(placeholder)
        } else {
            clean(action)
        };
        if label.len() >= 2 {
            add_funnel(&mut funnels, &label);
        }
    }
    for re in FUNNEL_PHRASES.iter() {
        if let Some(m) = re.find(page.main_text()) {
            add_funnel(&mut funnels, &clean(m.as_str()));
        }
    }
    funnels.truncate(MAX_FUNNELS);
    funnels
}

/// Suppliers and partners from partner sections and "powered by"-style
/// mentions.
pub fn extract_suppliers_partners(page: &PageDoc) -> Vec<String> {
    let mut list: Vec<String> = Vec::new();
    let section_sel = Selector::parse(
        "[class*='partner'], [class*='supplier'], [class*='integration'], [class*='powered']",
    )
    .unwrap();
    let node_sel = Selector::parse("a[href], img[alt], span, div").unwrap();
    for section in page.document().select(&section_sel) {
        for node in section.select(&node_sel) {
            let mut text = element_text(node);
            if text.is_empty() {
                text = node.value().attr("alt").map(clean).unwrap_or_default();
            }
            if text.len() >= 2
                && text.len() <= 60
                && !NAV_ONLY_RE.is_match(&text)
                && !list.iter().any(|l| l.to_lowercase() == text.to_lowercase())
            {
                list.push(text);
            }
        }
    }
    for caps in PARTNER_MENTION_RE.captures_iter(page.main_text()) {
        let name = truncate(&clean(caps.get(1).map(|m| m.as_str()).unwrap_or("")), 50).to_string();
        if name.len() >= 2
            && !list
                .iter()
                .any(|l| l.to_lowercase().contains(&name.to_lowercase()))
        {
            list.push(name);
        }
    }
    list.truncate(MAX_PARTNERS);
    list
}

/// Industry buckets mentioned in the copy, with the classified industry
/// first.
pub fn extract_industry_groupings(page: &PageDoc, inferred_industry: Option<&str>) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    let main_lower = page.main_text().to_lowercase();
    for word in INDUSTRY_WORDS {
        if main_lower.contains(word) && !groups.iter().any(|g| g.to_lowercase().contains(word)) {
            let mut chars = word.chars();
            let capitalized = match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => continue,
            };
            groups.push(capitalized);
        }
    }
    if let Some(industry) = inferred_industry {
        if !groups.iter().any(|g| g.eq_ignore_ascii_case(industry)) {
            groups.insert(0, industry.to_string());
        }
    }
    groups.truncate(MAX_GROUPINGS);
    groups
}

/// Industry outlook, from sector/market sections or composed from the
/// classified industry and business model.
pub fn extract_industry_outlook(
    page: &PageDoc,
    industry: Option<&str>,
    business_model: Option<&str>,
) -> Option<String> {
    let section_sel = Selector::parse(
        "[class*='industry'], [class*='market'], [class*='outlook'], [class*='trends'], [class*='sector']",
    )
    .unwrap();
    for el in page.document().select(&section_sel) {
        if is_inside_noise(&el) {
            continue;
        }
        let text = element_text(el);
        if text.len() >= 80 && text.len() <= 1500 && !LEGAL_BOILERPLATE_RE.is_match(&text) {
            return Some(truncate(&text, 500).to_string());
        }
    }
    match (industry, business_model) {
        (Some(ind), Some(model)) => Some(format!("Serves the {ind} sector with a {model} focus.")),
        (Some(ind), None) => Some(format!("Serves the {ind} sector.")),
        (None, Some(model)) => Some(format!("Business model: {model}.")),
        (None, None) => None,
    }
}
