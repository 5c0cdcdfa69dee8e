//! Offerings: services, products, and plans with descriptions, features,
//! and pricing pulled from section markup.
//!
//! Detailed section extraction runs first; thinner sources (price tables,
//! title keywords, bare headings) only contribute when it finds nothing.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};
use siteprofiler_shared::{Offering, OfferingKind};

use crate::dom::{ancestor_elements, element_text, is_inside_noise};
use crate::page::PageDoc;
use crate::text::{clean, truncate};

/// Placeholder offering name used when nothing on the page looks sellable.
pub const GENERAL_OFFERINGS: &str = "General offerings";

const OFFERING_CAP: usize = 15;
const FEATURE_CAP: usize = 10;

// Headings that are page chrome, not offering names.
static SKIP_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:home|about|contact|login|menu)$|testimonial|what (?:our )?clients (?:are )?saying|join our newsletter|newsletter|why (?:choose )?us|why (?:we|us)\b|get in touch|follow us|sign up|subscribe|our (?:team|story|mission)|contact us|request a quote|schedule (?:a )?(?:call|consultation)|faq|frequently asked|track your refund|directory")
        .expect("valid regex")
});

static NOT_SERVICE_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)testimonial|what (?:our )?clients|newsletter|why (?:choose )?us|why (?:we|us)\b|join our|get in touch|follow us|sign up|subscribe|our (?:team|story|mission)|contact us|request a quote|schedule (?:a )?(?:call|consultation)|faq|frequently asked")
        .expect("valid regex")
});

static NAV_EXACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:home|about|contact|login|sign|menu)$").expect("valid regex"));

static TITLE_NAV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:home|about|contact|services|our team)$").expect("valid regex")
});

static FALLBACK_SKIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:home|about|contact|services|our team|menu|login|sign|faq|blog|news|testimonial|why (?:choose )?us|get in touch|follow us)$")
        .expect("valid regex")
});

static FEATURES_IDX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)features:").expect("valid regex"));

static PRICING_IDX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pricing:").expect("valid regex"));

static FEATURES_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)features:\s*([^\n]+?)(?:\n|pricing:|$)").expect("valid regex")
});

static GENERIC_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:features?|includes?|specs?|details?):\s*([^.\n]+(?:,\s*[^.\n]+)+)")
        .expect("valid regex")
});

static PRICING_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pricing:\s*([^\n]+)").expect("valid regex"));

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$[\d,]+(?:\.\d{2})?(?:\s*/\s*(?:mo|month|yr|year|per|each))?|\d+(?:\.\d{2})?\s*(?:USD|EUR|GBP|dollars?)|(?:Fixed Price|Commission-based|Price):\s*[\d,]+|Personalized Quote|Free Estimate|Per Project|Per (?:Inspection|Service Call)|Contact (?:us|for quote)")
        .expect("valid regex")
});

static PRICE_SIMPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$[\d,]+(?:\.\d{2})?(?:\s*/\s*(?:mo|month|yr|year))?|\d+(?:\.\d{2})?\s*(?:USD|EUR|GBP)")
        .expect("valid regex")
});

static FEATURE_STAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\d+\s*(?:bed|bath|sqft|car)").expect("valid regex"));

static FEATURES_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)features:\s*[^\n]+").expect("valid regex"));

static PRICING_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pricing:\s*[^\n]+").expect("valid regex"));

static SENTENCE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

const SECTION_SELECTORS: [&str; 17] = [
    "[class*='service']",
    "[class*='product']",
    "[class*='pricing']",
    "[class*='offer']",
    "[class*='featured']",
    "[class*='listing']",
    "[class*='solution']",
    "[class*='package']",
    "[class*='plan']",
    "[class*='card']",
    "[class*='insurance']",
    "[class*='coverage']",
    "[id*='service']",
    "[id*='product']",
    "[id*='offer']",
    "article",
    "section",
];

const HEADING_SEL: &str = "h2, h3, h4, h5, .title, [class*='title'], [class*='name'], [class*='heading']";

const CONTAINER_SEL: &str = "article, [class*='card'], [class*='item'], [class*='service'], [class*='product'], [class*='offer'], [class*='plan'], section, div";

const FEATURE_ITEM_SEL: &str = "li, [class*='feature'], [class*='benefit'], [class*='include'], [class*='detail']";

const INSURANCE_PRODUCTS: [&str; 7] = [
    "Life Insurance",
    "Auto Insurance",
    "Home Insurance",
    "Business Insurance",
    "Flood Insurance",
    "Rental Insurance",
    "Umbrella Insurance",
];

/// Detailed offerings from service/product/pricing sections: one entry per
/// heading-shaped name, with description, features, and pricing resolved
/// from the surrounding container.
pub fn extract_offerings(page: &PageDoc) -> Vec<Offering> {
    let heading_sel = Selector::parse(HEADING_SEL).unwrap();
    let container_sel = Selector::parse(CONTAINER_SEL).unwrap();
    let mut offerings: Vec<Offering> = Vec::new();

    for selector in SECTION_SELECTORS {
        let section_sel = Selector::parse(selector).unwrap();
        for section in page.document().select(&section_sel) {
            if is_inside_noise(&section) {
                continue;
            }
            for el in section.select(&heading_sel) {
                let name = element_text(el);
                if name.len() < 3 || name.len() > 150 || SKIP_HEADING_RE.is_match(&name) {
                    continue;
                }
                let lower = name.to_lowercase();
                if offerings.iter().any(|o| o.name.to_lowercase() == lower) {
                    continue;
                }
                let container = std::iter::once(el)
                    .chain(ancestor_elements(el))
                    .find(|a| container_sel.matches(a))
                    .or_else(|| el.parent().and_then(ElementRef::wrap));
                let Some(container) = container else { continue };
                if let Some(offering) = offering_from_container(el, container, name) {
                    offerings.push(offering);
                }
            }
        }
    }
    offerings
}

fn offering_from_container(
    heading: ElementRef<'_>,
    container: ElementRef<'_>,
    name: String,
) -> Option<Offering> {
    let block_raw: String = container.text().collect();

    let mut desc = desc_from_features_label(&block_raw).unwrap_or_default();
    if desc.len() < 30 {
        if let Some(d) = desc_after_heading(heading) {
            desc = d;
        }
    }
    if desc.len() < 30 {
        if let Some(d) = desc_from_first_paragraph(container) {
            desc = d;
        }
    }
    if desc.len() < 30 {
        if let Some(d) = desc_from_joined_paragraphs(container) {
            desc = d;
        }
    }
    if desc.len() < 30 {
        if let Some(d) = desc_from_attrs(heading, container) {
            desc = d;
        }
    }
    if desc.len() < 30 {
        let without = clean(&block_raw).replacen(&name, "", 1).trim().to_string();
        if without.len() > 30 {
            desc = truncate(&without, 500).to_string();
        }
    }

    let mut features = features_from_label(&block_raw);
    features.extend(features_from_items(container));
    if features.is_empty() {
        features.extend(features_from_inline_list(&block_raw));
    }

    let mut pricing = PRICING_LABEL_RE
        .captures(&block_raw)
        .map(|c| truncate(&clean(&c[1]), 100).to_string());
    if pricing.is_none() {
        pricing = PRICE_RE.find(&block_raw).map(|m| m.as_str().to_string());
    }

    let mut desc = tidy_description(desc);
    if desc.len() < 50 && !features.is_empty() {
        if let Some(rescued) = rescue_description(container) {
            desc = rescued;
        }
    }

    if desc.len() <= 25 && features.is_empty() {
        return None;
    }
    features.truncate(FEATURE_CAP);
    Some(Offering {
        name,
        kind: OfferingKind::Service,
        description: (desc.len() > 25).then(|| truncate(&desc, 600).to_string()),
        features,
        pricing,
        category: None,
    })
}

// "Features:" listings often put the real description between the label
// block and the pricing line; take the longest paragraph of that span.
fn desc_from_features_label(block_raw: &str) -> Option<String> {
    let start = FEATURES_IDX_RE.find(block_raw)?.start();
    let after = &block_raw[start..];
    let between = match PRICING_IDX_RE.find(after) {
        Some(m) => &after[..m.start()],
        None => after,
    };
    let mut longest = String::new();
    for part in between.split('\n') {
        let part = clean(part);
        if part.len() > 50 && part.len() > longest.len() {
            longest = part;
        }
    }
    if longest.is_empty() {
        return None;
    }
    Some(truncate(&longest, 600).to_string())
}

/// Sibling text immediately after the heading, up to the next heading.
fn desc_after_heading(heading: ElementRef<'_>) -> Option<String> {
    let mut out = String::new();
    for sib in heading.next_siblings().filter_map(ElementRef::wrap) {
        if matches!(sib.value().name(), "h1" | "h2" | "h3" | "h4" | "h5") {
            break;
        }
        out.push_str(&sib.text().collect::<String>());
    }
    let text = clean(&out);
    (text.len() > 30).then(|| truncate(&text, 600).to_string())
}

fn desc_from_first_paragraph(container: ElementRef<'_>) -> Option<String> {
    let p_sel = Selector::parse("p").unwrap();
    for p in container.select(&p_sel) {
        let text = element_text(p);
        let lower = text.to_lowercase();
        if text.len() > 50
            && !lower.contains("features:")
            && !lower.contains("pricing:")
            && !FEATURE_STAT_RE.is_match(&text)
        {
            return Some(truncate(&text, 500).to_string());
        }
    }
    None
}

fn desc_from_joined_paragraphs(container: ElementRef<'_>) -> Option<String> {
    let p_sel = Selector::parse("p").unwrap();
    let combined = container
        .select(&p_sel)
        .map(element_text)
        .filter(|t| {
            let lower = t.to_lowercase();
            t.len() > 20 && !lower.contains("features:") && !lower.contains("pricing:")
        })
        .collect::<Vec<_>>()
        .join(" ");
    let combined = truncate(&combined, 500);
    (combined.len() > 30).then(|| combined.to_string())
}

fn desc_from_attrs(heading: ElementRef<'_>, container: ElementRef<'_>) -> Option<String> {
    let raw = container
        .value()
        .attr("data-description")
        .or_else(|| container.value().attr("aria-label"))
        .or_else(|| heading.value().attr("data-description"))?;
    (raw.len() > 30).then(|| truncate(&clean(raw), 500).to_string())
}

/// Strip label lines, collapse whitespace, and drop nav-length fragments.
fn tidy_description(desc: String) -> String {
    if desc.is_empty() {
        return desc;
    }
    let stripped = FEATURES_LINE_RE.replace_all(&desc, "");
    let stripped = PRICING_LINE_RE.replace_all(&stripped, "");
    let collapsed = clean(&stripped);
    let joined = SENTENCE_SPLIT_RE
        .split(&collapsed)
        .filter(|s| s.len() > 15)
        .collect::<Vec<_>>()
        .join(". ");
    truncate(&joined, 600).to_string()
}

fn rescue_description(container: ElementRef<'_>) -> Option<String> {
    let p_sel = Selector::parse("p").unwrap();
    for p in container.select(&p_sel) {
        let text = element_text(p);
        let lower = text.to_lowercase();
        if text.len() > 50 && !lower.contains("features:") && !lower.contains("pricing:") {
            return Some(truncate(&text, 600).to_string());
        }
    }
    None
}

fn features_from_label(block_raw: &str) -> Vec<String> {
    let Some(caps) = FEATURES_LABEL_RE.captures(block_raw) else {
        return Vec::new();
    };
    caps[1]
        .split(',')
        .map(clean)
        .filter(|f| f.len() > 3 && f.len() < 200)
        .collect()
}

fn features_from_items(container: ElementRef<'_>) -> Vec<String> {
    let item_sel = Selector::parse(FEATURE_ITEM_SEL).unwrap();
    container
        .select(&item_sel)
        .map(element_text)
        .filter(|t| t.len() > 5 && t.len() < 200 && !SKIP_HEADING_RE.is_match(t))
        .collect()
}

fn features_from_inline_list(block_raw: &str) -> Vec<String> {
    let Some(caps) = GENERIC_LIST_RE.captures(block_raw) else {
        return Vec::new();
    };
    caps[1]
        .split(',')
        .map(clean)
        .filter(|f| f.len() > 3 && f.len() < 200)
        .collect()
}

/// Currency strings from pricing/plan sections, deduplicated, up to 10.
pub fn price_list(page: &PageDoc) -> Vec<String> {
    let sel = Selector::parse("[class*='pricing'], [class*='price'], [class*='plan']").unwrap();
    let mut prices: Vec<String> = Vec::new();
    for el in page.document().select(&sel) {
        let text: String = el.text().collect();
        for m in PRICE_SIMPLE_RE.find_iter(&text) {
            let p = m.as_str().to_string();
            if !prices.contains(&p) {
                prices.push(p);
            }
        }
    }
    prices.truncate(10);
    prices
}

/// Offerings inferred from the page title plus service-section headings,
/// with a "what the customer gets" one-liner.
pub struct CustomerOfferings {
    pub offerings: Vec<Offering>,
    pub customer_gets: Option<String>,
}

pub fn customer_offerings(page: &PageDoc, title: &str) -> CustomerOfferings {
    let mut offerings: Vec<Offering> = Vec::new();
    let main_lower = truncate(page.main_text(), 5000).to_lowercase();
    let title_lower = title.to_lowercase();

    let mut seeds: Vec<&str> = Vec::new();
    if ["tax", "accounting", "cpa"].iter().any(|k| title_lower.contains(k)) {
        seeds.extend([
            "Tax preparation and filing",
            "Tax planning and consulting",
            "Accounting services",
        ]);
    }
    if title_lower.contains("consulting") {
        seeds.extend(["Consulting services", "Advisory"]);
    }
    if ["legal", "law", "attorney"].iter().any(|k| title_lower.contains(k)) {
        seeds.extend(["Legal services", "Legal advice"]);
    }
    if title_lower.contains("insurance") {
        seeds.push("Insurance products and advice");
        for product in INSURANCE_PRODUCTS {
            if main_lower.contains(&product.to_lowercase()) {
                push_offering(&mut offerings, product);
            }
        }
    }
    for seed in seeds {
        push_offering(&mut offerings, seed);
    }

    let section_sel = Selector::parse(
        "[class*='service'], [class*='offer'], [class*='what we'], [class*='what you'], [class*='solutions']",
    )
    .unwrap();
    let item_sel = Selector::parse("h2, h3, h4, h5, li, [class*='item']").unwrap();
    for section in page.document().select(&section_sel) {
        if is_inside_noise(&section) {
            continue;
        }
        for el in section.select(&item_sel) {
            let t = element_text(el);
            if (3..=120).contains(&t.len())
                && !NAV_EXACT_RE.is_match(&t)
                && !NOT_SERVICE_HEADING_RE.is_match(&t)
            {
                push_offering(&mut offerings, &t);
            }
        }
    }

    let h_sel = Selector::parse("h1, h2").unwrap();
    for el in page.document().select(&h_sel) {
        let h = element_text(el);
        if h.len() > 5
            && h.len() < 150
            && !offerings.iter().any(|o| o.name == h)
            && !TITLE_NAV_RE.is_match(&h)
            && !NOT_SERVICE_HEADING_RE.is_match(&h)
        {
            offerings.push(Offering {
                name: h,
                ..Offering::default()
            });
        }
    }

    let customer_gets = (!offerings.is_empty()).then(|| {
        offerings
            .iter()
            .take(8)
            .map(|o| o.name.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    });
    offerings.truncate(OFFERING_CAP);
    CustomerOfferings {
        offerings,
        customer_gets,
    }
}

fn push_offering(list: &mut Vec<Offering>, name: &str) {
    let lower = name.to_lowercase();
    if list.iter().any(|o| o.name.to_lowercase() == lower) {
        return;
    }
    list.push(Offering {
        name: name.to_string(),
        ..Offering::default()
    });
}

/// Bare h2/h3 scan used when no offering markup matched at all.
fn fallback_heading_offerings(page: &PageDoc) -> Vec<Offering> {
    let sel = Selector::parse("h2, h3").unwrap();
    let p_sel = Selector::parse("p").unwrap();
    let mut offerings: Vec<Offering> = Vec::new();
    for el in page.document().select(&sel) {
        let name = element_text(el);
        if name.len() < 3 || name.len() > 100 || FALLBACK_SKIP_RE.is_match(&name) {
            continue;
        }
        let lower = name.to_lowercase();
        if offerings.iter().any(|o| o.name.to_lowercase() == lower) {
            continue;
        }
        let mut out = String::new();
        for sib in el.next_siblings().filter_map(ElementRef::wrap) {
            if matches!(sib.value().name(), "h1" | "h2" | "h3" | "h4") {
                break;
            }
            out.push_str(&sib.text().collect::<String>());
        }
        let mut desc = truncate(&clean(&out), 500).to_string();
        if desc.len() < 30 {
            if let Some(parent) = el.parent().and_then(ElementRef::wrap) {
                if let Some(p) = parent.select(&p_sel).next() {
                    let text: String = p.text().collect();
                    if text.len() > 30 {
                        desc = truncate(&clean(&text), 500).to_string();
                    }
                }
            }
        }
        offerings.push(Offering {
            name,
            description: (desc.len() > 25).then(|| truncate(&desc, 600).to_string()),
            ..Offering::default()
        });
    }
    offerings
}

/// Full offering assembly: detailed extraction, then price-table plans, then
/// title seeds, then bare headings, then the generic placeholder. Returns
/// the capped list plus the customer-gets summary.
pub fn build_offerings(page: &PageDoc, title: &str) -> (Vec<Offering>, Option<String>) {
    let customer = customer_offerings(page, title);
    let prices = price_list(page);

    let mut offerings = extract_offerings(page);
    if offerings.is_empty() && !prices.is_empty() {
        for (i, p) in prices.iter().enumerate() {
            offerings.push(Offering {
                name: format!("Plan {}", i + 1),
                pricing: Some(p.clone()),
                ..Offering::default()
            });
        }
    }

    let from_title: Vec<Offering> = customer
        .offerings
        .into_iter()
        .filter(|co| {
            !offerings
                .iter()
                .any(|o| o.name.to_lowercase() == co.name.to_lowercase())
        })
        .collect();

    if offerings.is_empty() && from_title.is_empty() {
        offerings = fallback_heading_offerings(page);
    }

    let mut merged: Vec<Offering> = offerings.into_iter().chain(from_title).collect();
    if merged.is_empty() {
        merged.push(Offering {
            name: GENERAL_OFFERINGS.to_string(),
            ..Offering::default()
        });
    }
    merged.truncate(OFFERING_CAP);

    let customer_gets = customer.customer_gets.or_else(|| {
        Some(
            merged
                .iter()
                .take(8)
                .map(|o| o.name.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    });
    (merged, customer_gets)
}

/// Count of service/offer-classed elements; the crawl merge uses this to
/// spot service pages worth a richer re-extraction.
pub fn service_section_count(page: &PageDoc) -> usize {
    let sel = Selector::parse("[class*='service'], [class*='offer']").unwrap();
    page.document().select(&sel).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn page(html: &str) -> PageDoc {
        PageDoc::parse(html, Url::parse("https://acme.example/").unwrap())
    }

    #[test]
    fn detailed_offerings_from_service_cards() {
        let p = page(concat!(
            r#"<body><section class="services">"#,
            r#"<div class="card"><h3>Well Drilling</h3>"#,
            r#"<p>We drill residential and agricultural wells to depths beyond six hundred feet, with licensed crews and modern rotary rigs.</p>"#,
            r#"<ul><li>Site survey included</li><li>Permitting handled</li><li>Flow testing</li></ul>"#,
            r#"</div>"#,
            r#"<div class="card"><h3>Pump Service</h3>"#,
            r#"<p>Submersible and jet pump repair, replacement, and scheduled maintenance plans for homes and ranches.</p>"#,
            r#"</div>"#,
            r#"</section></body>"#,
        ));
        let offerings = extract_offerings(&p);
        assert_eq!(offerings.len(), 2);
        assert_eq!(offerings[0].name, "Well Drilling");
        assert!(offerings[0].description.as_deref().unwrap().contains("drill residential"));
        assert_eq!(
            offerings[0].features,
            vec!["Site survey included", "Permitting handled", "Flow testing"]
        );
        assert_eq!(offerings[1].name, "Pump Service");
        assert!(offerings[1].features.is_empty());
        assert_eq!(service_section_count(&p), 1);
    }

    #[test]
    fn features_and_pricing_labels_parsed() {
        let p = page(concat!(
            r#"<body><section class="listing"><div class="item">"#,
            "\n",
            r#"<h3>Premium Maintenance Plan</h3>"#,
            "\n",
            r#"<p>Features: annual inspection, priority scheduling, discounted parts</p>"#,
            "\n",
            r#"<p>Pricing: $29/mo billed annually</p>"#,
            "\n",
            r#"<p>Our maintenance plan keeps small problems small, with a dedicated coordinator who tracks every visit and follow-up.</p>"#,
            "\n",
            r#"</div></section></body>"#,
        ));
        let offerings = extract_offerings(&p);
        assert_eq!(offerings.len(), 1);
        let plan = &offerings[0];
        assert_eq!(plan.name, "Premium Maintenance Plan");
        assert_eq!(
            plan.features,
            vec!["annual inspection", "priority scheduling", "discounted parts"]
        );
        assert_eq!(plan.pricing.as_deref(), Some("$29/mo billed annually"));
        assert!(plan.description.as_deref().unwrap().contains("dedicated coordinator"));
    }

    #[test]
    fn chrome_headings_are_not_offerings() {
        let p = page(concat!(
            r#"<body><section class="service-area">"#,
            r#"<h3>Septic Inspection</h3>"#,
            r#"<p>Complete septic system inspections with camera scoping, flow tests, and a written report delivered the same week.</p>"#,
            r#"<h2>Why Choose Us</h2>"#,
            r#"<h3>Get In Touch</h3>"#,
            r#"<h2>Testimonials</h2>"#,
            r#"</section></body>"#,
        ));
        let offerings = extract_offerings(&p);
        assert_eq!(offerings.len(), 1);
        assert_eq!(offerings[0].name, "Septic Inspection");
        assert!(offerings[0].description.as_deref().unwrap().contains("camera scoping"));
    }

    #[test]
    fn insurance_title_seeds_products_from_body_text() {
        let p = page(concat!(
            r#"<html><head><title>Bluebonnet Insurance Agency</title></head><body><main><p>"#,
            "We write life insurance and auto insurance policies across the county, and ",
            "umbrella insurance for landlords who want extra liability protection above ",
            "their base policies. Ask about bundling discounts when you call our office.",
            r#"</p></main></body></html>"#,
        ));
        let result = customer_offerings(&p, "Bluebonnet Insurance Agency");
        let names: Vec<&str> = result.offerings.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Life Insurance",
                "Auto Insurance",
                "Umbrella Insurance",
                "Insurance products and advice"
            ]
        );
        assert_eq!(
            result.customer_gets.as_deref(),
            Some("Life Insurance; Auto Insurance; Umbrella Insurance; Insurance products and advice")
        );
    }

    #[test]
    fn price_table_becomes_plans() {
        let p = page(concat!(
            r#"<body><main><div class="pricing-table">"#,
            r#"<span>$49/mo</span><span>$99/mo</span>"#,
            r#"</div></main></body>"#,
        ));
        let (merged, customer_gets) = build_offerings(&p, "");
        let names: Vec<&str> = merged.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Plan 1", "Plan 2"]);
        assert_eq!(merged[0].pricing.as_deref(), Some("$49/mo"));
        assert_eq!(merged[1].pricing.as_deref(), Some("$99/mo"));
        assert_eq!(customer_gets.as_deref(), Some("Plan 1; Plan 2"));
    }

    #[test]
    fn empty_page_falls_back_to_general_offerings() {
        let p = page(r"<body><main><p>Short text here.</p></main></body>");
        let (merged, customer_gets) = build_offerings(&p, "");
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, GENERAL_OFFERINGS);
        assert_eq!(customer_gets.as_deref(), Some("General offerings"));
    }
}
