//! schema.org JSON-LD reading.
//!
//! Structured data is the highest-confidence source on the page, so the
//! organization block feeds most identity fallback chains. Malformed blocks
//! are skipped without failing the page.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;
use serde_json::Value;
use tracing::debug;

use crate::page::PageDoc;
use crate::text::clean;

static ORG_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Organization|LocalBusiness|Corporation|Company").expect("valid regex")
});

static REVIEW_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Review|Testimonial").expect("valid regex"));

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{4})").expect("valid regex"));

const MAX_SAME_AS: usize = 15;

/// Organization facts pulled from `application/ld+json` blocks.
#[derive(Debug, Clone, Default)]
pub struct JsonLdOrg {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub logo: Option<String>,
    pub founding_date: Option<String>,
    pub employee_count: Option<String>,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub same_as: Vec<String>,
}

/// First four-digit run in a date-ish string (`"2005-03-01"` → `"2005"`).
pub fn normalize_year(s: &str) -> Option<String> {
    YEAR_RE
        .captures(s)
        .map(|c| c[1].to_string())
}

fn ld_blocks(doc: &PageDoc) -> Vec<Value> {
    let sel = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    let mut blocks = Vec::new();
    for el in doc.document().select(&sel) {
        let raw: String = el.text().collect();
        match serde_json::from_str::<Value>(&raw) {
            Ok(v) => blocks.push(v),
            Err(e) => debug!(error = %e, "skipping malformed JSON-LD block"),
        }
    }
    blocks
}

/// Flatten arrays and `@graph` wrappers into candidate objects.
fn candidates(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().flat_map(candidates).collect(),
        Value::Object(map) => {
            if let Some(Value::Array(graph)) = map.get("@graph") {
                graph.iter().flat_map(candidates).collect()
            } else {
                vec![value]
            }
        }
        _ => Vec::new(),
    }
}

fn type_matches(v: &Value, re: &Regex) -> bool {
    match v.get("@type") {
        Some(Value::String(t)) => re.is_match(t),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| re.is_match(t)),
        _ => false,
    }
}

fn str_field(v: &Value, key: &str) -> Option<String> {
    v.get(key)
        .and_then(Value::as_str)
        .map(clean)
        .filter(|s| !s.is_empty())
}

fn logo_field(v: &Value) -> Option<String> {
    match v.get("logo") {
        Some(Value::String(s)) => Some(clean(s)).filter(|s| !s.is_empty()),
        Some(obj @ Value::Object(_)) => str_field(obj, "url"),
        _ => None,
    }
}

fn employee_field(v: &Value) -> Option<String> {
    match v.get("numberOfEmployees") {
        Some(Value::String(s)) => Some(clean(s)).filter(|s| !s.is_empty()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(obj @ Value::Object(_)) => match obj.get("value") {
            Some(Value::String(s)) => Some(clean(s)).filter(|s| !s.is_empty()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        },
        _ => None,
    }
}

/// PostalAddress objects join their parts; plain strings pass through.
fn address_field(v: &Value) -> Option<String> {
    match v.get("address") {
        Some(Value::String(s)) => Some(clean(s)).filter(|s| !s.is_empty()),
        Some(obj @ Value::Object(_)) => {
            let parts: Vec<String> = [
                "streetAddress",
                "addressLocality",
                "addressRegion",
                "postalCode",
                "addressCountry",
            ]
            .iter()
            .filter_map(|key| str_field(obj, key))
            .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

fn contact_point(v: &Value) -> (Option<String>, Option<String>) {
    let point = match v.get("contactPoint") {
        Some(Value::Array(items)) => items.first(),
        Some(obj @ Value::Object(_)) => Some(obj),
        _ => None,
    };
    match point {
        Some(p) => (str_field(p, "email"), str_field(p, "telephone")),
        None => (None, None),
    }
}

/// Read organization facts from every JSON-LD block on the page.
/// The first value found for each field wins.
pub fn extract_org(doc: &PageDoc) -> JsonLdOrg {
    let mut org = JsonLdOrg::default();
    let blocks = ld_blocks(doc);

    for block in &blocks {
        for cand in candidates(block) {
            if !type_matches(cand, &ORG_TYPE_RE) {
                continue;
            }

            org.name = org.name.take().or_else(|| str_field(cand, "name"));
            org.description = org
                .description
                .take()
                .or_else(|| str_field(cand, "description"));
            org.url = org.url.take().or_else(|| str_field(cand, "url"));
            org.logo = org.logo.take().or_else(|| logo_field(cand));
            org.founding_date = org
                .founding_date
                .take()
                .or_else(|| str_field(cand, "foundingDate"));
            org.employee_count = org.employee_count.take().or_else(|| employee_field(cand));
            org.address = org.address.take().or_else(|| address_field(cand));

            let (email, phone) = contact_point(cand);
            org.contact_email = org.contact_email.take().or(email);
            org.contact_phone = org.contact_phone.take().or(phone);

            if let Some(Value::Array(links)) = cand.get("sameAs") {
                for link in links.iter().filter_map(Value::as_str) {
                    if org.same_as.len() >= MAX_SAME_AS {
                        break;
                    }
                    let link = link.trim().to_string();
                    if !link.is_empty() && !org.same_as.contains(&link) {
                        org.same_as.push(link);
                    }
                }
            }
        }
    }

    org
}

fn quote_from(v: &Value) -> Option<String> {
    let body = str_field(v, "reviewBody")
        .or_else(|| str_field(v, "description"))
        .or_else(|| str_field(v, "text"))?;
    let author = match v.get("author") {
        Some(Value::String(s)) => Some(clean(s)).filter(|s| !s.is_empty()),
        Some(obj @ Value::Object(_)) => str_field(obj, "name"),
        _ => None,
    };
    Some(match author {
        Some(name) => format!("{body} — {name}"),
        None => body,
    })
}

/// Customer quotes from Review/Testimonial blocks, including `review` arrays
/// nested inside organization objects.
pub fn review_quotes(doc: &PageDoc) -> Vec<String> {
    let mut quotes = Vec::new();
    for block in ld_blocks(doc) {
        for cand in candidates(&block) {
            if type_matches(cand, &REVIEW_TYPE_RE) {
                if let Some(q) = quote_from(cand) {
                    quotes.push(q);
                }
            }
            if let Some(Value::Array(reviews)) = cand.get("review") {
                for review in reviews {
                    if let Some(q) = quote_from(review) {
                        quotes.push(q);
                    }
                }
            }
        }
    }
    quotes
}
