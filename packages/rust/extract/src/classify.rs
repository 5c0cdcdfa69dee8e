//! Industry and business-model classification from page copy.

use std::sync::LazyLock;

use regex::Regex;

use crate::page::PageDoc;
use crate::text::{clean, truncate};

// Ordered most-specific-first; the first matching rule wins.
static INDUSTRY_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"tax|accounting|cpa|bookkeeping|audit", "Tax & Accounting"),
        (r"consulting|advisory|professional services", "Consulting & Professional Services"),
        (r"legal|law firm|attorney|lawyer", "Legal Services"),
        (r"healthcare|medical|dental|clinic|hospital", "Healthcare"),
        (r"insurance\b", "Insurance"),
        (r"real estate|realtor|property management", "Real Estate"),
        (r"marketing|agency|advertising", "Marketing & Advertising"),
        (r"software|saas|technology|it services|web development", "Technology & Software"),
        (r"financial (?:planning|services)|wealth|investment", "Financial Services"),
        (r"construction|contractor|remodeling", "Construction"),
        (r"plumb|well (?:drill|water|pump)|drilling", "Plumbing & Water"),
        (r"landscap|lawn|garden|tree service", "Landscaping & Outdoor"),
        (r"restaurant|catering|food service", "Food & Hospitality"),
        (r"retail|store|shop\b|e-?commerce", "Retail"),
        (r"education|training|tutoring|school", "Education"),
        (r"automotive|auto repair|car (?:service|dealership)", "Automotive"),
        (r"cleaning|janitorial|maid", "Cleaning Services"),
        (r"photography|photo (?:studio|graphy)", "Photography"),
        (r"design\b|interior design|graphic design", "Design"),
    ]
    .into_iter()
    .map(|(re, label)| (Regex::new(re).expect("valid regex"), label))
    .collect()
});

static MODEL_SENTENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:We|Our\s+(?:company|firm|team)|Our\s+services\s+include)\b[^.!?]{10,180}[.!?]")
        .expect("valid regex")
});

static MODEL_LEGAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)terms of service|privacy policy").expect("valid regex"));

static MODEL_PROFESSIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"consulting|advisory|professional services|we help|we work with clients")
        .expect("valid regex")
});

static MODEL_SUBSCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"subscription|monthly plan|retainer").expect("valid regex"));

static MODEL_PRODUCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"product|e-?commerce|shop|buy").expect("valid regex"));

static MODEL_NO_SALES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"we (?:don't|do not) (?:sell|offer)").expect("valid regex")
});

static MODEL_B2B_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"b2b|business.?to.?business|enterprise").expect("valid regex"));

static MODEL_B2C_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"b2c|consumer|individuals|families").expect("valid regex"));

static MODEL_TAX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"tax|accounting|preparation|filing").expect("valid regex"));

/// Classify the industry from the title plus the start of the main text.
pub fn infer_industry(page: &PageDoc, title: &str) -> Option<&'static str> {
    let combined = format!("{title} {}", truncate(page.main_text(), 3000)).to_lowercase();
    INDUSTRY_RULES
        .iter()
        .find(|(re, _)| re.is_match(&combined))
        .map(|(_, label)| *label)
}

/// Infer the business model, preferring a concrete self-description sentence
/// over a keyword bucket.
pub fn infer_business_model(page: &PageDoc) -> Option<String> {
    let text = truncate(page.main_text(), 6000);
    let lower = text.to_lowercase();

    if let Some(m) = MODEL_SENTENCE_RE.find(text) {
        let sentence = truncate(&clean(m.as_str()), 250).to_string();
        if sentence.len() > 30 && !MODEL_LEGAL_RE.is_match(&sentence) {
            return Some(sentence);
        }
    }
    if MODEL_PROFESSIONAL_RE.is_match(&lower) {
        return Some("Professional services / Consulting".to_string());
    }
    if MODEL_SUBSCRIPTION_RE.is_match(&lower) {
        return Some("Subscription / Retainer".to_string());
    }
    if MODEL_PRODUCT_RE.is_match(&lower) && !MODEL_NO_SALES_RE.is_match(&lower) {
        return Some("Product sales / E-commerce".to_string());
    }
    if MODEL_B2B_RE.is_match(&lower) {
        return Some("B2B".to_string());
    }
    if MODEL_B2C_RE.is_match(&lower) {
        return Some("B2C / Consumer".to_string());
    }
    if MODEL_TAX_RE.is_match(&lower) {
        return Some("Tax & accounting services".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> PageDoc {
        PageDoc::parse(html, "https://example.com".parse().unwrap())
    }

    #[test]
    fn first_industry_rule_wins() {
        let html = r#"<html><body><main>
            <p>Bookkeeping and insurance reviews for single-truck operators.</p>
        </main></body></html>"#;
        assert_eq!(infer_industry(&page(html), ""), Some("Tax & Accounting"));
    }

    #[test]
    fn industry_can_come_from_title_alone() {
        let html = r#"<html><body><main>
            <p>Serving three counties with fast, friendly crews since 2011.</p>
        </main></body></html>"#;
        assert_eq!(
            infer_industry(&page(html), "Miller & Sons Plumbing"),
            Some("Plumbing & Water")
        );
    }

    #[test]
    fn business_model_lifts_a_sentence() {
        let html = r#"<html><body><main>
            <p>We provide managed bookkeeping for dental practices across Ohio.</p>
        </main></body></html>"#;
        let model = infer_business_model(&page(html)).unwrap();
        assert_eq!(
            model,
            "We provide managed bookkeeping for dental practices across Ohio."
        );
    }

    #[test]
    fn business_model_keyword_fallback() {
        let html = r#"<html><body><main>
            <p>Flexible subscription options, cancel anytime.</p>
        </main></body></html>"#;
        assert_eq!(
            infer_business_model(&page(html)).as_deref(),
            Some("Subscription / Retainer")
        );
    }
}
