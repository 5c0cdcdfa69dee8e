//! Fill-only-if-empty merging of a candidate record into the main one.
//!
//! Auxiliary pages (about, contact, services, team) run the same extractor
//! set as the main page; the resulting candidate record can only fill gaps,
//! never displace what the main page already established. Scalars fill when
//! the current slot is empty. Most lists union by case-insensitive key up to
//! their record cap. Identity lists that only make sense for the main page
//! (alternative names, content themes) are taken wholesale only when the
//! current list is empty. Offerings only fill an empty list here; upgrading
//! placeholder-grade offerings belongs to the page-quality rule in the
//! crawl loop.

use siteprofiler_extract::offerings::GENERAL_OFFERINGS;
use siteprofiler_extract::text::{fingerprint, normalize_key};
use siteprofiler_shared::{FaqEntry, KeyPerson, KnowledgeRecord, Offering};

const MAX_TARGET_BUYERS: usize = 12;
const MAX_CUSTOMER_NEEDS: usize = 10;
const MAX_INDUSTRY_GROUPINGS: usize = 12;
const MAX_CHANNELS: usize = 8;
const MAX_FUNNELS: usize = 10;
const MAX_CTAS: usize = 15;
const MAX_SUPPLIERS: usize = 15;
const MAX_FONTS: usize = 8;
const MAX_COLORS: usize = 10;
const MAX_LOGOS: usize = 5;
const MAX_TESTIMONIALS: usize = 15;
const MAX_CERTIFICATIONS: usize = 15;
const MAX_FAQ: usize = 20;
const MAX_USP: usize = 5;
const MAX_VALUES: usize = 15;
/// People may exceed the single-page cap of 20 once team pages merge in.
const MAX_PEOPLE_MERGED: usize = 25;
const MAX_OFFERINGS: usize = 15;

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

fn fill(slot: &mut Option<String>, value: Option<String>) {
    if slot.is_some() {
        return;
    }
    if let Some(v) = value {
        if !v.trim().is_empty() {
            *slot = Some(v);
        }
    }
}

fn union_by_key<F>(list: &mut Vec<String>, additions: Vec<String>, cap: usize, key: F)
where
    F: Fn(&str) -> String,
{
    for value in additions {
        if list.len() >= cap {
            break;
        }
        let k = key(&value);
        if !list.iter().any(|existing| key(existing) == k) {
            list.push(value);
        }
    }
}

fn union_ci(list: &mut Vec<String>, additions: Vec<String>, cap: usize) {
    union_by_key(list, additions, cap, normalize_key);
}

fn take_if_empty(list: &mut Vec<String>, additions: Vec<String>) {
    if list.is_empty() {
        *list = additions;
    }
}

fn union_faq(list: &mut Vec<FaqEntry>, additions: Vec<FaqEntry>, cap: usize) {
    for entry in additions {
        if list.len() >= cap {
            break;
        }
        let k = normalize_key(&entry.question);
        if !list.iter().any(|existing| normalize_key(&existing.question) == k) {
            list.push(entry);
        }
    }
}

fn union_people(list: &mut Vec<KeyPerson>, additions: Vec<KeyPerson>, cap: usize) {
    for person in additions {
        if list.len() >= cap {
            break;
        }
        let k = person.name.trim().to_lowercase();
        if !list.iter().any(|existing| existing.name.trim().to_lowercase() == k) {
            list.push(person);
        }
    }
}

// ---------------------------------------------------------------------------
// Record merge
// ---------------------------------------------------------------------------

/// Merge `candidate` into `current`, filling gaps only.
pub fn merge_missing(current: &mut KnowledgeRecord, candidate: KnowledgeRecord) {
    let cf = &mut current.company_foundation;
    let cand_cf = candidate.company_foundation;
    fill(&mut cf.overview, cand_cf.overview);
    fill(&mut cf.website, cand_cf.website);
    fill(&mut cf.industry, cand_cf.industry);
    fill(&mut cf.business_model, cand_cf.business_model);
    fill(&mut cf.company_role, cand_cf.company_role);
    fill(&mut cf.year_founded, cand_cf.year_founded);
    fill(&mut cf.legal_entity_type, cand_cf.legal_entity_type);
    fill(&mut cf.employee_count, cand_cf.employee_count);
    fill(&mut cf.main_address, cand_cf.main_address);
    fill(&mut cf.phone, cand_cf.phone);
    fill(&mut cf.email, cand_cf.email);
    take_if_empty(&mut cf.other_locations, cand_cf.other_locations);
    take_if_empty(&mut cf.service_locations, cand_cf.service_locations);
    // An aux page's title is not an alternative name for the company.
    take_if_empty(&mut cf.alternative_names, cand_cf.alternative_names);

    let pos = &mut current.positioning;
    fill(&mut pos.company_pitch, candidate.positioning.company_pitch);
    fill(&mut pos.founding_story, candidate.positioning.founding_story);

    let market = &mut current.market_customers;
    let cand_market = candidate.market_customers;
    union_ci(&mut market.target_buyers, cand_market.target_buyers, MAX_TARGET_BUYERS);
    union_ci(&mut market.customer_needs, cand_market.customer_needs, MAX_CUSTOMER_NEEDS);
    fill(&mut market.ideal_customer_persona, cand_market.ideal_customer_persona);
    union_ci(
        &mut market.industry_groupings,
        cand_market.industry_groupings,
        MAX_INDUSTRY_GROUPINGS,
    );
    fill(&mut market.industry_outlook, cand_market.industry_outlook);
    union_ci(&mut market.channels, cand_market.channels, MAX_CHANNELS);
    union_ci(&mut market.funnels, cand_market.funnels, MAX_FUNNELS);
    union_ci(&mut market.ctas, cand_market.ctas, MAX_CTAS);
    union_ci(&mut market.suppliers_partners, cand_market.suppliers_partners, MAX_SUPPLIERS);

    let branding = &mut current.branding_style;
    let cand_branding = candidate.branding_style;
    fill(&mut branding.writing_style, cand_branding.writing_style);
    fill(&mut branding.art_style, cand_branding.art_style);
    union_ci(&mut branding.fonts, cand_branding.fonts, MAX_FONTS);
    union_ci(&mut branding.brand_colors, cand_branding.brand_colors, MAX_COLORS);
    union_ci(&mut branding.logo_urls, cand_branding.logo_urls, MAX_LOGOS);

    let presence = &mut current.online_presence;
    let cand_presence = candidate.online_presence;
    fill(&mut presence.linked_in, cand_presence.linked_in);
    fill(&mut presence.facebook, cand_presence.facebook);
    fill(&mut presence.instagram, cand_presence.instagram);
    fill(&mut presence.twitter_x, cand_presence.twitter_x);
    fill(&mut presence.youtube, cand_presence.youtube);
    for (platform, link) in cand_presence.other_social {
        presence.other_social.entry(platform).or_insert(link);
    }

    union_people(&mut current.key_people, candidate.key_people, MAX_PEOPLE_MERGED);

    if current.offerings.is_empty() {
        current.offerings = candidate.offerings;
    }

    let ext = &mut current.extended;
    let cand_ext = candidate.extended;
    take_if_empty(&mut ext.competitors, cand_ext.competitors);
    // Content themes are the main page's headings; aux headings are navigation.
    take_if_empty(&mut ext.content_themes, cand_ext.content_themes);
    union_by_key(&mut ext.testimonials, cand_ext.testimonials, MAX_TESTIMONIALS, |s| {
        fingerprint(s, 80)
    });
    union_ci(
        &mut ext.certifications_awards,
        cand_ext.certifications_awards,
        MAX_CERTIFICATIONS,
    );
    union_faq(&mut ext.faq, cand_ext.faq, MAX_FAQ);
    union_ci(&mut ext.usp, cand_ext.usp, MAX_USP);
    take_if_empty(&mut ext.seasonal_messaging, cand_ext.seasonal_messaging);
    take_if_empty(&mut ext.legal_compliance, cand_ext.legal_compliance);
    take_if_empty(&mut ext.press_mentions, cand_ext.press_mentions);
    union_ci(&mut ext.values_community, cand_ext.values_community, MAX_VALUES);
    fill(&mut ext.customer_gets, cand_ext.customer_gets);
}

// ---------------------------------------------------------------------------
// Offerings quality rule
// ---------------------------------------------------------------------------

/// Whether the current offerings are placeholder-grade and worth replacing
/// with detailed ones from a services-like page.
pub fn offerings_need_upgrade(offerings: &[Offering]) -> bool {
    offerings.is_empty()
        || offerings.first().is_some_and(|o| o.name == GENERAL_OFFERINGS)
        || !offerings.iter().any(|o| o.description.is_some() || !o.features.is_empty())
}

/// Replace placeholder offerings with `detailed` ones, keeping existing
/// entries that are neither the generic placeholder nor duplicates of a
/// detailed entry. No-op when `detailed` is empty.
pub fn replace_sparse_offerings(current: &mut Vec<Offering>, detailed: Vec<Offering>) {
    if detailed.is_empty() {
        return;
    }
    let mut merged = detailed;
    for existing in current.drain(..) {
        if existing.name == GENERAL_OFFERINGS {
            continue;
        }
        if merged.iter().any(|d| d.name.eq_ignore_ascii_case(&existing.name)) {
            continue;
        }
        merged.push(existing);
    }
    merged.truncate(MAX_OFFERINGS);
    *current = merged;
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteprofiler_shared::OfferingKind;

    fn record() -> KnowledgeRecord {
        KnowledgeRecord::new("https://example.com")
    }

    fn offering(name: &str, description: Option<&str>) -> Offering {
        Offering {
            name: name.to_string(),
            kind: OfferingKind::Service,
            description: description.map(str::to_string),
            features: Vec::new(),
            pricing: None,
            category: None,
        }
    }

    #[test]
    fn scalars_fill_only_when_empty() {
        let mut current = record();
        current.company_foundation.phone = Some("+1 555 0100".into());

        let mut candidate = record();
        candidate.company_foundation.phone = Some("+1 555 9999".into());
        candidate.company_foundation.email = Some("info@example.com".into());

        merge_missing(&mut current, candidate);
        assert_eq!(current.company_foundation.phone.as_deref(), Some("+1 555 0100"));
        assert_eq!(current.company_foundation.email.as_deref(), Some("info@example.com"));
    }

    #[test]
    fn blank_candidate_values_do_not_fill() {
        let mut current = record();
        let mut candidate = record();
        candidate.positioning.founding_story = Some("   ".into());
        merge_missing(&mut current, candidate);
        assert!(current.positioning.founding_story.is_none());
    }

    #[test]
    fn lists_union_case_insensitively_up_to_cap() {
        let mut current = record();
        current.market_customers.channels = vec!["Phone".into(), "Email".into()];

        let mut candidate = record();
        candidate.market_customers.channels =
            vec!["phone".into(), "Contact form".into(), "Live chat".into()];

        merge_missing(&mut current, candidate);
        assert_eq!(
            current.market_customers.channels,
            vec!["Phone", "Email", "Contact form", "Live chat"]
        );
    }

    #[test]
    fn aux_titles_never_become_alternative_names() {
        let mut current = record();
        current.company_foundation.alternative_names = vec!["Acme Roofing".into()];

        let mut candidate = record();
        candidate.company_foundation.alternative_names = vec!["Contact Us | Acme".into()];

        merge_missing(&mut current, candidate);
        assert_eq!(current.company_foundation.alternative_names, vec!["Acme Roofing"]);
    }

    #[test]
    fn people_union_by_name_caps_at_twenty_five() {
        let mut current = record();
        for i in 0..20 {
            current.key_people.push(KeyPerson::named(format!("Person {i}")));
        }

        let mut candidate = record();
        candidate.key_people.push(KeyPerson::named("person 3"));
        for i in 20..30 {
            candidate.key_people.push(KeyPerson::named(format!("Person {i}")));
        }

        merge_missing(&mut current, candidate);
        assert_eq!(current.key_people.len(), 25);
        assert!(!current.key_people.iter().any(|p| p.name == "person 3"));
    }

    #[test]
    fn faq_unions_by_question() {
        let mut current = record();
        current.extended.faq.push(FaqEntry {
            question: "Do you offer free estimates?".into(),
            answer: "Yes, always.".into(),
        });

        let mut candidate = record();
        candidate.extended.faq.push(FaqEntry {
            question: "do you offer free estimates?".into(),
            answer: "Different answer.".into(),
        });
        candidate.extended.faq.push(FaqEntry {
            question: "Are you insured?".into(),
            answer: "Fully.".into(),
        });

        merge_missing(&mut current, candidate);
        assert_eq!(current.extended.faq.len(), 2);
        assert_eq!(current.extended.faq[0].answer, "Yes, always.");
    }

    #[test]
    fn social_profiles_fill_gaps_only() {
        let mut current = record();
        current.online_presence.facebook = Some("https://facebook.com/acme".into());

        let mut candidate = record();
        candidate.online_presence.facebook = Some("https://facebook.com/other".into());
        candidate.online_presence.linked_in = Some("https://linkedin.com/company/acme".into());

        merge_missing(&mut current, candidate);
        assert_eq!(
            current.online_presence.facebook.as_deref(),
            Some("https://facebook.com/acme")
        );
        assert_eq!(
            current.online_presence.linked_in.as_deref(),
            Some("https://linkedin.com/company/acme")
        );
    }

    #[test]
    fn placeholder_offerings_need_upgrade() {
        assert!(offerings_need_upgrade(&[]));
        assert!(offerings_need_upgrade(&[offering(GENERAL_OFFERINGS, None)]));
        assert!(offerings_need_upgrade(&[
            offering("Roof repair", None),
            offering("Gutters", None),
        ]));
        assert!(!offerings_need_upgrade(&[offering(
            "Roof repair",
            Some("Full tear-off and replacement.")
        )]));
    }

    #[test]
    fn sparse_offerings_replaced_but_named_ones_kept() {
        let mut current = vec![
            offering(GENERAL_OFFERINGS, None),
            offering("Gutter cleaning", None),
            offering("Roof repair", None),
        ];
        let detailed = vec![offering("Roof Repair", Some("Storm damage and leak fixes."))];

        replace_sparse_offerings(&mut current, detailed);
        let names: Vec<&str> = current.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Roof Repair", "Gutter cleaning"]);
    }

    #[test]
    fn empty_detailed_list_changes_nothing() {
        let mut current = vec![offering(GENERAL_OFFERINGS, None)];
        replace_sparse_offerings(&mut current, Vec::new());
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].name, GENERAL_OFFERINGS);
    }

    #[test]
    fn offerings_fill_only_from_empty() {
        let mut current = record();
        current.offerings.push(offering(GENERAL_OFFERINGS, None));

        let mut candidate = record();
        candidate.offerings.push(offering("Tax preparation", Some("Individual returns.")));

        merge_missing(&mut current, candidate);
        assert_eq!(current.offerings.len(), 1);
        assert_eq!(current.offerings[0].name, GENERAL_OFFERINGS);
    }
}
