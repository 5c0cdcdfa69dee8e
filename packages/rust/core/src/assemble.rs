//! Single-page record assembly.
//!
//! Runs every extractor over one parsed page and folds the results into a
//! [`KnowledgeRecord`] with fixed precedence: structured data (JSON-LD) and
//! page metadata first, regex/DOM heuristics as fallback. The same function
//! serves the main page and every auxiliary page; the merge layer decides
//! what an auxiliary page's record may contribute.

use siteprofiler_extract::page::PageDoc;
use siteprofiler_extract::text::truncate;
use siteprofiler_extract::{
    branding, classify, contact, extended, facts, jsonld, market, narrative, offerings, people,
    social, story, testimonials,
};
use siteprofiler_shared::{
    BrandingStyle, CompanyFoundation, ExtendedKnowledge, KnowledgeRecord, MarketCustomers,
    Positioning,
};

/// People kept from a single page. Merging team pages may raise this to 25.
const MAX_PEOPLE_PER_PAGE: usize = 20;
const MAX_CONTENT_THEMES: usize = 15;
const MAX_USP: usize = 5;

/// Run the full extractor set over `page` and assemble a record.
pub fn assemble_record(page: &PageDoc) -> KnowledgeRecord {
    let org = jsonld::extract_org(page);
    let facts = facts::extract_facts(page);
    let contact = contact::extract_contact(page);
    let about = story::extract_about_story(page);

    let title = page
        .title()
        .or_else(|| page.meta_property("og:title"))
        .or_else(|| org.name.clone());
    let description = page.meta_description().or_else(|| org.description.clone());
    let paragraphs = extended::extract_paragraphs(page);

    let industry = classify::infer_industry(page, title.as_deref().unwrap_or(""));
    let business_model = classify::infer_business_model(page);

    let location = org.address.clone().or_else(|| contact.address.clone());
    let location_city = location
        .as_deref()
        .and_then(|l| l.split(',').next())
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    // For the narrative the registry date is more trustworthy; for the bare
    // yearFounded field the on-page claim wins.
    let jsonld_year = org.founding_date.as_deref().and_then(jsonld::normalize_year);

    let overview_inputs = narrative::OverviewInputs {
        title: title.as_deref(),
        meta_description: description.as_deref(),
        about: &about,
        industry,
        business_model: business_model.as_deref(),
        location: location_city.as_deref().or(location.as_deref()),
        year_founded: jsonld_year.as_deref().or(facts.year_founded.as_deref()),
    };
    let overview = narrative::comprehensive_overview(page, &overview_inputs)
        .or_else(|| description.clone())
        .or_else(|| about.overview.clone())
        .or_else(|| paragraphs.first().cloned())
        .or_else(|| {
            let main = page.main_text();
            if main.len() > 80 {
                Some(truncate(main, 600).to_string())
            } else {
                title.as_ref().map(|t| format!("{t}."))
            }
        });

    let pitch_seed = description
        .clone()
        .unwrap_or_else(|| paragraphs.iter().take(2).cloned().collect::<Vec<_>>().join(" "));
    let company_pitch = narrative::company_pitch(page, &pitch_seed)
        .or_else(|| description.clone())
        .or_else(|| paragraphs.first().cloned())
        .or_else(|| overview.as_deref().map(|o| truncate(o, 400).to_string()));

    let headings = extended::extract_headings(page);
    let mut key_people = people::extract_key_people(page, &headings);
    key_people.truncate(MAX_PEOPLE_PER_PAGE);

    let ctas = market::extract_ctas(page);
    let faq = extended::extract_faq(page);
    let testimonial_quotes = testimonials::extract_testimonials(page);
    let writing_style =
        narrative::writing_style(page, &ctas, !faq.is_empty(), !testimonial_quotes.is_empty());
    let usp: Vec<String> = ctas.iter().take(MAX_USP).cloned().collect();

    let mut logo_urls = branding::extract_logos(page);
    if let Some(logo) = &org.logo {
        if !logo_urls.contains(logo) {
            logo_urls.insert(0, logo.clone());
        }
    }

    let mut online_presence = social::extract_social(page.document());
    social::apply_same_as(&mut online_presence, &org.same_as);

    let (merged_offerings, customer_gets) =
        offerings::build_offerings(page, title.as_deref().unwrap_or(""));

    let alternative_names = match &title {
        Some(t) => {
            let mut names = vec![t.clone()];
            if let Some(name) = &org.name {
                if name != t {
                    names.push(name.clone());
                }
            }
            names
        }
        None => Vec::new(),
    };

    let origin = page.url().origin().ascii_serialization();

    let mut record = KnowledgeRecord::new(page.url().as_str());

    record.company_foundation = CompanyFoundation {
        overview: overview.clone(),
        website: Some(org.url.clone().unwrap_or(origin)),
        industry: industry.map(str::to_string),
        business_model: business_model.clone(),
        company_role: None,
        year_founded: facts.year_founded.clone().or(jsonld_year),
        legal_entity_type: facts.legal_entity_type.clone(),
        employee_count: org.employee_count.clone().or_else(|| facts.employee_count.clone()),
        main_address: location,
        phone: contact.phone.clone().or_else(|| org.contact_phone.clone()),
        email: contact.email.clone().or_else(|| org.contact_email.clone()),
        other_locations: Vec::new(),
        service_locations: Vec::new(),
        alternative_names,
    };

    record.positioning = Positioning {
        company_pitch,
        founding_story: about.story.clone(),
    };

    let target_buyers = market::extract_target_buyers(page);
    let ideal_customer_persona = market::extract_persona(page, &target_buyers);
    record.market_customers = MarketCustomers {
        target_buyers,
        customer_needs: market::extract_customer_needs(page),
        ideal_customer_persona,
        industry_groupings: market::extract_industry_groupings(page, industry),
        industry_outlook: market::extract_industry_outlook(page, industry, business_model.as_deref()),
        channels: market::extract_channels(page),
        funnels: market::extract_funnels(page),
        ctas: ctas.clone(),
        suppliers_partners: market::extract_suppliers_partners(page),
    };

    record.branding_style = BrandingStyle {
        writing_style,
        art_style: Some(narrative::art_style(page)),
        fonts: branding::extract_fonts(page),
        brand_colors: branding::extract_colors(page),
        logo_urls,
    };

    record.online_presence = online_presence;
    record.key_people = key_people;
    record.offerings = merged_offerings;

    let mut content_themes = headings;
    content_themes.truncate(MAX_CONTENT_THEMES);
    record.extended = ExtendedKnowledge {
        competitors: Vec::new(),
        content_themes,
        testimonials: testimonial_quotes,
        certifications_awards: extended::extract_certifications_awards(page),
        faq,
        usp,
        seasonal_messaging: Vec::new(),
        legal_compliance: Vec::new(),
        press_mentions: Vec::new(),
        values_community: extended::extract_values_community(page),
        customer_gets,
    };

    record
}
