//! Domain types for SiteProfiler knowledge records.
//!
//! The wire form is camelCase JSON. Optional fields are omitted when absent
//! and empty lists are skipped, so a record only carries what extraction
//! actually found. Downstream editors and enrichment services read this
//! schema as-is.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// RecordId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for knowledge record identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Generate a new time-sortable record identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Category sub-records
// ---------------------------------------------------------------------------

/// Who the company is: identity, legal shape, and how to reach it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyFoundation {
    /// Composed prose overview of the company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Canonical website URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Classified industry label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// How the company makes money, in one or two sentences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_model: Option<String>,
    /// Role within its market (filled by downstream enrichment).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_role: Option<String>,
    /// Four-digit founding year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_founded: Option<String>,
    /// LLC, Inc., Ltd., and similar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_entity_type: Option<String>,
    /// Headcount as stated on the site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<String>,
    /// Primary postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_address: Option<String>,
    /// Primary phone, normalized to `(AAA) BBB-CCCC` when it is a plain
    /// ten-digit US number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Primary contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Additional office locations (enrichment field).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_locations: Vec<String>,
    /// Areas served (enrichment field).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub service_locations: Vec<String>,
    /// Trade names, former names, and short forms. Order-preserving.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternative_names: Vec<String>,
}

/// How the company talks about itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Positioning {
    /// Elevator pitch, at most 500 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_pitch: Option<String>,
    /// Founding narrative, at most 1500 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founding_story: Option<String>,
}

/// Who the company sells to and how.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketCustomers {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub target_buyers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub customer_needs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideal_customer_persona: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub industry_groupings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_outlook: Option<String>,
    /// Sales/support channels (Phone, Online, In-person, ...).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<String>,
    /// Conversion funnels observed on the site (forms, booking flows).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub funnels: Vec<String>,
    /// Call-to-action texts.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ctas: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suppliers_partners: Vec<String>,
}

/// Visual and verbal brand signals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrandingStyle {
    /// Composed description of the site's tone of voice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writing_style: Option<String>,
    /// Composed description of the site's visual style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub art_style: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fonts: Vec<String>,
    /// Hex colors found in inline styles and theme metadata.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub brand_colors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub logo_urls: Vec<String>,
}

/// Social profiles, first match per platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnlinePresence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    /// Platform name to URL for anything beyond the named five.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub other_social: BTreeMap<String, String>,
}

/// A named person found on the site (team page, about page, narrative).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyPerson {
    /// Display name. The only required field.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Functional role (enrichment field).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Enrichment field; never inferred from page content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Bio text, at most 600 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl KeyPerson {
    /// A person with just a name; details fill in as extraction finds them.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Broad classification for an offering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferingKind {
    Product,
    #[default]
    Service,
    Other,
}

/// A product or service the company sells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Offering {
    /// Display name. Required.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OfferingKind,
    /// At most 600 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// At most 10 entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One FAQ entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Everything else worth keeping that does not fit the core categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtendedKnowledge {
    /// Enrichment field; heuristics cannot tell competitors from partners.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub competitors: Vec<String>,
    /// Main page headings, up to 15.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content_themes: Vec<String>,
    /// Customer quotes, 15 to 800 characters each, up to 15.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub testimonials: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub certifications_awards: Vec<String>,
    /// Up to 20 question/answer pairs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub faq: Vec<FaqEntry>,
    /// Selling points, up to 5.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub usp: Vec<String>,
    /// Enrichment field.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub seasonal_messaging: Vec<String>,
    /// Enrichment field.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legal_compliance: Vec<String>,
    /// Enrichment field.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub press_mentions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values_community: Vec<String>,
    /// One-line summary of what a customer gets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_gets: Option<String>,
}

// ---------------------------------------------------------------------------
// KnowledgeRecord
// ---------------------------------------------------------------------------

/// The structured knowledge record produced by one profiling run.
///
/// Created once per invocation, filled during extraction and merge, and
/// immutable after the pipeline returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeRecord {
    pub id: RecordId,
    /// The URL the run was asked to profile, post-normalization.
    pub source_url: String,
    pub scraped_at: DateTime<Utc>,
    #[serde(default)]
    pub company_foundation: CompanyFoundation,
    #[serde(default)]
    pub positioning: Positioning,
    #[serde(default)]
    pub market_customers: MarketCustomers,
    #[serde(default)]
    pub branding_style: BrandingStyle,
    #[serde(default)]
    pub online_presence: OnlinePresence,
    #[serde(default)]
    pub key_people: Vec<KeyPerson>,
    #[serde(default)]
    pub offerings: Vec<Offering>,
    #[serde(default)]
    pub extended: ExtendedKnowledge,
}

impl KnowledgeRecord {
    /// An empty record stamped with a fresh id and the current time.
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            source_url: source_url.into(),
            scraped_at: Utc::now(),
            company_foundation: CompanyFoundation::default(),
            positioning: Positioning::default(),
            market_customers: MarketCustomers::default(),
            branding_style: BrandingStyle::default(),
            online_presence: OnlinePresence::default(),
            key_people: Vec::new(),
            offerings: Vec::new(),
            extended: ExtendedKnowledge::default(),
        }
    }
}
