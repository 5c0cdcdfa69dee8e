//! Shared types, error model, and configuration for SiteProfiler.
//!
//! This crate is the foundation depended on by all other SiteProfiler crates.
//! It provides:
//! - [`SiteProfilerError`] — the unified error type
//! - Domain types ([`KnowledgeRecord`] and its category sub-records)
//! - Configuration ([`AppConfig`], [`ProfileConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, ProfileConfig, RenderConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, render_token,
};
pub use error::{Result, SiteProfilerError};
pub use types::{
    BrandingStyle, CompanyFoundation, ExtendedKnowledge, FaqEntry, KeyPerson, KnowledgeRecord,
    MarketCustomers, Offering, OfferingKind, OnlinePresence, Positioning, RecordId,
};
