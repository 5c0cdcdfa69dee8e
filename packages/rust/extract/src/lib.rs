//! Heuristic extraction over raw HTML.
//!
//! Every extractor takes a parsed [`PageDoc`] and returns plain data; nothing
//! in this crate performs I/O. Most extractors are cascades: high-confidence
//! markup cues (JSON-LD, semantic classes) run first, and looser text scans
//! only fill in what is still missing.
//!
//! - [`page`] — parsed document plus cached body text
//! - [`jsonld`] — schema.org Organization and Review blocks
//! - [`contact`] / [`facts`] — emails, phones, addresses, year/size patterns
//! - [`classify`] — industry and business-model inference
//! - [`people`] / [`offerings`] / [`testimonials`] — the structured lists
//! - [`narrative`] / [`story`] / [`branding`] / [`market`] — composed prose

pub mod branding;
pub mod classify;
pub mod contact;
pub mod dom;
pub mod extended;
pub mod facts;
pub mod jsonld;
pub mod market;
pub mod narrative;
pub mod offerings;
pub mod page;
pub mod people;
pub mod social;
pub mod story;
pub mod testimonials;
pub mod text;

pub use page::PageDoc;
