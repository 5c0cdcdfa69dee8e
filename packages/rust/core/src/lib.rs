//! Core profiling pipeline for SiteProfiler.
//!
//! Ties fetching, extraction, auxiliary-page crawling, and bio resolution
//! into the end-to-end `profile_site` workflow.

pub mod assemble;
pub mod bios;
pub mod crawl;
pub mod merge;
pub mod pipeline;

pub use assemble::assemble_record;
pub use merge::merge_missing;
pub use pipeline::{
    ProfileResult, ProgressReporter, SilentProgress, profile_site, profile_site_with,
};
