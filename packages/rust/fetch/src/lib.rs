//! Page retrieval for SiteProfiler.
//!
//! Three acquisition layers, tried in order of cost:
//!
//! 1. [`client::PageFetcher`]: plain HTTP GET with redirect limits and a
//!    private-address guard.
//! 2. [`blob`]: recover prose from framework state blobs (`__NEXT_DATA__`,
//!    `__NUXT_DATA__`) when the static body is thin.
//! 3. [`render::RenderClient`]: a browserless-style rendering service, used
//!    only when configured and only as a last resort.
//!
//! The escalation policy itself lives in the pipeline; this crate just
//! provides the three mechanisms.

pub mod blob;
pub mod client;
pub mod render;

pub use client::{PageFetcher, normalize_input_url};
pub use render::RenderClient;
