//! Auxiliary-page crawl: about/contact/services/team pages that fill the
//! gaps the main page left.
//!
//! Candidates are a fixed set of well-known paths plus any same-origin link
//! whose URL mentions one of the section keywords. Pages are fetched
//! sequentially with the shorter auxiliary timeout; a failure skips the page
//! and nothing else. Responses are deduplicated by content hash so an alias
//! path (say `/about` redirecting to the main page) cannot merge twice.

use std::collections::HashSet;

use sha2::{Digest, Sha256};
use siteprofiler_extract::page::PageDoc;
use siteprofiler_extract::{offerings, people};
use siteprofiler_fetch::PageFetcher;
use siteprofiler_shared::KnowledgeRecord;
use tracing::debug;
use url::Url;

use crate::assemble::assemble_record;
use crate::merge;
use crate::pipeline::ProgressReporter;

/// Paths worth probing even when the main page never links to them.
const AUX_PATHS: [&str; 10] = [
    "/about",
    "/about-us",
    "/contact",
    "/contact-us",
    "/services",
    "/our-team",
    "/team",
    "/leadership",
    "/staff",
    "/meet-the-team",
];

/// URL keywords that mark a linked page as worth crawling.
const AUX_KEYWORDS: [&str; 6] = ["about", "contact", "services", "team", "leadership", "staff"];

/// Hex SHA-256 of a page body, for alias detection.
pub fn content_hash(html: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(html.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Ordered crawl candidates: fixed paths first, then keyword-matched links
/// from the main page with query and fragment stripped. Deduplicated up to
/// a single trailing slash, capped at `max_pages`.
pub fn aux_candidates(origin: &str, main_links: &[String], max_pages: usize) -> Vec<String> {
    let mut candidates: Vec<String> = AUX_PATHS.iter().map(|p| format!("{origin}{p}")).collect();

    for href in main_links {
        if !href.starts_with(origin) {
            continue;
        }
        let lower = href.to_lowercase();
        if !AUX_KEYWORDS.iter().any(|k| lower.contains(k)) {
            continue;
        }
        if let Ok(mut url) = Url::parse(href) {
            url.set_query(None);
            url.set_fragment(None);
            candidates.push(url.to_string());
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for candidate in candidates {
        if out.len() >= max_pages {
            break;
        }
        let norm = candidate.strip_suffix('/').unwrap_or(&candidate).to_string();
        if seen.insert(norm) {
            out.push(candidate);
        }
    }
    out
}

/// What the crawl contributed beyond the merged record itself.
pub struct CrawlOutcome {
    pub pages_merged: usize,
    pub bio_links: Vec<people::BioLink>,
}

/// Fetch each candidate page and merge what it adds into `record`.
///
/// `main_page_hash` seeds alias detection so a candidate serving the main
/// page's body is skipped outright.
pub async fn crawl_and_merge(
    fetcher: &PageFetcher,
    record: &mut KnowledgeRecord,
    origin: &str,
    main_links: &[String],
    main_page_hash: String,
    max_pages: usize,
    progress: &dyn ProgressReporter,
) -> CrawlOutcome {
    let candidates = aux_candidates(origin, main_links, max_pages);
    let total = candidates.len();

    let mut seen_hashes = HashSet::from([main_page_hash]);
    let mut bio_links = Vec::new();
    let mut pages_merged = 0;

    for (index, candidate) in candidates.into_iter().enumerate() {
        let Ok(url) = Url::parse(&candidate) else {
            continue;
        };
        progress.page_fetched(&candidate, index + 1, total);
        let Some(html) = fetcher.fetch_aux(&url).await else {
            continue;
        };
        if !seen_hashes.insert(content_hash(&html)) {
            debug!(url = %candidate, "aliases an already merged page, skipping");
            continue;
        }

        // Parse and extract synchronously; the document never crosses an await.
        {
            let page = PageDoc::parse(&html, url);
            let mut page_record = assemble_record(&page);
            // On dedicated team pages names often double as headings, so the
            // content-theme exclusion is lifted here.
            page_record.key_people = people::extract_key_people(&page, &[]);

            let upgrade = merge::offerings_need_upgrade(&record.offerings);
            let service_like = {
                let lower = candidate.to_lowercase();
                lower.contains("/services")
                    || lower.contains("/offerings")
                    || offerings::service_section_count(&page) > 2
            };
            let detailed = if upgrade && service_like {
                offerings::extract_offerings(&page)
            } else {
                Vec::new()
            };

            merge::merge_missing(record, page_record);
            if !detailed.is_empty() {
                merge::replace_sparse_offerings(&mut record.offerings, detailed);
            }
            bio_links.extend(people::bio_links(&page));
        }

        pages_merged += 1;
        debug!(url = %candidate, "merged auxiliary page");
    }

    CrawlOutcome {
        pages_merged,
        bio_links,
    }
}
