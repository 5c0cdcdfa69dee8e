//! The end-to-end profiling pipeline.
//!
//! One call turns a raw URL into a knowledge record: fetch the main page,
//! escalate through the thin-page fallbacks when it carries too little
//! visible text, run the extractor set, crawl auxiliary pages to fill gaps,
//! and resolve person bios from profile links.

use std::time::{Duration, Instant};

use siteprofiler_extract::page::PageDoc;
use siteprofiler_extract::{dom, people};
use siteprofiler_fetch::{PageFetcher, RenderClient, blob, normalize_input_url};
use siteprofiler_shared::{KnowledgeRecord, ProfileConfig, Result};
use tracing::{debug, info, instrument};

use crate::assemble::assemble_record;
use crate::{bios, crawl};

/// Main-page text shorter than this triggers the embedded-JSON fallback.
const BLOB_FALLBACK_THRESHOLD: usize = 500;
/// Text still shorter than this afterwards goes to the render service.
const RENDER_FALLBACK_THRESHOLD: usize = 300;

/// What a profiling run produced.
#[derive(Debug)]
pub struct ProfileResult {
    pub record: KnowledgeRecord,
    /// The main page plus every auxiliary page that merged.
    pub pages_fetched: usize,
    pub bios_filled: usize,
    pub elapsed: Duration,
}

/// Callback surface for frontends that show progress while a run executes.
pub trait ProgressReporter: Send + Sync {
    fn phase(&self, name: &str);
    fn page_fetched(&self, url: &str, current: usize, total: usize);
    fn done(&self, result: &ProfileResult);
}

/// Reporter that says nothing, for callers that just want the record.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn page_fetched(&self, _url: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &ProfileResult) {}
}

/// Profile a website end to end.
///
/// `raw_url` may be schemeless; `https://` is assumed. Only the main-page
/// fetch is fatal. Auxiliary pages, bio pages, and the render service all
/// fail soft.
pub async fn profile_site(
    raw_url: &str,
    config: &ProfileConfig,
    progress: &dyn ProgressReporter,
) -> Result<ProfileResult> {
    let fetcher = PageFetcher::new(config)?;
    profile_site_with(&fetcher, raw_url, config, progress).await
}

/// Like [`profile_site`], with a caller-built fetcher. Lets callers tune the
/// fetcher first, e.g. tests running against loopback servers.
#[instrument(skip_all, fields(url = %raw_url))]
pub async fn profile_site_with(
    fetcher: &PageFetcher,
    raw_url: &str,
    config: &ProfileConfig,
    progress: &dyn ProgressReporter,
) -> Result<ProfileResult> {
    let started = Instant::now();
    let url = normalize_input_url(raw_url)?;
    info!(url = %url, "profiling site");

    progress.phase("Fetching main page");
    let mut html = fetcher.fetch_main(&url).await?;

    let mut text_len = main_text_len(&html);
    if text_len < BLOB_FALLBACK_THRESHOLD {
        if let Some(augmented) = blob::augment_with_embedded_json(&html) {
            info!(chars = text_len, "thin page, recovered embedded JSON state");
            html = augmented;
            text_len = main_text_len(&html);
        }
    }
    if text_len < RENDER_FALLBACK_THRESHOLD {
        match config.render_endpoint.as_deref() {
            Some(endpoint) => {
                progress.phase("Rendering in headless browser");
                let render = RenderClient::new(endpoint, config.render_token.clone())?;
                if let Some(rendered) = render.try_render(&url).await {
                    html = rendered;
                }
            }
            None => {
                debug!(chars = text_len, "page is thin and no render endpoint is configured");
            }
        }
    }

    progress.phase("Extracting knowledge");
    let origin = url.origin().ascii_serialization();
    let main_hash = crawl::content_hash(&html);
    // Parse and extract in one synchronous block; the document never crosses
    // an await.
    let (mut record, main_links, mut bio_links) = {
        let page = PageDoc::parse(&html, url.clone());
        let record = assemble_record(&page);
        let links = dom::same_origin_links(page.document(), page.url());
        let bio_links = people::bio_links(&page);
        (record, links, bio_links)
    };

    progress.phase("Crawling auxiliary pages");
    let outcome = crawl::crawl_and_merge(
        fetcher,
        &mut record,
        &origin,
        &main_links,
        main_hash,
        config.max_aux_pages,
        progress,
    )
    .await;
    bio_links.extend(outcome.bio_links);

    progress.phase("Resolving bios");
    let bios_filled =
        bios::resolve_bios(fetcher, &mut record.key_people, &bio_links, config.max_bio_fetches)
            .await;

    let result = ProfileResult {
        record,
        pages_fetched: 1 + outcome.pages_merged,
        bios_filled,
        elapsed: started.elapsed(),
    };
    info!(
        pages = result.pages_fetched,
        people = result.record.key_people.len(),
        offerings = result.record.offerings.len(),
        bios = result.bios_filled,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "profile complete"
    );
    progress.done(&result);
    Ok(result)
}

/// Filtered body-text length of unparsed HTML, for the thin-page checks.
fn main_text_len(html: &str) -> usize {
    let doc = scraper::Html::parse_document(html);
    dom::main_body_text(&doc).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> PageFetcher {
        PageFetcher::new(&ProfileConfig::default())
            .unwrap()
            .allow_localhost()
    }

    async fn mount_page(server: &MockServer, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    const MAIN_PAGE: &str = r#"<html><head>
<title>Bluebird Plumbing | Austin</title>
<meta name="description" content="Residential plumbing repair and remodel work across Austin, handled by one licensed crew.">
</head><body>
<nav><a href="/about">About</a> <a href="/services">Services</a> <a href="/our-team">Our Team</a> <a href="/contact">Contact</a></nav>
<main>
<h1>Plumbing done right, the first time</h1>
<p>Bluebird Plumbing keeps homes across the city flowing, from slab leak detection and water heater swaps to whole-house repipes. Our licensed crews arrive in stocked vans, quote the work before any wrench turns, and leave every job site cleaner than they found it.</p>
<p>Neighbors call us for burst pipes at midnight and for the remodel they have planned for months. Either way the visit starts the same: we listen, we measure, and we explain the options in plain language so nobody signs off on work they do not understand.</p>
</main>
<footer><p>Bluebird Plumbing serves the greater Austin area.</p></footer>
</body></html>"#;

    const ABOUT_PAGE: &str = r#"<html><head><title>About | Bluebird Plumbing</title></head><body>
<main>
<section class="our-story">
<h2>Our Story</h2>
<p>Bluebird Plumbing was founded in 1998. Maria Delgado, a second-generation master plumber, started the company with one van and a pager, and she still walks the big jobs before anyone opens a wall.</p>
</section>
</main>
</body></html>"#;

    const CONTACT_PAGE: &str = r#"<html><head><title>Contact | Bluebird Plumbing</title></head><body>
<main>
<h2>Contact</h2>
<p><a href="tel:+15125550188">Call (512) 555-0188</a></p>
<p><a href="mailto:office@bluebirdplumbing.com">Email the office</a></p>
<p class="address">2200 Lamar Blvd, Austin, TX 78704</p>
</main>
</body></html>"#;

    const TEAM_PAGE: &str = r#"<html><head><title>Our Team | Bluebird Plumbing</title></head><body>
<main>
<section class="team-grid">
<h2>Leadership</h2>
<div class="member"><h3>Jane Brown</h3><p class="title">Operations Lead</p><a href="/team/jane-brown">Read bio</a></div>
<div class="member"><h3>Tom Reed</h3><p class="title">Master Plumber</p></div>
</section>
</main>
</body></html>"#;

    const JANE_BIO: &str = r#"<html><head><title>Jane Brown | Bluebird Plumbing</title></head><body>
<article>
<p>Jane runs field operations for the whole company, routing crews, parts, and permits so a burst-pipe call never waits behind a remodel. She apprenticed under two master plumbers before moving into scheduling.</p>
</article>
</body></html>"#;

    #[tokio::test]
    async fn whole_site_profile_merges_aux_pages_and_bios() {
        let server = MockServer::start().await;
        mount_page(&server, "/", MAIN_PAGE).await;
        mount_page(&server, "/about", ABOUT_PAGE).await;
        mount_page(&server, "/contact", CONTACT_PAGE).await;
        mount_page(&server, "/our-team", TEAM_PAGE).await;
        mount_page(&server, "/team/jane-brown", JANE_BIO).await;

        let config = ProfileConfig::default();
        let result = profile_site_with(&fetcher(), &server.uri(), &config, &SilentProgress)
            .await
            .unwrap();

        // Main page plus the three auxiliary pages that exist; the rest of
        // the probe list 404s and is skipped.
        assert_eq!(result.pages_fetched, 4);
        assert_eq!(result.bios_filled, 1);

        let uri = server.uri();
        let record = &result.record;
        assert_eq!(record.source_url, format!("{uri}/"));

        let cf = &record.company_foundation;
        assert_eq!(cf.website.as_deref(), Some(uri.as_str()));
        assert_eq!(cf.year_founded.as_deref(), Some("1998"));
        assert_eq!(cf.phone.as_deref(), Some("(512) 555-0188"));
        assert_eq!(cf.email.as_deref(), Some("office@bluebirdplumbing.com"));
        assert!(cf.main_address.as_deref().unwrap_or("").contains("Lamar"));
        assert_eq!(
            cf.alternative_names,
            vec!["Bluebird Plumbing | Austin".to_string()]
        );

        let story = record.positioning.founding_story.as_deref().unwrap_or("");
        assert!(story.contains("Maria Delgado"), "story: {story:?}");

        let names: Vec<&str> = record.key_people.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"Jane Brown"), "people: {names:?}");
        assert!(names.contains(&"Tom Reed"), "people: {names:?}");
        let jane = record
            .key_people
            .iter()
            .find(|p| p.name == "Jane Brown")
            .unwrap();
        assert_eq!(jane.title.as_deref(), Some("Operations Lead"));
        assert!(
            jane.description
                .as_deref()
                .unwrap_or("")
                .contains("field operations")
        );
        assert!(!record.offerings.is_empty());
    }

    #[tokio::test]
    async fn main_page_values_survive_aux_merge() {
        const OAK_MAIN: &str = r#"<html><head>
<title>Oak Barrel Cabinetry</title>
<meta name="description" content="Custom cabinets and built-ins, designed and installed by one crew.">
</head><body>
<main>
<h2>Craftsmanship</h2>
<p>Founded in 2005, Oak Barrel Cabinetry designs and builds custom kitchen cabinets, bathroom vanities, and built-in shelving for homes across the metro area. Every piece is measured, cut, and finished in our own shop rather than ordered from a catalog.</p>
<p>Call <a href="tel:+15125550110">(512) 555-0110</a> or write to <a href="mailto:hello@oakbarrel.example">hello@oakbarrel.example</a> to start a project. We keep the crew small on purpose: the people who design your cabinets are the ones who install them. Most projects start with a sketch on the kitchen table and a tape measure.</p>
</main>
<footer><p>Oak Barrel Cabinetry is proud to build in Texas hardwoods from sustainable mills.</p></footer>
</body></html>"#;

        const OAK_ABOUT: &str = r#"<html><head><title>About | Oak Barrel</title></head><body>
<section class="about">
<h2>Background</h2>
<p>Oak Barrel Cabinetry was founded in 1998 as a weekend workbench. The habit grew into a full-time practice with a waiting list.</p>
</section>
</body></html>"#;

        const OAK_CONTACT: &str = r#"<html><head><title>Contact | Oak Barrel</title></head><body>
<main>
<h2>Contact</h2>
<p><a href="tel:+15125550999">Call (512) 555-0999</a></p>
<p><a href="mailto:sales@oakbarrel.example">sales@oakbarrel.example</a></p>
</main>
</body></html>"#;

        let server = MockServer::start().await;
        mount_page(&server, "/", OAK_MAIN).await;
        mount_page(&server, "/about", OAK_ABOUT).await;
        mount_page(&server, "/contact", OAK_CONTACT).await;

        let result = profile_site_with(
            &fetcher(),
            &server.uri(),
            &ProfileConfig::default(),
            &SilentProgress,
        )
        .await
        .unwrap();

        assert_eq!(result.pages_fetched, 3);
        // The about and contact pages carry a different year, phone, and
        // email; none of them may displace what the main page said.
        let cf = &result.record.company_foundation;
        assert_eq!(cf.year_founded.as_deref(), Some("2005"));
        assert_eq!(cf.phone.as_deref(), Some("(512) 555-0110"));
        assert_eq!(cf.email.as_deref(), Some("hello@oakbarrel.example"));
    }

    #[tokio::test]
    async fn aux_failures_do_not_sink_the_run() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            "/",
            concat!(
                "<html><head><title>Quiet Pines Lodge</title></head><body>",
                "<p>Eight cabins on a wooded ridge, open year round, with no schedule beyond the one you bring.</p>",
                "</body></html>",
            ),
        )
        .await;

        let result = profile_site_with(
            &fetcher(),
            &server.uri(),
            &ProfileConfig::default(),
            &SilentProgress,
        )
        .await
        .unwrap();

        assert_eq!(result.pages_fetched, 1);
        assert_eq!(result.bios_filled, 0);
        assert_eq!(
            result.record.company_foundation.alternative_names,
            vec!["Quiet Pines Lodge".to_string()]
        );
    }

    #[tokio::test]
    async fn embedded_json_rescues_script_only_pages() {
        let server = MockServer::start().await;
        let shell = concat!(
            "<html><head><title>Canvas Studio</title></head><body><div id=\"root\"></div>",
            "<script id=\"__NEXT_DATA__\" type=\"application/json\">",
            "{\"props\":{\"pageProps\":{",
            "\"hero\":\"Canvas Studio was founded in 1987 and builds collaborative whiteboard software for distributed product teams.\",",
            "\"detail\":\"Teams sketch together in real time, attach research notes to every frame, and hand finished flows to engineering without exporting a single static image.\",",
            "\"audience\":\"Product managers, design leads, and researchers keep one shared source of truth for every release.\"",
            "}}}",
            "</script></body></html>",
        );
        mount_page(&server, "/", shell).await;

        let result = profile_site_with(
            &fetcher(),
            &server.uri(),
            &ProfileConfig::default(),
            &SilentProgress,
        )
        .await
        .unwrap();

        assert_eq!(result.pages_fetched, 1);
        let cf = &result.record.company_foundation;
        assert_eq!(cf.year_founded.as_deref(), Some("1987"));
        assert!(cf.overview.is_some());
        assert_eq!(cf.alternative_names, vec!["Canvas Studio".to_string()]);
    }

    #[tokio::test]
    async fn render_service_rescues_thin_pages() {
        let site = MockServer::start().await;
        mount_page(&site, "/", "<html><body><p>Loading.</p></body></html>").await;

        let filler =
            "<p>Every engagement pairs one designer with one researcher, so findings land in the file the same week they are heard.</p>"
                .repeat(8);
        let rendered = format!(
            concat!(
                "<html><head><title>Glasswing Studio | Product Design</title></head><body><main>",
                "<h1>Product design for ambitious teams</h1>",
                "<p>Glasswing Studio was established in 2012 and has shipped interface work for fintech, logistics, and healthcare teams across North America.</p>",
                "<p><a href=\"tel:+12065550123\">Call (206) 555-0123</a></p>",
                "{filler}",
                "</main></body></html>",
            ),
            filler = filler
        );

        let render = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/content"))
            .and(body_json(
                serde_json::json!({ "url": format!("{}/", site.uri()) }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string(rendered))
            .expect(1)
            .mount(&render)
            .await;

        let mut config = ProfileConfig::default();
        config.render_endpoint = Some(render.uri());

        let result = profile_site_with(&fetcher(), &site.uri(), &config, &SilentProgress)
            .await
            .unwrap();

        assert_eq!(result.pages_fetched, 1);
        let cf = &result.record.company_foundation;
        assert_eq!(cf.year_founded.as_deref(), Some("2012"));
        assert_eq!(cf.phone.as_deref(), Some("(206) 555-0123"));
        assert!(cf.alternative_names[0].contains("Glasswing Studio"));
    }

    #[tokio::test]
    async fn unreachable_main_page_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = profile_site_with(
            &fetcher(),
            &server.uri(),
            &ProfileConfig::default(),
            &SilentProgress,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("HTTP 503"));
    }
}
