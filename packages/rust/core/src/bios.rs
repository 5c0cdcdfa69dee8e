//! Bio resolution: follow "read bio" profile links for people whose on-page
//! description is missing or thin, and fill it from the profile page.

use std::collections::{HashMap, HashSet};

use scraper::Selector;
use siteprofiler_extract::dom::element_text;
use siteprofiler_extract::page::PageDoc;
use siteprofiler_extract::people::BioLink;
use siteprofiler_extract::text::truncate;
use siteprofiler_fetch::PageFetcher;
use siteprofiler_shared::KeyPerson;
use tracing::debug;
use url::Url;

/// A description this long is considered complete and never refetched.
const COMPLETE_BIO_LEN: usize = 150;
/// Shortest fetched bio worth keeping.
const MIN_BIO_LEN: usize = 40;
const BIO_TEXT_CAP: usize = 800;

const BIO_PARAGRAPH_SEL: &str =
    "article p, main p, [role='main'] p, .content p, [class*='bio'] p, [class*='profile'] p";

/// Pull the bio text out of a fetched profile page: content paragraphs
/// joined, falling back to the page's main text.
fn bio_from_html(html: &str, url: Url) -> Option<String> {
    let page = PageDoc::parse(html, url);
    let sel = Selector::parse(BIO_PARAGRAPH_SEL).unwrap();

    let parts: Vec<String> = page
        .document()
        .select(&sel)
        .map(element_text)
        .filter(|t| t.len() > 30 && t.len() < 3000)
        .collect();
    if !parts.is_empty() {
        return Some(truncate(&parts.join(" "), BIO_TEXT_CAP).to_string());
    }

    let main = page.main_text();
    if main.len() > 100 {
        return Some(truncate(main, BIO_TEXT_CAP).to_string());
    }
    None
}

/// Fill missing person descriptions from their profile pages.
///
/// At most `max_fetches` pages are requested per run, and each distinct URL
/// only once; a failed or useless fetch still counts against the budget.
/// When several links carry the same name, the last one wins. Returns how
/// many descriptions were filled.
pub async fn resolve_bios(
    fetcher: &PageFetcher,
    people: &mut [KeyPerson],
    links: &[BioLink],
    max_fetches: usize,
) -> usize {
    let mut by_name: HashMap<String, &Url> = HashMap::new();
    for link in links {
        by_name.insert(link.name.trim().to_lowercase(), &link.url);
    }

    let mut fetched: HashSet<Url> = HashSet::new();
    let mut fetches = 0;
    let mut filled = 0;

    for person in people.iter_mut() {
        if fetches >= max_fetches {
            break;
        }
        if person
            .description
            .as_ref()
            .is_some_and(|d| d.len() > COMPLETE_BIO_LEN)
        {
            continue;
        }
        let Some(url) = by_name.get(&person.name.trim().to_lowercase()) else {
            continue;
        };
        if !fetched.insert((*url).clone()) {
            continue;
        }

        fetches += 1;
        let Some(html) = fetcher.fetch_aux(url).await else {
            continue;
        };
        let Some(bio) = bio_from_html(&html, (*url).clone()) else {
            debug!(name = %person.name, "profile page had no usable bio text");
            continue;
        };
        let trimmed = bio.trim();
        if trimmed.len() > MIN_BIO_LEN && !trimmed.eq_ignore_ascii_case(person.name.trim()) {
            person.description = Some(trimmed.to_string());
            filled += 1;
        }
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteprofiler_shared::ProfileConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> PageFetcher {
        PageFetcher::new(&ProfileConfig::default())
            .unwrap()
            .allow_localhost()
    }

    fn person(name: &str) -> KeyPerson {
        KeyPerson::named(name)
    }

    fn link(server: &MockServer, name: &str, path: &str) -> BioLink {
        BioLink {
            name: name.to_string(),
            url: Url::parse(&format!("{}{path}", server.uri())).unwrap(),
        }
    }

    const BIO_PAGE: &str = concat!(
        "<html><body><article><p>",
        "Jane Brown leads field operations and has managed over four hundred ",
        "installations across the region since joining the company in 2012. ",
        "She holds a master electrician license and trains every new crew.",
        "</p></article></body></html>",
    );

    #[tokio::test]
    async fn missing_description_is_filled_from_profile_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/team/jane-brown"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BIO_PAGE))
            .mount(&server)
            .await;

        let mut people = vec![person("Jane Brown")];
        let links = vec![link(&server, "Jane Brown", "/team/jane-brown")];
        let filled = resolve_bios(&fetcher(), &mut people, &links, 10).await;

        assert_eq!(filled, 1);
        let desc = people[0].description.as_deref().unwrap();
        assert!(desc.contains("field operations"));
        assert!(desc.len() <= 800);
    }

    #[tokio::test]
    async fn long_existing_descriptions_are_never_refetched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BIO_PAGE))
            .mount(&server)
            .await;

        let mut people = vec![person("Jane Brown")];
        people[0].description = Some("x".repeat(200));
        let links = vec![link(&server, "Jane Brown", "/team/jane-brown")];
        let filled = resolve_bios(&fetcher(), &mut people, &links, 10).await;

        assert_eq!(filled, 0);
        assert!(server.received_requests().await.unwrap().is_empty());
        assert_eq!(people[0].description.as_deref(), Some("x".repeat(200).as_str()));
    }

    #[tokio::test]
    async fn fetch_budget_counts_attempts() {
        let server = MockServer::start().await;
        // Every profile 404s; the attempts still burn the budget.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut people: Vec<KeyPerson> = (0..8).map(|i| person(&format!("Person Number{i}"))).collect();
        let links: Vec<BioLink> = (0..8)
            .map(|i| link(&server, &format!("Person Number{i}"), &format!("/bio/{i}")))
            .collect();
        let filled = resolve_bios(&fetcher(), &mut people, &links, 3).await;

        assert_eq!(filled, 0);
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn shared_profile_url_is_fetched_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/team"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BIO_PAGE))
            .mount(&server)
            .await;

        let mut people = vec![person("Jane Brown"), person("Tom Reed")];
        let links = vec![
            link(&server, "Jane Brown", "/team"),
            link(&server, "Tom Reed", "/team"),
        ];
        let filled = resolve_bios(&fetcher(), &mut people, &links, 10).await;

        assert_eq!(filled, 1);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
        assert!(people[0].description.is_some());
        assert!(people[1].description.is_none());
    }

    #[tokio::test]
    async fn thin_profile_pages_fill_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/team/jane-brown"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body><p>Jane Brown.</p></body></html>"),
            )
            .mount(&server)
            .await;

        let mut people = vec![person("Jane Brown")];
        let links = vec![link(&server, "Jane Brown", "/team/jane-brown")];
        let filled = resolve_bios(&fetcher(), &mut people, &links, 10).await;

        assert_eq!(filled, 0);
        assert!(people[0].description.is_none());
    }

    #[tokio::test]
    async fn last_link_wins_for_a_repeated_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/new-profile"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BIO_PAGE))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/old-profile"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let mut people = vec![person("Jane Brown")];
        let links = vec![
            link(&server, "Jane Brown", "/old-profile"),
            link(&server, "Jane Brown", "/new-profile"),
        ];
        let filled = resolve_bios(&fetcher(), &mut people, &links, 10).await;

        assert_eq!(filled, 1);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.path(), "/new-profile");
    }
}
