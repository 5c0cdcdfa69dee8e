//! Social profile link discovery.

use scraper::Selector;
use siteprofiler_shared::OnlinePresence;
use url::Url;

/// Platforms collected into the `other_social` map.
const OTHER_PLATFORMS: [(&str, &str); 4] = [
    ("tiktok", "tiktok.com"),
    ("pinterest", "pinterest.com"),
    ("yelp", "yelp.com"),
    ("vimeo", "vimeo.com"),
];

fn first_href(doc: &scraper::Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).unwrap();
    doc.select(&sel)
        .filter_map(|el| el.value().attr("href"))
        .map(str::to_string)
        .next()
}

fn host_is(href: &str, domain: &str) -> bool {
    let Ok(url) = Url::parse(href) else {
        return false;
    };
    match url.host_str() {
        Some(host) => {
            let host = host.to_ascii_lowercase();
            host == domain || host.ends_with(&format!(".{domain}"))
        }
        None => false,
    }
}

// "x.com" as a substring also matches box.com and similar, so twitter/x
// links get a host check on top of the attribute scan.
fn twitter_href(doc: &scraper::Html) -> Option<String> {
    let sel = Selector::parse("a[href*='twitter.com'], a[href*='x.com']").unwrap();
    doc.select(&sel)
        .filter_map(|el| el.value().attr("href"))
        .find(|href| {
            host_is(href, "twitter.com") || host_is(href, "x.com") || href.contains("twitter.com")
        })
        .map(str::to_string)
}

/// Scan anchors for known social platforms. First link per platform wins.
pub fn extract_social(doc: &scraper::Html) -> OnlinePresence {
    let mut presence = OnlinePresence {
        linked_in: first_href(doc, "a[href*='linkedin.com']"),
        facebook: first_href(doc, "a[href*='facebook.com']"),
        instagram: first_href(doc, "a[href*='instagram.com']"),
        twitter_x: twitter_href(doc),
        youtube: first_href(doc, "a[href*='youtube.com']"),
        ..OnlinePresence::default()
    };
    for (key, domain) in OTHER_PLATFORMS {
        if presence.other_social.contains_key(key) {
            continue;
        }
        let selector = format!("a[href*='{domain}']");
        if let Some(href) = first_href(doc, &selector) {
            presence.other_social.insert(key.to_string(), href);
        }
    }
    presence
}

/// Fill empty platform slots from schema.org `sameAs` URLs.
pub fn apply_same_as(presence: &mut OnlinePresence, same_as: &[String]) {
    for link in same_as {
        let lower = link.to_lowercase();
        if lower.contains("linkedin.com") {
            presence.linked_in.get_or_insert_with(|| link.clone());
        } else if lower.contains("facebook.com") {
            presence.facebook.get_or_insert_with(|| link.clone());
        } else if lower.contains("instagram.com") {
            presence.instagram.get_or_insert_with(|| link.clone());
        } else if lower.contains("twitter.com") || host_is(link, "x.com") {
            presence.twitter_x.get_or_insert_with(|| link.clone());
        } else if lower.contains("youtube.com") {
            presence.youtube.get_or_insert_with(|| link.clone());
        }
    }
}
