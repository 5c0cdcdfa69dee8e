//! Parsed-page wrapper handed to every extractor.
//!
//! Whatever produced the HTML (plain fetch, embedded-blob augmentation, or a
//! browser render), extractors only ever see a [`PageDoc`], so every source
//! goes through identical heuristics.

use scraper::{Html, Selector};
use url::Url;

use crate::dom;
use crate::text::clean;

/// One parsed page plus its pre-computed text views.
pub struct PageDoc {
    doc: Html,
    url: Url,
    main_text: String,
    full_text: String,
}

impl PageDoc {
    /// Parse HTML and compute the filtered and unfiltered body texts once.
    pub fn parse(html: &str, url: Url) -> Self {
        let doc = Html::parse_document(html);
        let main_text = dom::main_body_text(&doc);
        let full_text = dom::full_text(&doc);
        Self {
            doc,
            url,
            main_text,
            full_text,
        }
    }

    /// The URL this page was fetched from.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The parsed document, for extractors that need direct DOM access.
    pub fn document(&self) -> &Html {
        &self.doc
    }

    /// Visible body text with overlay/legal containers stripped.
    pub fn main_text(&self) -> &str {
        &self.main_text
    }

    /// Unfiltered body text. Only last-resort scans should read this.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// The `<title>` text, if present and non-empty.
    pub fn title(&self) -> Option<String> {
        let sel = Selector::parse("title").unwrap();
        self.doc
            .select(&sel)
            .next()
            .map(|el| clean(&el.text().collect::<String>()))
            .filter(|t| !t.is_empty())
    }

    /// Content of `<meta name="...">`.
    pub fn meta_named(&self, name: &str) -> Option<String> {
        let sel = Selector::parse(&format!(r#"meta[name="{name}"]"#)).unwrap();
        self.doc
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(clean)
            .filter(|c| !c.is_empty())
    }

    /// Content of `<meta property="...">` (OpenGraph and friends).
    pub fn meta_property(&self, property: &str) -> Option<String> {
        let sel = Selector::parse(&format!(r#"meta[property="{property}"]"#)).unwrap();
        self.doc
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(clean)
            .filter(|c| !c.is_empty())
    }

    /// `<meta name="description">` falling back to `og:description`.
    pub fn meta_description(&self) -> Option<String> {
        self.meta_named("description")
            .or_else(|| self.meta_property("og:description"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> PageDoc {
        PageDoc::parse(html, Url::parse("https://example.com/").unwrap())
    }

    #[test]
    fn title_and_meta() {
        let p = page(concat!(
            r#"<html><head><title> Acme Plumbing </title>"#,
            r#"<meta name="description" content="Plumbers you can trust.">"#,
            r#"<meta property="og:title" content="Acme Plumbing Co"></head>"#,
            r#"<body><p>hello</p></body></html>"#,
        ));
        assert_eq!(p.title().as_deref(), Some("Acme Plumbing"));
        assert_eq!(p.meta_description().as_deref(), Some("Plumbers you can trust."));
        assert_eq!(p.meta_property("og:title").as_deref(), Some("Acme Plumbing Co"));
    }

    #[test]
    fn og_description_fallback() {
        let p = page(concat!(
            r#"<html><head><meta property="og:description" content="From the graph."></head>"#,
            r#"<body></body></html>"#,
        ));
        assert_eq!(p.meta_description().as_deref(), Some("From the graph."));
    }

    #[test]
    fn empty_meta_is_none() {
        let p = page(r#"<html><head><meta name="description" content=""></head><body></body></html>"#);
        assert!(p.meta_description().is_none());
    }
}
