//! Brand colors, font families, and logo URLs.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use crate::page::PageDoc;

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9a-fA-F]{3,8}\b").expect("valid regex"));

static THEME_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{3,8}$").expect("valid regex"));

static FONT_FAMILY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)font-family\s*:\s*([^;}]+)|font-family\s*=\s*["']([^"']+)["']"#)
        .expect("valid regex")
});

static INLINE_FONT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)font-family\s*:\s*([^;]+)").expect("valid regex"));

static GENERIC_FONT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:inherit|initial|unset|serif|sans-serif|monospace)$").expect("valid regex")
});

static GOOGLE_FAMILY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"family=([^&:]+)").expect("valid regex"));

static BG_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)background(?:-image)?\s*:\s*url\s*\(\s*["']?([^"')]+)"#)
        .expect("valid regex")
});

const MAX_COLORS: usize = 10;
const MAX_FONTS: usize = 8;
const MAX_LOGOS: usize = 5;

fn push_exact(list: &mut Vec<String>, value: String) {
    if !value.is_empty() && !list.iter().any(|v| v == &value) {
        list.push(value);
    }
}

/// Hex colors from stylesheet blocks, inline styles, and the theme-color meta.
pub fn extract_colors(page: &PageDoc) -> Vec<String> {
    let mut colors = Vec::new();
    let style_sel = Selector::parse("style").unwrap();
    for el in page.document().select(&style_sel) {
        let css: String = el.text().collect();
        for m in HEX_COLOR_RE.find_iter(&css) {
            push_exact(&mut colors, m.as_str().to_string());
        }
    }
    let styled_sel = Selector::parse("[style]").unwrap();
    for el in page.document().select(&styled_sel) {
        if let Some(style) = el.value().attr("style") {
            for m in HEX_COLOR_RE.find_iter(style) {
                push_exact(&mut colors, m.as_str().to_string());
            }
        }
    }
    let meta_sel = Selector::parse("meta[name='theme-color']").unwrap();
    if let Some(content) = page
        .document()
        .select(&meta_sel)
        .next()
        .and_then(|el| el.value().attr("content"))
    {
        if THEME_COLOR_RE.is_match(content.trim()) {
            push_exact(&mut colors, content.trim().to_string());
        }
    }
    colors.truncate(MAX_COLORS);
    colors
}

fn clean_family(raw: &str) -> String {
    let first = raw.split(',').next().unwrap_or("");
    first
        .trim_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace())
        .to_string()
}

/// Font families from `<style>` blocks, inline styles, and Google Fonts links.
pub fn extract_fonts(page: &PageDoc) -> Vec<String> {
    let mut fonts = Vec::new();
    let style_sel = Selector::parse("style").unwrap();
    for el in page.document().select(&style_sel) {
        let css: String = el.text().collect();
        for caps in FONT_FAMILY_RE.captures_iter(&css) {
            let raw = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or("");
            let family = clean_family(raw);
            if !family.is_empty() && !GENERIC_FONT_RE.is_match(&family) {
                push_exact(&mut fonts, family);
            }
        }
    }
    let styled_sel = Selector::parse("[style]").unwrap();
    for el in page.document().select(&styled_sel) {
        if let Some(style) = el.value().attr("style") {
            if let Some(caps) = INLINE_FONT_RE.captures(style) {
                let family = clean_family(caps.get(1).map(|m| m.as_str()).unwrap_or(""));
                push_exact(&mut fonts, family);
            }
        }
    }
    let link_sel = Selector::parse("link[href*='fonts.googleapis.com']").unwrap();
    for el in page.document().select(&link_sel) {
        if let Some(href) = el.value().attr("href") {
            for caps in GOOGLE_FAMILY_RE.captures_iter(href) {
                let name = caps
                    .get(1)
                    .map(|m| m.as_str())
                    .unwrap_or("")
                    .replace('+', " ")
                    .replace("%20", " ");
                let name = name.trim().to_string();
                if !name.is_empty() && name.len() < 50 {
                    push_exact(&mut fonts, name);
                }
            }
        }
    }
    fonts.truncate(MAX_FONTS);
    fonts
}

/// Logo image URLs, resolved against the page URL.
pub fn extract_logos(page: &PageDoc) -> Vec<String> {
    let mut urls = Vec::new();
    let primary_sel = Selector::parse(
        "img[src*='logo'], [class*='logo'] img, header img, nav img, .header img, .nav img",
    )
    .unwrap();
    for el in page.document().select(&primary_sel) {
        if let Some(src) = el.value().attr("src") {
            if let Ok(resolved) = page.url().join(src) {
                push_exact(&mut urls, resolved.to_string());
            }
        }
    }
    if urls.is_empty() {
        let fallback_sel =
            Selector::parse("header img, .header img, [class*='site-header'] img").unwrap();
        for el in page.document().select(&fallback_sel) {
            if let Some(src) = el.value().attr("src") {
                if let Ok(resolved) = page.url().join(src) {
                    push_exact(&mut urls, resolved.to_string());
                }
            }
        }
    }
    let bg_sel = Selector::parse("[class*='logo']").unwrap();
    for el in page.document().select(&bg_sel) {
        if let Some(style) = el.value().attr("style") {
            if let Some(caps) = BG_IMAGE_RE.captures(style) {
                let raw = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
                if let Ok(resolved) = page.url().join(raw) {
                    push_exact(&mut urls, resolved.to_string());
                }
            }
        }
    }
    urls.truncate(MAX_LOGOS);
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> PageDoc {
        PageDoc::parse(html, "https://example.com".parse().unwrap())
    }

    #[test]
    fn colors_from_styles_and_theme_meta() {
        let html = r##"<html><head>
            <style>.btn { color: #ff6600; border-color: #ff6600; }</style>
            <meta name="theme-color" content="#00aa88">
        </head><body>
            <div style="background: #333"></div>
        </body></html>"##;
        let colors = extract_colors(&page(html));
        assert_eq!(colors, vec!["#ff6600", "#333", "#00aa88"]);
    }

    #[test]
    fn fonts_skip_generic_families() {
        let html = r#"<html><head>
            <style>
              body { font-family: "Open Sans", sans-serif; }
              .mono { font-family: monospace; }
            </style>
            <link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Roboto+Slab:wght@400&display=swap">
        </head><body></body></html>"#;
        let fonts = extract_fonts(&page(html));
        assert_eq!(fonts, vec!["Open Sans", "Roboto Slab"]);
    }

    #[test]
    fn logos_resolve_relative_urls() {
        let html = r#"<html><body>
            <header><img src="/img/logo.png"></header>
            <div class="logo" style="background-image: url('/brand.svg')"></div>
        </body></html>"#;
        let logos = extract_logos(&page(html));
        assert_eq!(
            logos,
            vec![
                "https://example.com/img/logo.png",
                "https://example.com/brand.svg"
            ]
        );
    }

    #[test]
    fn site_header_fallback_when_no_logo_markup() {
        let html = r#"<html><body>
            <div class="site-header"><img src="banner.jpg"></div>
        </body></html>"#;
        let logos = extract_logos(&page(html));
        assert_eq!(logos, vec!["https://example.com/banner.jpg"]);
    }
}
