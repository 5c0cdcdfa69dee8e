//! Prose recovery from embedded framework state.
//!
//! Script-rendered sites often ship an empty shell plus a JSON state blob
//! (`__NEXT_DATA__`, `__NUXT_DATA__`). When the static body is thin, the
//! blob is walked for prose-looking strings, which get injected back into
//! the HTML as a hidden div so the normal DOM extractors can see them.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Id of the hidden div the harvested text is injected under.
pub const BLOB_DIV_ID: &str = "siteprofiler-js-data";

/// Total prose harvested from one page's blobs is capped here.
const MAX_HARVEST: usize = 50_000;

/// Harvests shorter than this are not worth reparsing the page for.
const MIN_INJECT: usize = 100;

static NEXT_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script\s+id="__NEXT_DATA__"[^>]*>(.*?)</script>"#).expect("valid regex")
});

static NUXT_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script\s+id="__NUXT_DATA__"[^>]*>(.*?)</script>"#).expect("valid regex")
});

// Nuxt also emits the payload with the type attribute first.
static NUXT_JSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script\s+type="application/json"\s+id="__NUXT_DATA__"[^>]*>(.*?)</script>"#)
        .expect("valid regex")
});

// String shapes that are state, not prose.
static URL_LIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid regex"));

static PUNCT_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-.,:;]+$").expect("valid regex"));

static CODE_LIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<script|function\s*\(|=>\s*\{").expect("valid regex"));

/// Harvest blobs and, when fruitful, return the HTML with the prose injected
/// before `</body>`. `None` means the page is unchanged.
pub fn augment_with_embedded_json(html: &str) -> Option<String> {
    let harvested = harvest_embedded_json(html)?;
    inject_harvest(html, &harvested)
}

/// Pull prose strings out of `__NEXT_DATA__` / `__NUXT_DATA__` payloads.
pub fn harvest_embedded_json(html: &str) -> Option<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut collected: Vec<String> = Vec::new();
    let mut total = 0usize;

    for re in [&*NEXT_DATA_RE, &*NUXT_DATA_RE, &*NUXT_JSON_RE] {
        let Some(cap) = re.captures(html) else {
            continue;
        };
        let raw = cap.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        if raw.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => collect_prose(&value, &mut seen, &mut collected, &mut total),
            Err(e) => debug!(error = %e, "embedded state blob is not valid JSON, ignoring"),
        }
    }

    if collected.is_empty() {
        return None;
    }

    let mut joined = collected.join("\n\n");
    if joined.len() > MAX_HARVEST {
        let mut cut = MAX_HARVEST;
        while !joined.is_char_boundary(cut) {
            cut -= 1;
        }
        joined.truncate(cut);
    }
    Some(joined)
}

/// Recursive walk keeping strings that read like sentences: 40..=8000 chars,
/// not a bare URL, not punctuation/digits, no script-looking syntax.
fn collect_prose(
    value: &Value,
    seen: &mut HashSet<String>,
    out: &mut Vec<String>,
    total: &mut usize,
) {
    if *total >= MAX_HARVEST {
        return;
    }
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.len() < 40 || trimmed.len() > 8000 {
                return;
            }
            if URL_LIKE_RE.is_match(trimmed)
                || PUNCT_DIGITS_RE.is_match(trimmed)
                || CODE_LIKE_RE.is_match(trimmed)
            {
                return;
            }
            if seen.insert(trimmed.to_string()) {
                *total += trimmed.len();
                out.push(trimmed.to_string());
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_prose(item, seen, out, total);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_prose(item, seen, out, total);
            }
        }
        _ => {}
    }
}

/// Escape the harvest and splice it in as a hidden div before `</body>`.
fn inject_harvest(html: &str, harvested: &str) -> Option<String> {
    if harvested.len() <= MIN_INJECT {
        return None;
    }
    let idx = html.find("</body>")?;

    let escaped = harvested
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    let mut out = String::with_capacity(html.len() + escaped.len() + 96);
    out.push_str(&html[..idx]);
    out.push_str(&format!(
        r#"<div id="{BLOB_DIV_ID}" style="display:none" aria-hidden="true">{escaped}</div>"#
    ));
    out.push('\n');
    out.push_str(&html[idx..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROSE: &str =
        "We are a family-run irrigation company serving the valley since 1987.";

    fn shell(blob: &str) -> String {
        format!(
            concat!(
                r#"<html><head><script id="__NEXT_DATA__" type="application/json">{}</script>"#,
                "</head><body><div id=\"app\"></div></body></html>",
            ),
            blob
        )
    }

    #[test]
    fn next_data_prose_is_recovered() {
        let blob = format!(
            concat!(
                r#"{{"props":{{"pageProps":{{"description":"{}","#,
                r#""canonical":"https://acme.example/about","#,
                r#""stats":"12, 34, 56, 78, 90, 12, 34, 56, 78, 90, 12, 34, 56","#,
                r#""handler":"function (e) {{ return e; }} and some more padding text here"}}}}}}"#,
            ),
            PROSE
        );
        let harvested = harvest_embedded_json(&shell(&blob)).unwrap();
        assert!(harvested.contains(PROSE));
        assert!(!harvested.contains("https://acme.example/about"));
        assert!(!harvested.contains("12, 34"));
        assert!(!harvested.contains("function"));
    }

    #[test]
    fn duplicate_strings_collapse() {
        let blob = format!(
            r#"{{"a":"{PROSE}","b":{{"nested":"{PROSE}"}},"c":["{PROSE}"]}}"#
        );
        let harvested = harvest_embedded_json(&shell(&blob)).unwrap();
        assert_eq!(harvested.matches(PROSE).count(), 1);
    }

    #[test]
    fn short_strings_are_state_not_prose() {
        let blob = r#"{"a":"Home","b":"About Us","c":"en-US","d":"toggle"}"#;
        assert!(harvest_embedded_json(&shell(blob)).is_none());
    }

    #[test]
    fn page_without_blobs_is_untouched() {
        let html = "<html><body><p>plain static page</p></body></html>";
        assert!(augment_with_embedded_json(html).is_none());
    }

    #[test]
    fn broken_json_is_ignored() {
        assert!(harvest_embedded_json(&shell(r#"{"unterminated": "#)).is_none());
    }

    #[test]
    fn injection_lands_before_body_close() {
        // Two long strings clear the 100-char injection floor.
        let blob = format!(r#"{{"a":"{PROSE}","b":"{PROSE} We install, repair, and winterize."}}"#);
        let html = shell(&blob);
        let augmented = augment_with_embedded_json(&html).unwrap();

        let div_at = augmented.find(BLOB_DIV_ID).unwrap();
        let body_close_at = augmented.rfind("</body>").unwrap();
        assert!(div_at < body_close_at);
        assert!(augmented.contains(r#"style="display:none""#));
        // Original markup survives around the injection.
        assert!(augmented.contains(r#"<div id="app"></div>"#));
    }

    #[test]
    fn harvested_markup_is_escaped() {
        let blob = format!(
            r#"{{"a":"{PROSE}","b":"Our <b>award-winning</b> crew covers the whole county."}}"#
        );
        let augmented = augment_with_embedded_json(&shell(&blob)).unwrap();
        assert!(augmented.contains("&lt;b&gt;award-winning&lt;/b&gt;"));
    }

    #[test]
    fn nuxt_blob_is_read_too() {
        let html = format!(
            concat!(
                r#"<html><head><script id="__NUXT_DATA__" type="application/json">"#,
                r#"{{"state":"{}"}}"#,
                "</script></head><body></body></html>",
            ),
            PROSE
        );
        let harvested = harvest_embedded_json(&html).unwrap();
        assert!(harvested.contains(PROSE));
    }

    #[test]
    fn nuxt_blob_with_type_attribute_first_is_read() {
        let html = format!(
            concat!(
                r#"<html><head><script type="application/json" id="__NUXT_DATA__" data-ssr="true">"#,
                r#"{{"state":"{}"}}"#,
                "</script></head><body></body></html>",
            ),
            PROSE
        );
        let harvested = harvest_embedded_json(&html).unwrap();
        assert!(harvested.contains(PROSE));
    }
}
