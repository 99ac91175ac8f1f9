use std::collections::BTreeSet;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::decode::decode_document;

/// Finds script resources referenced by a page:
/// - the `src` of every `<script>` element
/// - the `href` of `<link rel="stylesheet">` elements whose href ends in `.js`
///
/// The stylesheet rule is intentionally narrow: a stylesheet link is only taken
/// when it points at what looks like a script file.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptResourceExtractor;

impl ScriptResourceExtractor {
    /// Returns absolute http(s) URLs, resolved against `base_url` and deduplicated.
    pub fn extract(&self, html: &str, base_url: &str) -> BTreeSet<String> {
        let document = Html::parse_document(html);
        let base = Url::parse(base_url).ok();
        let mut found = BTreeSet::new();

        if let Ok(selector) = Selector::parse("script[src]") {
            for script in document.select(&selector) {
                if let Some(url) = script
                    .value()
                    .attr("src")
                    .and_then(|src| resolve_url(src, base.as_ref()))
                {
                    found.insert(url.into());
                }
            }
        }

        if let Ok(selector) = Selector::parse("link[href]") {
            for link in document.select(&selector).filter(|link| is_stylesheet(link)) {
                let Some(href) = link.value().attr("href").map(str::trim) else {
                    continue;
                };
                if !href.ends_with(".js") {
                    continue;
                }
                if let Some(url) = resolve_url(href, base.as_ref()) {
                    found.insert(url.into());
                }
            }
        }

        found
    }

    /// Decodes raw page bytes (charset aware, lossy) before extracting.
    pub fn extract_bytes(
        &self,
        bytes: &[u8],
        content_type: Option<&str>,
        base_url: &str,
    ) -> BTreeSet<String> {
        let decoded = decode_document(bytes, content_type);
        self.extract(&decoded.text, base_url)
    }
}

fn is_stylesheet(link: &ElementRef) -> bool {
    link.value()
        .attr("rel")
        .map(|rel| {
            rel.split_ascii_whitespace()
                .any(|token| token.eq_ignore_ascii_case("stylesheet"))
        })
        .unwrap_or(false)
}

fn resolve_url(reference: &str, base: Option<&Url>) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let url = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(_) => base?.join(trimmed).ok()?,
    };
    matches!(url.scheme(), "http" | "https").then_some(url)
}
