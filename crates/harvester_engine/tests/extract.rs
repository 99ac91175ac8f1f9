use std::collections::BTreeSet;

use harvester_engine::{decode_document, ScriptResourceExtractor};
use pretty_assertions::assert_eq;

fn extract(html: &str, base: &str) -> Vec<String> {
    ScriptResourceExtractor
        .extract(html, base)
        .into_iter()
        .collect()
}

#[test]
fn relative_references_resolve_like_a_browser() {
    let cases = [
        ("http://a.test/page", "/x.js", "http://a.test/x.js"),
        ("http://a.test/dir/page", "x.js", "http://a.test/dir/x.js"),
        ("http://a.test/dir/sub/page", "../x.js", "http://a.test/dir/x.js"),
        ("http://a.test/dir/", "./js/app.js?v=2", "http://a.test/dir/js/app.js?v=2"),
        ("https://a.test/page", "//cdn.test/lib.js", "https://cdn.test/lib.js"),
        ("http://a.test/page", "https://b.test/y.js", "https://b.test/y.js"),
        ("http://a.test:8080/a/b", "/c.js", "http://a.test:8080/c.js"),
    ];
    for (base, reference, expected) in cases {
        let html = format!(r#"<html><head><script src="{reference}"></script></head></html>"#);
        assert_eq!(extract(&html, base), vec![expected.to_string()], "{base} + {reference}");
    }
}

#[test]
fn script_sources_are_deduplicated_on_resolved_url() {
    let html = r#"
        <script src="/x.js"></script>
        <script src="http://a.test/x.js"></script>
        <script src="x.js"></script>
        <script>inline()</script>
        <script src=""></script>
    "#;
    let found = ScriptResourceExtractor.extract(html, "http://a.test/page");
    assert_eq!(found, BTreeSet::from(["http://a.test/x.js".to_string()]));
}

#[test]
fn stylesheet_links_count_only_when_they_end_in_js() {
    let html = r#"
        <link rel="stylesheet" href="/site.css">
        <link rel="stylesheet" href="/odd.js">
        <link rel="preload stylesheet" href="/odd2.js">
        <link rel="preload" href="/preloaded.js">
        <link href="/no-rel.js">
    "#;
    assert_eq!(
        extract(html, "http://a.test/"),
        vec!["http://a.test/odd.js", "http://a.test/odd2.js"]
    );
}

#[test]
fn malformed_markup_still_yields_references() {
    let html = r#"<html><head><script src="/a.js"><div><<p><script src='/b.js'"#;
    let found = extract(html, "http://a.test/");
    assert!(found.contains(&"http://a.test/a.js".to_string()), "{found:?}");
}

#[test]
fn document_without_scripts_yields_nothing() {
    assert!(extract("<p>plain</p>", "http://a.test/").is_empty());
    assert!(extract("", "http://a.test/").is_empty());
}

#[test]
fn bytes_are_decoded_before_extraction() {
    let bytes = b"\xEF\xBB\xBF<script src=\"/bom.js\"></script>";
    let found = ScriptResourceExtractor.extract_bytes(bytes, None, "http://a.test/");
    assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["http://a.test/bom.js"]);
}

#[test]
fn decode_respects_charset_header() {
    let decoded = decode_document(b"caf\xe9", Some("text/html; charset=ISO-8859-1"));
    assert_eq!(decoded.text, "caf\u{e9}");
    assert!(!decoded.had_errors);
}

#[test]
fn decode_replaces_invalid_sequences_instead_of_failing() {
    let decoded = decode_document(b"ok \xff\xfe done", Some("text/html; charset=utf-8"));
    assert!(decoded.had_errors);
    assert!(decoded.text.starts_with("ok "));
    assert!(decoded.text.ends_with(" done"));
}
