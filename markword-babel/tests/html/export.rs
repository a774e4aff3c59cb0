//! HTML previews and the rich-text fragment, driven through the registry

use markword_babel::formats::{get_css, HtmlTheme};
use markword_babel::{Document, FormatError, FormatRegistry};
use std::collections::HashMap;

fn options(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_full_page_with_markdown_theme() {
    let registry = FormatRegistry::default();
    let doc = registry
        .parse("# Notes\n\nSome *text*.", "markdown")
        .unwrap();

    let html = registry.serialize(&doc, "html").unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Notes</title>"));
    assert!(html.contains("<h1>Notes</h1>"));
    assert!(html.contains("<em>text</em>"));
    assert!(html.contains("markword-theme-markdown"));
    assert!(html.contains(&get_css(HtmlTheme::Markdown)));
}

#[test]
fn test_word_theme_preview() {
    let registry = FormatRegistry::default();
    let doc = Document::new("Body");

    let output = registry
        .serialize_with_options(&doc, "html", &options(&[("theme", "word")]))
        .unwrap();
    assert!(output.content.contains("markword-theme-word"));
    assert!(output.content.contains(&get_css(HtmlTheme::Word)));
    assert!(output.media_type.starts_with("text/html"));
}

#[test]
fn test_fragment_is_the_clipboard_payload() {
    let registry = FormatRegistry::default();
    let doc = Document::new("- one\n- two");

    let output = registry
        .serialize_with_options(&doc, "html", &options(&[("fragment", "true")]))
        .unwrap();
    assert!(!output.content.contains("<html"));
    assert!(!output.content.contains("<style>"));
    assert!(output.content.contains("<ul>"));
    assert!(output.content.contains("<li>one</li>"));
}

#[test]
fn test_explicit_title() {
    let registry = FormatRegistry::default();
    let doc = Document::new("# Heading");

    let output = registry
        .serialize_with_options(&doc, "html", &options(&[("title", "<Custom>")]))
        .unwrap();
    assert!(output.content.contains("<title>&lt;Custom&gt;</title>"));
}

#[test]
fn test_script_tags_are_not_rendered() {
    let registry = FormatRegistry::default();
    let doc = Document::new("<script>alert(1)</script>\n\n[x](javascript:alert(1))");

    let html = registry.serialize(&doc, "html").unwrap();
    assert!(!html.contains("<script>"));
    assert!(!html.contains("javascript:"));
}

#[test]
fn test_bad_fragment_value() {
    let registry = FormatRegistry::default();
    let err = registry
        .serialize_with_options(
            &Document::new("x"),
            "html",
            &options(&[("fragment", "maybe")]),
        )
        .unwrap_err();
    assert!(matches!(err, FormatError::InvalidOption { key, .. } if key == "fragment"));
}

#[test]
fn test_html_input_not_supported() {
    let registry = FormatRegistry::default();
    let err = registry.parse("<p>x</p>", "html").unwrap_err();
    assert!(matches!(err, FormatError::NotSupported(_)));
}
