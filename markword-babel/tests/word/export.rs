//! Word (.doc) export

use markword_babel::formats::word::{word_export_css, DEFAULT_TITLE, MEDIA_TYPE};
use markword_babel::{Document, FormatRegistry};
use std::collections::HashMap;

#[test]
fn test_word_document_envelope() {
    let registry = FormatRegistry::default();
    let doc = Document::new("Plain paragraph with **bold**.\n\n1. first\n2. second");

    let output = registry
        .serialize_with_options(&doc, "word", &HashMap::new())
        .unwrap();
    let body = &output.content;

    assert_eq!(output.media_type, MEDIA_TYPE);
    assert!(body.starts_with("<html xmlns:o=\"urn:schemas-microsoft-com:office:office\""));
    assert!(body.contains("xmlns:w=\"urn:schemas-microsoft-com:office:word\""));
    assert!(body.contains("xmlns=\"http://www.w3.org/TR/REC-html40\""));
    assert!(body.contains(&format!("<title>{DEFAULT_TITLE}</title>")));
    assert!(body.contains("<strong>bold</strong>"));
    assert!(body.contains("<ol>"));
    assert!(body.trim_end().ends_with("</html>"));
}

#[test]
fn test_word_styles() {
    let css = word_export_css();
    for rule in [
        "h1 { font-size: 24pt; font-weight: bold; }",
        "h2 { font-size: 18pt; font-weight: bold; }",
        "h3 { font-size: 14pt; font-weight: bold; }",
        "p { font-size: 12pt; }",
        "strong { font-weight: bold; }",
        "em { font-style: italic; }",
    ] {
        assert!(css.contains(rule), "missing style rule: {rule}");
    }

    let output = FormatRegistry::default()
        .serialize(&Document::new("x"), "word")
        .unwrap();
    assert!(output.contains(css));
}

#[test]
fn test_word_title_ignores_headings() {
    let output = FormatRegistry::default()
        .serialize(&Document::new("intro\n\n## Agenda\n\n# Later"), "word")
        .unwrap();
    assert!(output.contains(&format!("<title>{DEFAULT_TITLE}</title>")));
    assert!(!output.contains("<title>Agenda</title>"));
    assert!(output.contains("<h2>Agenda</h2>"));
}

#[test]
fn test_word_detected_from_doc_extension() {
    let registry = FormatRegistry::default();
    assert_eq!(
        registry.detect_format_from_filename("report.doc"),
        Some("word".to_string())
    );
}
