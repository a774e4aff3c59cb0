//! Word format implementation
//!
//! Produces HTML that Microsoft Word opens as a document: the rendered
//! Markdown body inside an Office-namespaced `<html>` envelope with a small
//! print stylesheet. Saved with a `.doc` extension and the
//! `application/msword` media type, Word imports it with approximate
//! styling. This is not OpenXML and makes no `.docx` validity claims.

use crate::document::Document;
use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::common::reject_unknown_options;
use crate::formats::html::{html_escape, render_fragment};
use std::collections::HashMap;

/// Media type Word associates with `.doc` files.
pub const MEDIA_TYPE: &str = "application/msword";

/// Title used when none is configured.
pub const DEFAULT_TITLE: &str = "Exported Document";

/// Stylesheet embedded in every Word export.
pub fn word_export_css() -> &'static str {
    include_str!("../../../css/word-export.css")
}

/// Format implementation for Word-compatible HTML
#[derive(Debug, Clone, Default)]
pub struct WordFormat {
    /// Fixed document title; `None` uses [`DEFAULT_TITLE`]
    title: Option<String>,
}

impl WordFormat {
    pub fn new(title: Option<String>) -> Self {
        Self { title }
    }
}

impl Format for WordFormat {
    fn name(&self) -> &str {
        "word"
    }

    fn description(&self) -> &str {
        "Word-openable HTML document (.doc)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["doc"]
    }

    fn media_type(&self) -> &'static str {
        MEDIA_TYPE
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_to_word(doc, self.title.as_deref()))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        reject_unknown_options(self.name(), options, &["title"])?;

        let title = options
            .get("title")
            .map(String::as_str)
            .or(self.title.as_deref());
        Ok(SerializedDocument::new(
            serialize_to_word(doc, title),
            MEDIA_TYPE,
        ))
    }
}

/// Wrap the rendered document in the Office HTML envelope.
pub fn serialize_to_word(doc: &Document, title: Option<&str>) -> String {
    let title = title.unwrap_or(DEFAULT_TITLE);
    let escaped_title = html_escape(title);
    let body = render_fragment(doc.source());
    let css = word_export_css();

    tracing::debug!(title = %title, bytes = body.len(), "building word document");

    format!(
        r#"<html xmlns:o="urn:schemas-microsoft-com:office:office"
      xmlns:w="urn:schemas-microsoft-com:office:word"
      xmlns="http://www.w3.org/TR/REC-html40">
<head>
<meta charset="utf-8">
<title>{escaped_title}</title>
<style>
{css}</style>
</head>
<body>
{body}</body>
</html>
"#
    )
}
