//! Markdown format implementation
//!
//! Markdown is the source format of every conversion. Parsing wraps the text
//! in a [`Document`]; serialization normalizes it through comrak's CommonMark
//! formatter (consistent list markers, emphasis delimiters, spacing).
//!
//! Accepted extensions mirror what the upload box of the preview tool
//! accepts: `.md`, `.markdown` and `.txt`.

use crate::document::Document;
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::html::default_comrak_options;
use comrak::{format_commonmark, parse_document, Arena};

/// Media type of Markdown output.
pub const MEDIA_TYPE: &str = "text/markdown; charset=utf-8";

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown (source format)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown", "txt"]
    }

    fn media_type(&self) -> &'static str {
        MEDIA_TYPE
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(Document::new(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        normalize_markdown(doc.source())
    }
}

/// Round-trip Markdown through comrak's CommonMark formatter.
pub fn normalize_markdown(source: &str) -> Result<String, FormatError> {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    let mut output = Vec::new();
    format_commonmark(root, &options, &mut output)
        .map_err(|e| FormatError::SerializationError(format!("Failed to format markdown: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("Invalid UTF-8 in output: {e}")))
}
