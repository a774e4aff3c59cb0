//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! Markdown is the only source format; every other format is an export target.

use crate::document::Document;
use crate::error::FormatError;
use std::collections::HashMap;

/// Serialized output produced by a [`Format`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedDocument {
    /// UTF-8 payload (plain text, Markdown or HTML)
    pub content: String,
    /// Media type to use when the payload is saved or handed to a clipboard
    pub media_type: &'static str,
}

impl SerializedDocument {
    pub fn new(content: String, media_type: &'static str) -> Self {
        Self {
            content,
            media_type,
        }
    }

    /// Consume the serialized output and return the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.content.into_bytes()
    }
}

/// Trait for document formats
///
/// Implementors convert between a source string and a [`Document`] (parsing) and/or
/// from a [`Document`] to their own representation (serialization).
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Format for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         Ok(doc.source().to_uppercase())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "html", "whatsapp")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Media type of serialized output
    fn media_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → output)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into this format's text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a Document, optionally using extra parameters.
    ///
    /// Formats without parameters can rely on the default implementation, which
    /// delegates to [`Format::serialize`] and rejects any parameter it is given.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        crate::formats::common::reject_unknown_options(self.name(), options, &[])?;
        self.serialize(doc)
            .map(|content| SerializedDocument::new(content, self.media_type()))
    }
}
