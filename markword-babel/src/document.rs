//! The Markdown document handed to every format
//!
//! A [`Document`] owns the Markdown source text. Serializers receive it
//! explicitly; there is no shared "current document" anywhere in the crate.

use crate::error::FormatError;
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    source: String,
}

impl Document {
    /// Wrap Markdown source, normalizing `\r\n` line endings.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let source = if source.contains("\r\n") {
            source.replace("\r\n", "\n")
        } else {
            source
        };
        Self { source }
    }

    /// Decode raw bytes (a file or stdin) as UTF-8, dropping a leading BOM.
    pub fn from_utf8(bytes: Vec<u8>) -> Result<Self, FormatError> {
        let text = String::from_utf8(bytes)
            .map_err(|e| FormatError::ParseError(format!("input is not valid UTF-8: {e}")))?;
        let text = match text.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => text,
        };
        Ok(Self::new(text))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Plain text of the first heading, if the document has one.
    pub fn title(&self) -> Option<String> {
        let arena = Arena::new();
        let root = parse_document(&arena, &self.source, &ComrakOptions::default());

        let heading = root
            .children()
            .find(|node| matches!(node.data.borrow().value, NodeValue::Heading(_)))?;

        let mut title = String::new();
        for child in heading.children() {
            collect_text_content(child, &mut title);
        }
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    }
}

/// Collect text content from a node, joining line breaks with spaces
fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}

impl From<&str> for Document {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Document {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}
