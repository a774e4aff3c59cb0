//! WhatsApp format implementation
//!
//! Converts Markdown into WhatsApp's inline formatting dialect. This is an
//! export-only format: WhatsApp text carries too little structure to be read
//! back as Markdown.
//!
//! # Element Mapping Table
//!
//! | Markdown                 | WhatsApp                 | Notes                                     |
//! |--------------------------|--------------------------|-------------------------------------------|
//! | ```` ```lang ```` fence  | ```` ``` ```` fence      | Language dropped, body verbatim           |
//! | `` `code` ``             | ```` ```code``` ````     | Content literal                           |
//! | `# Heading` (1-6)        | `*_Heading_*`            | Inner emphasis flattened                  |
//! | `**bold**`, `__bold__`   | `*bold*`                 |                                           |
//! | `~~strike~~`             | `~strike~`               |                                           |
//! | `*italic*`, `_italic_`   | `_italic_`               | No intraword `_`                          |
//! | `***both***`             | `*_both_*`               | Bold outside, italic inside               |
//! | `> quote`                | `> _quote_`              |                                           |
//! | `[label](url)`           | `label (url)`            | Images render the same way                |
//! | `---`, `***`, `___`      | `────────────`           | Width configurable                        |
//! | `- item`, `* item`       | `• item`                 | Bullet configurable, indentation kept     |
//! | `7. item`                | `1. item`                | Renumbered per contiguous run             |
//!
//! # Pipeline
//!
//! Source → [`block::classify_lines`] (each line classified once, fenced code
//! carried verbatim) → [`inline::parse_inline`] per line body (each delimiter
//! run classified once) → [`render::render_blocks`] (delimiters emitted,
//! ordered runs renumbered, blank lines collapsed, result trimmed).
//!
//! Markdown and WhatsApp share the `*` and `_` alphabet, so substituting
//! delimiters in place would let one rewrite re-match the output of another
//! (`**x**` → `*x*` → `_*x*_`). Classifying into typed spans first and
//! emitting delimiters only at the end rules that out, and leaves no marker
//! text in the working string that could leak into the output.
//!
//! Fenced code and inline code are never rewritten, including emphasis or
//! heading syntax inside them.

pub mod block;
pub mod inline;
pub mod render;

use crate::document::Document;
use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::common::{parse_usize_option, reject_unknown_options};
use std::collections::HashMap;

/// Media type of WhatsApp output.
pub const MEDIA_TYPE: &str = "text/plain; charset=utf-8";

/// Knobs for the WhatsApp transcoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsappOptions {
    /// Marker that replaces `-` and `*` list bullets
    pub bullet: String,
    /// Number of `─` characters in a horizontal rule
    pub rule_width: usize,
}

impl Default for WhatsappOptions {
    fn default() -> Self {
        Self {
            bullet: "•".to_string(),
            rule_width: 12,
        }
    }
}

/// Convert Markdown to WhatsApp-formatted plain text with default options.
///
/// Total: every input, including the empty string and malformed Markdown,
/// produces an output string.
///
/// ```
/// use markword_babel::markdown_to_chat_format;
///
/// assert_eq!(markdown_to_chat_format("# Title\n"), "*_Title_*");
/// assert_eq!(
///     markdown_to_chat_format("**bold** and *italic*"),
///     "*bold* and _italic_"
/// );
/// ```
pub fn markdown_to_chat_format(markdown: &str) -> String {
    markdown_to_chat_format_with(markdown, &WhatsappOptions::default())
}

/// Convert Markdown to WhatsApp-formatted plain text.
pub fn markdown_to_chat_format_with(markdown: &str, options: &WhatsappOptions) -> String {
    let normalized = markdown.replace("\r\n", "\n");
    let blocks = block::classify_lines(&normalized);
    render::render_blocks(&blocks, options)
}

/// Format implementation for WhatsApp text
#[derive(Default)]
pub struct WhatsappFormat {
    options: WhatsappOptions,
}

impl WhatsappFormat {
    pub fn new(options: WhatsappOptions) -> Self {
        Self { options }
    }
}

impl Format for WhatsappFormat {
    fn name(&self) -> &str {
        "whatsapp"
    }

    fn description(&self) -> &str {
        "WhatsApp chat formatting (*bold*, _italic_, ~strike~)"
    }

    fn media_type(&self) -> &'static str {
        MEDIA_TYPE
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(markdown_to_chat_format_with(doc.source(), &self.options))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        reject_unknown_options(self.name(), options, &["bullet", "rule-width"])?;

        let mut effective = self.options.clone();
        if let Some(bullet) = options.get("bullet") {
            effective.bullet = bullet.clone();
        }
        if let Some(width) = options.get("rule-width") {
            effective.rule_width = parse_usize_option("rule-width", width)?;
        }

        tracing::debug!(
            bullet = %effective.bullet,
            rule_width = effective.rule_width,
            "rendering whatsapp text"
        );
        Ok(SerializedDocument::new(
            markdown_to_chat_format_with(doc.source(), &effective),
            MEDIA_TYPE,
        ))
    }
}
