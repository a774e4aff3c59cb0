//! HTML format implementation
//!
//! Renders Markdown to HTML for the two on-screen previews and for the
//! rich-text clipboard payload.
//!
//! # Library Choice
//!
//! Rendering is delegated to `comrak`:
//! - CommonMark compliant, with the GFM extensions we care about (tables,
//!   strikethrough, autolinks, task lists)
//! - Raw HTML in the source is omitted and unsafe link schemes are dropped
//!   unless `render.unsafe_` is set, which we never do
//!
//! # Themes
//!
//! | Theme      | Purpose                              | CSS                         |
//! |------------|--------------------------------------|-----------------------------|
//! | `markdown` | Markdown-style preview (default)     | `css/themes/theme-markdown.css` |
//! | `word`     | Word-document-style preview          | `css/themes/theme-word.css` |
//!
//! Both themes are layered on top of `css/baseline.css`.
//!
//! # Output Format
//!
//! - Full page (default): self-contained HTML5 document with embedded CSS
//! - Fragment (`fragment=true`): the rendered body only, which is what a
//!   rich-text clipboard copy carries
//!
//! HTML import is not supported.

mod serializer;

pub use serializer::{
    default_comrak_options, get_css, render_fragment, serialize_to_html,
    serialize_to_html_with_options, HtmlOptions,
};
pub(crate) use serializer::html_escape;

use crate::document::Document;
use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::common::{parse_bool_option, reject_unknown_options};
use std::collections::HashMap;

/// Media type of HTML output.
pub const MEDIA_TYPE: &str = "text/html; charset=utf-8";

/// Available CSS themes for HTML export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlTheme {
    /// Prose styling of a rendered Markdown file
    #[default]
    Markdown,
    /// Page layout and typography of a Word document
    Word,
}

impl HtmlTheme {
    /// Resolve a theme from its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "markdown" | "default" => Some(HtmlTheme::Markdown),
            "word" => Some(HtmlTheme::Word),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HtmlTheme::Markdown => "markdown",
            HtmlTheme::Word => "word",
        }
    }
}

/// Format implementation for HTML
#[derive(Default)]
pub struct HtmlFormat {
    /// CSS theme to use for export
    theme: HtmlTheme,
}

impl HtmlFormat {
    /// Create a new HTML format with the specified theme
    pub fn new(theme: HtmlTheme) -> Self {
        Self { theme }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML preview (markdown or word theme) or rich-text fragment"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn media_type(&self) -> &'static str {
        MEDIA_TYPE
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serializer::serialize_to_html(doc, self.theme)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        reject_unknown_options(self.name(), options, &["theme", "fragment", "title"])?;

        let mut html_options = HtmlOptions::new(self.theme);
        if let Some(theme_str) = options.get("theme") {
            html_options.theme =
                HtmlTheme::from_name(theme_str).ok_or_else(|| FormatError::InvalidOption {
                    key: "theme".to_string(),
                    reason: format!("unknown theme '{theme_str}' (expected markdown or word)"),
                })?;
        }
        if let Some(raw) = options.get("fragment") {
            html_options.fragment = parse_bool_option("fragment", raw)?;
        }
        if let Some(title) = options.get("title") {
            html_options.title = Some(title.clone());
        }

        serializer::serialize_to_html_with_options(doc, &html_options)
            .map(|html| SerializedDocument::new(html, MEDIA_TYPE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_names_round_trip() {
        for theme in [HtmlTheme::Markdown, HtmlTheme::Word] {
            assert_eq!(HtmlTheme::from_name(theme.name()), Some(theme));
        }
        assert_eq!(HtmlTheme::from_name("default"), Some(HtmlTheme::Markdown));
        assert_eq!(HtmlTheme::from_name("fancy"), None);
    }

    #[test]
    fn test_unknown_theme_is_an_error() {
        let mut options = HashMap::new();
        options.insert("theme".to_string(), "fancy".to_string());

        let result = HtmlFormat::default().serialize_with_options(&Document::new("x"), &options);
        assert!(matches!(result, Err(FormatError::InvalidOption { key, .. }) if key == "theme"));
    }

    #[test]
    fn test_fragment_option() {
        let mut options = HashMap::new();
        options.insert("fragment".to_string(), "true".to_string());

        let output = HtmlFormat::default()
            .serialize_with_options(&Document::new("**hi**"), &options)
            .unwrap();
        assert_eq!(output.content, "<p><strong>hi</strong></p>\n");
        assert_eq!(output.media_type, MEDIA_TYPE);
    }
}
