//! HTML serialization (Markdown → HTML export)
//!
//! Pipeline: Markdown string → comrak → HTML body → optional page envelope with CSS

use crate::document::Document;
use crate::error::FormatError;
use crate::formats::html::HtmlTheme;
use comrak::{markdown_to_html, ComrakOptions};

const FALLBACK_TITLE: &str = "Markdown Preview";

/// Options for HTML serialization
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// CSS theme to use
    pub theme: HtmlTheme,
    /// Emit the rendered body only, without `<html>` envelope or CSS
    pub fragment: bool,
    /// Page title; defaults to the first heading of the document
    pub title: Option<String>,
}

impl HtmlOptions {
    pub fn new(theme: HtmlTheme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }
}

/// Comrak settings shared by every HTML-producing format.
///
/// Raw HTML stays disabled: untrusted input is rendered as an omission
/// comment, and `javascript:`-style link targets are dropped.
pub fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.tagfilter = true;
    options.render.unsafe_ = false;
    options
}

/// Render Markdown to a sanitized HTML fragment.
pub fn render_fragment(markdown: &str) -> String {
    markdown_to_html(markdown, &default_comrak_options())
}

/// Serialize a document to a full HTML page with the given theme
pub fn serialize_to_html(doc: &Document, theme: HtmlTheme) -> Result<String, FormatError> {
    serialize_to_html_with_options(doc, &HtmlOptions::new(theme))
}

/// Serialize a document to HTML with full options
pub fn serialize_to_html_with_options(
    doc: &Document,
    options: &HtmlOptions,
) -> Result<String, FormatError> {
    let body = render_fragment(doc.source());
    tracing::debug!(
        theme = options.theme.name(),
        fragment = options.fragment,
        bytes = body.len(),
        "rendered html body"
    );

    if options.fragment {
        return Ok(body);
    }

    let title = options
        .title
        .clone()
        .or_else(|| doc.title())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    Ok(wrap_in_document(&body, &title, options.theme))
}

/// Baseline CSS followed by the theme overrides.
pub fn get_css(theme: HtmlTheme) -> String {
    let baseline_css = include_str!("../../../css/baseline.css");
    let theme_css = match theme {
        HtmlTheme::Markdown => include_str!("../../../css/themes/theme-markdown.css"),
        HtmlTheme::Word => include_str!("../../../css/themes/theme-word.css"),
    };
    format!("{baseline_css}\n{theme_css}")
}

fn wrap_in_document(body_html: &str, title: &str, theme: HtmlTheme) -> String {
    let css = get_css(theme);
    let escaped_title = html_escape(title);
    let theme_name = theme.name();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="markword">
  <title>{escaped_title}</title>
  <style>
{css}
  </style>
</head>
<body>
<div class="markword-document markword-theme-{theme_name}">
{body_html}</div>
</body>
</html>
"#
    )
}

/// Escape HTML special characters in text
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
