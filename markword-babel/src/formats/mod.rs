//! Format implementations
//!
//! Markdown is parsed into a [`Document`](crate::Document); every other
//! format serializes a document into its own representation.

pub mod common;
pub mod html;
pub mod markdown;
pub mod whatsapp;
pub mod word;

pub use html::{get_css, HtmlFormat, HtmlOptions, HtmlTheme};
pub use markdown::MarkdownFormat;
pub use whatsapp::{WhatsappFormat, WhatsappOptions};
pub use word::WordFormat;
