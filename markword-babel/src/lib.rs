//! Markdown export formats for markword
//!
//!     This crate turns a Markdown document into the payloads a writer wants to paste elsewhere:
//!     WhatsApp-formatted text, an HTML preview (Markdown or Word styling), a rich-text HTML
//!     fragment, or an HTML file that Microsoft Word opens as a `.doc`.
//!
//!     This is a pure lib, that is, it powers markword-cli but is shell agnostic: no code here
//!     prints, reads environment variables or touches the clipboard.
//!
//!     The file structure :
//!     .
//!     ├── document.rs             # Document (owned Markdown source)
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── common              # Option parsing shared by formats
//!     │   ├── html                # comrak rendering, themes, fragments
//!     │   ├── markdown            # Source format, CommonMark normalization
//!     │   ├── whatsapp            # The chat transcoder
//!     │   └── word                # Office HTML envelope
//!     └── lib.rs
//!
//! Core Algorithm
//!
//!     The only original algorithm is the WhatsApp transcoder (./formats/whatsapp). Markdown and
//!     WhatsApp share delimiter characters, so the transcoder classifies every line and every
//!     delimiter run exactly once into typed blocks and spans, and emits WhatsApp delimiters only
//!     when rendering. See the module docs for the element mapping.
//!
//!     Everything HTML is delegated to comrak, with raw HTML disabled.
//!
//! Formats
//!
//!     - markdown: parse (source → Document) and normalize
//!     - html:     preview page (`theme=markdown|word`) or fragment (`fragment=true`)
//!     - word:     `.doc`-compatible HTML
//!     - whatsapp: chat formatting (`bullet`, `rule-width`)
pub mod document;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use document::Document;
pub use error::FormatError;
pub use format::{Format, SerializedDocument};
pub use formats::whatsapp::{markdown_to_chat_format, markdown_to_chat_format_with};
pub use registry::FormatRegistry;
