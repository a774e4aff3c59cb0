//! WhatsApp format tests
//!
//! Tests for the Markdown → WhatsApp transcoder.

mod blocks;
mod code;
mod emphasis;
mod properties;
