//! CLI-specific transforms
//!
//! This module defines the transforms available to `markword inspect`. Each
//! one exposes an intermediate stage of the WhatsApp transcoder.
//!
//! ## Transform Pipeline
//!
//! 1. **Line classification** - Markdown source → blocks
//!    - `blocks-simple`: one `kind: text` line per source line
//!    - `blocks-json`: the block list as JSON
//!
//! 2. **Inline tokenization** - block body → typed spans
//!    - `spans-json`: spans of every formatted line as JSON
//!
//! ## Extra Parameters
//!
//! - `show-linum`: When set to "true", `blocks-simple` prefixes each line
//!   with its 1-based source line number.
//!
//! Example: `markword inspect notes.md blocks-simple --extra-show-linum`

use markword_babel::formats::whatsapp::block::{classify_lines, Block};
use markword_babel::formats::whatsapp::inline::parse_inline;
use serde_json::json;
use std::collections::HashMap;

/// All available inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["blocks-simple", "blocks-json", "spans-json"];

/// Transform used when none is named
pub const DEFAULT_TRANSFORM: &str = "blocks-simple";

/// Execute a named transform on Markdown source with optional extra parameters
///
/// # Arguments
///
/// * `source` - The Markdown text to transform
/// * `transform_name` - The transform to apply (e.g., "blocks-json")
/// * `extra_params` - Optional parameters for the transform
///
/// # Returns
///
/// The transformed output as a string, or an error message
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let normalized = source.replace("\r\n", "\n");
    let blocks = classify_lines(&normalized);

    match transform_name {
        "blocks-simple" => {
            let show_linum = match extra_params.get("show-linum") {
                Some(raw) => parse_flag("show-linum", raw)?,
                None => false,
            };
            Ok(blocks_to_simple(&blocks, show_linum))
        }
        "blocks-json" => serde_json::to_string_pretty(&blocks)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "spans-json" => serde_json::to_string_pretty(&spans_to_json(&blocks))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        other => Err(format!(
            "Unknown transform '{other}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

fn blocks_to_simple(blocks: &[Block<'_>], show_linum: bool) -> String {
    let mut output = String::new();
    for (index, block) in blocks.iter().enumerate() {
        if show_linum {
            output.push_str(&format!("{:>4} | ", index + 1));
        }
        output.push_str(block.kind());
        match block {
            Block::Code(text) => output.push_str(&format!(": {text}")),
            Block::Bullet { indent, body } if !indent.is_empty() => {
                output.push_str(&format!("({}): {body}", indent.len()))
            }
            _ => {
                if let Some(body) = block.body() {
                    output.push_str(&format!(": {body}"));
                }
            }
        }
        output.push('\n');
    }
    output
}

fn spans_to_json(blocks: &[Block<'_>]) -> serde_json::Value {
    let lines: Vec<serde_json::Value> = blocks
        .iter()
        .enumerate()
        .filter_map(|(index, block)| {
            let body = block.body()?;
            Some(json!({
                "line": index + 1,
                "kind": block.kind(),
                "spans": parse_inline(body),
            }))
        })
        .collect();
    serde_json::Value::Array(lines)
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(format!("Invalid boolean value '{other}' for --extra-{key}")),
    }
}
