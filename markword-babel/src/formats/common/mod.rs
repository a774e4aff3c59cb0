//! Option handling shared by format implementations
//!
//! Formats receive extra parameters as a flat string map (the CLI forwards
//! `--extra-<key> <value>` pairs). These helpers keep validation uniform.

use crate::error::FormatError;
use std::collections::HashMap;

/// Fail on the first key not listed in `known`.
pub fn reject_unknown_options(
    format: &str,
    options: &HashMap<String, String>,
    known: &[&str],
) -> Result<(), FormatError> {
    let mut keys: Vec<&String> = options.keys().collect();
    keys.sort();
    match keys.into_iter().find(|key| !known.contains(&key.as_str())) {
        Some(key) => Err(FormatError::InvalidOption {
            key: key.clone(),
            reason: format!("not supported by format '{format}'"),
        }),
        None => Ok(()),
    }
}

/// Parse a boolean option value (`true`/`false`, `yes`/`no`, `1`/`0`).
pub fn parse_bool_option(key: &str, raw: &str) -> Result<bool, FormatError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(FormatError::InvalidOption {
            key: key.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

/// Parse a non-negative integer option value.
pub fn parse_usize_option(key: &str, raw: &str) -> Result<usize, FormatError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|e| FormatError::InvalidOption {
            key: key.to_string(),
            reason: format!("expected a non-negative integer, got '{raw}' ({e})"),
        })
}
