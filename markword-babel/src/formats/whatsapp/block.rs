//! Line classification (Markdown source → blocks)
//!
//! Every line of the source is classified exactly once. Fenced code is
//! recognized first and its lines are carried verbatim, so nothing inside a
//! fence ever reaches the inline tokenizer.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,6}[ \t]+(\S.*?)(?:[ \t]+#+)?[ \t]*$").unwrap());

static RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ {0,3}(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$").unwrap()
});

static QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>[ \t]?(.*)$").unwrap());

static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([ \t]*)[-*][ \t]+(.*)$").unwrap());

static ORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,9}\.[ \t]+(.*)$").unwrap());

/// A classified source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "kebab-case")]
pub enum Block<'a> {
    /// Opening or closing fence of a code block (language tag dropped)
    Fence,
    /// A line inside a fenced code block, kept verbatim
    Code(&'a str),
    /// ATX heading body, without hashes or closing sequence
    Heading(&'a str),
    /// Blockquote body, possibly empty
    Quote(&'a str),
    /// Thematic break
    Rule,
    /// Unordered list item, leading indentation preserved
    Bullet { indent: &'a str, body: &'a str },
    /// Ordered list item body; the source numeral is discarded
    Ordered(&'a str),
    /// Empty or whitespace-only line
    Blank,
    /// Anything else
    Text(&'a str),
}

impl Block<'_> {
    /// Short label used by the inspect output.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Fence => "fence",
            Block::Code(_) => "code",
            Block::Heading(_) => "heading",
            Block::Quote(_) => "quote",
            Block::Rule => "rule",
            Block::Bullet { .. } => "bullet",
            Block::Ordered(_) => "ordered",
            Block::Blank => "blank",
            Block::Text(_) => "text",
        }
    }
}

impl<'a> Block<'a> {
    /// Inline Markdown carried by the line, for blocks whose text is formatted.
    pub fn body(&self) -> Option<&'a str> {
        match *self {
            Block::Heading(body)
            | Block::Quote(body)
            | Block::Ordered(body)
            | Block::Text(body)
            | Block::Bullet { body, .. } => Some(body),
            Block::Fence | Block::Code(_) | Block::Rule | Block::Blank => None,
        }
    }
}

/// Classify every line of `source`.
///
/// `source` is expected to use `\n` line endings.
pub fn classify_lines(source: &str) -> Vec<Block<'_>> {
    let lines: Vec<&str> = source.split('\n').collect();
    let mut blocks = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(run) = opening_fence(line) {
            if let Some(close) = find_closing_fence(&lines[i + 1..], run) {
                blocks.push(Block::Fence);
                blocks.extend(lines[i + 1..i + 1 + close].iter().copied().map(Block::Code));
                blocks.push(Block::Fence);
                i += close + 2;
                continue;
            }
            // Unterminated fence: the line is ordinary text
        }

        blocks.push(classify_line(line));
        i += 1;
    }

    blocks
}

fn classify_line(line: &str) -> Block<'_> {
    if line.trim().is_empty() {
        return Block::Blank;
    }
    if let Some(caps) = HEADING.captures(line) {
        return Block::Heading(caps.get(1).map_or("", |m| m.as_str()));
    }
    if RULE.is_match(line) {
        return Block::Rule;
    }
    if let Some(caps) = QUOTE.captures(line) {
        return Block::Quote(caps.get(1).map_or("", |m| m.as_str()));
    }
    if let Some(caps) = BULLET.captures(line) {
        return Block::Bullet {
            indent: caps.get(1).map_or("", |m| m.as_str()),
            body: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    if let Some(caps) = ORDERED.captures(line) {
        return Block::Ordered(caps.get(1).map_or("", |m| m.as_str()));
    }
    Block::Text(line)
}

/// Length of the backtick run opening a fence, if `line` opens one.
///
/// The info string after the run may not contain backticks, otherwise the
/// line is inline code such as `` ```x``` ``.
fn opening_fence(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let run = trimmed.chars().take_while(|&c| c == '`').count();
    if run < 3 || trimmed[run..].contains('`') {
        return None;
    }
    Some(run)
}

/// Index (relative to `rest`) of the line closing a fence of `run` backticks.
fn find_closing_fence(rest: &[&str], run: usize) -> Option<usize> {
    rest.iter().position(|line| {
        let trimmed = line.trim();
        trimmed.len() >= run && trimmed.chars().all(|c| c == '`')
    })
}
