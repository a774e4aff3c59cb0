//! Inline tokenizer (one line of Markdown → spans)
//!
//! Tokenizing runs in two passes over the line, neither of which recurses:
//!
//! 1. A left-to-right scan turns escapes, code spans and links into finished
//!    nodes and records every `*`, `_` and `~` run as a pending delimiter.
//!    Brackets are matched against a stack as in CommonMark, so a link is
//!    complete before any emphasis around or inside it is considered.
//! 2. Pending delimiters are resolved against one opener stack per kind
//!    (character and run length). A run of `*` or `_` of length 1, 2 or 3
//!    becomes emphasis, strong or strong emphasis when it closes an opener of
//!    the same character and length; `~~` becomes strikethrough. Openers
//!    between a matched pair stay literal, as do runs that find no partner.
//!
//! Code spans bind tighter than everything else. Both passes are linear in
//! the length of the line, and span nesting is capped at [`MAX_DEPTH`]:
//! constructs that would nest deeper are left as literal text.

use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Deepest span nesting the tokenizer produces.
pub const MAX_DEPTH: usize = 32;

/// A typed inline fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Span {
    Text { text: String },
    Code { code: String },
    Strong { children: Vec<Span> },
    Emphasis { children: Vec<Span> },
    StrongEmphasis { children: Vec<Span> },
    Strike { children: Vec<Span> },
    Link { label: Vec<Span>, url: String },
}

impl Span {
    pub fn text(text: impl Into<String>) -> Self {
        Span::Text { text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Emphasis,
    Strong,
    StrongEmphasis,
    Strike,
}

impl Delimiter {
    fn for_run(c: char, run: usize) -> Option<Self> {
        match (c, run) {
            ('*' | '_', 1) => Some(Delimiter::Emphasis),
            ('*' | '_', 2) => Some(Delimiter::Strong),
            ('*' | '_', 3) => Some(Delimiter::StrongEmphasis),
            ('~', 2) => Some(Delimiter::Strike),
            _ => None,
        }
    }

    fn wrap(self, children: Vec<Span>) -> Span {
        match self {
            Delimiter::Emphasis => Span::Emphasis { children },
            Delimiter::Strong => Span::Strong { children },
            Delimiter::StrongEmphasis => Span::StrongEmphasis { children },
            Delimiter::Strike => Span::Strike { children },
        }
    }
}

/// Number of opener stacks: `*` and `_` at three lengths each, plus `~~`.
const DELIMITER_KINDS: usize = 7;

/// A pending delimiter run.
#[derive(Debug, Clone, Copy)]
struct Run {
    ch: char,
    len: usize,
    delimiter: Delimiter,
    can_open: bool,
    can_close: bool,
}

impl Run {
    fn kind(&self) -> usize {
        let base = match self.ch {
            '*' => 0,
            '_' => 3,
            _ => return 6,
        };
        base + self.len - 1
    }
}

#[derive(Debug)]
enum Node {
    Text(String),
    Span { span: Span, depth: usize },
    Delim(Run),
    Bracket { image: bool },
}

impl Node {
    fn depth(&self) -> usize {
        match self {
            Node::Span { depth, .. } => *depth,
            _ => 0,
        }
    }
}

/// Tokenize a single line of inline Markdown.
pub fn parse_inline(line: &str) -> Vec<Span> {
    let chars: Vec<char> = line.chars().collect();
    Scanner::new(&chars).run()
}

struct Scanner<'a> {
    chars: &'a [char],
    nodes: Vec<Node>,
    text: String,
    /// Unmatched `[` and `![`, innermost last
    brackets: Vec<OpenBracket>,
    /// Start of every backtick run, keyed by run length
    backtick_runs: HashMap<usize, VecDeque<usize>>,
    /// Index of the `)` balancing each `(`
    paren_match: Vec<Option<usize>>,
}

impl<'a> Scanner<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self {
            chars,
            nodes: Vec::new(),
            text: String::new(),
            brackets: Vec::new(),
            backtick_runs: backtick_runs(chars),
            paren_match: paren_match(chars),
        }
    }

    fn run(mut self) -> Vec<Span> {
        let chars = self.chars;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            match c {
                '\\' if chars.get(i + 1).is_some_and(|n| n.is_ascii_punctuation()) => {
                    let escaped = chars[i + 1];
                    // WhatsApp would read a bare delimiter as formatting
                    if matches!(escaped, '*' | '_' | '~' | '`') {
                        self.text.push('\\');
                    }
                    self.text.push(escaped);
                    i += 2;
                }
                '`' => {
                    let run = run_length(chars, i, '`');
                    match self.code_close(i, run) {
                        Some(close) => {
                            let code = chars[i + run..close].iter().collect();
                            self.push(Node::Span {
                                span: Span::Code { code },
                                depth: 1,
                            });
                            i = close + run;
                        }
                        None => {
                            self.text.extend(&chars[i..i + run]);
                            i += run;
                        }
                    }
                }
                '!' if chars.get(i + 1) == Some(&'[') => {
                    self.open_bracket(true);
                    i += 2;
                }
                '[' => {
                    self.open_bracket(false);
                    i += 1;
                }
                ']' => i = self.close_bracket(i),
                '*' | '_' | '~' => {
                    let run = run_length(chars, i, c);
                    match Delimiter::for_run(c, run) {
                        Some(delimiter) => {
                            let run = Run {
                                ch: c,
                                len: run,
                                delimiter,
                                can_open: can_open(chars, i, run, c),
                                can_close: can_close(chars, i, run, c),
                            };
                            if run.can_open || run.can_close {
                                self.push(Node::Delim(run));
                            } else {
                                self.text.extend(&chars[i..i + run.len]);
                            }
                            i += run.len;
                        }
                        None => {
                            self.text.extend(&chars[i..i + run]);
                            i += run;
                        }
                    }
                }
                _ => {
                    self.text.push(c);
                    i += 1;
                }
            }
        }

        self.flush_text();
        resolve_emphasis(self.nodes).0
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.nodes.push(Node::Text(std::mem::take(&mut self.text)));
        }
    }

    fn push(&mut self, node: Node) {
        self.flush_text();
        let depth = node.depth();
        for bracket in self.brackets.iter_mut().rev() {
            if bracket.deepest >= depth {
                break;
            }
            bracket.deepest = depth;
        }
        self.nodes.push(node);
    }

    fn open_bracket(&mut self, image: bool) {
        self.flush_text();
        self.brackets.push(OpenBracket {
            index: self.nodes.len(),
            deepest: 0,
        });
        self.nodes.push(Node::Bracket { image });
    }

    /// Start of the backtick run of exactly `run` characters closing the
    /// code span opened at `at`.
    fn code_close(&mut self, at: usize, run: usize) -> Option<usize> {
        let starts = self.backtick_runs.get_mut(&run)?;
        while starts.front().is_some_and(|&start| start <= at) {
            starts.pop_front();
        }
        starts.pop_front()
    }

    /// Handle the `]` at `at`, returning the index to resume scanning from.
    fn close_bracket(&mut self, at: usize) -> usize {
        let destination = match self.chars.get(at + 1) {
            Some('(') => self.paren_match[at + 1],
            _ => None,
        };
        // An opener that does not become a link stays in the tree as literal
        // text, and so does everything up to its destination.
        let Some(open) = self.brackets.pop() else {
            self.text.push(']');
            return at + 1;
        };
        let Some(close) = destination.filter(|_| open.deepest < MAX_DEPTH) else {
            self.text.push(']');
            return at + 1;
        };

        self.flush_text();
        let label_nodes = self.nodes.split_off(open.index + 1);
        let image = matches!(self.nodes.pop(), Some(Node::Bracket { image: true }));
        let raw: String = self.chars[at + 2..close].iter().collect();
        let (label, depth) = resolve_emphasis(label_nodes);

        if depth >= MAX_DEPTH {
            self.push(Node::Text(if image { "![" } else { "[" }.to_string()));
            for span in label {
                match span {
                    Span::Text { text } => self.text.push_str(&text),
                    span => self.push(Node::Span { span, depth }),
                }
            }
            self.text.push(']');
            self.text.push('(');
            self.text.push_str(&raw);
            self.text.push(')');
        } else {
            self.push(Node::Span {
                span: Span::Link {
                    label,
                    url: clean_destination(&raw),
                },
                depth: depth + 1,
            });
        }
        close + 1
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenBracket {
    /// Position of the bracket node
    index: usize,
    /// Deepest finished span inside the bracket so far
    deepest: usize,
}

fn run_length(chars: &[char], start: usize, c: char) -> usize {
    chars[start..].iter().take_while(|&&x| x == c).count()
}

fn backtick_runs(chars: &[char]) -> HashMap<usize, VecDeque<usize>> {
    let mut runs: HashMap<usize, VecDeque<usize>> = HashMap::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '`' {
            let len = run_length(chars, i, '`');
            runs.entry(len).or_default().push_back(i);
            i += len;
        } else {
            i += 1;
        }
    }
    runs
}

fn paren_match(chars: &[char]) -> Vec<Option<usize>> {
    let mut matches = vec![None; chars.len()];
    let mut open = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '(' => open.push(i),
            ')' => {
                if let Some(start) = open.pop() {
                    matches[start] = Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    matches
}

fn can_open(chars: &[char], at: usize, run: usize, c: char) -> bool {
    let next_is_solid = chars.get(at + run).is_some_and(|n| !n.is_whitespace());
    if c == '_' {
        let intraword = at > 0 && chars[at - 1].is_alphanumeric();
        return next_is_solid && !intraword;
    }
    next_is_solid
}

fn can_close(chars: &[char], at: usize, run: usize, c: char) -> bool {
    let prev_is_solid = at > 0 && !chars[at - 1].is_whitespace();
    if c == '_' {
        let intraword = chars.get(at + run).is_some_and(|n| n.is_alphanumeric());
        return prev_is_solid && !intraword;
    }
    prev_is_solid
}

/// An opener waiting on its kind's stack.
#[derive(Debug, Clone, Copy)]
struct Opener {
    /// Position of the opener in the output
    index: usize,
    /// Position of the opener's entry in `deepest`
    frame: usize,
}

/// Match delimiter runs and build the span tree.
///
/// Returns the spans and their deepest nesting.
fn resolve_emphasis(nodes: Vec<Node>) -> (Vec<Span>, usize) {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    let mut openers: [Vec<Opener>; DELIMITER_KINDS] = Default::default();
    // Per open opener, oldest first: deepest node pushed after it
    let mut deepest: Vec<usize> = Vec::new();
    let mut max_depth = 0;

    for node in nodes {
        let Node::Delim(run) = node else {
            push_node(&mut out, &mut deepest, &mut max_depth, node);
            continue;
        };

        let kind = run.kind();
        let candidate = openers[kind]
            .last()
            .copied()
            .filter(|opener| run.can_close && deepest[opener.frame] < MAX_DEPTH);

        match candidate {
            Some(opener) => {
                let inner = deepest[opener.frame];
                let children = out.split_off(opener.index + 1);
                out.pop();
                deepest.truncate(opener.frame);
                for stack in openers.iter_mut() {
                    while stack.last().is_some_and(|o| o.index >= opener.index) {
                        stack.pop();
                    }
                }
                let span = run.delimiter.wrap(finish(children));
                push_node(
                    &mut out,
                    &mut deepest,
                    &mut max_depth,
                    Node::Span {
                        span,
                        depth: inner + 1,
                    },
                );
            }
            None if run.can_open => {
                openers[kind].push(Opener {
                    index: out.len(),
                    frame: deepest.len(),
                });
                deepest.push(0);
                out.push(node);
            }
            None => out.push(node),
        }
    }

    (finish(out), max_depth)
}

fn push_node(out: &mut Vec<Node>, deepest: &mut [usize], max_depth: &mut usize, node: Node) {
    let depth = node.depth();
    *max_depth = (*max_depth).max(depth);
    // Older openers enclose newer ones, so the walk stops at the first
    // opener already at least this deep.
    for entry in deepest.iter_mut().rev() {
        if *entry >= depth {
            break;
        }
        *entry = depth;
    }
    out.push(node);
}

/// Turn resolved nodes into spans, with leftover delimiters and brackets as
/// text and adjacent text merged.
fn finish(nodes: Vec<Node>) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let literal = match node {
            Node::Span { span, .. } => {
                spans.push(span);
                continue;
            }
            Node::Text(text) => text,
            Node::Delim(run) => run.ch.to_string().repeat(run.len),
            Node::Bracket { image: true } => "![".to_string(),
            Node::Bracket { image: false } => "[".to_string(),
        };
        match spans.last_mut() {
            Some(Span::Text { text }) => text.push_str(&literal),
            _ => spans.push(Span::text(literal)),
        }
    }
    spans
}

/// Drop angle brackets and an optional quoted title from a link destination.
fn clean_destination(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(inner) = trimmed
        .strip_prefix('<')
        .and_then(|rest| rest.split_once('>'))
        .map(|(inner, _)| inner)
    {
        return inner.to_string();
    }
    trimmed
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}
