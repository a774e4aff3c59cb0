//! Block and span rendering into WhatsApp's formatting dialect

use super::block::Block;
use super::inline::{parse_inline, Span};
use super::WhatsappOptions;

/// A rendered output line. Verbatim lines come from code fences and are
/// exempt from blank-line collapsing.
struct Line {
    text: String,
    verbatim: bool,
}

impl Line {
    fn formatted(text: String) -> Self {
        Self {
            text,
            verbatim: false,
        }
    }

    fn verbatim(text: &str) -> Self {
        Self {
            text: text.to_string(),
            verbatim: true,
        }
    }

    fn is_blank(&self) -> bool {
        !self.verbatim && self.text.trim().is_empty()
    }
}

/// Render classified blocks, renumber ordered runs, collapse blank lines and
/// trim the result.
pub fn render_blocks(blocks: &[Block<'_>], options: &WhatsappOptions) -> String {
    let mut lines = Vec::with_capacity(blocks.len());
    let mut ordinal = 0usize;

    for block in blocks {
        if !matches!(block, Block::Ordered(_)) {
            ordinal = 0;
        }

        let line = match block {
            Block::Fence => Line::verbatim("```"),
            Block::Code(code) => Line::verbatim(code),
            Block::Heading(body) => Line::formatted(format!("*_{}_*", render_flat(body))),
            Block::Quote(body) => {
                let body = render_line(body);
                if body.trim().is_empty() {
                    Line::formatted(">".to_string())
                } else {
                    Line::formatted(format!("> _{body}_"))
                }
            }
            Block::Rule => Line::formatted("─".repeat(options.rule_width)),
            Block::Bullet { indent, body } => Line::formatted(
                format!("{indent}{} {}", options.bullet, render_line(body))
                    .trim_end()
                    .to_string(),
            ),
            Block::Ordered(body) => {
                ordinal += 1;
                Line::formatted(
                    format!("{ordinal}. {}", render_line(body))
                        .trim_end()
                        .to_string(),
                )
            }
            Block::Blank => Line::formatted(String::new()),
            Block::Text(text) => Line::formatted(render_line(text)),
        };
        lines.push(line);
    }

    collapse_blank_lines(lines).trim().to_string()
}

fn collapse_blank_lines(lines: Vec<Line>) -> String {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut previous_blank = false;

    for line in lines {
        let blank = line.is_blank();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        out.push(if blank { String::new() } else { line.text });
    }

    out.join("\n")
}

/// Render one line of inline Markdown.
pub fn render_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    render_spans(&parse_inline(text), false, &mut out);
    out
}

/// Render inline Markdown with emphasis markers dropped. Headings are
/// already bold and italic as a whole.
fn render_flat(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    render_spans(&parse_inline(text), true, &mut out);
    out
}

fn render_spans(spans: &[Span], flatten: bool, out: &mut String) {
    for span in spans {
        match span {
            Span::Text { text } => out.push_str(text),
            Span::Code { code } => {
                out.push_str("```");
                out.push_str(code);
                out.push_str("```");
            }
            Span::Strong { children } => wrap(children, "*", "*", flatten, out),
            Span::Emphasis { children } => wrap(children, "_", "_", flatten, out),
            Span::StrongEmphasis { children } => wrap(children, "*_", "_*", flatten, out),
            Span::Strike { children } => wrap(children, "~", "~", flatten, out),
            Span::Link { label, url } => {
                render_spans(label, flatten, out);
                if !url.is_empty() {
                    out.push_str(" (");
                    out.push_str(url);
                    out.push(')');
                }
            }
        }
    }
}

fn wrap(children: &[Span], open: &str, close: &str, flatten: bool, out: &mut String) {
    if flatten {
        render_spans(children, flatten, out);
        return;
    }
    out.push_str(open);
    render_spans(children, flatten, out);
    out.push_str(close);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::whatsapp::block::classify_lines;

    fn render(source: &str) -> String {
        render_blocks(&classify_lines(source), &WhatsappOptions::default())
    }

    #[test]
    fn test_heading_flattens_inner_emphasis() {
        assert_eq!(render("# **Big** news"), "*_Big news_*");
        assert_eq!(render("## Use `cargo`"), "*_Use ```cargo```_*");
    }

    #[test]
    fn test_ordered_runs_restart() {
        assert_eq!(render("3. a\n7. b\ntext\n9. c"), "1. a\n2. b\ntext\n1. c");
        assert_eq!(render("4. a\n\n4. b"), "1. a\n\n1. b");
    }

    #[test]
    fn test_blank_lines_inside_fence_survive() {
        assert_eq!(render("```\na\n\n\n\nb\n```"), "```\na\n\n\n\nb\n```");
    }

    #[test]
    fn test_whitespace_only_lines_collapse() {
        assert_eq!(render("a\n  \n\t\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_empty_items() {
        assert_eq!(render("-  "), "•");
        assert_eq!(render(">"), ">");
    }

    #[test]
    fn test_custom_bullet_and_rule_width() {
        let options = WhatsappOptions {
            bullet: "▪".to_string(),
            rule_width: 3,
        };
        assert_eq!(
            render_blocks(&classify_lines("- a\n***"), &options),
            "▪ a\n───"
        );
    }
}
