//! Code is exempt from every rewrite.
//!
//! Fenced code bodies are carried verbatim: heading, emphasis, list and rule
//! syntax inside a fence stays literal.

use markword_babel::markdown_to_chat_format;

#[test]
fn test_fence_language_tag_stripped() {
    assert_eq!(
        markdown_to_chat_format("```rust\nfn main() {}\n```"),
        "```\nfn main() {}\n```"
    );
}

#[test]
fn test_fence_body_is_not_rewritten() {
    let source = "```md\n# Heading\n**bold** _it_\n- item\n3. item\n---\n> quote\n[a](b)\n```";
    let expected = "```\n# Heading\n**bold** _it_\n- item\n3. item\n---\n> quote\n[a](b)\n```";
    assert_eq!(markdown_to_chat_format(source), expected);
}

#[test]
fn test_fence_keeps_blank_lines() {
    assert_eq!(
        markdown_to_chat_format("```\nx\n\n\n\ny\n```"),
        "```\nx\n\n\n\ny\n```"
    );
}

#[test]
fn test_text_around_fence_is_still_formatted() {
    assert_eq!(
        markdown_to_chat_format("**before**\n```\n**inside**\n```\n**after**"),
        "*before*\n```\n**inside**\n```\n*after*"
    );
}

#[test]
fn test_unterminated_fence_is_literal() {
    assert_eq!(
        markdown_to_chat_format("```python\n**bold**"),
        "```python\n*bold*"
    );
}

#[test]
fn test_inline_code() {
    assert_eq!(
        markdown_to_chat_format("run `cargo test` now"),
        "run ```cargo test``` now"
    );
}

#[test]
fn test_inline_code_content_is_literal() {
    assert_eq!(
        markdown_to_chat_format("use `**kwargs` and `_private`"),
        "use ```**kwargs``` and ```_private```"
    );
}

#[test]
fn test_inline_code_inside_bold() {
    assert_eq!(
        markdown_to_chat_format("**see `a*b`**"),
        "*see ```a*b```*"
    );
}
