//! Inline rewrites: bold, italic, strikethrough, links

use insta::assert_snapshot;
use markword_babel::markdown_to_chat_format;

#[test]
fn test_bold_italic_example() {
    assert_eq!(
        markdown_to_chat_format("**bold** and *italic*"),
        "*bold* and _italic_"
    );
}

#[test]
fn test_underscore_forms() {
    assert_eq!(
        markdown_to_chat_format("__bold__ and _italic_"),
        "*bold* and _italic_"
    );
}

#[test]
fn test_bold_output_is_not_reitalicized() {
    // `**x**` must become `*x*`, never `_*x*_`
    assert_eq!(markdown_to_chat_format("**x**"), "*x*");
    assert_eq!(markdown_to_chat_format("a **b** c **d**"), "a *b* c *d*");
}

#[test]
fn test_triple_delimiters_nest_bold_then_italic() {
    assert_snapshot!(markdown_to_chat_format("***both***"), @"*_both_*");
    assert_snapshot!(markdown_to_chat_format("___both___"), @"*_both_*");
}

#[test]
fn test_italic_inside_bold() {
    assert_eq!(
        markdown_to_chat_format("**very *much* so**"),
        "*very _much_ so*"
    );
}

#[test]
fn test_strikethrough() {
    assert_eq!(markdown_to_chat_format("~~old~~ new"), "~old~ new");
}

#[test]
fn test_unterminated_syntax_passes_through() {
    assert_eq!(markdown_to_chat_format("**bold"), "**bold");
    assert_eq!(markdown_to_chat_format("an *open"), "an *open");
    assert_eq!(markdown_to_chat_format("[label](no-close"), "[label](no-close");
    assert_eq!(markdown_to_chat_format("~~half"), "~~half");
}

#[test]
fn test_arithmetic_is_not_emphasis() {
    assert_eq!(markdown_to_chat_format("2 * 3 * 4"), "2 * 3 * 4");
}

#[test]
fn test_identifiers_with_underscores() {
    assert_eq!(
        markdown_to_chat_format("call snake_case_fn and MAX_VALUE"),
        "call snake_case_fn and MAX_VALUE"
    );
}

#[test]
fn test_escapes() {
    // WhatsApp delimiters keep their backslash so they stay literal there too
    assert_eq!(markdown_to_chat_format(r"\*literal\*"), r"\*literal\*");
    assert_eq!(markdown_to_chat_format(r"\_a\_ \~\~b\~\~"), r"\_a\_ \~\~b\~\~");
    assert_eq!(markdown_to_chat_format(r"\# not heading"), "# not heading");
    assert_eq!(markdown_to_chat_format(r"\[x\](y)"), "[x](y)");
}

#[test]
fn test_link_url_is_literal() {
    assert_eq!(
        markdown_to_chat_format("[**docs**](https://x.com/__init__)"),
        "*docs* (https://x.com/__init__)"
    );
}

#[test]
fn test_emphasis_closer_inside_link_label_does_not_split_link() {
    assert_eq!(markdown_to_chat_format("*a [b*](u)"), "*a b* (u)");
    assert_eq!(
        markdown_to_chat_format("_see [the docs](u)_"),
        "_see the docs (u)_"
    );
}

#[test]
fn test_image_renders_as_link() {
    assert_eq!(
        markdown_to_chat_format("![diagram](img/flow.png)"),
        "diagram (img/flow.png)"
    );
}

#[test]
fn test_emphasis_does_not_span_lines() {
    assert_eq!(
        markdown_to_chat_format("*start\nend*"),
        "*start\nend*"
    );
}
