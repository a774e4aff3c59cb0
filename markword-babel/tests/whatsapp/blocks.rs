//! Line-level rewrites: headings, quotes, rules, lists, whitespace

use insta::assert_snapshot;
use markword_babel::markdown_to_chat_format;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

#[test]
fn test_heading_example() {
    assert_eq!(markdown_to_chat_format("# Title\n"), "*_Title_*");
}

#[test]
fn test_every_heading_level() {
    for level in 1..=6 {
        let source = format!("{} Level", "#".repeat(level));
        assert_eq!(markdown_to_chat_format(&source), "*_Level_*");
    }
    assert_eq!(markdown_to_chat_format("####### Seven"), "####### Seven");
}

#[test]
fn test_link_example() {
    assert_eq!(
        markdown_to_chat_format("[site](https://x.com)"),
        "site (https://x.com)"
    );
}

#[test]
fn test_horizontal_rule_example() {
    assert_eq!(markdown_to_chat_format("---"), "────────────");
    assert_eq!(markdown_to_chat_format("***"), "────────────");
    assert_eq!(markdown_to_chat_format("_____"), "────────────");
}

#[test]
fn test_list_renumbering_example() {
    assert_eq!(markdown_to_chat_format("5. a\n9. b\n2. c"), "1. a\n2. b\n3. c");
}

#[test]
fn test_list_renumbering_restarts_after_any_other_line() {
    assert_snapshot!(
        markdown_to_chat_format("4. a\n4. b\n\n4. c\n- d\n4. e"),
        @r"
    1. a
    2. b

    1. c
    • d
    1. e
    "
    );
}

#[test]
fn test_unordered_items() {
    assert_eq!(
        markdown_to_chat_format("- one\n* two\n  - nested"),
        "• one\n• two\n  • nested"
    );
}

#[test]
fn test_list_item_content_is_formatted() {
    assert_eq!(
        markdown_to_chat_format("- **bold** item\n1. see [docs](https://d.io)"),
        "• *bold* item\n1. see docs (https://d.io)"
    );
}

#[test]
fn test_blockquote() {
    assert_eq!(markdown_to_chat_format("> wise words"), "> _wise words_");
    assert_eq!(
        markdown_to_chat_format("> **really** wise"),
        "> _*really* wise_"
    );
}

#[test]
fn test_blank_line_collapse_example() {
    assert_eq!(
        markdown_to_chat_format("First paragraph.\n\n\n\nSecond paragraph."),
        "First paragraph.\n\nSecond paragraph."
    );
}

#[test]
fn test_single_blank_line_kept() {
    assert_eq!(markdown_to_chat_format("a\n\nb"), "a\n\nb");
    assert_eq!(markdown_to_chat_format("a\nb"), "a\nb");
}

#[test]
fn test_result_is_trimmed() {
    assert_eq!(markdown_to_chat_format("\n\n  hello  \n\n"), "hello");
}

#[test]
fn test_kitchensink() {
    let source = fixture("kitchensink.md");
    let expected = fixture("kitchensink.whatsapp.txt");
    assert_eq!(markdown_to_chat_format(&source), expected.trim_end());
}
