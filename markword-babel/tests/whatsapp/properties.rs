//! Properties that hold for every input

use markword_babel::markdown_to_chat_format;
use proptest::prelude::*;
use std::time::{Duration, Instant};

/// Generous ceiling for work that should be linear in the input.
const LINEAR_BUDGET: Duration = Duration::from_secs(5);

/// Blank-line collapse and trim, the only change plain text may see.
fn normalize_whitespace(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = false;
    for line in text.split('\n') {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        lines.push(if blank { "" } else { line });
    }
    lines.join("\n").trim().to_string()
}

#[test]
fn test_empty_input() {
    assert_eq!(markdown_to_chat_format(""), "");
    assert_eq!(markdown_to_chat_format("\n\n\n"), "");
}

#[test]
fn test_malformed_inputs_do_not_panic() {
    for input in [
        "*", "**", "***", "_", "`", "``", "```", "[", "](", "[](", "![", "\\", "~~", "#", "# ",
        ">", "1.", "- ", "*_*_", "**_**_", "[a](b", "`a``", "\u{0}", "é*é*", "🎉**🎉**",
    ] {
        let _ = markdown_to_chat_format(input);
    }
}

#[test]
fn test_deeply_nested_links_do_not_overflow() {
    let n = 10_000;
    let input = format!("{}x{}", "[".repeat(n), "](u)".repeat(n));
    let output = markdown_to_chat_format(&input);
    let expected = format!(
        "{}x{}{}",
        "[".repeat(n - 32),
        " (u)".repeat(32),
        "](u)".repeat(n - 32)
    );
    assert_eq!(output, expected);
}

#[test]
fn test_deeply_nested_emphasis_does_not_overflow() {
    let n = 10_000;
    let input = format!("{}x{}", "**a ~~b ".repeat(n), " c~~ d**".repeat(n));
    let output = markdown_to_chat_format(&input);
    assert!(output.contains('x'));
    assert!(output.starts_with("**a ~~b "));
}

#[test]
fn test_deeply_nested_images_do_not_overflow() {
    let n = 10_000;
    let input = format!("{}x{}", "![".repeat(n), "](u)".repeat(n));
    assert!(markdown_to_chat_format(&input).contains('x'));
}

#[test]
fn test_unclosed_emphasis_line_is_linear() {
    let input = "*a ".repeat(34_000);
    let start = Instant::now();
    let output = markdown_to_chat_format(&input);
    assert!(start.elapsed() < LINEAR_BUDGET, "took {:?}", start.elapsed());
    assert_eq!(output, input.trim_end());
}

#[test]
fn test_unclosed_brackets_line_is_linear() {
    let input = "[a".repeat(50_000);
    let start = Instant::now();
    let output = markdown_to_chat_format(&input);
    assert!(start.elapsed() < LINEAR_BUDGET, "took {:?}", start.elapsed());
    assert_eq!(output, input);
}

#[test]
fn test_unclosed_code_spans_line_is_linear() {
    let input = "`a ``b ".repeat(15_000);
    let start = Instant::now();
    let _ = markdown_to_chat_format(&input);
    assert!(start.elapsed() < LINEAR_BUDGET, "took {:?}", start.elapsed());
}

proptest! {
    #[test]
    fn prop_total_over_markdown_alphabet(input in r"[#*_~`>\[\]()!\\\-. a-z0-9\n]{0,120}") {
        let output = markdown_to_chat_format(&input);
        prop_assert_eq!(output.trim(), output.as_str());
    }

    #[test]
    fn prop_total_over_arbitrary_text(input in any::<String>()) {
        let _ = markdown_to_chat_format(&input);
    }

    #[test]
    fn prop_no_internal_markers_in_output(input in r"[#*_~`>\[\]()!A-Z \n]{0,120}") {
        let output = markdown_to_chat_format(&input);
        prop_assert!(!output.contains("<<"), "marker text in {output:?}");
        prop_assert!(!output.contains('\u{0}'), "sentinel in {output:?}");
    }

    #[test]
    fn prop_plain_text_is_unchanged(input in r"[a-zA-Z ,!?]{0,20}(\n[a-zA-Z ,!?]{0,20}){0,8}") {
        prop_assert_eq!(markdown_to_chat_format(&input), normalize_whitespace(&input));
    }

    #[test]
    fn prop_converted_plain_output_is_stable(input in r"(- [a-z][a-z ]{0,9}\n|[0-9]\. [a-z][a-z ]{0,9}\n|[a-z ]{0,10}\n){0,8}") {
        let once = markdown_to_chat_format(&input);
        prop_assert_eq!(markdown_to_chat_format(&once), once.clone());
    }
}
