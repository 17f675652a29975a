//! Markdown Normalizer - markdown -> plain text transform
//!
//! A deterministic single-pass sequence of pattern substitutions that strips
//! markdown syntax while keeping the content. Best-effort on malformed or
//! nested markdown; unmatched delimiters pass through untouched.

use regex::Regex;
use std::sync::LazyLock;

// ATX headers: remove the marker, keep the line text
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+").expect("valid regex"));

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));

static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("valid regex"));

static INLINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.+?)`").expect("valid regex"));

// Fenced code delimiters: drop the fence lines, keep the enclosed code
static FENCE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^```\w*\n").expect("valid regex"));

static FENCE_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^```$").expect("valid regex"));

// Image syntax is the link pattern prefixed with `!`; it must run first so
// the link substitution never consumes `[alt](url)` and strands the `!`.
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]+)\]\([^)]+\)").expect("valid regex"));

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid regex"));

/// Strip markdown formatting from `text`, keeping the content.
///
/// Pure and total: never fails, and empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let result = HEADER_RE.replace_all(text, "");
    let result = BOLD_RE.replace_all(&result, "$1");
    let result = ITALIC_RE.replace_all(&result, "$1");
    let result = INLINE_CODE_RE.replace_all(&result, "$1");
    let result = FENCE_OPEN_RE.replace_all(&result, "");
    let result = FENCE_CLOSE_RE.replace_all(&result, "");
    let result = IMAGE_RE.replace_all(&result, "$1");
    let result = LINK_RE.replace_all(&result, "$1");

    result.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_headers_stripped() {
        let out = normalize("# Title");
        assert!(out.contains("Title"));
        assert!(!out.starts_with('#'));

        assert_eq!(normalize("### Section Three"), "Section Three");
        assert_eq!(normalize("###### Deep"), "Deep");
    }

    #[test]
    fn test_headers_multiline() {
        let out = normalize("# One\nplain\n## Two");
        assert_eq!(out, "One\nplain\nTwo");
    }

    #[test]
    fn test_bold_stripped() {
        let out = normalize("**bold**");
        assert!(out.contains("bold"));
        assert!(!out.contains('*'));
    }

    #[test]
    fn test_italic_stripped() {
        assert_eq!(normalize("*italic* text"), "italic text");
    }

    #[test]
    fn test_bold_before_italic() {
        // The bold pass must consume `**` pairs before the italic pass sees them
        assert_eq!(normalize("**strong** and *soft*"), "strong and soft");
    }

    #[test]
    fn test_inline_code_stripped() {
        assert_eq!(normalize("run `cargo test` now"), "run cargo test now");
    }

    #[test]
    fn test_fenced_code_block() {
        let input = "```rust\nfn main() {}\n```";
        let out = normalize(input);
        assert!(out.contains("fn main() {}"));
        assert!(!out.contains("```"));
    }

    #[test]
    fn test_link_keeps_label() {
        let out = normalize("[Google](https://x.com)");
        assert_eq!(out, "Google");
        assert!(!out.contains("https://x.com"));
    }

    #[test]
    fn test_image_keeps_alt() {
        // Image handling must not leave the `!` prefix behind
        assert_eq!(normalize("![diagram](img.png)"), "diagram");
    }

    #[test]
    fn test_image_and_link_together() {
        let out = normalize("see ![chart](a.png) and [docs](https://d.io)");
        assert_eq!(out, "see chart and docs");
    }

    #[test]
    fn test_unmatched_delimiters_pass_through() {
        assert_eq!(normalize("**unclosed bold"), "**unclosed bold");
        assert_eq!(normalize("[label only]"), "[label only]");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "Nothing to strip here. 1 + 1 = 2.";
        assert_eq!(normalize(text), text);
    }
}
