//! Restricted HTML to plain text
//!
//! Descriptions arrive as small HTML snippets. Explicit line breaks are kept
//! as newlines; every other tag is dropped and entities are decoded.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

/// `<br>` in any case, self-closing or with attributes
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\b[^>]*>").expect("valid line break regex"));

/// Convert an HTML snippet to its text content, keeping `<br>` as `\n`
pub fn html_to_text(html: &str) -> String {
    let with_breaks = LINE_BREAK.replace_all(html, "\n");
    let fragment = Html::parse_fragment(&with_breaks);

    fragment.root_element().text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_breaks_become_newlines() {
        assert_eq!(html_to_text("Line one<br>Line two"), "Line one\nLine two");
        assert_eq!(html_to_text("a<br/>b<BR />c"), "a\nb\nc");
    }

    #[test]
    fn test_line_breaks_with_attributes() {
        assert_eq!(html_to_text("a<br class=\"x\">b"), "a\nb");
        assert_eq!(html_to_text("a<BR style='clear:both' />b"), "a\nb");
    }

    #[test]
    fn test_markup_is_stripped() {
        let html = "<b>Bold</b> &amp; plain<br><i>italic</i> <a href=\"https://x\">link</a>";
        assert_eq!(html_to_text(html), "Bold & plain\nitalic link");
    }

    #[test]
    fn test_similar_tags_are_left_alone() {
        assert_eq!(LINE_BREAK.replace_all("<bre>x</bre>", "\n"), "<bre>x</bre>");
        assert_eq!(html_to_text("no tags"), "no tags");
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn test_long_input_with_many_breaks() {
        let html = "x<br>".repeat(40_000);
        let text = html_to_text(&html);
        assert_eq!(text.len(), 80_000);
        assert!(text.starts_with("x\nx\n"));
    }
}
