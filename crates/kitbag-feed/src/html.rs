//! Plain-text rendering of supplier `Body (HTML)` cells.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Strips markup from a product description.
///
/// Tags become a single space, the five common named entities are decoded,
/// whitespace runs collapse to one space and the ends are trimmed. Entities
/// are decoded after tag removal, so `&lt;b&gt;` survives as literal `<b>`.
#[must_use]
pub fn strip_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let text = TAG_RE.replace_all(html, " ");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"");

    WHITESPACE_RE.replace_all(&text, " ").trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        assert_eq!(
            strip_html("<p>Premium <strong>leather</strong></p>\n<ul><li>Hand made</li></ul>"),
            "Premium leather Hand made"
        );
    }

    #[test]
    fn decodes_named_entities() {
        assert_eq!(
            strip_html("Fists&nbsp;&amp;&nbsp;feet &quot;pro&quot;"),
            "Fists & feet \"pro\""
        );
    }

    #[test]
    fn escaped_markup_survives_as_text() {
        assert_eq!(strip_html("&lt;b&gt;bold&lt;/b&gt;"), "<b>bold</b>");
    }

    #[test]
    fn adjacent_tags_do_not_glue_words() {
        assert_eq!(strip_html("one<br>two"), "one two");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(strip_html(""), "");
        assert_eq!(strip_html("<p> </p>"), "");
    }
}
