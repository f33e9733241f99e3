//! Case-insensitive substring matching and HTML-safe highlighting.
//!
//! Matching is literal: no tokenizer, no stemming. A query matches a
//! question when it appears verbatim (ignoring case) in the title or body.

use regex::Regex;

/// Query tokens must be strictly longer than this to be highlighted or scored
pub const MIN_QUERY_TOKEN_LEN: usize = 2;

const HIGHLIGHT_OPEN: &str = "<span class=\"search-highlight\">";
const HIGHLIGHT_CLOSE: &str = "</span>";

/// Case-insensitive substring test.
///
/// An empty needle is contained in every haystack; deciding that an empty
/// query means "match everything" is left to the caller.
pub fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True if `needle` occurs (ignoring case) in the title or the body
pub fn matches_any(title: &str, body: &str, needle: &str) -> bool {
    contains(title, needle) || contains(body, needle)
}

/// Whitespace-separated query tokens longer than [`MIN_QUERY_TOKEN_LEN`],
/// in query order and without deduplication.
pub fn query_tokens(query: &str) -> impl Iterator<Item = &str> {
    query
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_QUERY_TOKEN_LEN)
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escape `text`, then wrap every case-insensitive occurrence of each query
/// token in a highlight span.
///
/// Tokens are applied one after another on the already-marked-up text, so a
/// later token can match inside markup inserted by an earlier one. Callers
/// relying on the board's historical output depend on that.
pub fn highlight(text: &str, query: &str) -> String {
    let mut highlighted = escape_html(text);

    for token in query_tokens(query.trim()) {
        let pattern = match Regex::new(&format!("(?i)({})", regex::escape(token))) {
            Ok(pattern) => pattern,
            Err(error) => {
                tracing::warn!("Skipping highlight token {token:?}: {error}");
                continue;
            }
        };
        highlighted = pattern
            .replace_all(&highlighted, format!("{HIGHLIGHT_OPEN}${{1}}{HIGHLIGHT_CLOSE}"))
            .into_owned();
    }

    highlighted
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_contains_ignores_case() {
        assert!(contains("PHP Error Handling", "error"));
        assert!(contains("php error handling", "ERROR"));
        assert!(!contains("PHP Error Handling", "mysql"));
    }

    #[test]
    fn test_contains_empty_needle() {
        assert!(contains("anything", ""));
        assert!(contains("", ""));
    }

    #[test]
    fn test_matches_any_checks_title_and_body() {
        assert!(matches_any("Title", "body with pdo", "PDO"));
        assert!(matches_any("PDO title", "body", "pdo"));
        assert!(!matches_any("Title", "body", "pdo"));
    }

    #[test]
    fn test_query_tokens_drop_short_words() {
        let tokens: Vec<&str> = query_tokens("how to use PDO in php").collect();
        assert_eq!(tokens, vec!["how", "use", "PDO", "php"]);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_highlight_empty_query_only_escapes() {
        for text in ["plain", "<script>alert(1)</script>", "a & b", ""] {
            assert_eq!(highlight(text, ""), escape_html(text));
            assert_eq!(highlight(text, "   "), escape_html(text));
        }
    }

    #[test]
    fn test_highlight_preserves_case_of_match() {
        assert_eq!(
            highlight("PHP Error Handling", "error"),
            "PHP <span class=\"search-highlight\">Error</span> Handling"
        );
    }

    #[test]
    fn test_highlight_wraps_every_occurrence() {
        assert_eq!(
            highlight("error, Error, ERROR", "error"),
            "<span class=\"search-highlight\">error</span>, \
             <span class=\"search-highlight\">Error</span>, \
             <span class=\"search-highlight\">ERROR</span>"
        );
    }

    #[test]
    fn test_highlight_skips_short_tokens() {
        assert_eq!(highlight("go to db", "to db go"), "go to db");
    }

    #[test]
    fn test_highlight_escapes_before_marking() {
        assert_eq!(
            highlight("<b>mysql</b>", "mysql"),
            "&lt;b&gt;<span class=\"search-highlight\">mysql</span>&lt;/b&gt;"
        );
    }

    #[test]
    fn test_highlight_treats_regex_characters_literally() {
        assert_eq!(
            highlight("use c++ or c#", "c++"),
            "use <span class=\"search-highlight\">c++</span> or c#"
        );
    }

    #[test]
    fn test_highlight_later_tokens_see_earlier_markup() {
        assert_eq!(
            highlight("error", "error class"),
            "<span <span class=\"search-highlight\">class</span>=\"search-highlight\">error</span>"
        );
    }
}
