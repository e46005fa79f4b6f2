//! Snippet windows and match highlighting for content search results.
//!
//! Positions are counted in characters, not bytes, so windows never split a
//! multi-byte character.

use super::text::collapse_whitespace;
use regex::RegexBuilder;

/// Opening highlight marker wrapped around each query occurrence.
pub const HIGHLIGHT_OPEN: &str = "<mark>";
/// Closing highlight marker.
pub const HIGHLIGHT_CLOSE: &str = "</mark>";
/// Marks a window that was cut short of the text bounds.
pub const ELLIPSIS: &str = "...";

/// Snippet sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetOptions {
    /// Characters kept on each side of the first match.
    pub radius: usize,
    /// Leading characters shown when only the title matched.
    pub title_len: usize,
}

impl Default for SnippetOptions {
    fn default() -> Self {
        Self {
            radius: 100,
            title_len: 200,
        }
    }
}

/// Build a snippet around the first occurrence of `query` in `text`.
///
/// Both arguments are expected to be normalized already. Returns `None` when
/// the query does not occur.
pub fn content_snippet(text: &str, query: &str, options: SnippetOptions) -> Option<String> {
    if query.is_empty() {
        return None;
    }
    let byte_pos = text.find(query)?;

    let match_start = text[..byte_pos].chars().count();
    let match_end = match_start + query.chars().count();
    let total = text.chars().count();

    let start = match_start.saturating_sub(options.radius);
    let end = (match_end + options.radius).min(total);

    let window: String = text.chars().skip(start).take(end - start).collect();
    let mut snippet = highlight(&collapse_whitespace(&window), query);

    if start > 0 {
        snippet.insert_str(0, ELLIPSIS);
    }
    if end < total {
        snippet.push_str(ELLIPSIS);
    }
    Some(snippet)
}

/// Leading excerpt used when a document matched by title only.
pub fn leading_snippet(text: &str, options: SnippetOptions) -> String {
    let head: String = text.chars().take(options.title_len).collect();
    let mut snippet = escape_markup(&collapse_whitespace(&head));
    snippet.push_str(ELLIPSIS);
    snippet
}

/// Wrap every case-insensitive occurrence of `query` in highlight markers.
///
/// The rest of `text` is escaped, so the markers are the only markup in the output.
pub fn highlight(text: &str, query: &str) -> String {
    if query.is_empty() {
        return escape_markup(text);
    }

    let re = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Could not build highlight pattern for '{}': {}", query, e);
            return escape_markup(text);
        }
    };

    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for found in re.find_iter(text) {
        output.push_str(&escape_markup(&text[last..found.start()]));
        output.push_str(HIGHLIGHT_OPEN);
        output.push_str(&escape_markup(found.as_str()));
        output.push_str(HIGHLIGHT_CLOSE);
        last = found.end();
    }
    output.push_str(&escape_markup(&text[last..]));
    output
}

/// Escape `&`, `<` and `>` in decoded document text.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_short_text_has_no_ellipses() {
        let text = "click the forgot password link to reset your password";
        let snippet = content_snippet(text, "password", SnippetOptions::default()).unwrap();
        check!(snippet == "click the forgot <mark>password</mark> link to reset your <mark>password</mark>");
    }

    #[test]
    fn test_window_clamped_on_both_sides() {
        let text = format!("{} needle {}", "a".repeat(150), "b".repeat(150));
        let snippet = content_snippet(&text, "needle", SnippetOptions::default()).unwrap();

        check!(snippet.starts_with("..."));
        check!(snippet.ends_with("..."));
        // 99 'a' + space before, space + 99 'b' after
        let expected = format!(
            "...{} <mark>needle</mark> {}...",
            "a".repeat(99),
            "b".repeat(99)
        );
        check!(snippet == expected);
    }

    #[test]
    fn test_window_at_start_only_suffixed() {
        let text = format!("needle {}", "z".repeat(300));
        let snippet = content_snippet(&text, "needle", SnippetOptions::default()).unwrap();
        check!(!snippet.starts_with("..."));
        check!(snippet.ends_with("..."));
    }

    #[test]
    fn test_highlights_only_inside_window() {
        let text = format!("needle {} needle {} needle", "x".repeat(40), "y".repeat(300));
        let snippet = content_snippet(&text, "needle", SnippetOptions::default()).unwrap();
        check!(snippet.matches("<mark>needle</mark>").count() == 2);
    }

    #[test]
    fn test_multibyte_characters() {
        let text = format!("{}über straße", "ä".repeat(120));
        let snippet = content_snippet(&text, "straße", SnippetOptions::default()).unwrap();
        check!(snippet.starts_with("..."));
        check!(snippet.ends_with("<mark>straße</mark>"));
    }

    #[test]
    fn test_missing_query() {
        check!(content_snippet("some text", "absent", SnippetOptions::default()).is_none());
        check!(content_snippet("some text", "", SnippetOptions::default()).is_none());
    }

    #[test]
    fn test_leading_snippet_always_suffixed() {
        check!(leading_snippet("short body", SnippetOptions::default()) == "short body...");

        let long = "w".repeat(500);
        let snippet = leading_snippet(&long, SnippetOptions::default());
        check!(snippet.chars().count() == 203);
    }

    #[test]
    fn test_document_markup_is_escaped() {
        let text = "use <mark>tags</mark> and <script>alert(1)</script> password";
        let snippet = content_snippet(text, "password", SnippetOptions::default()).unwrap();
        check!(
            snippet
                == "use &lt;mark&gt;tags&lt;/mark&gt; and &lt;script&gt;alert(1)&lt;/script&gt; <mark>password</mark>"
        );
        check!(snippet.matches(HIGHLIGHT_OPEN).count() == 1);

        check!(leading_snippet("a < b & c", SnippetOptions::default()) == "a &lt; b &amp; c...");
    }

    #[test]
    fn test_query_with_markup_characters() {
        let snippet = content_snippet("price & terms apply", "& terms", SnippetOptions::default()).unwrap();
        check!(snippet == "price <mark>&amp; terms</mark> apply");

        // An entity produced by escaping is never split by a highlight.
        check!(highlight("a & b", "amp") == "a &amp; b");
    }

    #[test]
    fn test_highlight_escapes_regex_metacharacters() {
        check!(highlight("cost (eur) and (EUR)", "(eur)") == "cost <mark>(eur)</mark> and <mark>(EUR)</mark>");
    }
}
