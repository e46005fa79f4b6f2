//! Content-mode search over indexed document text.

use super::snippet::{SnippetOptions, content_snippet, leading_snippet};
use super::text::normalize_text;
use crate::indexer::IndexEntry;
use crate::path::BREADCRUMB_SEPARATOR;

/// Why a document qualified. Title matches sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchType {
    Title,
    Content,
}

/// One content search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub location: String,
    pub root_category: String,
    /// Path labels above the document, joined with ` > `.
    pub breadcrumb: String,
    /// Excerpt with `<mark>` highlight markers.
    pub snippet: String,
    pub match_type: MatchType,
}

/// Outcome of a content query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSearch {
    /// Indexing has not finished; the query should be re-issued later.
    InProgress { done: usize, total: usize },
    Results(Vec<SearchResult>),
}

/// Scan `entries` for `query` in titles and body text.
///
/// The query is trimmed, lower-cased and whitespace-collapsed; an empty query
/// yields no results. Title matches are listed before content matches, and
/// scan order is kept within each group.
pub fn search_entries(entries: &[IndexEntry], query: &str, options: SnippetOptions) -> Vec<SearchResult> {
    let query = normalize_text(query);
    if query.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = entries
        .iter()
        .filter_map(|entry| match_entry(entry, &query, options))
        .collect();

    // Stable: keeps index order within each match type.
    results.sort_by_key(|result| result.match_type);
    results
}

fn match_entry(entry: &IndexEntry, query: &str, options: SnippetOptions) -> Option<SearchResult> {
    let title_match = entry.title.to_lowercase().contains(query);
    let content = content_snippet(&entry.normalized_text, query, options);

    let (snippet, match_type) = match (title_match, content) {
        (false, None) => return None,
        (true, Some(snippet)) => (snippet, MatchType::Title),
        (false, Some(snippet)) => (snippet, MatchType::Content),
        (true, None) => (leading_snippet(&entry.normalized_text, options), MatchType::Title),
    };

    let parents = &entry.full_path[..entry.full_path.len().saturating_sub(1)];

    Some(SearchResult {
        title: entry.title.clone(),
        location: entry.location.clone(),
        root_category: entry.root_category.clone(),
        breadcrumb: parents.join(BREADCRUMB_SEPARATOR),
        snippet,
        match_type,
    })
}
