//! Title and content search handlers.

use crate::format::{render_results, render_tree};
use crate::search::ContentSearch;
use crate::state::LibraryState;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchTitlesRequest {
    /// Case-insensitive substring to look for in document and category titles
    pub query: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchContentRequest {
    /// Case-insensitive text to look for in document titles and bodies
    pub query: String,
    /// Maximum number of results to return (default: 20)
    #[serde(default = "default_limit")]
    pub limit: Option<usize>,
}

fn default_limit() -> Option<usize> {
    Some(20)
}

/// Filter the category tree by title.
pub fn handle_search_titles(state: &LibraryState, request: &SearchTitlesRequest) -> String {
    let view = state.search_titles(&request.query);

    if view.query.is_some() && view.is_empty() {
        return format!("No titles match '{}'.", request.query.trim());
    }
    render_tree(&view)
}

/// Full-text search, or a retry hint while indexing is running.
pub fn handle_search_content(state: &LibraryState, request: &SearchContentRequest) -> String {
    if request.query.trim().is_empty() {
        return "Enter a search term to search document contents.".to_string();
    }

    match state.search_content(&request.query) {
        ContentSearch::InProgress { done, total } => format!(
            "Content indexing is still in progress ({}/{} documents). Retry the search shortly.",
            done, total
        ),
        ContentSearch::Results(results) => {
            render_results(&request.query, &results, request.limit.unwrap_or(20))
        }
    }
}
