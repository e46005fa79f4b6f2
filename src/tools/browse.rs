//! Tree browsing and indexing status handlers.

use crate::format::{render_status, render_tree};
use crate::search::filter_tree;
use crate::state::LibraryState;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BrowseTreeRequest {
    /// Only show this root category
    #[serde(default)]
    pub root: Option<String>,
}

/// Render the whole forest, or one root category.
pub fn handle_browse_tree(state: &LibraryState, request: &BrowseTreeRequest) -> Result<String, String> {
    let forest = state.forest();
    let mut view = filter_tree(&forest, "");

    if let Some(root) = &request.root {
        view.roots.retain(|r| &r.title == root);
        if view.roots.is_empty() {
            let available: Vec<_> = forest.trees().iter().map(|t| t.root.as_str()).collect();
            return Err(format!(
                "Root category '{}' not found. Available: {}",
                root,
                if available.is_empty() {
                    "none".to_string()
                } else {
                    available.join(", ")
                }
            ));
        }
    }

    if view.roots.is_empty() {
        return Ok("The library is empty. Register a document to get started.".to_string());
    }
    Ok(render_tree(&view))
}

/// Report tree size and content indexing progress.
pub fn handle_indexing_status(state: &LibraryState) -> String {
    let documents = state.forest().document_count();
    render_status(&state.indexing_status(), documents)
}
