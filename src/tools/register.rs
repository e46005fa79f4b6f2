//! Handlers reacting to new uploads: single registration and full reload.

use crate::path::NavigationPath;
use crate::state::LibraryState;
use crate::tree::MergeOutcome;
use rmcp::schemars;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RegisterDocumentRequest {
    /// Navigation breadcrumb, e.g. "APE > Billing > Password Reset"
    pub navigation: String,
    /// Artifact location; derived from the navigation path when omitted
    #[serde(default)]
    pub location: Option<String>,
}

/// Merge a converted upload into the tree and queue it for content indexing.
pub fn handle_register_document(
    state: &Arc<LibraryState>,
    request: RegisterDocumentRequest,
) -> Result<String, String> {
    let path = NavigationPath::parse(&request.navigation)
        .map_err(|e| format!("Invalid navigation '{}': {}", request.navigation, e))?;

    let registration = state
        .register(path, request.location)
        .map_err(|e| format!("Could not register '{}': {}", request.navigation, e))?;

    Ok(match registration.outcome {
        MergeOutcome::Inserted => format!(
            "Registered '{}' at {}. Content indexing queued.",
            registration.path, registration.location
        ),
        MergeOutcome::Existing => format!(
            "'{}' already exists under '{}'; the existing document was kept.",
            registration.path.title(),
            registration.path.breadcrumb()
        ),
        MergeOutcome::CategoryExists => format!(
            "'{}' is already a category under '{}'; no document was added.",
            registration.path.title(),
            registration.path.breadcrumb()
        ),
    })
}

/// Re-read the upload listing and merge anything new.
pub async fn handle_reload_library(state: &Arc<LibraryState>) -> Result<String, String> {
    let added = state
        .reload()
        .await
        .map_err(|e| format!("Failed to reload library: {}", e))?;

    Ok(match added {
        0 => "Library is up to date; no new documents.".to_string(),
        n => format!("Added {} new documents. Content indexing queued.", n),
    })
}
