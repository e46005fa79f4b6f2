//! MCP server exposing the document library over stdio.

use crate::state::LibraryState;
use crate::tools::{
    BrowseTreeRequest, RegisterDocumentRequest, SearchContentRequest, SearchTitlesRequest,
    handle_browse_tree, handle_indexing_status, handle_register_document, handle_reload_library,
    handle_search_content, handle_search_titles,
};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP Server for browsing and searching the document library
#[derive(Clone)]
pub struct LibraryServer {
    /// Shared library state (forest, content index, source)
    state: Arc<LibraryState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for LibraryServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl LibraryServer {
    pub fn new(state: Arc<LibraryState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Show the document hierarchy: root categories, nested categories and documents with their artifact locations. Optionally restrict to one root category."
    )]
    async fn browse_tree(
        &self,
        Parameters(request): Parameters<BrowseTreeRequest>,
    ) -> std::result::Result<String, String> {
        handle_browse_tree(&self.state, &request)
    }

    #[tool(
        description = "Filter the document hierarchy by title. Case-insensitive substring match; matching documents are shown with every ancestor category expanded. An empty query shows the full tree."
    )]
    async fn search_titles(
        &self,
        Parameters(request): Parameters<SearchTitlesRequest>,
    ) -> std::result::Result<String, String> {
        Ok(handle_search_titles(&self.state, &request))
    }

    #[tool(
        description = "Full-text search across document bodies and titles. Returns breadcrumbs and snippets with <mark> highlights, title matches first. Reports progress instead of results while indexing is still running."
    )]
    async fn search_content(
        &self,
        Parameters(request): Parameters<SearchContentRequest>,
    ) -> std::result::Result<String, String> {
        Ok(handle_search_content(&self.state, &request))
    }

    #[tool(description = "Report how many documents are loaded and the content indexing progress, including failed artifacts.")]
    async fn indexing_status(&self) -> std::result::Result<String, String> {
        Ok(handle_indexing_status(&self.state))
    }

    #[tool(
        description = "Register a newly converted document by its navigation breadcrumb (e.g. 'APE > Billing > Password Reset'). Adds it to the tree and indexes its content in the background. Existing titles at the same path are kept."
    )]
    async fn register_document(
        &self,
        Parameters(request): Parameters<RegisterDocumentRequest>,
    ) -> std::result::Result<String, String> {
        handle_register_document(&self.state, request)
    }

    #[tool(description = "Re-read the upload listing, add documents that are not in the tree yet and index them.")]
    async fn reload_library(&self) -> std::result::Result<String, String> {
        handle_reload_library(&self.state).await
    }
}

#[tool_handler]
impl ServerHandler for LibraryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "doctree-mcp: browse and search a hierarchy of converted documents. \
                 Use browse_tree or search_titles to navigate by title, and search_content for full-text search \
                 once indexing_status reports the content index as ready.",
            )
    }
}
