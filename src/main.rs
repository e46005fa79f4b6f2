use anyhow::Context;
use doctree_mcp::{Config, LibraryServer, LibraryState};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    doctree_mcp::tracing::init();

    let config = Config::load().context("Failed to load configuration")?;
    let source = config.source.build()?;
    tracing::info!("Starting doctree-mcp server ({})", source.describe());

    // Load the tree now; content indexing continues in the background.
    let state = Arc::new(LibraryState::new(source, &config));
    state.start().await;

    let server = LibraryServer::new(state.clone());
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;
    tracing::info!("Client disconnected, shutting down");

    Ok(())
}
