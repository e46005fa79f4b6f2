//! Shared test fixtures and utilities for integration tests.
//!
//! # Test Isolation Strategy
//!
//! Every test gets its own library directory under a fresh temp dir:
//! - `upload-html/metadata.json` written from the documents the test adds
//! - one HTML artifact per document (unless the test deliberately omits it)
//! - its own `LibraryState` with an empty forest and content index
//!
//! # Available Fixtures
//!
//! - `empty_library`: A library with no documents
//! - `sample_library`: The small APE/Billing library used across search tests

use doctree_mcp::{Config, DirectorySource, LibraryState};
use rstest::fixture;
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A temporary library directory laid out like the conversion service's output.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempLibrary {
    _temp: TempDir,
    root: PathBuf,
    metadata: Map<String, Value>,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempLibrary {
    /// Creates a new empty library.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        std::fs::create_dir_all(root.join("upload-html"))
            .expect("Failed to create upload-html directory");
        Self {
            _temp: temp,
            root,
            metadata: Map::new(),
        }
    }

    /// Returns the root path of this library.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Adds a document: a metadata entry plus its HTML artifact.
    ///
    /// Returns the artifact location.
    pub fn add_document(&mut self, navigation: &[&str], html: &str) -> String {
        let location = self.add_metadata(navigation);
        self.write_artifact(&location, html);
        location
    }

    /// Adds a metadata entry without writing the artifact file.
    pub fn add_metadata(&mut self, navigation: &[&str]) -> String {
        let filename = format!(
            "{}.html",
            navigation
                .iter()
                .map(|label| label.replace(' ', ""))
                .collect::<Vec<_>>()
                .join("_")
        );
        let location = format!("upload-html/{}", filename);

        self.metadata.insert(
            filename.clone(),
            json!({
                "filename": filename,
                "navigation": navigation,
                "full_navigation": navigation.join(" > "),
                "path": location,
            }),
        );
        self.flush_metadata();
        location
    }

    /// Writes (or overwrites) an artifact file.
    pub fn write_artifact(&self, location: &str, html: &str) {
        std::fs::write(self.root.join(location), html)
            .unwrap_or_else(|e| panic!("Failed to write artifact '{}': {}", location, e));
    }

    /// Deletes an artifact file, leaving its metadata entry behind.
    pub fn remove_artifact(&self, location: &str) {
        std::fs::remove_file(self.root.join(location))
            .unwrap_or_else(|e| panic!("Failed to remove artifact '{}': {}", location, e));
    }

    /// Builds a fresh library state over this directory.
    pub fn state(&self) -> Arc<LibraryState> {
        self.state_with(&Config::default())
    }

    pub fn state_with(&self, config: &Config) -> Arc<LibraryState> {
        Arc::new(LibraryState::new(
            Arc::new(DirectorySource::new(&self.root)),
            config,
        ))
    }

    fn flush_metadata(&self) {
        let content = serde_json::to_string_pretty(&self.metadata).expect("metadata serializes");
        std::fs::write(self.root.join("upload-html/metadata.json"), content)
            .expect("Failed to write metadata.json");
    }
}

impl Default for TempLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps an HTML body in a minimal page, with a script and style that must never be indexed.
#[allow(dead_code)]
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{title}</title><style>p {{ color: red }}</style></head>\
         <body><script>var indexedByMistake = true;</script><h1>{title}</h1>{body}</body></html>"
    )
}

#[fixture]
pub fn empty_library() -> TempLibrary {
    TempLibrary::new()
}

/// APE and Billing roots, five documents in total.
#[fixture]
pub fn sample_library() -> TempLibrary {
    let mut library = TempLibrary::new();
    library.add_document(
        &["APE", "Account", "Password Reset"],
        &page(
            "Password Reset",
            "<p>If you lost access, click the <b>forgot password</b> link to reset your password.</p>",
        ),
    );
    library.add_document(
        &["APE", "Account", "Unlock User"],
        &page("Unlock User", "<p>Locked accounts are released after 30 minutes.</p>"),
    );
    library.add_document(
        &["APE", "Market Roles", "Supplier Switch"],
        &page("Supplier Switch", "<p>A switch requires a valid password &amp; contract id.</p>"),
    );
    library.add_document(
        &["Billing", "Invoices"],
        &page("Invoices", "<p>Monthly invoices are generated on the 1st.</p>"),
    );
    library.add_document(
        &["Billing", "Tariffs", "Grid Fees"],
        &page("Grid Fees", "<p>Grid fees depend on the metering point.</p>"),
    );
    library
}
