//! Where upload listings and artifact bodies come from.

mod fs;
mod http;

pub use fs::{DirectorySource, METADATA_FILE, UPLOAD_HTML_DIR};
pub use http::HttpSource;

use crate::error::{FetchError, ListingError};
use crate::path::ListedUpload;
use async_trait::async_trait;

/// A collaborator that lists uploaded documents and serves their converted artifacts.
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// List every known upload. Records are returned unvalidated.
    async fn list(&self) -> Result<Vec<ListedUpload>, ListingError>;

    /// Fetch an artifact body (markup) by location.
    async fn fetch(&self, location: &str) -> Result<String, FetchError>;

    /// Short description for logs and status output.
    fn describe(&self) -> String;
}
