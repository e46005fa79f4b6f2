//! Artifact source backed by a library directory on disk.
//!
//! Layout:
//! ```text
//! <root>/upload-html/metadata.json
//! <root>/upload-html/APE_Billing_Invoices.html
//! ```
//! `metadata.json` maps each artifact file name to its navigation labels and
//! root-relative path.

use super::ArtifactSource;
use crate::error::{FetchError, ListingError};
use crate::path::ListedUpload;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Directory holding converted artifacts and the metadata file.
pub const UPLOAD_HTML_DIR: &str = "upload-html";

/// Consolidated metadata file name inside [`UPLOAD_HTML_DIR`].
pub const METADATA_FILE: &str = "metadata.json";

/// One `metadata.json` entry.
#[derive(Debug, Deserialize)]
struct MetadataEntry {
    navigation: Vec<String>,
    #[serde(default)]
    path: Option<String>,
}

/// Reads the listing from `metadata.json` and artifacts from the same tree.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn metadata_path(&self) -> PathBuf {
        self.root.join(UPLOAD_HTML_DIR).join(METADATA_FILE)
    }

    /// Resolve a root-relative location, refusing anything that climbs out of the root.
    fn resolve(&self, location: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(location);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if !contained || location.is_empty() {
            return Err(FetchError::OutsideRoot(location.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ArtifactSource for DirectorySource {
    async fn list(&self) -> Result<Vec<ListedUpload>, ListingError> {
        let metadata_path = self.metadata_path();

        let content = match tokio::fs::read_to_string(&metadata_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No metadata at {}, library is empty", metadata_path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(ListingError::Io {
                    path: metadata_path,
                    source,
                });
            }
        };

        // BTreeMap keeps the listing sorted by file name.
        let metadata: BTreeMap<String, MetadataEntry> =
            serde_json::from_str(&content).map_err(|source| ListingError::Parse {
                origin: metadata_path.display().to_string(),
                source,
            })?;

        let mut uploads = Vec::with_capacity(metadata.len());
        for (filename, entry) in metadata {
            let location = entry
                .path
                .unwrap_or_else(|| format!("{UPLOAD_HTML_DIR}/{filename}"));

            let exists = match self.resolve(&location) {
                Ok(path) => tokio::fs::try_exists(&path).await.unwrap_or(false),
                Err(_) => false,
            };
            if !exists {
                tracing::warn!(
                    "Metadata exists for {} but file not found at '{}'",
                    filename,
                    location
                );
                continue;
            }

            uploads.push(ListedUpload {
                navigation: entry.navigation,
                location,
            });
        }

        tracing::debug!("Listed {} uploads from {}", uploads.len(), self.root.display());
        Ok(uploads)
    }

    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let path = self.resolve(location)?;
        let bytes = tokio::fs::read(&path).await.map_err(|source| FetchError::Io {
            location: location.to_string(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}
