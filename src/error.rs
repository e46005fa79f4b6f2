//! Domain error types. Application edges (config, startup) use `anyhow` instead.

use std::path::PathBuf;
use thiserror::Error;

/// A navigation path that cannot locate a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// No labels at all.
    #[error("navigation path is empty")]
    Empty,
    /// Only a root label; a document needs at least one more level.
    #[error("navigation path has depth {depth}, expected at least 2 labels")]
    TooShallow { depth: usize },
    /// A label that is empty after trimming.
    #[error("navigation path label {position} is blank")]
    BlankLabel { position: usize },
}

/// Error returned when a path cannot be merged into the category tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error(transparent)]
    Malformed(#[from] PathError),
    /// An intermediate label names an existing document, which has no children.
    #[error("'{label}' is a document and cannot contain '{child}'")]
    DocumentInPath { label: String, child: String },
}

/// Error returned when an artifact body cannot be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("artifact location '{0}' escapes the library root")]
    OutsideRoot(String),
    #[error("failed to read artifact '{location}': {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request for artifact '{location}' failed: {source}")]
    Http {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("artifact '{location}' returned HTTP {status}")]
    Status { location: String, status: u16 },
}

/// Error returned when the upload listing cannot be obtained.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("failed to read listing at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse listing at {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("listing request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("listing request returned HTTP {0}")]
    Status(u16),
}
