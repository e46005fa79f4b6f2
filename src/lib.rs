//! Incremental hierarchical index and search engine for converted documents.
//!
//! Navigation paths (`Root > Category > Title`) are merged into a per-root
//! category forest, artifact bodies are fetched in bounded batches into an
//! in-memory content index, and both structures answer queries: title
//! filtering over the forest and full-text search with highlighted snippets.

pub mod config;
pub mod error;
pub mod format;
pub mod indexer;
pub mod path;
pub mod search;
pub mod server;
pub mod source;
pub mod state;
pub mod tools;
pub mod tracing;
pub mod tree;

pub use config::Config;
pub use error::{FetchError, ListingError, MergeError, PathError};
pub use indexer::{ContentIndex, IndexEntry, IndexingSnapshot, IndexingState};
pub use path::{ListedUpload, NavigationPath, UploadRecord};
pub use search::{ContentSearch, MatchType, SearchResult, TreeView};
pub use server::LibraryServer;
pub use source::{ArtifactSource, DirectorySource, HttpSource};
pub use state::LibraryState;
pub use tree::{CategoryTree, Forest, MergeOutcome, TreeNode};
