//! Search over the document library.
//!
//! Two modes share this module: title filtering over the category forest
//! (synchronous, always available) and full-text search over the content
//! index (available once indexing completes), plus the text normalization and
//! snippet construction they rely on.

pub mod content;
pub mod snippet;
pub mod text;
pub mod title;

pub use content::{ContentSearch, MatchType, SearchResult, search_entries};
pub use snippet::{ELLIPSIS, HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN, SnippetOptions};
pub use title::{NodeKind, NodeView, RootView, TreeView, filter_tree};
