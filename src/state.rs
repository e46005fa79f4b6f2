//! Shared library state: the category forest, the content index and the source feeding both.
//!
//! This is the central coordination point for:
//! - Loading the upload listing and merging it into the forest
//! - Running content indexing in the background (tracked tasks)
//! - Reacting to newly registered documents
//! - Answering title and content queries

use crate::config::Config;
use crate::error::{ListingError, MergeError};
use crate::indexer::{ContentIndex, IndexingSnapshot};
use crate::path::{NavigationPath, UploadRecord};
use crate::search::{ContentSearch, SnippetOptions, TreeView, filter_tree};
use crate::source::ArtifactSource;
use crate::tree::{Forest, MergeOutcome};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tokio_util::task::TaskTracker;

/// Result of registering one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub path: NavigationPath,
    pub location: String,
    pub outcome: MergeOutcome,
}

/// Process-wide library context. Single writer for the forest, many readers.
pub struct LibraryState {
    forest: RwLock<Forest>,
    index: ContentIndex,
    source: Arc<dyn ArtifactSource>,
    snippet: SnippetOptions,
    tasks: TaskTracker,
}

impl std::fmt::Debug for LibraryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryState")
            .field("source", &self.source.describe())
            .field("documents", &self.forest().document_count())
            .field("indexing", &self.index.state().snapshot())
            .finish()
    }
}

impl LibraryState {
    pub fn new(source: Arc<dyn ArtifactSource>, config: &Config) -> Self {
        Self {
            forest: RwLock::new(Forest::new()),
            index: ContentIndex::new(config.batch_size),
            source,
            snippet: config.snippet_options(),
            tasks: TaskTracker::new(),
        }
    }

    /// Read access to the forest.
    pub fn forest(&self) -> RwLockReadGuard<'_, Forest> {
        self.forest.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    /// List uploads and merge them into the forest.
    ///
    /// Malformed or conflicting records are skipped and logged. Returns the
    /// records that added a new document, ready for indexing. A listing
    /// failure leaves the forest as it was.
    pub async fn load(&self) -> Result<Vec<UploadRecord>, ListingError> {
        let listed = self.source.list().await.inspect_err(|e| {
            tracing::error!("Failed to list uploads from {}: {}", self.source.describe(), e);
        })?;

        let total = listed.len();
        let mut inserted = Vec::new();
        {
            let mut forest = self.forest.write().unwrap_or_else(PoisonError::into_inner);
            for upload in listed {
                let location = upload.location.clone();
                let record = match upload.into_record() {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::warn!("Skipping upload '{}': {}", location, e);
                        continue;
                    }
                };

                match forest.merge(&record.path, &record.location) {
                    Ok(MergeOutcome::Inserted) => inserted.push(record),
                    Ok(MergeOutcome::Existing) => {
                        tracing::debug!("'{}' already in tree", record.path);
                    }
                    Ok(MergeOutcome::CategoryExists) => {
                        tracing::warn!("Skipping upload '{}': '{}' is a category", location, record.path);
                    }
                    Err(e) => tracing::warn!("Skipping upload '{}': {}", location, e),
                }
            }

            let dirty = forest.take_dirty();
            if !dirty.is_empty() {
                tracing::debug!("Trees changed: {}", dirty.join(", "));
            }
        }

        tracing::info!(
            "Loaded {} of {} listed uploads as new documents",
            inserted.len(),
            total
        );
        Ok(inserted)
    }

    /// Index `records` and mark the content index complete.
    pub async fn build_index(&self, records: &[UploadRecord]) {
        self.index.build(self.source.as_ref(), records).await;
    }

    /// Load the library, then index it in a background task.
    ///
    /// A listing failure is logged and indexing completes over nothing, so
    /// title search and content search both stay answerable.
    pub async fn start(self: &Arc<Self>) {
        let records = self.load().await.unwrap_or_default();

        let state = Arc::clone(self);
        self.tasks.spawn(async move {
            state.build_index(&records).await;
        });
    }

    /// Re-list the source, merge anything new and index just those documents.
    pub async fn reload(self: &Arc<Self>) -> Result<usize, ListingError> {
        let records = self.load().await?;
        let count = records.len();
        for record in records {
            self.spawn_index_one(record);
        }
        Ok(count)
    }

    /// React to a newly uploaded document.
    ///
    /// Merges it into the forest and, when it is new, indexes it in the
    /// background. Without an explicit location the artifact file name is
    /// derived from the path.
    pub fn register(
        self: &Arc<Self>,
        path: NavigationPath,
        location: Option<String>,
    ) -> Result<Registration, MergeError> {
        let location = location.unwrap_or_else(|| {
            format!("{}/{}", crate::source::UPLOAD_HTML_DIR, path.artifact_file_name())
        });

        let outcome = {
            let mut forest = self.forest.write().unwrap_or_else(PoisonError::into_inner);
            let outcome = forest.merge(&path, &location)?;
            forest.take_dirty();
            outcome
        };

        match outcome {
            MergeOutcome::Inserted => {
                tracing::info!("Registered '{}' at {}", path, location);
                self.spawn_index_one(UploadRecord {
                    path: path.clone(),
                    location: location.clone(),
                });
            }
            MergeOutcome::Existing => {
                tracing::info!("'{}' already exists, keeping the first upload", path);
            }
            MergeOutcome::CategoryExists => {
                tracing::warn!("'{}' names an existing category, nothing registered", path);
            }
        }

        Ok(Registration {
            path,
            location,
            outcome,
        })
    }

    /// Title-mode query.
    pub fn search_titles(&self, query: &str) -> TreeView {
        filter_tree(&self.forest(), query)
    }

    /// Content-mode query.
    pub fn search_content(&self, query: &str) -> ContentSearch {
        self.index.search(query, self.snippet)
    }

    pub fn indexing_status(&self) -> IndexingSnapshot {
        self.index.state().snapshot()
    }

    /// Wait for every background indexing task spawned so far.
    pub async fn wait_idle(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }

    fn spawn_index_one(self: &Arc<Self>, record: UploadRecord) {
        let state = Arc::clone(self);
        self.tasks.spawn(async move {
            state.index.index_one(state.source.as_ref(), &record).await;
        });
    }
}
