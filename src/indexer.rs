//! Content indexing: fetch artifact bodies in bounded batches and keep their text searchable.
//!
//! Batches run strictly in sequence; fetches inside a batch run concurrently.
//! A failed fetch is recorded and skipped, never aborting the rest.

use crate::path::UploadRecord;
use crate::search::content::{ContentSearch, search_entries};
use crate::search::snippet::SnippetOptions;
use crate::search::text::normalize_markup;
use crate::source::ArtifactSource;
use futures::future::join_all;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::Instant;

/// Default number of concurrent fetches per batch.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// The searchable representation of one fetched artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub title: String,
    pub location: String,
    pub root_category: String,
    pub full_path: Vec<String>,
    /// Markup-free, lower-cased, whitespace-collapsed body text.
    pub normalized_text: String,
}

impl IndexEntry {
    pub fn new(record: &UploadRecord, markup: &str) -> Self {
        Self {
            title: record.path.title().to_string(),
            location: record.location.clone(),
            root_category: record.path.root().to_string(),
            full_path: record.path.labels().to_vec(),
            normalized_text: normalize_markup(markup),
        }
    }
}

/// Progress counters shared between the indexer and readers.
///
/// `complete` flips to true once and never reverts.
#[derive(Debug, Default)]
pub struct IndexingState {
    complete: AtomicBool,
    total: AtomicUsize,
    done: AtomicUsize,
    failed: Mutex<BTreeSet<String>>,
}

/// Point-in-time copy of [`IndexingState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexingSnapshot {
    pub complete: bool,
    pub total: usize,
    pub done: usize,
    pub failed: BTreeSet<String>,
}

impl IndexingState {
    pub fn is_complete(&self) -> bool {
        self.complete.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> IndexingSnapshot {
        IndexingSnapshot {
            complete: self.is_complete(),
            total: self.total.load(Ordering::Acquire),
            done: self.done.load(Ordering::Acquire),
            failed: self
                .failed
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }

    fn add_total(&self, count: usize) {
        self.total.fetch_add(count, Ordering::AcqRel);
    }

    fn record_done(&self) {
        self.done.fetch_add(1, Ordering::AcqRel);
    }

    fn record_failure(&self, location: &str) {
        self.failed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.to_string());
    }

    /// Returns true only for the call that actually completed indexing.
    fn mark_complete(&self) -> bool {
        !self.complete.swap(true, Ordering::AcqRel)
    }
}

/// The in-memory content index: entries plus progress.
///
/// Entry order follows fetch completion, not input order.
#[derive(Debug)]
pub struct ContentIndex {
    entries: RwLock<Vec<IndexEntry>>,
    state: IndexingState,
    batch_size: usize,
}

impl Default for ContentIndex {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl ContentIndex {
    /// Create an empty index. A batch size of zero is treated as one.
    pub fn new(batch_size: usize) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            state: IndexingState::default(),
            batch_size: batch_size.max(1),
        }
    }

    pub fn state(&self) -> &IndexingState {
        &self.state
    }

    /// Number of successfully indexed documents.
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch and index every record, `batch_size` at a time.
    ///
    /// Returns the entries added by this run. Marks indexing complete when all
    /// records have been attempted, including when there were none.
    pub async fn build(&self, source: &dyn ArtifactSource, records: &[UploadRecord]) -> Vec<IndexEntry> {
        let start = Instant::now();
        self.state.add_total(records.len());
        tracing::info!(
            "Indexing {} documents from {} in batches of {}",
            records.len(),
            source.describe(),
            self.batch_size
        );

        let mut added = Vec::with_capacity(records.len());
        for (n, batch) in records.chunks(self.batch_size).enumerate() {
            let settled = join_all(batch.iter().map(|record| self.index_record(source, record))).await;
            added.extend(settled.into_iter().flatten());

            let snapshot = self.state.snapshot();
            tracing::debug!(
                "Batch {} settled: {}/{} processed",
                n + 1,
                snapshot.done,
                snapshot.total
            );
        }

        if self.state.mark_complete() {
            let snapshot = self.state.snapshot();
            tracing::info!(
                "Content index ready: {} documents indexed, {} failed, in {:?}",
                self.len(),
                snapshot.failed.len(),
                start.elapsed()
            );
        }
        added
    }

    /// Index a single late-arriving document without touching completion.
    pub async fn index_one(&self, source: &dyn ArtifactSource, record: &UploadRecord) -> Option<IndexEntry> {
        self.state.add_total(1);
        self.index_record(source, record).await
    }

    /// Answer a content query, or report that indexing is still running.
    pub fn search(&self, query: &str, options: SnippetOptions) -> ContentSearch {
        if !self.state.is_complete() {
            let snapshot = self.state.snapshot();
            return ContentSearch::InProgress {
                done: snapshot.done,
                total: snapshot.total,
            };
        }
        ContentSearch::Results(search_entries(&self.read_entries(), query, options))
    }

    async fn index_record(&self, source: &dyn ArtifactSource, record: &UploadRecord) -> Option<IndexEntry> {
        let result = source.fetch(&record.location).await;

        let entry = match result {
            Ok(markup) => {
                let entry = IndexEntry::new(record, &markup);
                self.entries
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(entry.clone());
                tracing::debug!("Indexed '{}' ({})", record.path, record.location);
                Some(entry)
            }
            Err(e) => {
                tracing::warn!("Failed to index '{}': {}", record.path, e);
                self.state.record_failure(&record.location);
                None
            }
        };

        self.state.record_done();
        entry
    }

    fn read_entries(&self) -> std::sync::RwLockReadGuard<'_, Vec<IndexEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }
}
