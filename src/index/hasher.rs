//! Concurrent word index construction
//!
//! A [`Hasher`] enumerates a file tree, then reads and tokenizes the files on
//! a worker pool sized to the configured concurrency limit. Every worker
//! inserts into one shared [`WordIndex`], whose map is guarded by a single
//! mutex.
//!
//! Failure handling follows a "first error wins" rule: the first error any
//! worker records becomes the result of the build, and files that have not
//! been started yet are skipped. The index is only handed back when every
//! file was indexed, so a partially built index is never visible.

use crate::error::{BuildError, FileReadError};
use crate::index::enumerate::list_files_cancellable;
use crate::index::types::{BuildStats, CancelToken, HasherConfig};
use crate::tree::FileTree;
use crate::utils::{decode_text, distinct_words};
use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use std::io::Read;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::debug;

/// Mapping from word to the set of files containing it
#[derive(Debug, Default)]
pub struct WordIndex {
    storage: Mutex<AHashMap<String, AHashSet<String>>>,
    stats: BuildStats,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, AHashMap<String, AHashSet<String>>> {
        // Inserts leave the map consistent even if a holder panicked
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record that `file` contains `word`
    pub fn add(&self, word: &str, file: &str) {
        let mut storage = self.storage();
        insert(&mut storage, word, file);
    }

    /// Record that `file` contains every word in `words`, under one lock
    pub fn add_all<'a>(&self, words: impl IntoIterator<Item = &'a str>, file: &str) {
        let mut storage = self.storage();
        for word in words {
            insert(&mut storage, word, file);
        }
    }

    /// Files containing `word`, in no particular order
    ///
    /// Returns an owned copy; an unknown word gives an empty list.
    pub fn files_containing(&self, word: &str) -> Vec<String> {
        self.storage()
            .get(word)
            .map(|files| files.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.storage().contains_key(word)
    }

    /// Number of distinct words
    pub fn word_count(&self) -> usize {
        self.storage().len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage().is_empty()
    }

    /// Counters from the build that produced this index
    pub fn stats(&self) -> BuildStats {
        self.stats
    }
}

fn insert(storage: &mut AHashMap<String, AHashSet<String>>, word: &str, file: &str) {
    match storage.get_mut(word) {
        Some(files) => {
            if !files.contains(file) {
                files.insert(file.to_string());
            }
        }
        None => {
            let mut files = AHashSet::new();
            files.insert(file.to_string());
            storage.insert(word.to_string(), files);
        }
    }
}

/// Holds the first error recorded by any worker
#[derive(Default)]
struct FirstError {
    failed: AtomicBool,
    error: Mutex<Option<BuildError>>,
}

impl FirstError {
    fn record(&self, err: BuildError) {
        let mut slot = self.error.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(err);
        }
        self.failed.store(true, Ordering::Release);
    }

    fn is_set(&self) -> bool {
        self.failed.load(Ordering::Acquire)
    }

    fn into_inner(self) -> Option<BuildError> {
        self.error.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds a [`WordIndex`] from a file tree
pub struct Hasher {
    index: WordIndex,
    config: HasherConfig,
    cancel: CancelToken,
}

impl Hasher {
    pub fn new(config: HasherConfig) -> Self {
        Self {
            index: WordIndex::new(),
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Stop the build early when `cancel` is triggered
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Index every file in `tree`
    ///
    /// Consumes the builder. On success the populated index is returned; on
    /// failure the partial index is dropped along with the builder.
    pub fn build<T: FileTree + ?Sized>(self, tree: &T) -> Result<WordIndex, BuildError> {
        let limit = self.config.concurrency_limit;
        if limit == 0 {
            return Err(BuildError::InvalidConcurrency);
        }
        if self.cancel.is_cancelled() {
            debug!("build cancelled before enumeration");
            return Err(BuildError::Cancelled);
        }

        let start = Instant::now();
        let Some(files) = list_files_cancellable(tree, &self.cancel)? else {
            debug!("build cancelled during enumeration");
            return Err(BuildError::Cancelled);
        };

        // Never more workers than files; the bound on open files is unchanged
        let threads = limit.min(files.len().max(1));
        debug!(
            files = files.len(),
            concurrency_limit = limit,
            threads,
            "building word index"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("wordsearch-hasher-{i}"))
            .build()?;

        let failure = FirstError::default();
        let indexed = AtomicUsize::new(0);

        // The pool has at most `limit` threads, so at most `limit` files are
        // open or being tokenized at once; the rest wait in the pool's queues.
        pool.install(|| {
            files.par_iter().for_each(|path| {
                if failure.is_set() {
                    return;
                }
                if self.cancel.is_cancelled() {
                    failure.record(BuildError::Cancelled);
                    return;
                }

                match self.index_file(tree, path) {
                    Ok(()) => {
                        indexed.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(err) => failure.record(err.into()),
                }
            });
        });

        if let Some(err) = failure.into_inner() {
            debug!(error = %err, "word index build failed");
            return Err(err);
        }

        let mut index = self.index;
        index.stats = BuildStats {
            files: indexed.into_inner(),
            words: index.word_count(),
        };
        debug!(
            files = index.stats.files,
            words = index.stats.words,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "word index built"
        );
        Ok(index)
    }

    fn index_file<T: FileTree + ?Sized>(&self, tree: &T, path: &str) -> Result<(), FileReadError> {
        let content = read_file(tree, path)?;
        let text = decode_text(&content);
        self.index.add_all(distinct_words(&text), path);
        Ok(())
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new(HasherConfig::default())
    }
}

/// Read a whole file into memory; the handle is closed before returning
fn read_file<T: FileTree + ?Sized>(tree: &T, path: &str) -> Result<Vec<u8>, FileReadError> {
    let mut reader = tree.open(path).map_err(|source| FileReadError::Open {
        path: path.to_string(),
        source,
    })?;

    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .map_err(|source| FileReadError::Read {
            path: path.to_string(),
            source,
        })?;
    Ok(content)
}
