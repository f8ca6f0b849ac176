//! Error types for wordsearch
//!
//! Every failure inside a search is fatal to that search. The hierarchy is:
//! - `EnumerationError`: the file tree could not be walked
//! - `FileReadError`: one file could not be opened or fully read
//! - `BuildError`: anything that stops an index build (wraps the two above)
//! - `SearchError`: what callers of `Searcher::search` see
//!
//! All of them keep the underlying `io::Error` as their source.

use std::io;
use thiserror::Error;

/// A directory in the file tree could not be listed
#[derive(Error, Debug)]
#[error("Failed to read directory '{dir}': {source}")]
pub struct EnumerationError {
    pub dir: String,
    #[source]
    pub source: io::Error,
}

/// A file could not be opened or its contents could not be fully read
#[derive(Error, Debug)]
pub enum FileReadError {
    #[error("Failed to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl FileReadError {
    /// Path of the file that failed
    pub fn path(&self) -> &str {
        match self {
            FileReadError::Open { path, .. } | FileReadError::Read { path, .. } => path,
        }
    }
}

/// Index build failures
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Enumeration(#[from] EnumerationError),

    #[error(transparent)]
    FileRead(#[from] FileReadError),

    /// The build was stopped through its cancellation token
    #[error("Index build cancelled")]
    Cancelled,

    #[error("Concurrency limit must be at least 1")]
    InvalidConcurrency,

    /// The worker pool could not be started
    #[error("Failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors returned from a search
#[derive(Error, Debug)]
pub enum SearchError {
    /// The index could not be built, so no lookup was made
    #[error("Could not build index: {0}")]
    Build(#[from] BuildError),

    /// The query was empty after trimming
    #[error("Search query is empty")]
    EmptyQuery,
}

impl SearchError {
    pub fn is_build_failure(&self) -> bool {
        matches!(self, SearchError::Build(_))
    }

    pub fn is_invalid_query(&self) -> bool {
        matches!(self, SearchError::EmptyQuery)
    }
}
