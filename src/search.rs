//! Word search over a file tree
//!
//! Every search builds a fresh index from scratch, performs one lookup and
//! throws the index away. Nothing is cached between searches, so results
//! always reflect the tree as it is when the search runs.

use crate::error::SearchError;
use crate::index::{CancelToken, Hasher, HasherConfig};
use crate::tree::FileTree;
use tracing::debug;

/// Validate a raw query before searching
///
/// Trims surrounding whitespace and rejects queries that end up empty.
pub fn parse_query(raw: &str) -> Result<&str, SearchError> {
    let word = raw.trim();
    if word.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Ok(word)
}

/// Answers "which files contain this word" for a file tree
pub struct Searcher<T> {
    tree: T,
    config: HasherConfig,
    cancel: Option<CancelToken>,
}

impl<T: FileTree> Searcher<T> {
    pub fn new(tree: T) -> Self {
        Self {
            tree,
            config: HasherConfig::default(),
            cancel: None,
        }
    }

    pub fn with_config(mut self, config: HasherConfig) -> Self {
        self.config = config;
        self
    }

    /// Abort in-progress and future searches when `cancel` is triggered
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    /// Files containing `word`, in no particular order
    ///
    /// The word is trimmed but otherwise matched exactly, case included.
    /// An unknown word gives an empty list, not an error.
    pub fn search(&self, word: &str) -> Result<Vec<String>, SearchError> {
        let word = word.trim();

        let mut hasher = Hasher::new(self.config);
        if let Some(cancel) = &self.cancel {
            hasher = hasher.with_cancel(cancel.clone());
        }

        let index = hasher.build(&self.tree)?;
        let files = index.files_containing(word);
        debug!(word, matches = files.len(), "search complete");
        Ok(files)
    }
}
