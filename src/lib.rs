//! # wordsearch
//!
//! Finds which files in a tree contain a given word.
//!
//! Each search walks the whole tree, reads every file on a bounded worker
//! pool, splits the contents into words and builds a word -> files index,
//! then answers a single lookup from it.
//!
//! ## Architecture
//!
//! - [`tree`] - Readable file trees (on disk or in memory)
//! - [`index`] - File enumeration and concurrent index building
//! - [`search`] - One-shot search over a tree
//! - [`error`] - Error types
//! - [`output`] - Result formatting for the CLI
//! - [`utils`] - Tokenizer, configuration, progress display
//!
//! ## Quick Start
//!
//! ```no_run
//! use wordsearch::search::Searcher;
//! use wordsearch::tree::DirTree;
//!
//! let searcher = Searcher::new(DirTree::new("docs").unwrap());
//! for file in searcher.search("hello").unwrap() {
//!     println!("{}", file);
//! }
//! ```
//!
//! ## Words
//!
//! A word is a maximal run of Unicode letters and decimal digits. Every other
//! character separates words, including `_` and `-`, so `foo-bar_baz` holds
//! the words `foo`, `bar` and `baz`. Matching is exact and case-sensitive.

pub mod error;
pub mod index;
pub mod output;
pub mod search;
pub mod tree;
pub mod utils;

pub use error::{BuildError, EnumerationError, FileReadError, SearchError};
pub use search::{parse_query, Searcher};
