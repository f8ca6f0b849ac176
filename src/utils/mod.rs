//! Utility functions shared across wordsearch
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file in the per-user data directory
//! - [`progress`] - Spinner that compiles to a no-op without the `progress` feature
//! - [`tokenizer`] - Word extraction
//!
//! ```no_run
//! use wordsearch::utils::tokenize;
//!
//! let words: Vec<&str> = tokenize("foo-bar_baz 123").collect();
//! // Returns: ["foo", "bar", "baz", "123"]
//! ```

pub mod app_data;
pub mod progress;
pub mod tokenizer;

pub use app_data::*;
pub use tokenizer::*;
