//! Word index: enumeration, concurrent building and lookup

pub mod enumerate;
pub mod hasher;
pub mod types;

pub use enumerate::{list_files, list_files_cancellable};
pub use hasher::{Hasher, WordIndex};
pub use types::*;
