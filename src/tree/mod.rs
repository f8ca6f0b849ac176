//! Readable file trees
//!
//! The indexer never touches the filesystem directly. It reads through a
//! [`FileTree`], which exposes two operations: list a directory and open a
//! file. Paths are slash-separated and relative to the tree root, and `"."`
//! names the root itself.
//!
//! - [`DirTree`] - a directory on disk
//! - [`MemoryTree`] - files held in memory (embedded content, tests)

mod dir;
mod memory;

pub use dir::DirTree;
pub use memory::MemoryTree;

use std::io::{self, Read};
use std::sync::Arc;

/// Path of the tree root
pub const ROOT: &str = ".";

/// What a directory entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks, sockets, devices and anything else that is not indexed
    Other,
}

/// A single entry returned by [`FileTree::read_dir`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path relative to the tree root
    pub path: String,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// A read-only tree of files
pub trait FileTree: Send + Sync {
    /// Open a file for reading
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + Send + '_>>;

    /// List the direct children of a directory
    fn read_dir(&self, path: &str) -> io::Result<Vec<TreeEntry>>;
}

impl<T: FileTree + ?Sized> FileTree for &T {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + Send + '_>> {
        (**self).open(path)
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<TreeEntry>> {
        (**self).read_dir(path)
    }
}

impl<T: FileTree + ?Sized> FileTree for Arc<T> {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + Send + '_>> {
        (**self).open(path)
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<TreeEntry>> {
        (**self).read_dir(path)
    }
}

/// Join a directory path and a child name
pub(crate) fn join(dir: &str, name: &str) -> String {
    if dir == ROOT || dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir.trim_end_matches('/'), name)
    }
}
