use super::{join, EntryKind, FileTree, TreeEntry, ROOT};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor, Read};
use std::sync::Arc;

#[derive(Debug, Clone)]
enum MemoryFile {
    Contents(Arc<[u8]>),
    /// Opening fails
    Unreadable,
    /// Opening succeeds but reading fails
    BrokenRead,
}

/// An in-memory file tree
///
/// Directories are implied by file paths: adding `docs/api/a.md` makes
/// `docs` and `docs/api` listable.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    files: BTreeMap<String, MemoryFile>,
    locked_dirs: BTreeSet<String>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given contents
    pub fn with_file(mut self, path: impl Into<String>, contents: impl AsRef<[u8]>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add a file that exists but cannot be opened
    pub fn with_unreadable(mut self, path: impl Into<String>) -> Self {
        self.files.insert(normalize(path.into()), MemoryFile::Unreadable);
        self
    }

    /// Add a file that opens but fails partway through reading
    pub fn with_broken_read(mut self, path: impl Into<String>) -> Self {
        self.files.insert(normalize(path.into()), MemoryFile::BrokenRead);
        self
    }

    /// Make a directory fail to list
    pub fn with_unreadable_dir(mut self, path: impl Into<String>) -> Self {
        self.locked_dirs.insert(normalize(path.into()));
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, contents: impl AsRef<[u8]>) {
        self.files.insert(
            normalize(path.into()),
            MemoryFile::Contents(Arc::from(contents.as_ref())),
        );
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn normalize(path: String) -> String {
    path.trim_start_matches("./").trim_matches('/').to_string()
}

impl FileTree for MemoryTree {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + Send + '_>> {
        match self.files.get(&normalize(path.to_string())) {
            Some(MemoryFile::Contents(bytes)) => Ok(Box::new(Cursor::new(bytes.clone()))),
            Some(MemoryFile::Unreadable) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{path} is not readable"),
            )),
            Some(MemoryFile::BrokenRead) => Ok(Box::new(BrokenReader)),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{path} does not exist"),
            )),
        }
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<TreeEntry>> {
        let dir = if path == ROOT {
            String::new()
        } else {
            normalize(path.to_string())
        };

        if self.locked_dirs.contains(&dir) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{path} is not readable"),
            ));
        }
        if self.files.contains_key(&dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{path} is a file"),
            ));
        }

        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        };

        // child name -> kind; a name seen both as file and dir prefix is a dir
        let mut children: BTreeMap<&str, EntryKind> = BTreeMap::new();
        for file_path in self.files.keys() {
            let Some(rest) = file_path.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((child, _)) => {
                    children.insert(child, EntryKind::Dir);
                }
                None => {
                    children.entry(rest).or_insert(EntryKind::File);
                }
            }
        }

        if children.is_empty() && !dir.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{path} does not exist"),
            ));
        }

        Ok(children
            .into_iter()
            .map(|(name, kind)| TreeEntry::new(join(&dir, name), kind))
            .collect())
    }
}

struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "read interrupted"))
    }
}
