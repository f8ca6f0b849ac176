use super::{join, EntryKind, FileTree, TreeEntry, ROOT};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file tree backed by a directory on disk
#[derive(Debug, Clone)]
pub struct DirTree {
    root: PathBuf,
}

impl DirTree {
    /// Open a directory as a file tree
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", root.display()),
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let mut resolved = self.root.clone();
        // Tree paths always use '/', whatever the platform separator is
        for part in path.split('/') {
            match part {
                "" | ROOT => {}
                ".." => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("path {path:?} escapes the tree root"),
                    ));
                }
                _ => resolved.push(part),
            }
        }
        Ok(resolved)
    }
}

impl FileTree for DirTree {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + Send + '_>> {
        let file = File::open(self.resolve(path)?)?;
        Ok(Box::new(file))
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(self.resolve(path)?)? {
            let entry = entry?;
            // A lossy name would not resolve back to the file, so skip it
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    debug!(dir = path, name = ?raw, "skipping non-UTF-8 file name");
                    continue;
                }
            };
            // file_type() does not follow symlinks
            let file_type = entry.file_type()?;
            let kind = if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::Other
            };
            entries.push(TreeEntry::new(join(path, &name), kind));
        }

        // Lexical order, so walks are reproducible across runs
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}
