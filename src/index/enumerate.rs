use crate::error::EnumerationError;
use crate::index::types::CancelToken;
use crate::tree::{EntryKind, FileTree, ROOT};
use std::ops::ControlFlow;
use tracing::trace;

/// List every regular file in a tree
///
/// Walks depth-first from the root, visiting children in the order the tree
/// lists them. Directories are descended into but not returned; symlinks and
/// other special entries are skipped. The first directory that cannot be
/// listed aborts the walk, and nothing collected so far is returned.
pub fn list_files<T: FileTree + ?Sized>(tree: &T) -> Result<Vec<String>, EnumerationError> {
    let mut files = Vec::new();
    walk(tree, ROOT, None, &mut files)?;
    trace!(files = files.len(), "enumerated file tree");
    Ok(files)
}

/// Like [`list_files`], but checks `cancel` before listing each directory
///
/// Returns `Ok(None)` if the token was triggered before the walk finished.
pub fn list_files_cancellable<T: FileTree + ?Sized>(
    tree: &T,
    cancel: &CancelToken,
) -> Result<Option<Vec<String>>, EnumerationError> {
    let mut files = Vec::new();
    if walk(tree, ROOT, Some(cancel), &mut files)?.is_break() {
        trace!(files = files.len(), "enumeration cancelled");
        return Ok(None);
    }
    trace!(files = files.len(), "enumerated file tree");
    Ok(Some(files))
}

fn walk<T: FileTree + ?Sized>(
    tree: &T,
    dir: &str,
    cancel: Option<&CancelToken>,
    files: &mut Vec<String>,
) -> Result<ControlFlow<()>, EnumerationError> {
    if cancel.is_some_and(CancelToken::is_cancelled) {
        return Ok(ControlFlow::Break(()));
    }

    let entries = tree.read_dir(dir).map_err(|source| EnumerationError {
        dir: dir.to_string(),
        source,
    })?;

    for entry in entries {
        match entry.kind {
            EntryKind::File => files.push(entry.path),
            EntryKind::Dir => {
                if walk(tree, &entry.path, cancel, files)?.is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
            EntryKind::Other => {}
        }
    }

    Ok(ControlFlow::Continue(()))
}
