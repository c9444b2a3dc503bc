//! Fragment discovery and decoding.
//!
//! Loading is all-or-nothing: the first file that fails to read or decode
//! aborts the whole load, so callers never see a partial fragment set.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use ulog_types::{Fragment, Node};
use walkdir::WalkDir;

use crate::error::{FragmentError, FragmentResult};
use crate::ticket::ticket_for_path;

/// Name of the merged-tree snapshot a run may leave in the fragment directory.
/// It is never picked up as a fragment.
pub const MERGED_SNAPSHOT_NAME: &str = "merged-changes.json";

/// List the fragment files directly inside `dir`, sorted by file name.
///
/// Only regular files (or links to them) ending in `.json` count; hidden
/// files and subdirectories are skipped. A missing directory has no
/// fragments. An entry that cannot be inspected, such as a dangling link,
/// is an error only if its name marks it as a fragment.
pub fn discover(dir: &Path) -> FragmentResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "fragment directory does not exist");
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() > 0 && !err.path().is_some_and(is_fragment_path) => {
                debug!(error = %err, "skipping unreadable non-fragment entry");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if entry.file_type().is_file() && is_fragment_path(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    debug!(dir = %dir.display(), count = paths.len(), "discovered fragments");
    Ok(paths)
}

fn is_fragment_path(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .is_some_and(|name| {
            !name.starts_with('.') && name.ends_with(".json") && name != MERGED_SNAPSHOT_NAME
        })
}

/// Read and decode a single fragment.
pub fn load_fragment(path: &Path) -> FragmentResult<Fragment> {
    let raw = fs::read(path).map_err(|source| FragmentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: serde_json::Value =
        serde_json::from_slice(&raw).map_err(|source| FragmentError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    let tree = Node::from_fragment_json(value).map_err(|source| FragmentError::NotAnObject {
        path: path.to_path_buf(),
        source,
    })?;

    let ticket = ticket_for_path(path);
    debug!(path = %path.display(), ticket = ?ticket, "loaded fragment");
    Ok(Fragment::new(path, ticket, tree))
}

/// Discover and load every fragment in `dir`, in discovery order.
pub fn load_dir(dir: &Path) -> FragmentResult<Vec<Fragment>> {
    discover(dir)?
        .iter()
        .map(|path| load_fragment(path))
        .collect()
}
