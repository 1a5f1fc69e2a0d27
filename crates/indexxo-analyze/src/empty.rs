//! Empty file and empty folder detection.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;

use indexxo_core::Entry;
use indexxo_index::IndexStore;

/// Zero-byte files and childless folders found in one pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyReport<'a> {
    /// Files whose size is zero.
    pub files: Vec<&'a Entry>,
    /// Folders and spaces without any indexed child.
    pub folders: Vec<&'a Entry>,
}

impl<'a> EmptyReport<'a> {
    /// Collect both kinds of empty entries from `index`.
    pub fn find(index: &'a IndexStore) -> Self {
        Self {
            files: find_empty_files(index),
            folders: find_empty_folders(index),
        }
    }

    /// Total number of empty entries.
    pub fn count(&self) -> usize {
        self.files.len() + self.folders.len()
    }
}

/// Files of zero bytes, in index order.
pub fn find_empty_files(index: &IndexStore) -> Vec<&Entry> {
    index
        .entries()
        .filter(|entry| !entry.is_dir() && entry.size == 0)
        .collect()
}

/// Folders that no indexed entry names as its parent.
///
/// A folder holding only zero-byte files is not empty. A folder whose
/// children were all ignored during the walk is.
pub fn find_empty_folders(index: &IndexStore) -> Vec<&Entry> {
    let parents: HashSet<&Path> = index.entries().filter_map(Entry::parent).collect();

    index
        .entries()
        .filter(|entry| entry.is_dir() && !parents.contains(entry.path.as_path()))
        .collect()
}
