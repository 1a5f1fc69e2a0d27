//! Discovery statistics.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Summary statistics for one discovery walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryStats {
    /// Total size of the space in bytes.
    pub total_size: u64,
    /// Number of file entries produced.
    pub total_files: u64,
    /// Number of folder entries produced, root included.
    pub total_folders: u64,
    /// Deepest level reached below the root.
    pub max_depth: u32,
    /// Largest file (path, size).
    pub largest_file: Option<(PathBuf, u64)>,
    /// Wall time spent walking and aggregating.
    pub elapsed: Duration,
}

impl DiscoveryStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats with a file entry.
    pub fn record_file(&mut self, path: &Path, size: u64, depth: u32) {
        self.total_files += 1;
        self.max_depth = self.max_depth.max(depth);

        if self.largest_file.as_ref().is_none_or(|(_, s)| size > *s) {
            self.largest_file = Some((path.to_path_buf(), size));
        }
    }

    /// Record a folder.
    pub fn record_folder(&mut self, depth: u32) {
        self.total_folders += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Total number of entries produced.
    pub fn total_entries(&self) -> u64 {
        self.total_files + self.total_folders
    }
}
