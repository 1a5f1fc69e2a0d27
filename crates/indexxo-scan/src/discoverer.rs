//! JWalk-based bottom-up discovery walk.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use jwalk::{Parallelism, WalkDir};
use tracing::{info, trace};

use indexxo_core::{Entry, EntryKind, FileTypes, IndexError, SpaceConfig};

use crate::stats::DiscoveryStats;

/// Result of walking one space.
#[derive(Debug, Clone)]
pub struct Discovery {
    /// The space root entry, already promoted to [`EntryKind::Space`].
    pub root: Entry,

    /// Every produced entry keyed by path, root included.
    ///
    /// Children are always inserted before the folder containing them.
    pub entries: IndexMap<PathBuf, Entry>,

    /// Summary statistics.
    pub stats: DiscoveryStats,
}

/// Walks a space root and builds its entries.
///
/// The walk is serial and blocking. Ignored paths are pruned before they
/// are entered, so no folder ever aggregates an ignored child.
#[derive(Debug, Clone)]
pub struct Discoverer {
    file_types: Arc<FileTypes>,
}

impl Discoverer {
    /// Create a discoverer that classifies files with `file_types`.
    pub fn new(file_types: FileTypes) -> Self {
        Self {
            file_types: Arc::new(file_types),
        }
    }

    /// The classifier used for file entries.
    pub fn file_types(&self) -> &FileTypes {
        &self.file_types
    }

    /// Walk the space described by `config`.
    pub fn discover(&self, config: &SpaceConfig) -> Result<Discovery, IndexError> {
        let start = Instant::now();
        let root = config
            .root
            .canonicalize()
            .map_err(|e| IndexError::io(&config.root, e))?;

        let metadata = std::fs::metadata(&root).map_err(|e| IndexError::io(&root, e))?;
        if !metadata.is_dir() {
            return Err(IndexError::NotADirectory { path: root });
        }

        let ignore = normalize_ignore(&config.ignore);
        if ignore.contains(&root) {
            return Err(IndexError::RootIgnored { path: root });
        }

        let mut stats = DiscoveryStats::new();
        let mut children_by_parent = self.collect_children(&root, Arc::new(ignore))?;

        let mut entries = IndexMap::new();
        self.build_folder(&root, 0, &mut children_by_parent, &mut entries, &mut stats)?;

        let root_entry = entries
            .get_mut(&root)
            .ok_or_else(|| IndexError::MissingEntry { path: root.clone() })?;
        root_entry.kind = EntryKind::Space;
        let root_entry = root_entry.clone();

        stats.total_size = root_entry.size;
        stats.elapsed = start.elapsed();

        info!(
            root = %root.display(),
            files = stats.total_files,
            folders = stats.total_folders,
            size = stats.total_size,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "discovered space"
        );

        Ok(Discovery {
            root: root_entry,
            entries,
            stats,
        })
    }

    /// Collect every non-ignored path below `root`, grouped by parent.
    fn collect_children(
        &self,
        root: &Path,
        ignore: Arc<HashSet<PathBuf>>,
    ) -> Result<HashMap<PathBuf, Vec<ChildInfo>>, IndexError> {
        let walker = WalkDir::new(root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .min_depth(0)
            .process_read_dir(move |_depth, _path, _state, children| {
                // Dropping an ignored directory here also stops the walk from entering it
                children.retain(|child| match child {
                    Ok(entry) => !ignore.contains(&entry.path()),
                    Err(_) => true,
                });
            });

        let mut children_by_parent: HashMap<PathBuf, Vec<ChildInfo>> = HashMap::new();

        for result in walker {
            let mut entry = result.map_err(|err| walk_error(err, root))?;
            // jwalk still yields a directory it could not list
            if let Some(err) = entry.read_children_error.take() {
                return Err(walk_error(err, &entry.path()));
            }
            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path();
            let Some(parent) = path.parent().map(Path::to_path_buf) else {
                continue;
            };
            let depth = entry.depth() as u32;

            let info = if entry.file_type().is_dir() {
                ChildInfo {
                    path,
                    size: 0,
                    depth,
                    is_dir: true,
                }
            } else {
                // Symlinks are not followed, so this is the link's own size
                let metadata = entry.metadata().map_err(|err| walk_error(err, &path))?;
                ChildInfo {
                    path,
                    size: metadata.len(),
                    depth,
                    is_dir: false,
                }
            };

            children_by_parent.entry(parent).or_default().push(info);
        }

        Ok(children_by_parent)
    }

    /// Build a folder entry after building all of its children.
    fn build_folder(
        &self,
        path: &Path,
        depth: u32,
        children_by_parent: &mut HashMap<PathBuf, Vec<ChildInfo>>,
        entries: &mut IndexMap<PathBuf, Entry>,
        stats: &mut DiscoveryStats,
    ) -> Result<(), IndexError> {
        let children = children_by_parent.remove(path).unwrap_or_default();
        let mut total_size: u64 = 0;

        for child in children {
            if child.is_dir {
                self.build_folder(&child.path, child.depth, children_by_parent, entries, stats)?;
                let folder = entries
                    .get(&child.path)
                    .ok_or_else(|| IndexError::MissingEntry {
                        path: child.path.clone(),
                    })?;
                total_size += folder.size;
            } else {
                stats.record_file(&child.path, child.size, child.depth);
                let file = Entry::file(child.path, child.size, &self.file_types);
                total_size += file.size;
                entries.insert(file.path.clone(), file);
            }
        }

        trace!(path = %path.display(), size = total_size, "aggregated folder");
        stats.record_folder(depth);
        entries.insert(path.to_path_buf(), Entry::folder(path, total_size));
        Ok(())
    }
}

impl Default for Discoverer {
    fn default() -> Self {
        Self::new(FileTypes::default())
    }
}

/// A walked path waiting for its parent to be built.
struct ChildInfo {
    path: PathBuf,
    size: u64,
    depth: u32,
    is_dir: bool,
}

/// Ignore paths are compared against canonical walk paths.
///
/// Only the parent is resolved, so an ignored symlink names the link itself
/// and never the directory it points to.
fn normalize_ignore(paths: &[PathBuf]) -> HashSet<PathBuf> {
    paths.iter().map(|p| normalize_ignored_path(p)).collect()
}

fn normalize_ignored_path(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => parent
            .canonicalize()
            .map(|dir| dir.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.canonicalize().unwrap_or_else(|_| path.to_path_buf()),
    }
}

fn walk_error(err: jwalk::Error, fallback: &Path) -> IndexError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf());
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other(message));
    IndexError::io(path, source)
}
