//! Path-keyed entry store and space registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

use indexxo_core::{Entry, FileTypes, IndexError, SpaceConfig};
use indexxo_scan::{Discoverer, Discovery};

/// Direct members of a folder plus the entry one level above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderContent<'a> {
    /// Entry of the queried folder's parent, for breadcrumb navigation.
    pub parent: Option<&'a Entry>,
    /// Entries whose parent is the queried folder.
    pub content: Vec<&'a Entry>,
}

/// In-memory index of one or more spaces.
#[derive(Debug)]
pub struct IndexStore {
    entries: IndexMap<PathBuf, Arc<Entry>>,
    spaces: Vec<Arc<Entry>>,
    discoverer: Discoverer,
}

impl IndexStore {
    /// Create an empty index that classifies files with `file_types`.
    pub fn new(file_types: FileTypes) -> Self {
        Self::with_discoverer(Discoverer::new(file_types))
    }

    /// Create an empty index around an existing discoverer.
    pub fn with_discoverer(discoverer: Discoverer) -> Self {
        Self {
            entries: IndexMap::new(),
            spaces: Vec::new(),
            discoverer,
        }
    }

    /// Walk a space and merge its entries into the index.
    ///
    /// Entries already indexed at the same paths are replaced. Adding the
    /// same root twice walks it twice and registers it twice. Nothing is
    /// merged if the walk fails.
    pub fn add_space(&mut self, config: &SpaceConfig) -> Result<Arc<Entry>, IndexError> {
        let discovery = self.discoverer.discover(config)?;
        Ok(self.merge(discovery))
    }

    /// Merge a finished discovery and register its root as a space.
    pub fn merge(&mut self, discovery: Discovery) -> Arc<Entry> {
        let space = Arc::new(discovery.root);
        let count = discovery.entries.len();

        self.entries.reserve(count);
        for (path, entry) in discovery.entries {
            let entry = if path == space.path {
                Arc::clone(&space)
            } else {
                Arc::new(entry)
            };
            self.entries.insert(path, entry);
        }
        self.spaces.push(Arc::clone(&space));

        info!(
            root = %space.path.display(),
            entries = count,
            indexed = self.entries.len(),
            "added space"
        );
        space
    }

    /// Drop every entry at or below `root`.
    ///
    /// The space registry is left untouched, so a removed space is still
    /// listed by [`spaces`](Self::spaces). Use
    /// [`purge_space`](Self::purge_space) to drop both. Returns the number
    /// of entries removed.
    pub fn remove_space(&mut self, root: &Path) -> usize {
        let before = self.entries.len();
        self.entries.retain(|path, _| !path.starts_with(root));
        let removed = before - self.entries.len();

        info!(root = %root.display(), removed, "removed space entries");
        if self.spaces.iter().any(|s| s.path.starts_with(root)) {
            debug!(root = %root.display(), "space registry still lists removed root");
        }
        removed
    }

    /// Drop every entry and every registered space at or below `root`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_space(&mut self, root: &Path) -> usize {
        let removed = self.remove_space(root);
        self.spaces.retain(|space| !space.path.starts_with(root));
        removed
    }

    /// Registered spaces, in registration order.
    pub fn spaces(&self) -> &[Arc<Entry>] {
        &self.spaces
    }

    /// Look up an entry by exact path.
    pub fn find(&self, path: &Path) -> Option<&Entry> {
        self.entries.get(path).map(Arc::as_ref)
    }

    /// List the direct members of the folder at `path`.
    ///
    /// `parent` is the entry one level above `path`, not the entry at
    /// `path` itself.
    pub fn get_content(&self, path: &Path) -> FolderContent<'_> {
        let content = self
            .entries
            .values()
            .filter(|entry| entry.parent() == Some(path))
            .map(Arc::as_ref)
            .collect();

        FolderContent {
            parent: path.parent().and_then(|parent| self.find(parent)),
            content,
        }
    }

    /// Iterate over every indexed entry.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values().map(Arc::as_ref)
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The discoverer used by [`add_space`](Self::add_space).
    pub fn discoverer(&self) -> &Discoverer {
        &self.discoverer
    }
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new(FileTypes::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexxo_core::EntryKind;

    fn discovery(root: &str, files: &[(&str, u64)]) -> Discovery {
        let types = FileTypes::default();
        let mut entries = IndexMap::new();
        let mut total = 0;

        for (name, size) in files {
            let entry = Entry::file(Path::new(root).join(name), *size, &types);
            total += size;
            entries.insert(entry.path.clone(), entry);
        }

        let space = Entry::folder(root, total).into_space();
        entries.insert(space.path.clone(), space.clone());

        Discovery {
            root: space,
            entries,
            stats: Default::default(),
        }
    }

    #[test]
    fn test_merge_shares_space_entry() {
        let mut index = IndexStore::default();
        let space = index.merge(discovery("/s", &[("a.txt", 3), ("b.mp3", 4)]));

        assert_eq!(index.len(), 3);
        assert_eq!(space.size, 7);
        assert_eq!(index.find(Path::new("/s")), Some(space.as_ref()));
        assert!(Arc::ptr_eq(&index.spaces()[0], &space));
    }

    #[test]
    fn test_find_absent() {
        let index = IndexStore::default();
        assert!(index.find(Path::new("/nothing")).is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_content_and_parent() {
        let mut index = IndexStore::default();
        index.merge(discovery("/s", &[("a.txt", 3), ("b.mp3", 4)]));

        let listing = index.get_content(Path::new("/s"));
        let mut names: Vec<_> = listing.content.iter().map(|e| e.full_name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a.txt", "b.mp3"]);
        assert!(listing.parent.is_none());

        let nested = index.get_content(Path::new("/s/a.txt"));
        assert!(nested.content.is_empty());
        assert_eq!(nested.parent.map(|e| e.kind), Some(EntryKind::Space));
    }

    #[test]
    fn test_content_serializes_to_boundary_shape() {
        let mut index = IndexStore::default();
        index.merge(discovery("/s", &[("a.txt", 3)]));

        let json = serde_json::to_value(index.get_content(Path::new("/s"))).unwrap();
        assert!(json["parent"].is_null());
        assert_eq!(json["content"][0]["full_path"], "/s/a.txt");
    }

    #[test]
    fn test_remove_keeps_registry() {
        let mut index = IndexStore::default();
        index.merge(discovery("/s", &[("a.txt", 3)]));
        index.merge(discovery("/t", &[("b.txt", 5)]));

        assert_eq!(index.remove_space(Path::new("/s")), 2);
        assert!(index.find(Path::new("/s/a.txt")).is_none());
        assert!(index.find(Path::new("/t/b.txt")).is_some());
        assert_eq!(index.spaces().len(), 2);
    }

    #[test]
    fn test_purge_drops_registry() {
        let mut index = IndexStore::default();
        index.merge(discovery("/s", &[("a.txt", 3)]));
        index.merge(discovery("/t", &[("b.txt", 5)]));

        assert_eq!(index.purge_space(Path::new("/s")), 2);
        let roots: Vec<PathBuf> = index.spaces().iter().map(|s| s.path.clone()).collect();
        assert_eq!(roots, vec![PathBuf::from("/t")]);
    }

    #[test]
    fn test_remove_is_component_wise() {
        let mut index = IndexStore::default();
        index.merge(discovery("/s", &[("a.txt", 3)]));
        index.merge(discovery("/sibling", &[("b.txt", 5)]));

        index.remove_space(Path::new("/s"));
        assert!(index.find(Path::new("/sibling")).is_some());
        assert!(index.find(Path::new("/sibling/b.txt")).is_some());
    }
}
