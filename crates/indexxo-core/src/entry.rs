//! Indexed entry types.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize, Serializer};
use strum::{AsRefStr, Display, EnumString};

use crate::classify::FileTypes;

/// Category assigned to an indexed entry.
///
/// Directories are `Folder` (or `Space` when they are an indexing root);
/// files get one of the remaining categories from [`FileTypes`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntryKind {
    /// A directory.
    Folder,
    /// A directory registered as an indexing root.
    Space,
    Image,
    /// Sheets, docs, slides and source code.
    Document,
    Video,
    Archive,
    Audio,
    /// Applications and executables.
    Program,
    /// Anything the classifier does not know about.
    Other,
}

impl EntryKind {
    /// Check if this kind describes a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Folder | EntryKind::Space)
    }

    /// Check if this kind can be assigned to a file.
    pub fn is_file_category(&self) -> bool {
        !self.is_dir()
    }
}

/// Metadata for one file, folder or space.
///
/// The serialized field names are the wire contract consumed by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Absolute path, unique key in the index.
    ///
    /// Serialized lossily: bytes that are not valid UTF-8 become U+FFFD.
    #[serde(rename = "full_path", serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,

    /// Base name including extension.
    pub full_name: CompactString,

    /// Base name without extension.
    pub name: CompactString,

    /// Size in bytes (sum of direct children for folders).
    pub size: u64,

    /// Extension with its leading dot, if the file has one.
    ///
    /// Folders and extensionless files serialize `null` here, not `""`.
    pub extension: Option<CompactString>,

    /// Entry category.
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl Entry {
    /// Create a file entry, classifying it by extension.
    pub fn file(path: impl Into<PathBuf>, size: u64, file_types: &FileTypes) -> Self {
        let path = path.into();
        let full_name = base_name(&path);
        let name = path
            .file_stem()
            .map(|s| CompactString::new(s.to_string_lossy()))
            .unwrap_or_else(|| full_name.clone());
        let ext = path.extension().map(|e| e.to_string_lossy().into_owned());
        let kind = file_types.classify(ext.as_deref().unwrap_or_default());

        Self {
            full_name,
            name,
            size,
            extension: ext.map(|e| compact_str::format_compact!(".{e}")),
            kind,
            path,
        }
    }

    /// Create a folder entry with an already aggregated size.
    pub fn folder(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let full_name = base_name(&path);

        Self {
            name: full_name.clone(),
            full_name,
            size,
            extension: None,
            kind: EntryKind::Folder,
            path,
        }
    }

    /// Promote a folder to a space.
    pub fn into_space(mut self) -> Self {
        self.kind = EntryKind::Space;
        self
    }

    /// Check if this entry is a folder or space.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this entry is a space.
    pub fn is_space(&self) -> bool {
        self.kind == EntryKind::Space
    }

    /// Path of the directory containing this entry.
    pub fn parent(&self) -> Option<&Path> {
        self.path.parent()
    }
}

fn base_name(path: &Path) -> CompactString {
    path.file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_else(|| CompactString::new(path.to_string_lossy()))
}

fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_fields() {
        let types = FileTypes::default();
        let entry = Entry::file("/data/photos/cat.jpg", 2048, &types);

        assert_eq!(entry.full_name, "cat.jpg");
        assert_eq!(entry.name, "cat");
        assert_eq!(entry.extension.as_deref(), Some(".jpg"));
        assert_eq!(entry.kind, EntryKind::Image);
        assert_eq!(entry.size, 2048);
    }

    #[test]
    fn test_multi_dot_and_dotfiles() {
        let types = FileTypes::default();

        let archive = Entry::file("/a/backup.tar.gz", 1, &types);
        assert_eq!(archive.name, "backup.tar");
        assert_eq!(archive.extension.as_deref(), Some(".gz"));

        let dotfile = Entry::file("/a/.bashrc", 1, &types);
        assert_eq!(dotfile.name, ".bashrc");
        assert_eq!(dotfile.extension, None);
        assert_eq!(dotfile.kind, EntryKind::Other);

        let trailing = Entry::file("/a/notes.", 1, &types);
        assert_eq!(trailing.extension.as_deref(), Some("."));
        assert_eq!(trailing.kind, EntryKind::Other);
    }

    #[test]
    fn test_folder_and_space() {
        let folder = Entry::folder("/data/music.d", 30);
        assert_eq!(folder.name, "music.d");
        assert_eq!(folder.full_name, "music.d");
        assert_eq!(folder.kind, EntryKind::Folder);
        assert!(folder.extension.is_none());

        let space = folder.into_space();
        assert!(space.is_space());
        assert!(space.is_dir());
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(EntryKind::Document.to_string(), "document");
        assert_eq!("program".parse::<EntryKind>().unwrap(), EntryKind::Program);
        assert!("Program".parse::<EntryKind>().is_err());
    }
}
