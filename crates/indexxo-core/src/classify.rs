//! Extension to category lookup.

use std::collections::HashMap;
use std::path::Path;

use crate::entry::EntryKind;
use crate::error::ConfigError;

/// Built-in extension table used when no mapping file is supplied.
const DEFAULT_FILE_TYPES: &[(&str, EntryKind)] = &[
    ("jpg", EntryKind::Image),
    ("jpeg", EntryKind::Image),
    ("png", EntryKind::Image),
    ("gif", EntryKind::Image),
    ("bmp", EntryKind::Image),
    ("webp", EntryKind::Image),
    ("svg", EntryKind::Image),
    ("heic", EntryKind::Image),
    ("tiff", EntryKind::Image),
    ("txt", EntryKind::Document),
    ("md", EntryKind::Document),
    ("pdf", EntryKind::Document),
    ("doc", EntryKind::Document),
    ("docx", EntryKind::Document),
    ("odt", EntryKind::Document),
    ("rtf", EntryKind::Document),
    ("xls", EntryKind::Document),
    ("xlsx", EntryKind::Document),
    ("ods", EntryKind::Document),
    ("csv", EntryKind::Document),
    ("ppt", EntryKind::Document),
    ("pptx", EntryKind::Document),
    ("odp", EntryKind::Document),
    ("html", EntryKind::Document),
    ("json", EntryKind::Document),
    ("py", EntryKind::Document),
    ("rs", EntryKind::Document),
    ("kt", EntryKind::Document),
    ("js", EntryKind::Document),
    ("c", EntryKind::Document),
    ("cpp", EntryKind::Document),
    ("mp4", EntryKind::Video),
    ("mkv", EntryKind::Video),
    ("avi", EntryKind::Video),
    ("mov", EntryKind::Video),
    ("webm", EntryKind::Video),
    ("wmv", EntryKind::Video),
    ("zip", EntryKind::Archive),
    ("rar", EntryKind::Archive),
    ("7z", EntryKind::Archive),
    ("tar", EntryKind::Archive),
    ("gz", EntryKind::Archive),
    ("xz", EntryKind::Archive),
    ("bz2", EntryKind::Archive),
    ("mp3", EntryKind::Audio),
    ("wav", EntryKind::Audio),
    ("flac", EntryKind::Audio),
    ("ogg", EntryKind::Audio),
    ("m4a", EntryKind::Audio),
    ("aac", EntryKind::Audio),
    ("exe", EntryKind::Program),
    ("msi", EntryKind::Program),
    ("apk", EntryKind::Program),
    ("dmg", EntryKind::Program),
    ("deb", EntryKind::Program),
    ("rpm", EntryKind::Program),
    ("appimage", EntryKind::Program),
];

/// Maps file extensions (without the dot) to entry categories.
///
/// Lookup is case-sensitive. Unknown or empty extensions map to
/// [`EntryKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypes {
    map: HashMap<String, EntryKind>,
}

impl FileTypes {
    /// Create a classifier from an explicit mapping.
    ///
    /// Fails if any mapped kind is a directory kind.
    pub fn new(map: HashMap<String, EntryKind>) -> Result<Self, ConfigError> {
        if let Some((ext, kind)) = map.iter().find(|(_, kind)| !kind.is_file_category()) {
            return Err(ConfigError::InvalidCategory {
                extension: ext.clone(),
                label: kind.to_string(),
            });
        }
        Ok(Self { map })
    }

    /// Create a classifier that knows no extensions.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Parse a JSON object of `extension -> label` pairs.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        let mut map = HashMap::with_capacity(raw.len());

        for (extension, label) in raw {
            let kind = label
                .parse::<EntryKind>()
                .map_err(|_| ConfigError::InvalidCategory {
                    extension: extension.clone(),
                    label: label.clone(),
                })?;
            map.insert(extension, kind);
        }

        Self::new(map)
    }

    /// Load a JSON mapping file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Classify an extension given without its leading dot.
    pub fn classify(&self, extension: &str) -> EntryKind {
        self.map.get(extension).copied().unwrap_or(EntryKind::Other)
    }

    /// Number of known extensions.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if no extensions are known.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for FileTypes {
    fn default() -> Self {
        Self {
            map: DEFAULT_FILE_TYPES
                .iter()
                .map(|(ext, kind)| ((*ext).to_string(), *kind))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_and_unknown() {
        let types = FileTypes::default();
        assert_eq!(types.classify("jpg"), EntryKind::Image);
        assert_eq!(types.classify("flac"), EntryKind::Audio);
        assert_eq!(types.classify("nope"), EntryKind::Other);
        assert_eq!(types.classify(""), EntryKind::Other);
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        let types = FileTypes::default();
        assert_eq!(types.classify("JPG"), EntryKind::Other);
    }

    #[test]
    fn test_from_json() {
        let types = FileTypes::from_json_str(r#"{"txt": "document", "jpg": "image"}"#).unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types.classify("txt"), EntryKind::Document);
        assert_eq!(types.classify("png"), EntryKind::Other);
    }

    #[test]
    fn test_rejects_directory_labels() {
        let err = FileTypes::from_json_str(r#"{"txt": "space"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCategory { .. }));

        let err = FileTypes::from_json_str(r#"{"txt": "spreadsheet"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCategory { .. }));
    }
}
