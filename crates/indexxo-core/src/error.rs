//! Error types for indexing and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or querying the index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Root path is listed in its own ignore set.
    #[error("Root path is ignored: {path}")]
    RootIgnored { path: PathBuf },

    /// A subdirectory was aggregated before its entry was built.
    #[error("Internal error: no entry was built for directory {path}")]
    MissingEntry { path: PathBuf },
}

impl IndexError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Check if this error came from the filesystem.
    pub fn is_filesystem_fault(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied { .. }
                | Self::NotFound { .. }
                | Self::Io { .. }
                | Self::NotADirectory { .. }
        )
    }

    /// Check if this error is a logic fault inside the indexer.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::MissingEntry { .. })
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML.
    #[error("Invalid settings: {0}")]
    Toml(#[from] toml::de::Error),

    /// File type mapping is not valid JSON.
    #[error("Invalid file type mapping: {0}")]
    Json(#[from] serde_json::Error),

    /// A mapping label is not a file category.
    #[error("Extension {extension:?} maps to unknown file category {label:?}")]
    InvalidCategory { extension: String, label: String },

    /// Other validation failure.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_io() {
        let err = IndexError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, IndexError::PermissionDenied { .. }));
        assert!(err.is_filesystem_fault());
    }

    #[test]
    fn test_missing_entry_is_internal() {
        let err = IndexError::MissingEntry {
            path: PathBuf::from("/a/b"),
        };
        assert!(err.is_internal());
        assert!(!err.is_filesystem_fault());
    }
}
