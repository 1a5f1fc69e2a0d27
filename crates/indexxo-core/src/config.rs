//! Indexing and process configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::classify::FileTypes;
use crate::error::ConfigError;

/// Configuration for indexing one space.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SpaceConfig {
    /// Root directory of the space.
    pub root: PathBuf,

    /// Paths excluded from the index and from size aggregation.
    #[builder(default)]
    #[serde(default)]
    pub ignore: Vec<PathBuf>,
}

impl SpaceConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                Err("Root path cannot be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("Root path is required".to_string()),
        }
    }
}

impl SpaceConfig {
    /// Create a new space config builder.
    pub fn builder() -> SpaceConfigBuilder {
        SpaceConfigBuilder::default()
    }

    /// Create a config for a root with nothing ignored.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore: Vec::new(),
        }
    }

    /// Add a path to the ignore set.
    pub fn ignoring(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignore.push(path.into());
        self
    }
}

/// Process settings, read from a TOML file.
///
/// ```toml
/// bind = "0.0.0.0:5000"
/// filetypes = "filetypes.json"
///
/// [[spaces]]
/// root = "/home/me"
/// ignore = ["/home/me/files/posts"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Address the HTTP server listens on.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Extension mapping file (JSON). Built-in table when absent.
    #[serde(default)]
    pub filetypes: Option<PathBuf>,

    /// Spaces indexed at startup.
    #[serde(default)]
    pub spaces: Vec<SpaceConfig>,
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    ///
    /// A relative `filetypes` path is resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::from_toml_str(&text)?;

        if let (Some(filetypes), Some(dir)) = (settings.filetypes.as_mut(), path.parent()) {
            if filetypes.is_relative() {
                *filetypes = dir.join(&*filetypes);
            }
        }
        Ok(settings)
    }

    /// Build the classifier these settings describe.
    pub fn file_types(&self) -> Result<FileTypes, ConfigError> {
        match &self.filetypes {
            Some(path) => FileTypes::load(path),
            None => Ok(FileTypes::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(space) = self.spaces.iter().find(|s| s.root.as_os_str().is_empty()) {
            return Err(ConfigError::Invalid {
                message: format!("space root cannot be empty (ignore: {:?})", space.ignore),
            });
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            filetypes: None,
            spaces: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_config_builder() {
        let config = SpaceConfig::builder()
            .root("/home/user")
            .ignore(vec![PathBuf::from("/home/user/tmp")])
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.ignore.len(), 1);
    }

    #[test]
    fn test_space_config_requires_root() {
        assert!(SpaceConfig::builder().build().is_err());
        assert!(SpaceConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.bind, "0.0.0.0:5000");
        assert!(settings.filetypes.is_none());
        assert!(settings.spaces.is_empty());
    }

    #[test]
    fn test_settings_spaces() {
        let settings = Settings::from_toml_str(
            r#"
            bind = "127.0.0.1:8080"

            [[spaces]]
            root = "/srv/media"
            ignore = ["/srv/media/cache", "/srv/media/tmp"]

            [[spaces]]
            root = "/srv/docs"
            "#,
        )
        .unwrap();

        assert_eq!(settings.bind, "127.0.0.1:8080");
        assert_eq!(settings.spaces.len(), 2);
        assert_eq!(settings.spaces[0].ignore.len(), 2);
        assert!(settings.spaces[1].ignore.is_empty());
    }

    #[test]
    fn test_settings_rejects_empty_root() {
        let err = Settings::from_toml_str("[[spaces]]\nroot = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
