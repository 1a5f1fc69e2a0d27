//! Duplicate name detection.
//!
//! Entries are grouped by base name (extension included), ignoring case
//! unless configured otherwise. Groups are ordered by size of the group,
//! largest first.

use std::collections::HashMap;
use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use tracing::debug;

use indexxo_core::Entry;
use indexxo_index::IndexStore;

/// Which entries a duplicate name search compares.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NameTarget {
    /// Every entry that is not a folder or space.
    Files,
    /// Folders and spaces.
    Folders,
}

impl NameTarget {
    fn matches(self, entry: &Entry) -> bool {
        match self {
            NameTarget::Files => !entry.is_dir(),
            NameTarget::Folders => entry.is_dir(),
        }
    }
}

/// Configuration for duplicate name detection.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct DuplicateNameConfig {
    /// Compare names byte for byte instead of lower-casing them.
    #[builder(default = "false")]
    pub case_sensitive: bool,

    /// Minimum group size to report. Values below 2 are treated as 2.
    #[builder(default = "2")]
    pub min_count: usize,

    /// Maximum number of groups to return (0 = unlimited).
    #[builder(default = "0")]
    pub max_groups: usize,
}

impl Default for DuplicateNameConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            min_count: 2,
            max_groups: 0,
        }
    }
}

impl DuplicateNameConfig {
    /// Create a new config builder.
    pub fn builder() -> DuplicateNameConfigBuilder {
        DuplicateNameConfigBuilder::default()
    }
}

/// Entries sharing one base name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateName {
    /// The shared name, lower-cased unless matching is case-sensitive.
    pub name: String,

    /// Paths of every entry with this name, sorted.
    pub paths: Vec<PathBuf>,

    /// Sum of the sizes of every entry in the group.
    pub total_size: u64,
}

impl DuplicateName {
    /// Number of entries sharing the name.
    pub fn count(&self) -> usize {
        self.paths.len()
    }
}

/// Results from duplicate name analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DuplicateNameReport {
    /// Groups sorted by entry count, then total size, descending.
    pub groups: Vec<DuplicateName>,

    /// Number of entries compared.
    pub entries_analyzed: u64,

    /// Number of entries that share their name with another entry.
    pub entries_with_duplicates: u64,

    /// Number of groups returned.
    pub group_count: usize,
}

impl DuplicateNameReport {
    /// Check if any duplicate names were found.
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }
}

/// Groups indexed entries by name.
#[derive(Debug, Default)]
pub struct DuplicateNameFinder {
    config: DuplicateNameConfig,
}

impl DuplicateNameFinder {
    /// Create a finder with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finder with a custom config.
    pub fn with_config(config: DuplicateNameConfig) -> Self {
        Self { config }
    }

    /// Find files sharing a name.
    pub fn find_file_names(&self, index: &IndexStore) -> DuplicateNameReport {
        self.find(index, NameTarget::Files)
    }

    /// Find folders sharing a name.
    pub fn find_folder_names(&self, index: &IndexStore) -> DuplicateNameReport {
        self.find(index, NameTarget::Folders)
    }

    /// Find entries of `target` kind sharing a name.
    pub fn find(&self, index: &IndexStore, target: NameTarget) -> DuplicateNameReport {
        let mut by_name: HashMap<String, Vec<&Entry>> = HashMap::new();
        let mut entries_analyzed = 0u64;

        for entry in index.entries().filter(|entry| target.matches(entry)) {
            entries_analyzed += 1;
            by_name.entry(self.key(entry)).or_default().push(entry);
        }

        let min_count = self.config.min_count.max(2);
        let mut groups: Vec<DuplicateName> = by_name
            .into_iter()
            .filter(|(_, entries)| entries.len() >= min_count)
            .map(|(name, entries)| {
                let mut paths: Vec<PathBuf> = entries.iter().map(|e| e.path.clone()).collect();
                paths.sort();
                DuplicateName {
                    name,
                    paths,
                    total_size: entries.iter().map(|e| e.size).sum(),
                }
            })
            .collect();

        groups.sort_by(|a, b| {
            b.count()
                .cmp(&a.count())
                .then_with(|| b.total_size.cmp(&a.total_size))
                .then_with(|| a.name.cmp(&b.name))
        });

        let entries_with_duplicates = groups.iter().map(|g| g.count() as u64).sum();
        if self.config.max_groups > 0 {
            groups.truncate(self.config.max_groups);
        }

        debug!(
            %target,
            entries_analyzed,
            groups = groups.len(),
            "grouped duplicate names"
        );

        DuplicateNameReport {
            group_count: groups.len(),
            groups,
            entries_analyzed,
            entries_with_duplicates,
        }
    }

    fn key(&self, entry: &Entry) -> String {
        if self.config.case_sensitive {
            entry.full_name.to_string()
        } else {
            entry.full_name.to_lowercase().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = DuplicateNameConfig::builder().build().unwrap();
        assert!(!config.case_sensitive);
        assert_eq!(config.min_count, 2);
        assert_eq!(config.max_groups, 0);
    }

    #[test]
    fn test_target_matches() {
        let folder = Entry::folder("/s/a", 0);
        assert!(NameTarget::Folders.matches(&folder));
        assert!(NameTarget::Folders.matches(&folder.clone().into_space()));
        assert!(!NameTarget::Files.matches(&folder));
        assert_eq!(NameTarget::Files.to_string(), "files");
    }
}
