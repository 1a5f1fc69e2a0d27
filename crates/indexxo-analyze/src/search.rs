//! Metadata search over indexed entries.

use std::cmp::Ordering;
use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use indexxo_core::{Entry, EntryKind};
use indexxo_index::IndexStore;

/// Field search results are ordered by.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortKey {
    /// Base name, extension included.
    #[default]
    Name,
    /// Size in bytes.
    Size,
}

/// Filters and ordering for [`search`].
///
/// Every filter left at its default matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), default, build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct SearchQuery {
    /// Case-insensitive substring of the base name. Blank matches any name.
    pub text: String,

    /// Categories to keep. Empty keeps every category.
    pub kinds: Vec<EntryKind>,

    /// Keep only entries at or below this path.
    #[builder(setter(strip_option))]
    pub within: Option<PathBuf>,

    /// Smallest size to keep, in bytes.
    #[builder(setter(strip_option))]
    pub min_size: Option<u64>,

    /// Largest size to keep, in bytes.
    #[builder(setter(strip_option))]
    pub max_size: Option<u64>,

    /// Ordering of the results.
    pub sort: SortKey,

    /// Reverse the ordering.
    pub descending: bool,

    /// Maximum number of results (0 = unlimited).
    pub limit: usize,
}

impl SearchQueryBuilder {
    fn validate(&self) -> Result<(), String> {
        match (self.min_size.flatten(), self.max_size.flatten()) {
            (Some(min), Some(max)) if min > max => {
                Err(format!("Minimum size {min} is larger than maximum size {max}"))
            }
            _ => Ok(()),
        }
    }
}

impl SearchQuery {
    /// Create a new query builder.
    pub fn builder() -> SearchQueryBuilder {
        SearchQueryBuilder::default()
    }

    /// Query matching names that contain `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Check if `entry` passes every filter.
    pub fn matches(&self, entry: &Entry) -> bool {
        let text = self.text.trim();
        if !text.is_empty() && !entry.full_name.to_lowercase().contains(&text.to_lowercase()) {
            return false;
        }
        if !self.kinds.is_empty() && !self.kinds.contains(&entry.kind) {
            return false;
        }
        if self
            .within
            .as_ref()
            .is_some_and(|within| !entry.path.starts_with(within))
        {
            return false;
        }
        if self.min_size.is_some_and(|min| entry.size < min) {
            return false;
        }
        if self.max_size.is_some_and(|max| entry.size > max) {
            return false;
        }
        true
    }

    fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        match self.sort {
            SortKey::Name => a.full_name.cmp(&b.full_name),
            SortKey::Size => a.size.cmp(&b.size),
        }
    }
}

/// Every indexed entry matching `query`, ordered and limited as it asks.
pub fn search<'a>(index: &'a IndexStore, query: &SearchQuery) -> Vec<&'a Entry> {
    let mut results: Vec<&Entry> = index.entries().filter(|e| query.matches(e)).collect();

    results.sort_by(|a, b| query.compare(a, b));
    if query.descending {
        results.reverse();
    }
    if query.limit > 0 {
        results.truncate(query.limit);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexxo_core::FileTypes;

    #[test]
    fn test_default_query_matches_everything() {
        let query = SearchQuery::default();
        assert!(query.matches(&Entry::folder("/s", 0)));
        assert!(query.matches(&Entry::file("/s/a.txt", 1, &FileTypes::default())));
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let entry = Entry::file("/s/Annual Report.PDF", 1, &FileTypes::default());
        assert!(SearchQuery::text("report.pdf").matches(&entry));
        assert!(SearchQuery::text("  ").matches(&entry));
        assert!(!SearchQuery::text("invoice").matches(&entry));
    }

    #[test]
    fn test_builder_rejects_inverted_size_range() {
        let err = SearchQuery::builder()
            .min_size(10u64)
            .max_size(5u64)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("larger than maximum"));
    }
}
