//! Metadata analysis over an indexxo index.
//!
//! Every analysis works on entries that are already in an [`IndexStore`].
//! Nothing here touches the disk.
//!
//! - **Empty entries** - Zero-byte files and folders with no indexed children
//! - **Duplicate names** - Files or folders sharing a base name, ignoring case
//! - **Search** - Filter by name, category, size and location, then sort
//!
//! # Duplicate Names
//!
//! ```rust,ignore
//! use indexxo_analyze::{DuplicateNameFinder, NameTarget};
//! use indexxo_index::{IndexStore, SpaceConfig};
//!
//! let mut index = IndexStore::default();
//! index.add_space(&SpaceConfig::new("/home/me")).unwrap();
//!
//! let report = DuplicateNameFinder::new().find(&index, NameTarget::Files);
//! for group in &report.groups {
//!     println!("{} x{} ({} bytes)", group.name, group.count(), group.total_size);
//! }
//! ```
//!
//! # Search
//!
//! ```rust,ignore
//! use indexxo_analyze::{SearchQuery, SortKey, search};
//! use indexxo_core::EntryKind;
//!
//! let query = SearchQuery::builder()
//!     .text("report")
//!     .kinds(vec![EntryKind::Document])
//!     .sort(SortKey::Size)
//!     .descending(true)
//!     .build()
//!     .unwrap();
//!
//! for entry in search(&index, &query) {
//!     println!("{}", entry.path.display());
//! }
//! ```

mod duplicates;
pub mod empty;
mod search;

pub use duplicates::{
    DuplicateName, DuplicateNameConfig, DuplicateNameConfigBuilder, DuplicateNameFinder,
    DuplicateNameReport, NameTarget,
};
pub use empty::{EmptyReport, find_empty_files, find_empty_folders};
pub use search::{SearchQuery, SearchQueryBuilder, SortKey, search};

// Re-export index types
pub use indexxo_index::{Entry, EntryKind, IndexStore};
