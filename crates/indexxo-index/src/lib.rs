//! In-memory index of spaces.
//!
//! [`IndexStore`] owns the path-keyed entry map and the space registry.
//! Spaces are added by running a discovery walk and merging its result;
//! queries read the map directly and never touch the disk.
//!
//! The store is a plain owned value with no internal locking. Share it
//! behind a lock when more than one caller needs it.
//!
//! ```rust,no_run
//! use indexxo_index::{FileTypes, IndexStore, SpaceConfig};
//!
//! let mut index = IndexStore::new(FileTypes::default());
//! let space = index.add_space(&SpaceConfig::new("/srv/media")).unwrap();
//!
//! let listing = index.get_content(&space.path);
//! for entry in &listing.content {
//!     println!("{} ({} bytes)", entry.full_name, entry.size);
//! }
//! ```

mod store;

pub use store::{FolderContent, IndexStore};

// Re-export core types
pub use indexxo_core::{Entry, EntryKind, FileTypes, IndexError, SpaceConfig};
