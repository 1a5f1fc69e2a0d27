//! Discovery engine for indexxo.
//!
//! This crate walks a space root and produces one [`Entry`] per file and
//! folder, with folder sizes aggregated bottom-up from their direct
//! children.
//!
//! # Overview
//!
//! - **Serial traversal** via jwalk, blocking the caller until done
//! - **Ignore pruning** so ignored folders are never entered
//! - **All-or-nothing** results: any I/O error aborts the walk
//!
//! # Example
//!
//! ```rust,no_run
//! use indexxo_scan::{Discoverer, FileTypes, SpaceConfig};
//!
//! let config = SpaceConfig::new("/path/to/space").ignoring("/path/to/space/cache");
//! let discoverer = Discoverer::new(FileTypes::default());
//! let discovery = discoverer.discover(&config).unwrap();
//!
//! println!("Space size: {} bytes", discovery.root.size);
//! println!("Entries: {}", discovery.entries.len());
//! ```

mod discoverer;
mod stats;

pub use discoverer::{Discoverer, Discovery};
pub use stats::DiscoveryStats;

// Re-export core types for convenience
pub use indexxo_core::{Entry, EntryKind, FileTypes, IndexError, SpaceConfig};
