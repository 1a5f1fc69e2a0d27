//! Core types for indexxo.
//!
//! This crate provides the data structures shared by the indexing engine,
//! the index store and the HTTP boundary: indexed entries, the file type
//! classifier, configuration and errors.

mod classify;
mod config;
mod entry;
mod error;

pub use classify::FileTypes;
pub use config::{Settings, SpaceConfig, SpaceConfigBuilder};
pub use entry::{Entry, EntryKind};
pub use error::{ConfigError, IndexError};
