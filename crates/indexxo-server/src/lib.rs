//! HTTP interface for indexxo.
//!
//! Exposes a read-only view of an [`IndexStore`](indexxo_index::IndexStore):
//!
//! - `GET /spaces` lists registered spaces
//! - `GET /folder?path=P` lists the folder at `P` together with its parent
//! - `GET /folder` without a path lists spaces as `{ "content": [...] }`

mod error;
mod routes;

pub use error::ServerError;
pub use routes::{AppState, build_router, serve};
