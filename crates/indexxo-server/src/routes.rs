//! Axum HTTP routes for browsing the index.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use indexxo_core::Entry;
use indexxo_index::IndexStore;

use crate::error::ServerError;

/// Shared application state.
///
/// The index sits behind a lock so queries and any future writers are
/// serialized.
pub struct AppState {
    pub index: RwLock<IndexStore>,
}

impl AppState {
    /// Wrap an index for serving.
    pub fn new(index: IndexStore) -> Self {
        Self {
            index: RwLock::new(index),
        }
    }
}

// ─── Route builder ───────────────────────────────────────────────

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/spaces", get(list_spaces))
        .route("/folder", get(folder))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ─── Handlers ────────────────────────────────────────────────────

async fn welcome() -> Html<&'static str> {
    Html("<p>Welcome to Indexxo!</p>")
}

async fn list_spaces(State(state): State<Arc<AppState>>) -> Json<Vec<Entry>> {
    let index = state.index.read().await;
    Json(registered_spaces(&index))
}

#[derive(Debug, Deserialize)]
struct FolderQuery {
    path: Option<PathBuf>,
}

async fn folder(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FolderQuery>,
) -> Result<Response, ServerError> {
    let index = state.index.read().await;

    let Some(path) = query.path else {
        let spaces = registered_spaces(&index);
        return Ok(Json(serde_json::json!({ "content": spaces })).into_response());
    };

    let found = index
        .find(&path)
        .ok_or_else(|| ServerError::NotInIndex(path.clone()))?;
    let listing = index.get_content(&found.path);

    Ok(Json(serde_json::to_value(&listing)?).into_response())
}

fn registered_spaces(index: &IndexStore) -> Vec<Entry> {
    index.spaces().iter().map(|space| Entry::clone(space)).collect()
}

// ─── Server startup ──────────────────────────────────────────────

/// Serve `index` on `bind` until Ctrl+C.
pub async fn serve(index: IndexStore, bind: &str) -> Result<(), ServerError> {
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| ServerError::Other(format!("Invalid bind address {bind}: {e}")))?;

    let spaces = index.spaces().len();
    let entries = index.len();
    let router = build_router(Arc::new(AppState::new(index)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, spaces, entries, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
