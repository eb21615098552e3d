use std::sync::Arc;

use wikicache_db::Storage;
use wikicache_wiki::WikiClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; every field is a handle.
#[derive(Clone)]
pub struct AppState {
    /// Article store.
    pub storage: Storage,
    pub config: Arc<ServerConfig>,
    /// Client for fetching new articles.
    pub wiki: Arc<WikiClient>,
}
