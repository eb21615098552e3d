use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{migration, pages};
use crate::state::AppState;

/// Root-level routes: the HTML page and legacy migration.
///
/// ```text
/// GET    /                  -> index
/// POST   /                  -> fetch
/// GET    /migration-status  -> migration_status
/// POST   /migrate           -> migrate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index).post(pages::fetch))
        .route("/migration-status", get(migration::migration_status))
        .route("/migrate", post(migration::migrate))
}
