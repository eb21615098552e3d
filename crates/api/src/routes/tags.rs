use axum::routing::get;
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Tag routes mounted at `/api/tags`.
///
/// ```text
/// GET    /                  -> list_tags
/// GET    /{name}/articles   -> articles_for_tag
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list_tags))
        .route("/{name}/articles", get(tags::articles_for_tag))
}
