use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{articles, bulk, export, search};
use crate::state::AppState;

/// Article routes, mounted under `/api`.
///
/// ```text
/// GET    /articles                 -> list_articles
/// GET    /articles/{id}            -> get_article
/// DELETE /articles/{id}            -> delete_article
/// POST   /articles/{id}/tags       -> add_tags
/// POST   /search                   -> search_articles
/// GET    /stats                    -> get_stats
/// POST   /bulk/delete              -> bulk_delete
/// GET    /export/{id}              -> export_article
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/articles", get(articles::list_articles))
        .route(
            "/articles/{id}",
            get(articles::get_article).delete(articles::delete_article),
        )
        .route("/articles/{id}/tags", post(articles::add_tags))
        .route("/search", post(search::search_articles))
        .route("/stats", get(search::get_stats))
        .route("/bulk/delete", post(bulk::bulk_delete))
        .route("/export/{id}", get(export::export_article))
}
