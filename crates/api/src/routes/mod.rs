pub mod articles;
pub mod favorites;
pub mod health;
pub mod pages;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /articles                          list
/// /articles/{id}                     get, delete
/// /articles/{id}/tags                add tags (POST)
/// /search                            local search (POST)
/// /stats                             collection statistics
/// /bulk/delete                       delete many (POST)
/// /export/{id}                       download (?format=txt|md|html)
///
/// /favorites                         list
/// /favorites/{id}                    add (POST), remove (DELETE)
///
/// /tags                              list with counts
/// /tags/{name}/articles              articles carrying a tag
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(articles::router())
        .nest("/favorites", favorites::router())
        .nest("/tags", tags::router())
}
