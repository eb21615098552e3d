//! Local full-text search and collection statistics.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use wikicache_db::models::article::SearchHit;
use wikicache_db::repositories::ArticleRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

/// POST /api/search
///
/// Case-insensitive substring match over titles and content. A blank
/// query yields no results.
pub async fn search_articles(
    State(state): State<AppState>,
    AppJson(input): AppJson<SearchRequest>,
) -> AppResult<impl IntoResponse> {
    let query = input.query.trim().to_string();
    let results = ArticleRepo::search(&state.storage, &query).await?;

    tracing::debug!(%query, hits = results.len(), "Local search");

    Ok(Json(DataResponse {
        data: SearchResults {
            query,
            count: results.len(),
            results,
        },
    }))
}

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = ArticleRepo::stats(&state.storage).await?;
    Ok(Json(DataResponse { data: stats }))
}
