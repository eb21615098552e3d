use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use wikicache_db::repositories::TagRepo;

use crate::error::AppResult;
use crate::extract::AppPath;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/tags
///
/// All tags with the number of articles carrying each, most used first.
pub async fn list_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = TagRepo::list_tags(&state.storage).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// GET /api/tags/{name}/articles
///
/// An unknown tag has no articles.
pub async fn articles_for_tag(
    State(state): State<AppState>,
    AppPath(name): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let articles = TagRepo::articles_for_tag(&state.storage, &name).await?;
    Ok(Json(DataResponse { data: articles }))
}
