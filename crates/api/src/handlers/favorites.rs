use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use wikicache_core::error::CoreError;
use wikicache_core::types::DbId;
use wikicache_db::repositories::FavoriteRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FavoriteChange {
    pub article_id: DbId,
    pub is_favorite: bool,
    /// Whether this request changed anything.
    pub changed: bool,
}

/// GET /api/favorites
pub async fn list_favorites(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let favorites = FavoriteRepo::list(&state.storage).await?;
    Ok(Json(DataResponse { data: favorites }))
}

/// POST /api/favorites/{id}
///
/// Idempotent; 404 when the article does not exist.
pub async fn add_favorite(
    State(state): State<AppState>,
    AppPath(article_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let changed = FavoriteRepo::add(&state.storage, article_id).await?;

    Ok(Json(DataResponse {
        data: FavoriteChange {
            article_id,
            is_favorite: true,
            changed,
        },
    }))
}

/// DELETE /api/favorites/{id}
pub async fn remove_favorite(
    State(state): State<AppState>,
    AppPath(article_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = FavoriteRepo::remove(&state.storage, article_id).await?;

    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Favorite",
            id: article_id,
        }));
    }

    Ok(Json(DataResponse {
        data: FavoriteChange {
            article_id,
            is_favorite: false,
            changed: true,
        },
    }))
}
