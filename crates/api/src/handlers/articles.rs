//! Handlers for saved articles and their tags.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use wikicache_core::error::CoreError;
use wikicache_core::types::DbId;
use wikicache_db::models::article::ArticleWithTags;
use wikicache_db::repositories::{ArticleRepo, FavoriteRepo, TagRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A single article as returned by `GET /api/articles/{id}`.
#[derive(Debug, Serialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: ArticleWithTags,
    pub is_favorite: bool,
}

/// Body of `POST /api/articles/{id}/tags`: a list, a single name, or both.
#[derive(Debug, Deserialize)]
pub struct AddTagsRequest {
    #[serde(default)]
    pub tags: Vec<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticleTags {
    pub article_id: DbId,
    pub tags: Vec<String>,
}

/// GET /api/articles
///
/// Newest first. `limit` defaults to 50 and is clamped to 1..=100.
pub async fn list_articles(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let articles = ArticleRepo::list(&state.storage, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// GET /api/articles/{id}
pub async fn get_article(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = ArticleRepo::get_by_id(&state.storage, id).await?;
    let is_favorite = FavoriteRepo::is_favorite(&state.storage, id).await?;

    Ok(Json(DataResponse {
        data: ArticleDetail {
            article,
            is_favorite,
        },
    }))
}

/// DELETE /api/articles/{id}
pub async fn delete_article(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ArticleRepo::delete(&state.storage, id).await?;

    if deleted == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/articles/{id}/tags
///
/// Tags are created on first use. Returns the article's full tag list.
pub async fn add_tags(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<AddTagsRequest>,
) -> AppResult<impl IntoResponse> {
    let names: Vec<String> = input
        .tags
        .into_iter()
        .chain(input.tag)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        return Err(AppError::BadRequest("At least one tag is required".into()));
    }

    for name in &names {
        TagRepo::add_tag(&state.storage, id, name).await?;
    }

    let tags = TagRepo::tags_for_article(&state.storage, id).await?;
    tracing::info!(article_id = id, added = names.len(), "Tags applied");

    Ok(Json(DataResponse {
        data: ArticleTags {
            article_id: id,
            tags,
        },
    }))
}
