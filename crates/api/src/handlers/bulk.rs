use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use wikicache_core::types::DbId;
use wikicache_db::repositories::ArticleRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum number of ids accepted by one bulk delete.
pub const MAX_BULK_IDS: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    #[serde(default)]
    pub ids: Vec<DbId>,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResult {
    pub deleted: u64,
    pub requested: usize,
}

/// POST /api/bulk/delete
///
/// Ids that do not exist are skipped; `deleted` counts actual removals.
pub async fn bulk_delete(
    State(state): State<AppState>,
    AppJson(input): AppJson<BulkDeleteRequest>,
) -> AppResult<impl IntoResponse> {
    if input.ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".into()));
    }
    if input.ids.len() > MAX_BULK_IDS {
        return Err(AppError::BadRequest(format!(
            "At most {MAX_BULK_IDS} ids can be deleted at once"
        )));
    }

    let deleted = ArticleRepo::delete_many(&state.storage, &input.ids).await?;

    Ok(Json(DataResponse {
        data: BulkDeleteResult {
            deleted,
            requested: input.ids.len(),
        },
    }))
}
