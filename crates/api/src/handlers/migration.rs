//! Import of legacy flat-file articles from the configured directory.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use wikicache_db::migration;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MigrateRequest {
    #[serde(default)]
    pub delete_after: bool,
}

/// GET /migration-status
///
/// Lists legacy files and whether each title is already stored. Changes
/// nothing.
pub async fn migration_status(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let overview = migration::migration_status(&state.storage, &state.config.legacy_dir).await?;
    Ok(Json(DataResponse { data: overview }))
}

/// POST /migrate
///
/// The body is optional; `{"delete_after": true}` removes each file once
/// it has been imported. A body sent as JSON must parse.
pub async fn migrate(
    State(state): State<AppState>,
    input: Result<Option<Json<MigrateRequest>>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = input?.map(|Json(input)| input).unwrap_or_default();

    let report = migration::migrate_directory(
        &state.storage,
        &state.config.legacy_dir,
        input.delete_after,
    )
    .await?;

    Ok(Json(DataResponse { data: report }))
}
