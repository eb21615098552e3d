//! Article downloads in plain text, Markdown or HTML.

use axum::extract::State;
use axum::http::{header, HeaderValue};
use axum::response::IntoResponse;
use wikicache_core::error::CoreError;
use wikicache_core::export::{self, ExportFormat, ExportSource, UnknownFormat};
use wikicache_core::types::DbId;
use wikicache_db::repositories::ArticleRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::query::ExportParams;
use crate::state::AppState;

/// GET /api/export/{id}?format=txt|md|html
///
/// Responds with the rendered article as an attachment. The format defaults
/// to `txt`; anything unrecognized is a 400.
pub async fn export_article(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppQuery(params): AppQuery<ExportParams>,
) -> AppResult<impl IntoResponse> {
    let format: ExportFormat = match params.format.as_deref() {
        None => ExportFormat::default(),
        Some(name) => name
            .parse()
            .map_err(|err: UnknownFormat| AppError::BadRequest(err.to_string()))?,
    };

    let article = ArticleRepo::get_by_id(&state.storage, id).await?.article;
    let body = export::render(
        ExportSource {
            title: &article.title,
            url: article.url.as_deref(),
            content: &article.content,
        },
        format,
    );

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::file_name(&article.title, format)
    );
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| CoreError::Internal(format!("Invalid export file name: {e}")))?;

    tracing::info!(article_id = id, format = format.extension(), "Article exported");

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(format.content_type())),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
