//! Query parameter types shared by several handlers.

use serde::Deserialize;

/// Pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the repository layer via `clamp_limit` /
/// `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?format=` for article export. Absent means plain text.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub format: Option<String>,
}
