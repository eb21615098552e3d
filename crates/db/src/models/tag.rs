//! Tag models.

use serde::Serialize;
use sqlx::FromRow;
use wikicache_core::types::DbId;

/// A tag together with the number of articles carrying it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagWithCount {
    pub id: DbId,
    pub name: String,
    pub article_count: i64,
}
