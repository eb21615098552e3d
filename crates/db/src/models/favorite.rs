//! Favorite models.

use serde::Serialize;
use sqlx::FromRow;
use wikicache_core::types::Timestamp;

use super::article::Article;

/// A favorited article with its full data and the time it was marked.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FavoriteArticle {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub article: Article,
    pub favorited_date: Option<Timestamp>,
}
