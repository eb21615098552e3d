//! Repository for the `favorites` table.

use chrono::Utc;
use wikicache_core::error::CoreError;
use wikicache_core::types::DbId;

use crate::error::{is_foreign_key_violation, DbError};
use crate::models::favorite::FavoriteArticle;
use crate::schema::Storage;

/// Marks and unmarks articles as favorites.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Mark an article as a favorite. Idempotent.
    ///
    /// Returns `true` if the mark is new, `false` if it was already there.
    /// Fails with [`CoreError::NotFound`] when the article does not exist.
    pub async fn add(storage: &Storage, article_id: DbId) -> Result<bool, DbError> {
        let result = sqlx::query(
            "INSERT INTO favorites (article_id, favorited_date) VALUES (?, ?) \
             ON CONFLICT (article_id) DO NOTHING",
        )
        .bind(article_id)
        .bind(Utc::now().naive_utc())
        .execute(storage.pool())
        .await;

        match result {
            Ok(done) => {
                let added = done.rows_affected() > 0;
                if added {
                    tracing::info!(article_id, "Favorite added");
                }
                Ok(added)
            }
            Err(err) if is_foreign_key_violation(&err) => Err(CoreError::NotFound {
                entity: "Article",
                id: article_id,
            }
            .into()),
            Err(err) => Err(err.into()),
        }
    }

    /// Remove the favorite mark. Returns `true` if a mark existed.
    pub async fn remove(storage: &Storage, article_id: DbId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM favorites WHERE article_id = ?")
            .bind(article_id)
            .execute(storage.pool())
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            tracing::info!(article_id, "Favorite removed");
        }
        Ok(removed)
    }

    pub async fn is_favorite(storage: &Storage, article_id: DbId) -> Result<bool, DbError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM favorites WHERE article_id = ?)",
        )
        .bind(article_id)
        .fetch_one(storage.pool())
        .await?;
        Ok(exists)
    }

    /// All favorited articles with full data, most recently marked first.
    pub async fn list(storage: &Storage) -> Result<Vec<FavoriteArticle>, DbError> {
        let favorites = sqlx::query_as::<_, FavoriteArticle>(
            "SELECT a.id, a.title, a.content, a.summary, a.url, a.saved_date, \
                    a.fetched_date, a.word_count, a.character_count, f.favorited_date \
             FROM favorites f \
             JOIN articles a ON a.id = f.article_id \
             ORDER BY f.favorited_date DESC, a.id DESC",
        )
        .fetch_all(storage.pool())
        .await?;
        Ok(favorites)
    }
}
