//! Repository for the `tags` and `article_tags` tables.
//!
//! Tags are free text, created on first use and shared between articles.

use sqlx::SqliteConnection;
use wikicache_core::article::LIST_SUMMARY_CHARS;
use wikicache_core::error::CoreError;
use wikicache_core::types::DbId;

use crate::error::{is_foreign_key_violation, DbError};
use crate::models::article::ArticleListItem;
use crate::models::tag::TagWithCount;
use crate::schema::Storage;

/// Provides tag creation, article-tag links and tag-based lookups.
pub struct TagRepo;

impl TagRepo {
    /// Tag an article. The name is trimmed; a blank name is a no-op.
    ///
    /// Creates the tag if it is new. Linking an already-linked pair is not an
    /// error. Returns `true` when a new link was created.
    pub async fn add_tag(storage: &Storage, article_id: DbId, name: &str) -> Result<bool, DbError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }

        let mut tx = storage.pool().begin().await?;
        let linked = match link_tag(&mut tx, article_id, name).await {
            Ok(linked) => linked,
            Err(err) if is_foreign_key_violation(&err) => {
                return Err(CoreError::NotFound {
                    entity: "Article",
                    id: article_id,
                }
                .into());
            }
            Err(err) => return Err(err.into()),
        };
        tx.commit().await?;

        if linked {
            tracing::info!(article_id, tag = %name, "Tag added");
        }
        Ok(linked)
    }

    /// Tag names of one article, alphabetically.
    pub async fn tags_for_article(
        storage: &Storage,
        article_id: DbId,
    ) -> Result<Vec<String>, DbError> {
        let mut conn = storage.pool().acquire().await?;
        Ok(tag_names(&mut conn, article_id).await?)
    }

    /// Every tag with the number of articles carrying it, most used first.
    pub async fn list_tags(storage: &Storage) -> Result<Vec<TagWithCount>, DbError> {
        let tags = sqlx::query_as::<_, TagWithCount>(
            "SELECT t.id, t.name, COUNT(at.article_id) AS article_count \
             FROM tags t \
             LEFT JOIN article_tags at ON at.tag_id = t.id \
             GROUP BY t.id, t.name \
             ORDER BY article_count DESC, t.name",
        )
        .fetch_all(storage.pool())
        .await?;
        Ok(tags)
    }

    /// Articles carrying the tag `name`, newest first. Unknown tags yield an
    /// empty list.
    pub async fn articles_for_tag(
        storage: &Storage,
        name: &str,
    ) -> Result<Vec<ArticleListItem>, DbError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT a.id, a.title, a.saved_date, a.word_count, \
                    substr(a.summary, 1, {LIST_SUMMARY_CHARS}) AS summary \
             FROM articles a \
             JOIN article_tags at ON at.article_id = a.id \
             JOIN tags t ON t.id = at.tag_id \
             WHERE t.name = ? \
             ORDER BY a.saved_date DESC, a.id DESC"
        );
        let articles = sqlx::query_as::<_, ArticleListItem>(&query)
            .bind(name)
            .fetch_all(storage.pool())
            .await?;
        Ok(articles)
    }
}

/// Create the tag if needed and link it to the article, on an existing
/// connection or transaction. `name` must already be trimmed and non-empty.
pub(crate) async fn link_tag(
    conn: &mut SqliteConnection,
    article_id: DbId,
    name: &str,
) -> Result<bool, sqlx::Error> {
    let tag_id = sqlx::query_scalar::<_, DbId>(
        "INSERT INTO tags (name) VALUES (?) \
         ON CONFLICT (name) DO UPDATE SET name = excluded.name \
         RETURNING id",
    )
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;

    let result = sqlx::query(
        "INSERT INTO article_tags (article_id, tag_id) VALUES (?, ?) \
         ON CONFLICT (article_id, tag_id) DO NOTHING",
    )
    .bind(article_id)
    .bind(tag_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Tag names of one article on an existing connection.
pub(crate) async fn tag_names(
    conn: &mut SqliteConnection,
    article_id: DbId,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT t.name \
         FROM tags t \
         JOIN article_tags at ON at.tag_id = t.id \
         WHERE at.article_id = ? \
         ORDER BY t.name",
    )
    .bind(article_id)
    .fetch_all(&mut *conn)
    .await
}
