//! Repository for the `articles` table.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use wikicache_core::article::LIST_SUMMARY_CHARS;
use wikicache_core::error::CoreError;
use wikicache_core::search::{
    clamp_limit, clamp_offset, contains_pattern, normalize_query, CONTENT_MATCH_SCORE,
    DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, TITLE_MATCH_SCORE,
};
use wikicache_core::types::DbId;

use crate::error::{is_unique_violation, DbError};
use crate::models::article::{
    Article, ArticleListItem, ArticleWithTags, NewArticle, SearchHit, StorageStats,
};
use crate::repositories::tag_repo;
use crate::schema::Storage;

/// Column list shared across full-row queries.
const COLUMNS: &str = "id, title, content, summary, url, saved_date, fetched_date, \
                       word_count, character_count";

/// Bytes per megabyte for the size statistic.
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Message carried by the conflict raised on a duplicate title.
pub const DUPLICATE_TITLE_MESSAGE: &str = "Article already saved";

/// Provides CRUD, search and statistics over saved articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Save a new article and its tags in one transaction, returning its id.
    ///
    /// Fails with [`CoreError::Validation`] for a blank or overlong title or
    /// short content, and with [`CoreError::Conflict`] when the trimmed title
    /// is already stored. Nothing is written on failure.
    pub async fn insert(storage: &Storage, input: &NewArticle) -> Result<DbId, DbError> {
        let prepared = input.prepare()?;
        // Naive UTC text, the same layout as SQLite's CURRENT_TIMESTAMP, so
        // date ordering compares like with like across old and new rows.
        let now = Utc::now().naive_utc();

        let mut tx = storage.pool().begin().await?;

        let result = sqlx::query(
            "INSERT INTO articles \
                 (title, content, summary, url, saved_date, fetched_date, word_count, character_count) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&prepared.title)
        .bind(&prepared.content)
        .bind(&prepared.summary)
        .bind(&prepared.url)
        .bind(now)
        .bind(now)
        .bind(prepared.word_count)
        .bind(prepared.character_count)
        .execute(&mut *tx)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(err) if is_unique_violation(&err) => {
                tracing::debug!(title = %prepared.title, "Duplicate article title");
                return Err(CoreError::Conflict(DUPLICATE_TITLE_MESSAGE.into()).into());
            }
            Err(err) => return Err(err.into()),
        };

        for name in &prepared.tags {
            tag_repo::link_tag(&mut tx, id, name).await?;
        }

        tx.commit().await?;

        tracing::info!(
            article_id = id,
            title = %prepared.title,
            word_count = prepared.word_count,
            tags = prepared.tags.len(),
            "Article saved",
        );
        Ok(id)
    }

    /// Fetch a full article with its tag names.
    pub async fn get_by_id(storage: &Storage, id: DbId) -> Result<ArticleWithTags, DbError> {
        let mut conn = storage.pool().acquire().await?;

        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = ?");
        let article = sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Article",
                id,
            })?;

        let tags = tag_repo::tag_names(&mut conn, id).await?;

        Ok(ArticleWithTags { article, tags })
    }

    /// Id of the article with exactly this (trimmed) title, if stored.
    pub async fn find_id_by_title(
        storage: &Storage,
        title: &str,
    ) -> Result<Option<DbId>, DbError> {
        let id = sqlx::query_scalar::<_, DbId>("SELECT id FROM articles WHERE title = ?")
            .bind(title.trim())
            .fetch_optional(storage.pool())
            .await?;
        Ok(id)
    }

    /// List articles newest first.
    ///
    /// `limit` is clamped to 1..=100 (default 50) and `offset` to >= 0.
    pub async fn list(
        storage: &Storage,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ArticleListItem>, DbError> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);

        let query = format!(
            "SELECT id, title, saved_date, word_count, \
                    substr(summary, 1, {LIST_SUMMARY_CHARS}) AS summary \
             FROM articles \
             ORDER BY saved_date DESC, id DESC \
             LIMIT ? OFFSET ?"
        );
        let items = sqlx::query_as::<_, ArticleListItem>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(storage.pool())
            .await?;
        Ok(items)
    }

    /// Case-insensitive substring search over title and content.
    ///
    /// Title matches score 2 and rank above content-only matches (score 1);
    /// ties are broken newest first. A blank query returns no hits.
    pub async fn search(storage: &Storage, query: &str) -> Result<Vec<SearchHit>, DbError> {
        let Some(term) = normalize_query(query) else {
            return Ok(Vec::new());
        };
        let pattern = contains_pattern(term);

        let sql = format!(
            r"SELECT id, title, summary, url, word_count, saved_date,
                     CASE WHEN title LIKE ?1 ESCAPE '\' THEN {TITLE_MATCH_SCORE}
                          ELSE {CONTENT_MATCH_SCORE} END AS relevance_score
              FROM articles
              WHERE title LIKE ?1 ESCAPE '\' OR content LIKE ?1 ESCAPE '\'
              ORDER BY relevance_score DESC, saved_date DESC, id DESC"
        );
        let hits = sqlx::query_as::<_, SearchHit>(&sql)
            .bind(&pattern)
            .fetch_all(storage.pool())
            .await?;

        tracing::debug!(query = %term, hits = hits.len(), "Article search");
        Ok(hits)
    }

    /// Delete one article. Returns the number of rows removed (0 or 1).
    ///
    /// Tag links and the favorite mark go with it via `ON DELETE CASCADE`.
    pub async fn delete(storage: &Storage, id: DbId) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(storage.pool())
            .await?;

        let removed = result.rows_affected();
        if removed > 0 {
            tracing::info!(article_id = id, "Article deleted");
        }
        Ok(removed)
    }

    /// Delete every article in `ids`, skipping ids that do not exist.
    /// Returns the number of rows actually removed.
    pub async fn delete_many(storage: &Storage, ids: &[DbId]) -> Result<u64, DbError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = storage.pool().begin().await?;

        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("DELETE FROM articles WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let removed = builder.build().execute(&mut *tx).await?.rows_affected();
        tx.commit().await?;

        tracing::info!(requested = ids.len(), removed, "Bulk delete");
        Ok(removed)
    }

    /// Totals, date range and on-disk size of the store.
    pub async fn stats(storage: &Storage) -> Result<StorageStats, DbError> {
        let (total_articles, total_words, oldest, newest) =
            sqlx::query_as::<_, (i64, i64, Option<String>, Option<String>)>(
                "SELECT COUNT(*), COALESCE(SUM(word_count), 0), \
                        MIN(saved_date), MAX(saved_date) \
                 FROM articles",
            )
            .fetch_one(storage.pool())
            .await?;

        let database_size_mb = match storage.file_path() {
            Some(path) => match std::fs::metadata(path) {
                Ok(meta) => round_2(meta.len() as f64 / BYTES_PER_MB),
                Err(_) => 0.0,
            },
            None => 0.0,
        };

        let (oldest_article_date, newest_article_date) = if total_articles == 0 {
            (None, None)
        } else {
            (
                oldest.as_deref().and_then(parse_timestamp),
                newest.as_deref().and_then(parse_timestamp),
            )
        };

        Ok(StorageStats {
            total_articles,
            total_words,
            oldest_article_date,
            newest_article_date,
            database_size_mb,
        })
    }
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a stored timestamp. Accepts the naive `CURRENT_TIMESTAMP` layout
/// (what this crate writes), naive ISO, and RFC 3339.
fn parse_timestamp(s: &str) -> Option<wikicache_core::types::Timestamp> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
