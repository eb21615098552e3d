//! Article models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wikicache_core::article;
use wikicache_core::error::CoreError;
use wikicache_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `articles` table.
///
/// Derived columns are nullable so stores written by older releases still load.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub url: Option<String>,
    pub saved_date: Timestamp,
    pub fetched_date: Option<Timestamp>,
    pub word_count: Option<i64>,
    pub character_count: Option<i64>,
}

/// A full article plus the names of its tags.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleWithTags {
    #[serde(flatten)]
    pub article: Article,
    pub tags: Vec<String>,
}

/// Lightweight article row used by list views. `summary` is cut to
/// [`article::LIST_SUMMARY_CHARS`] characters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleListItem {
    pub id: DbId,
    pub title: String,
    pub saved_date: Timestamp,
    pub word_count: Option<i64>,
    pub summary: Option<String>,
}

/// A search result with its relevance score (2 = title match, 1 = content only).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SearchHit {
    pub id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub url: Option<String>,
    pub word_count: Option<i64>,
    pub saved_date: Timestamp,
    pub relevance_score: i64,
}

/// Aggregate figures about the store.
#[derive(Debug, Clone, Serialize)]
pub struct StorageStats {
    pub total_articles: i64,
    pub total_words: i64,
    pub oldest_article_date: Option<Timestamp>,
    pub newest_article_date: Option<Timestamp>,
    pub database_size_mb: f64,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Input for saving a new article.
///
/// Counts are computed from `content` when absent. Tag names are trimmed and
/// blank names skipped.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewArticle {
    #[validate(length(max = 500, message = "Title must be at most 500 characters"))]
    pub title: String,
    #[validate(length(
        min = 10,
        message = "Content is required and must be at least 10 characters"
    ))]
    pub content: String,
    pub url: Option<String>,
    pub word_count: Option<i64>,
    pub char_count: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A [`NewArticle`] that passed validation, with every derived field filled in.
#[derive(Debug, Clone)]
pub struct PreparedArticle {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub url: Option<String>,
    pub word_count: i64,
    pub character_count: i64,
    pub tags: Vec<String>,
}

impl NewArticle {
    pub fn new(title: impl Into<String>, content: impl Into<String>, url: Option<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            url,
            word_count: None,
            char_count: None,
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Validate and compute derived fields. The title is trimmed before its
    /// length is checked.
    pub fn prepare(&self) -> Result<PreparedArticle, CoreError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("Title is required".into()));
        }

        let trimmed = NewArticle {
            title: title.to_string(),
            ..self.clone()
        };
        trimmed.validate().map_err(validation_message)?;

        let tags = trimmed
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        Ok(PreparedArticle {
            summary: article::summarize(&trimmed.content),
            word_count: trimmed
                .word_count
                .unwrap_or_else(|| article::count_words(&trimmed.content)),
            character_count: trimmed
                .char_count
                .unwrap_or_else(|| article::count_chars(&trimmed.content)),
            title: trimmed.title,
            content: trimmed.content,
            url: trimmed.url,
            tags,
        })
    }
}

/// Collapse validator output into a single human-readable message.
fn validation_message(errors: validator::ValidationErrors) -> CoreError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"))
            })
        })
        .collect::<Vec<_>>()
        .join("; ");

    CoreError::Validation(message)
}
