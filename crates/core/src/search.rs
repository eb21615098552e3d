//! Search and pagination helpers shared by the repositories and handlers.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default page size for article listing.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum page size for article listing.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Escape character used in `LIKE ... ESCAPE` clauses.
pub const LIKE_ESCAPE: char = '\\';

/// Relevance assigned to a hit whose title contains the query.
pub const TITLE_MATCH_SCORE: i64 = 2;

/// Relevance assigned to a hit whose content (but not title) contains the query.
pub const CONTENT_MATCH_SCORE: i64 = 1;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// LIKE patterns
// ---------------------------------------------------------------------------

/// Normalize a free-text query. Returns `None` when nothing is left to match.
pub fn normalize_query(query: &str) -> Option<&str> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Build a `%term%` pattern that matches `term` literally.
///
/// `%`, `_` and the escape character itself are escaped, so the pattern
/// must be used with `ESCAPE '\'`.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
