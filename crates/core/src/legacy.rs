//! The legacy flat-file article format.
//!
//! Before articles were kept in SQLite they were written to one text file
//! per article:
//!
//! ```text
//! Title: <title>
//!
//! <content>
//! ```
//!
//! File names are the title with spaces replaced by underscores plus a
//! `.txt` extension. This module parses and renders that format; importing
//! parsed files into the store lives in `wikicache_db::migration`.

use std::borrow::Cow;
use std::path::Path;

use crate::article::{self, MIN_CONTENT_LENGTH};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Marker every legacy file starts with.
pub const TITLE_MARKER: &str = "Title:";

/// Blank line separating the header from the body.
pub const SEPARATOR: &str = "\n\n";

/// Extension of legacy article files.
pub const LEGACY_EXTENSION: &str = "txt";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An article recovered from a legacy file, with its derived fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyArticle {
    pub title: String,
    pub content: String,
    pub url: String,
    pub word_count: i64,
    pub char_count: i64,
}

/// Reasons a legacy file cannot be imported. Checked in declaration order.
#[derive(Debug, thiserror::Error)]
pub enum LegacyFormatError {
    #[error("File not found")]
    Missing,

    #[error("Could not read file: {0}")]
    Unreadable(#[source] std::io::Error),

    #[error("Invalid format: file must start with 'Title:'")]
    MissingTitleMarker,

    #[error("Invalid format: missing blank line after the title")]
    MissingSeparator,

    #[error("Invalid format: title is empty")]
    EmptyTitle,

    #[error("Content too short (minimum 10 characters)")]
    ContentTooShort,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Read and parse a legacy file.
pub fn parse_file(path: &Path) -> Result<LegacyArticle, LegacyFormatError> {
    if !path.is_file() {
        return Err(LegacyFormatError::Missing);
    }
    let text = std::fs::read_to_string(path).map_err(LegacyFormatError::Unreadable)?;
    parse_str(&text)
}

/// Parse the text of a legacy file.
///
/// The first line carries the title. Any further lines before the blank
/// separator are kept as the start of the body.
pub fn parse_str(text: &str) -> Result<LegacyArticle, LegacyFormatError> {
    let text: Cow<'_, str> = if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    };

    if !text.starts_with(TITLE_MARKER) {
        return Err(LegacyFormatError::MissingTitleMarker);
    }

    let (header, body) = text
        .split_once(SEPARATOR)
        .ok_or(LegacyFormatError::MissingSeparator)?;

    let (title_line, header_rest) = header.split_once('\n').unwrap_or((header, ""));
    let title = title_line[TITLE_MARKER.len()..].trim();
    if title.is_empty() {
        return Err(LegacyFormatError::EmptyTitle);
    }

    let body: Cow<'_, str> = if header_rest.trim().is_empty() {
        Cow::Borrowed(body)
    } else {
        Cow::Owned(format!("{header_rest}{SEPARATOR}{body}"))
    };
    let content = body.trim();
    if (content.chars().count() as u64) < MIN_CONTENT_LENGTH {
        return Err(LegacyFormatError::ContentTooShort);
    }

    Ok(LegacyArticle {
        title: title.to_string(),
        content: content.to_string(),
        url: article::canonical_url(title),
        word_count: article::count_words(content),
        char_count: article::count_chars(content),
    })
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render an article in the legacy format.
pub fn render(title: &str, content: &str) -> String {
    format!("{TITLE_MARKER} {title}{SEPARATOR}{content}")
}

/// Legacy file name for a title.
pub fn file_name(title: &str) -> String {
    format!("{}.{LEGACY_EXTENSION}", article::file_stem(title))
}

/// Whether a path looks like a legacy article file.
pub fn is_legacy_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(LEGACY_EXTENSION))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
