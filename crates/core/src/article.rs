//! Derived article fields: summary, word count, character count.
//!
//! These are computed once at insert time and stored alongside the content,
//! which never changes afterwards.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of an article title, in characters.
pub const MAX_TITLE_LENGTH: u64 = 500;

/// Minimum length of article content, in characters.
pub const MIN_CONTENT_LENGTH: u64 = 10;

/// Number of content characters considered for the stored summary.
pub const SUMMARY_MAX_CHARS: usize = 200;

/// Number of summary characters exposed in list views.
pub const LIST_SUMMARY_CHARS: i64 = 100;

/// Suffix appended to a summary cut at a word boundary.
pub const SUMMARY_ELLIPSIS: &str = "...";

/// Base URL for canonical article links.
pub const WIKIPEDIA_ARTICLE_BASE: &str = "https://en.wikipedia.org/wiki/";

// ---------------------------------------------------------------------------
// Derived fields
// ---------------------------------------------------------------------------

/// Build the stored summary for a piece of content.
///
/// Content of at most [`SUMMARY_MAX_CHARS`] characters is returned whole.
/// Longer content is cut to that many characters and then back to the last
/// space, with [`SUMMARY_ELLIPSIS`] appended. When the window has no usable
/// space the raw window is kept without an ellipsis.
pub fn summarize(content: &str) -> String {
    let cut = match content.char_indices().nth(SUMMARY_MAX_CHARS) {
        Some((idx, _)) => idx,
        None => return content.to_string(),
    };
    let window = &content[..cut];
    match window.rfind(' ') {
        Some(pos) if pos > 0 => format!("{}{SUMMARY_ELLIPSIS}", &window[..pos]),
        _ => window.to_string(),
    }
}

/// Number of whitespace-delimited tokens in `content`.
pub fn count_words(content: &str) -> i64 {
    content.split_whitespace().count() as i64
}

/// Length of `content` in characters (not bytes).
pub fn count_chars(content: &str) -> i64 {
    content.chars().count() as i64
}

/// Canonical Wikipedia URL for a title (spaces become underscores).
pub fn canonical_url(title: &str) -> String {
    format!("{WIKIPEDIA_ARTICLE_BASE}{}", title.trim().replace(' ', "_"))
}

/// File-system friendly stem for a title, as used by legacy exports.
pub fn file_stem(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|c| match c {
            ' ' => '_',
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_its_own_summary() {
        assert_eq!(summarize("A short body."), "A short body.");
    }

    #[test]
    fn exactly_max_chars_is_not_truncated() {
        let content = "a".repeat(SUMMARY_MAX_CHARS);
        assert_eq!(summarize(&content), content);
    }

    #[test]
    fn long_content_is_cut_at_last_space() {
        let content = "word ".repeat(60);
        let summary = summarize(&content);

        assert!(summary.ends_with(SUMMARY_ELLIPSIS));
        let body = summary.trim_end_matches(SUMMARY_ELLIPSIS);
        assert!(content.starts_with(body));
        assert!(!body.ends_with(' '));
        assert!(summary.chars().count() <= SUMMARY_MAX_CHARS + SUMMARY_ELLIPSIS.len());
    }

    #[test]
    fn long_content_without_spaces_keeps_raw_window() {
        let content = "x".repeat(450);
        let summary = summarize(&content);
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS);
        assert!(!summary.ends_with(SUMMARY_ELLIPSIS));
    }

    #[test]
    fn summary_counts_characters_not_bytes() {
        let content = "é".repeat(150) + " " + &"ü".repeat(150);
        let summary = summarize(&content);
        assert_eq!(summary, "é".repeat(150) + SUMMARY_ELLIPSIS);
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(count_words("one  two\tthree\nfour"), 4);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn char_count_is_unicode_aware() {
        assert_eq!(count_chars("naïve"), 5);
    }

    #[test]
    fn canonical_url_replaces_spaces() {
        assert_eq!(
            canonical_url("Turing Machine"),
            "https://en.wikipedia.org/wiki/Turing_Machine"
        );
    }

    #[test]
    fn file_stem_strips_path_separators() {
        assert_eq!(file_stem("AC/DC live"), "AC_DC_live");
    }
}
