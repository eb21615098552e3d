//! Server-rendered HTML for the index page.

use maud::{html, Markup, DOCTYPE};
use wikicache_core::types::{DbId, Timestamp};
use wikicache_db::models::article::{ArticleListItem, SearchHit};
use wikicache_wiki::WikiPage;

/// Severity of a message shown above the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            Self::Info => "notice info",
            Self::Warning => "notice warning",
            Self::Error => "notice error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// An article that was just fetched (and saved, when `id` is set).
#[derive(Debug, Clone)]
pub struct FetchedArticle {
    pub id: Option<DbId>,
    pub page: WikiPage,
}

/// Everything the index page can show.
#[derive(Debug, Clone, Default)]
pub struct IndexView {
    pub query: String,
    pub notice: Option<Notice>,
    pub fetched: Option<FetchedArticle>,
    /// Candidate titles for an ambiguous query.
    pub options: Vec<String>,
    /// Saved articles matching the query, shown when Wikipedia is unreachable.
    pub local_results: Vec<SearchHit>,
    pub recent: Vec<ArticleListItem>,
}

pub fn index_page(view: &IndexView) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Wikipedia cache" }
            }
            body {
                h1 { "Wikipedia cache" }
                form method="post" action="/" {
                    input type="text" name="query" value=(view.query)
                        placeholder="Search Wikipedia" autofocus;
                    button type="submit" { "Fetch" }
                }

                @if let Some(notice) = &view.notice {
                    p class=(notice.kind.class()) { (notice.message) }
                }

                @if let Some(fetched) = &view.fetched {
                    (fetched_article(fetched))
                }

                @if !view.options.is_empty() {
                    section class="options" {
                        h2 { "Did you mean" }
                        ul {
                            @for option in &view.options {
                                li {
                                    form method="post" action="/" {
                                        input type="hidden" name="query" value=(option);
                                        button type="submit" class="link" { (option) }
                                    }
                                }
                            }
                        }
                    }
                }

                @if !view.local_results.is_empty() {
                    section class="local-results" {
                        h2 { "Saved articles" }
                        ul {
                            @for hit in &view.local_results {
                                li {
                                    a href={ "/api/articles/" (hit.id) } { (hit.title) }
                                    @if let Some(summary) = &hit.summary {
                                        " "
                                        span class="summary" { (summary) }
                                    }
                                }
                            }
                        }
                    }
                }

                section class="recent" {
                    h2 { "Recently saved" }
                    @if view.recent.is_empty() {
                        p { "Nothing saved yet." }
                    } @else {
                        ul {
                            @for item in &view.recent {
                                li {
                                    a href={ "/api/articles/" (item.id) } { (item.title) }
                                    " "
                                    small { (format_date(&item.saved_date)) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn fetched_article(fetched: &FetchedArticle) -> Markup {
    let page = &fetched.page;
    html! {
        article {
            h2 { (page.title) }
            p class="source" {
                a href=(page.url) { (page.url) }
            }
            @if let Some(id) = fetched.id {
                p class="actions" {
                    a href={ "/api/export/" (id) "?format=txt" } { "Download" }
                }
            }
            @for paragraph in page.summary.split('\n').filter(|p| !p.trim().is_empty()) {
                p { (paragraph) }
            }
        }
    }
}

fn format_date(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}
