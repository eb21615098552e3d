//! The HTML index page: search form, fetch-and-save, recent articles.

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;
use wikicache_core::error::CoreError;
use wikicache_db::models::article::NewArticle;
use wikicache_db::repositories::ArticleRepo;
use wikicache_db::DbError;
use wikicache_wiki::FetchOutcome;

use crate::error::AppResult;
use crate::state::AppState;
use crate::views::{self, FetchedArticle, IndexView, Notice, NoticeKind};

/// Number of recent articles listed under the form.
const RECENT_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct FetchForm {
    #[serde(default)]
    pub query: String,
}

/// GET /
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    render(&state, IndexView::default()).await
}

/// POST /
///
/// Fetches the query from Wikipedia and saves it. A title that is already
/// stored, an ambiguous query and a miss are each reported on the page.
/// When Wikipedia cannot be reached the page falls back to saved articles
/// matching the query.
pub async fn fetch(
    State(state): State<AppState>,
    Form(form): Form<FetchForm>,
) -> AppResult<Html<String>> {
    let query = form.query.trim().to_string();
    let mut view = IndexView {
        query: query.clone(),
        ..Default::default()
    };

    if query.is_empty() {
        view.notice = Some(Notice::new(NoticeKind::Error, "Please enter a search term."));
        return render(&state, view).await;
    }

    match state.wiki.fetch_page(&query).await {
        Ok(FetchOutcome::Page(page)) => {
            let input = NewArticle::new(&page.title, &page.content, Some(page.url.clone()));
            match ArticleRepo::insert(&state.storage, &input).await {
                Ok(id) => {
                    tracing::info!(article_id = id, title = %page.title, "Article saved");
                    view.notice = Some(Notice::new(
                        NoticeKind::Info,
                        format!("Saved \"{}\".", page.title),
                    ));
                    view.fetched = Some(FetchedArticle { id: Some(id), page });
                }
                Err(DbError::Core(CoreError::Conflict(message))) => {
                    let id = ArticleRepo::find_id_by_title(&state.storage, &page.title).await?;
                    view.notice = Some(Notice::new(NoticeKind::Info, format!("{message}.")));
                    view.fetched = Some(FetchedArticle { id, page });
                }
                Err(DbError::Core(CoreError::Validation(message))) => {
                    view.notice = Some(Notice::new(
                        NoticeKind::Error,
                        format!("Could not save \"{}\": {message}", page.title),
                    ));
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(FetchOutcome::Ambiguous { query, options }) => {
            view.notice = Some(Notice::new(
                NoticeKind::Warning,
                format!("\"{query}\" may refer to several articles. Pick one:"),
            ));
            view.options = options;
        }
        Ok(FetchOutcome::NotFound { query }) => {
            view.notice = Some(Notice::new(
                NoticeKind::Warning,
                format!("No Wikipedia article found for \"{query}\"."),
            ));
        }
        Err(err) => {
            let err = CoreError::from(err);
            tracing::warn!(%query, error = %err, "Wikipedia unavailable, searching saved articles");
            view.local_results = ArticleRepo::search(&state.storage, &query).await?;
            let message = if view.local_results.is_empty() {
                "Wikipedia is unavailable and no saved article matches.".to_string()
            } else {
                format!(
                    "Wikipedia is unavailable. Showing {} saved article(s) matching \"{query}\".",
                    view.local_results.len()
                )
            };
            view.notice = Some(Notice::new(NoticeKind::Warning, message));
        }
    }

    render(&state, view).await
}

async fn render(state: &AppState, mut view: IndexView) -> AppResult<Html<String>> {
    view.recent = ArticleRepo::list(&state.storage, Some(RECENT_LIMIT), None).await?;
    Ok(Html(views::index_page(&view).into_string()))
}
