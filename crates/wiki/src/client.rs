//! HTTP client for the MediaWiki action API.
//!
//! Wraps the three lookups a fetch needs (search, page extract, page links)
//! using [`reqwest`]. Requests are made once; there is no retry.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wikicache_core::error::CoreError;

use crate::payload::{self, Envelope, PageLookup, PagesQuery, SearchQuery};
use crate::MAX_DISAMBIGUATION_OPTIONS;

/// HTTP client for a single MediaWiki endpoint.
#[derive(Debug, Clone)]
pub struct WikiClient {
    client: reqwest::Client,
    api_url: String,
}

/// A fetched article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WikiPage {
    pub title: String,
    /// Lead section of the extract.
    pub summary: String,
    /// Full plain-text extract.
    pub content: String,
    pub url: String,
}

/// Result of resolving a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Page(WikiPage),
    /// The query landed on a disambiguation page.
    Ambiguous { query: String, options: Vec<String> },
    NotFound { query: String },
}

/// Errors from the MediaWiki client.
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Wikipedia API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// MediaWiki answered with an `error` object.
    #[error("Wikipedia API rejected the request [{code}]: {info}")]
    Remote { code: String, info: String },

    /// The body could not be interpreted.
    #[error("Malformed Wikipedia response: {0}")]
    Malformed(String),
}

impl From<WikiError> for CoreError {
    fn from(err: WikiError) -> Self {
        CoreError::UpstreamUnavailable(err.to_string())
    }
}

impl WikiClient {
    /// Create a client for `api_url` with the given user agent and timeout.
    pub fn new(
        api_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, WikiError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(client, api_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Resolve `query` to an article.
    ///
    /// The top search hit is looked up with redirects followed. Landing on a
    /// disambiguation page yields [`FetchOutcome::Ambiguous`] with up to
    /// [`MAX_DISAMBIGUATION_OPTIONS`] candidate titles.
    pub async fn fetch_page(&self, query: &str) -> Result<FetchOutcome, WikiError> {
        let query = query.trim();
        let not_found = || FetchOutcome::NotFound {
            query: query.to_string(),
        };

        let Some(title) = self.search_title(query).await? else {
            tracing::debug!(query, "No search hit");
            return Ok(not_found());
        };

        let lookup = self
            .query::<PagesQuery>(&[
                ("titles", title.as_str()),
                ("prop", "extracts|info|pageprops"),
                ("explaintext", "1"),
                ("inprop", "url"),
                ("ppprop", "disambiguation"),
                ("redirects", "1"),
            ])
            .await?;

        match payload::interpret_page(lookup) {
            PageLookup::Missing => Ok(not_found()),
            PageLookup::Disambiguation { title } => {
                let options = self.links(&title).await?;
                tracing::debug!(query, %title, options = options.len(), "Disambiguation page");
                Ok(FetchOutcome::Ambiguous {
                    query: query.to_string(),
                    options,
                })
            }
            PageLookup::Article {
                title,
                summary,
                content,
                url,
            } => {
                tracing::info!(query, %title, chars = content.len(), "Fetched article");
                Ok(FetchOutcome::Page(WikiPage {
                    title,
                    summary,
                    content,
                    url,
                }))
            }
        }
    }

    // ---- private helpers ----

    async fn search_title(&self, query: &str) -> Result<Option<String>, WikiError> {
        let result = self
            .query::<SearchQuery>(&[
                ("list", "search"),
                ("srsearch", query),
                ("srnamespace", "0"),
                ("srlimit", "1"),
            ])
            .await?;
        Ok(payload::top_title(result))
    }

    async fn links(&self, title: &str) -> Result<Vec<String>, WikiError> {
        let limit = MAX_DISAMBIGUATION_OPTIONS.to_string();
        let result = self
            .query::<PagesQuery>(&[
                ("titles", title),
                ("prop", "links"),
                ("plnamespace", "0"),
                ("pllimit", limit.as_str()),
            ])
            .await?;
        Ok(payload::link_titles(result, MAX_DISAMBIGUATION_OPTIONS))
    }

    /// Run an `action=query` request and unwrap its envelope.
    async fn query<T: DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<Option<T>, WikiError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await?;

        let envelope: Envelope<T> = Self::parse_response(response).await?;
        if let Some(error) = envelope.error {
            return Err(WikiError::Remote {
                code: error.code,
                info: error.info,
            });
        }
        Ok(envelope.query)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`WikiError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, WikiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(WikiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WikiError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|err| WikiError::Malformed(err.to_string()))
    }
}
