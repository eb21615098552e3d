//! Client for the Wikipedia (MediaWiki action API) pages that get cached.
//!
//! [`WikiClient::fetch_page`] resolves a free-text query to a single article
//! and returns its plain-text extract, or reports that the query was
//! ambiguous or matched nothing.

pub mod client;
pub mod payload;

pub use client::{FetchOutcome, WikiClient, WikiError, WikiPage};

/// Default MediaWiki endpoint.
pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("wikicache/", env!("CARGO_PKG_VERSION"));

/// Maximum number of candidate titles offered for an ambiguous query.
pub const MAX_DISAMBIGUATION_OPTIONS: usize = 20;
