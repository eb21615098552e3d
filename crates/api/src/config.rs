use std::path::PathBuf;
use std::time::Duration;

use axum::http::HeaderValue;

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Settings for the Wikipedia client.
#[derive(Debug, Clone)]
pub struct WikiConfig {
    /// MediaWiki action API endpoint.
    pub api_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local use.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// SQLite file backing the cache.
    pub database_path: PathBuf,
    /// Directory scanned for legacy flat-file articles.
    pub legacy_dir: PathBuf,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub wiki: WikiConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                               |
    /// |------------------------|---------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                             |
    /// | `PORT`                 | `5000`                                |
    /// | `DATABASE_PATH`        | `./data/wikifetch.db`                 |
    /// | `LEGACY_DIR`           | `downloaded_data`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5000`               |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                  |
    /// | `WIKI_API_URL`         | `https://en.wikipedia.org/w/api.php`  |
    /// | `WIKI_USER_AGENT`      | `wikicache/<version>`                 |
    /// | `WIKI_TIMEOUT_SECS`    | `15`                                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port = parse_number("PORT", var("PORT", "5000"), "u16")?;

        let cors_origins = var("CORS_ORIGINS", "http://localhost:5000")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    expected: "origin list",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs =
            parse_number("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS", "30"), "u64")?;
        let wiki_timeout_secs: u64 =
            parse_number("WIKI_TIMEOUT_SECS", var("WIKI_TIMEOUT_SECS", "15"), "u64")?;

        Ok(Self {
            host,
            port,
            database_path: PathBuf::from(var("DATABASE_PATH", "./data/wikifetch.db")),
            legacy_dir: PathBuf::from(var("LEGACY_DIR", "downloaded_data")),
            cors_origins,
            request_timeout_secs,
            wiki: WikiConfig {
                api_url: var("WIKI_API_URL", wikicache_wiki::DEFAULT_API_URL),
                user_agent: var("WIKI_USER_AGENT", wikicache_wiki::DEFAULT_USER_AGENT),
                timeout: Duration::from_secs(wiki_timeout_secs),
            },
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    var: &'static str,
    value: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected,
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.database_path, PathBuf::from("./data/wikifetch.db"));
        assert_eq!(config.legacy_dir, PathBuf::from("downloaded_data"));
        assert_eq!(config.cors_origins, vec!["http://localhost:5000"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.wiki.api_url, wikicache_wiki::DEFAULT_API_URL);
        assert_eq!(config.wiki.timeout, Duration::from_secs(15));
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("WIKI_TIMEOUT_SECS", "3"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.wiki.timeout, Duration::from_secs(3));
    }

    #[test]
    fn invalid_port_is_an_error() {
        assert_matches!(
            config_from(&[("PORT", "http")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
    }
}
