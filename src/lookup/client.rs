//! Lookup Service Client
//!
//! `LookupService` is the seam between the search core and the network.
//! `HttpLookup` implements it against a chucknorris.io-compatible JSON API:
//!
//! - `GET {base}/jokes/random` returns a single `Fact`.
//! - `GET {base}/jokes/search?query=...` returns `{ "total": n, "result": [...] }`.

use super::types::*;
use crate::config::LookupConfig;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub const ENDPOINT_RANDOM: &str = "/jokes/random";
pub const ENDPOINT_SEARCH: &str = "/jokes/search";

/// Asynchronous, single-shot access to the remote lookup service.
///
/// Implementations must be cheap to share (`Arc<dyn LookupService>`), because
/// every accepted query runs its fetch on its own task.
#[async_trait]
pub trait LookupService: Send + Sync + 'static {
    /// Fetches one random fact (used once at session bootstrap).
    async fn fetch_random(&self) -> Result<Fact, LookupError>;

    /// Runs a free-text search. The query is passed through verbatim.
    async fn search(&self, query: &str) -> Result<SearchPage, LookupError>;
}

/// reqwest-backed lookup client.
pub struct HttpLookup {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLookup {
    /// Builds a client with the configured transport timeout.
    ///
    /// A timeout surfaces to the core as `LookupError::Transport("timeout")`.
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn random_url(&self) -> String {
        format!("{}{}", self.base_url, ENDPOINT_RANDOM)
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}{}?query={}",
            self.base_url,
            ENDPOINT_SEARCH,
            urlencoding::encode(query)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, LookupError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let message = resp
                .json::<ServiceErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            return Err(LookupError::Service {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<T>().await.map_err(LookupError::from)
    }
}

#[async_trait]
impl LookupService for HttpLookup {
    async fn fetch_random(&self) -> Result<Fact, LookupError> {
        tracing::debug!("Fetching random fact from {}", self.base_url);
        self.get_json(self.random_url()).await
    }

    async fn search(&self, query: &str) -> Result<SearchPage, LookupError> {
        tracing::debug!("Searching '{}' on {}", query, self.base_url);
        let page: SearchPage = self.get_json(self.search_url(query)).await?;
        tracing::debug!("Search '{}' returned {} facts", query, page.items.len());
        Ok(page)
    }
}

/// Normalizes a configured base URL: trims whitespace, assumes `https://`
/// when no scheme is given, and drops trailing slashes.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    with_scheme.trim_end_matches('/').to_string()
}
