//! OMDb (Open Movie Database) catalog client.
//!
//! Implements [`CatalogService`] against the OMDb query-string API:
//!
//! - search: `?apikey=<key>&s=<term>&type=movie`
//! - lookup: `?apikey=<key>&i=<imdb id>`
//!
//! Both answer with a `Response: "True" | "False"` envelope. A `"False"`
//! envelope carries an `Error` string that is passed through untouched.
//!
//! No rate limiting and no retry: every call is a single GET.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reelscout_common::encode::encode_component;
use reelscout_common::SearchResult;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::provider::{CatalogService, Envelope, SearchPage, TitleDetail};
use crate::config::CatalogConfig;

// ---------------------------------------------------------------------------
// OMDb API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbSearchResponse {
    response: String,
    #[serde(default)]
    search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbSearchItem {
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbDetailResponse {
    response: String,
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OMDb spells its success flag as a string.
fn is_true(flag: &str) -> bool {
    flag.trim().eq_ignore_ascii_case("true")
}

impl From<OmdbSearchItem> for SearchResult {
    fn from(item: OmdbSearchItem) -> Self {
        SearchResult {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: item.poster,
        }
    }
}

impl OmdbSearchResponse {
    fn into_envelope(self) -> Envelope<SearchPage> {
        if !is_true(&self.response) {
            return Envelope::Failed { reason: self.error };
        }

        let items: Vec<SearchResult> = self
            .search
            .unwrap_or_default()
            .into_iter()
            .filter(|item| {
                let keep = !item.imdb_id.trim().is_empty();
                if !keep {
                    debug!(title = ?item.title, "Skipping search item without an id");
                }
                keep
            })
            .map(SearchResult::from)
            .collect();
        let total = self.total_results.unwrap_or_else(|| items.len().to_string());

        Envelope::Found(SearchPage { items, total })
    }
}

impl OmdbDetailResponse {
    fn into_envelope(self) -> Envelope<TitleDetail> {
        if !is_true(&self.response) {
            return Envelope::Failed { reason: self.error };
        }

        Envelope::Found(TitleDetail {
            id: self.imdb_id,
            title: self.title,
            rating: self.imdb_rating,
        })
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// OMDb catalog client.
///
/// # Examples
///
/// ```no_run
/// use reelscout::catalog::OmdbClient;
/// use reelscout::config::CatalogConfig;
///
/// let config = CatalogConfig {
///     api_key: "your-api-key".into(),
///     ..CatalogConfig::default()
/// };
/// let client = OmdbClient::new(&config);
/// ```
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    media_type: String,
}

impl OmdbClient {
    /// Create a client from catalog configuration.
    pub fn new(config: &CatalogConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            media_type: config.media_type.clone(),
        }
    }

    /// Build a full request URL. Every parameter value is percent-encoded.
    fn url(&self, params: &[(&str, &str)]) -> String {
        self.url_with_key(&self.api_key, params)
    }

    /// Request URL safe for logging.
    fn redacted_url(&self, params: &[(&str, &str)]) -> String {
        self.url_with_key("***", params)
    }

    fn url_with_key(&self, api_key: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/?apikey={}", self.base_url, encode_component(api_key));
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&encode_component(value));
        }
        url
    }

    /// GET `url` and decode the JSON body. Any non-2xx status is an error.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .context("OMDb request failed")?
            .error_for_status()
            .context("OMDb request returned error status")?;

        resp.json::<T>()
            .await
            .context("failed to parse OMDb response body")
    }
}

#[async_trait]
impl CatalogService for OmdbClient {
    fn name(&self) -> &'static str {
        "omdb"
    }

    async fn search(&self, query: &str) -> anyhow::Result<Envelope<SearchPage>> {
        let params = [("s", query), ("type", self.media_type.as_str())];
        let url = self.url(&params);
        debug!(url = %self.redacted_url(&params), "OMDb search");

        let body: OmdbSearchResponse = self.get_json(&url).await?;
        Ok(body.into_envelope())
    }

    async fn lookup(&self, id: &str) -> anyhow::Result<Envelope<TitleDetail>> {
        let params = [("i", id)];
        let url = self.url(&params);
        debug!(url = %self.redacted_url(&params), "OMDb lookup");

        let body: OmdbDetailResponse = self.get_json(&url).await?;
        Ok(body.into_envelope())
    }
}
