//! Shared test harness for integration tests.
//!
//! Provides a mock OMDb catalog built on [`wiremock`] and helpers that point a
//! reelscout [`Config`] at it.

#![allow(dead_code)]

use std::time::Duration;

use reelscout::config::{CatalogConfig, Config};
use serde_json::{json, Value};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-key";

/// Mock catalog server.
pub struct MockCatalog {
    pub server: MockServer,
}

impl MockCatalog {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Config pointing at this server with a short timeout.
    pub fn config(&self) -> Config {
        Config {
            catalog: CatalogConfig {
                base_url: self.server.uri(),
                api_key: API_KEY.to_string(),
                timeout_secs: 5,
                ..CatalogConfig::default()
            },
            ..Config::default()
        }
    }

    /// Answer keyword searches for `term` with `body`.
    pub async fn mount_search(&self, term: &str, body: Value) {
        Mock::given(method("GET"))
            .and(query_param("apikey", API_KEY))
            .and(query_param("s", term))
            .and(query_param("type", "movie"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer keyword searches for `term` with a raw response.
    pub async fn mount_search_response(&self, term: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(query_param("s", term))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Answer the lookup for `id` with `rating`.
    pub async fn mount_rating(&self, id: &str, rating: &str) {
        self.mount_rating_delayed(id, rating, Duration::ZERO).await;
    }

    pub async fn mount_rating_delayed(&self, id: &str, rating: &str, delay: Duration) {
        Mock::given(method("GET"))
            .and(query_param("apikey", API_KEY))
            .and(query_param("i", id))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(detail_body(id, rating))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer the lookup for `id` with a raw response.
    pub async fn mount_lookup_response(&self, id: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(query_param("i", id))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }
}

/// Ids used by [`search_body`] for item `i` of `prefix`.
pub fn item_id(prefix: &str, i: usize) -> String {
    format!("tt{prefix}{i:04}")
}

/// A successful search envelope with `n` items and the given total.
pub fn search_body(prefix: &str, n: usize, total: &str) -> Value {
    let items: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "Title": format!("{prefix} movie {i}"),
                "Year": format!("{}", 1990 + i),
                "imdbID": item_id(prefix, i),
                "Type": "movie",
                "Poster": if i % 2 == 0 { "N/A".to_string() } else { format!("https://img.example/{i}.jpg") },
            })
        })
        .collect();

    json!({
        "Search": items,
        "totalResults": total,
        "Response": "True",
    })
}

/// A failed envelope with an error message.
pub fn failure_body(error: &str) -> Value {
    json!({ "Response": "False", "Error": error })
}

pub fn detail_body(id: &str, rating: &str) -> Value {
    json!({
        "Title": "Some movie",
        "imdbID": id,
        "imdbRating": rating,
        "Response": "True",
    })
}
