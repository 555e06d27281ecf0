// src/ingest/adapters/mod.rs
pub mod newsapi;
pub mod official;
pub mod rss;
pub mod twitter;

pub use newsapi::NewsApiAdapter;
pub use official::OfficialMockAdapter;
pub use rss::RssAdapter;
pub use twitter::TwitterAdapter;

use std::time::Duration;

/// Per-call network deadline. The pipeline itself imposes no overall
/// deadline; a slow source delays the pass by at most this much.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
