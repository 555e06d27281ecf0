//! Environment configuration.
//!
//! Every knob is optional. A missing credential degrades the corresponding
//! adapter to empty results instead of failing startup.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_HEADLINE_MAX_CHARS: usize = 80;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub twitter_bearer_token: Option<String>,
    pub news_api_key: Option<String>,
    pub cache_ttl: Duration,
    pub headline_max_chars: usize,
    /// `None` means the merged collection is not capped.
    pub max_events: Option<usize>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: parsed("PORT").unwrap_or(DEFAULT_PORT),
            twitter_bearer_token: non_empty("TWITTER_BEARER_TOKEN"),
            news_api_key: non_empty("NEWS_API_KEY"),
            cache_ttl: Duration::from_secs(
                parsed("EVENTS_CACHE_TTL_SECS").unwrap_or(DEFAULT_CACHE_TTL_SECS),
            ),
            headline_max_chars: parsed("HEADLINE_MAX_CHARS")
                .unwrap_or(DEFAULT_HEADLINE_MAX_CHARS),
            max_events: parsed("MAX_EVENTS"),
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
