// src/ingest/adapters/twitter.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::ingest::parse_rfc3339_utc;
use crate::ingest::types::{RawRecord, SourceAdapter, SourceKind};

/// Official accounts monitored for emergency traffic.
const OFFICIAL_ACCOUNTS: &[&str] = &["PC_Sonora", "ClimaSonora", "GobiernoSonora"];

const SEARCH_URL: &str = "https://api.twitter.com/2/tweets/search/recent";
const MAX_RESULTS: u32 = 20;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    id: String,
    text: String,
    created_at: Option<String>,
    author_id: Option<String>,
}

/// Recent-search adapter over the official Sonora accounts. Without a
/// bearer token it degrades to an empty result without touching the
/// network.
pub struct TwitterAdapter {
    bearer_token: Option<String>,
    client: reqwest::Client,
}

impl TwitterAdapter {
    pub fn new(bearer_token: Option<String>) -> Self {
        Self {
            bearer_token: bearer_token.filter(|t| !t.is_empty()),
            client: super::http_client(),
        }
    }

    /// Disjunctive query over the account roster:
    /// `from:PC_Sonora OR from:ClimaSonora OR ...`
    fn build_query() -> String {
        OFFICIAL_ACCOUNTS
            .iter()
            .map(|acc| format!("from:{acc}"))
            .collect::<Vec<_>>()
            .join(" OR ")
    }

    fn map_tweets(tweets: Vec<Tweet>) -> Vec<RawRecord> {
        tweets
            .into_iter()
            .map(|tw| {
                let author = tw.author_id.as_deref().unwrap_or("desconocido").to_string();
                let mut rec = RawRecord::text(
                    SourceKind::Twitter,
                    tw.id.clone(),
                    format!("Twitter/@{author}"),
                    tw.text,
                );
                rec.timestamp = tw.created_at.as_deref().and_then(parse_rfc3339_utc);
                rec.source_url = Some(format!("https://twitter.com/{author}/status/{}", tw.id));
                rec
            })
            .collect()
    }
}

#[async_trait]
impl SourceAdapter for TwitterAdapter {
    async fn fetch_latest(&self) -> Result<Vec<RawRecord>> {
        let Some(token) = &self.bearer_token else {
            tracing::warn!("TWITTER_BEARER_TOKEN not set; skipping social feed");
            return Ok(Vec::new());
        };

        let resp = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("query", Self::build_query()),
                ("max_results", MAX_RESULTS.to_string()),
                ("tweet.fields", "created_at,author_id,text".to_string()),
            ])
            .bearer_auth(token)
            .send()
            .await
            .context("twitter recent search")?
            .error_for_status()
            .context("twitter response status")?;

        let parsed: SearchResponse = resp.json().await.context("twitter response json")?;
        Ok(Self::map_tweets(parsed.data))
    }

    fn name(&self) -> &'static str {
        "twitter"
    }
}
