// src/ingest/adapters/newsapi.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::ingest::parse_rfc3339_utc;
use crate::ingest::types::{RawRecord, SourceAdapter, SourceKind};

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";

/// Fixed topical keyword set, scoped to the region.
const QUERY: &str =
    "(Sonora OR Hermosillo) AND (emergencia OR inundación OR incendio OR sismo OR alerta)";
const PAGE_SIZE: u32 = 20;

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    source: ArticleSource,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

/// News-article search adapter. Without an API key it degrades to an empty
/// result without touching the network.
pub struct NewsApiAdapter {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl NewsApiAdapter {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            client: super::http_client(),
        }
    }

    fn map_articles(articles: Vec<Article>) -> Vec<RawRecord> {
        let mut out = Vec::with_capacity(articles.len());
        for (idx, art) in articles.into_iter().enumerate() {
            let title = art.title.unwrap_or_default();
            let description = art.description.unwrap_or_default();
            if title.is_empty() && description.is_empty() {
                continue;
            }

            // Articles carry no stable id; the url is the best identifier
            // and the position is the fallback.
            let external_id = art.url.clone().unwrap_or_else(|| idx.to_string());

            let mut rec = RawRecord::text(
                SourceKind::NewsApi,
                external_id,
                art.source.name.unwrap_or_else(|| "NewsAPI".to_string()),
                description,
            );
            rec.timestamp = art.published_at.as_deref().and_then(parse_rfc3339_utc);
            rec.source_url = art.url;
            rec.title = (!title.is_empty()).then_some(title);
            out.push(rec);
        }
        out
    }
}

#[async_trait]
impl SourceAdapter for NewsApiAdapter {
    async fn fetch_latest(&self) -> Result<Vec<RawRecord>> {
        let Some(key) = &self.api_key else {
            tracing::warn!("NEWS_API_KEY not set; skipping news feed");
            return Ok(Vec::new());
        };

        let resp = self
            .client
            .get(EVERYTHING_URL)
            .query(&[
                ("q", QUERY.to_string()),
                ("language", "es".to_string()),
                ("sortBy", "publishedAt".to_string()),
                ("pageSize", PAGE_SIZE.to_string()),
                ("apiKey", key.clone()),
            ])
            .send()
            .await
            .context("newsapi everything search")?
            .error_for_status()
            .context("newsapi response status")?;

        let parsed: NewsResponse = resp.json().await.context("newsapi response json")?;
        Ok(Self::map_articles(parsed.articles))
    }

    fn name(&self) -> &'static str {
        "newsapi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_short_circuits_to_empty() {
        let adapter = NewsApiAdapter::new(None);
        assert!(adapter.fetch_latest().await.unwrap().is_empty());
    }

    #[test]
    fn maps_articles_and_skips_empty_ones() {
        let payload = r#"{
            "articles": [
                {
                    "source": {"name": "El Imparcial"},
                    "title": "Inundaciones en Hermosillo",
                    "description": "Varias colonias afectadas por la lluvia.",
                    "url": "https://example.test/nota",
                    "publishedAt": "2025-09-03T04:30:00Z"
                },
                {"source": {"name": "Vacía"}, "title": null, "description": null, "url": null, "publishedAt": null}
            ]
        }"#;
        let parsed: NewsResponse = serde_json::from_str(payload).unwrap();
        let recs = NewsApiAdapter::map_articles(parsed.articles);

        assert_eq!(recs.len(), 1, "articles without any text are skipped");
        assert_eq!(recs[0].external_id, "https://example.test/nota");
        assert_eq!(recs[0].source_name, "El Imparcial");
        assert_eq!(recs[0].title.as_deref(), Some("Inundaciones en Hermosillo"));
        assert!(recs[0].timestamp.is_some());
    }

    #[test]
    fn description_only_articles_keep_position_based_ids() {
        let articles = vec![Article {
            source: ArticleSource { name: None },
            title: None,
            description: Some("Reporte sin enlace".to_string()),
            url: None,
            published_at: Some("2025-09-03T09:00:00Z".to_string()),
        }];
        let recs = NewsApiAdapter::map_articles(articles);
        assert_eq!(recs[0].external_id, "0");
        assert_eq!(recs[0].source_name, "NewsAPI");
        assert!(recs[0].title.is_none());
    }
}
