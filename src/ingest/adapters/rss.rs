// src/ingest/adapters/rss.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use metrics::counter;
use quick_xml::de::from_str;
use serde::Deserialize;
use time::{format_description::well_known::Rfc2822, OffsetDateTime, UtcOffset};

use crate::ingest::normalize_text;
use crate::ingest::types::{RawRecord, SourceAdapter, SourceKind};

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    title: Option<String>,
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

fn parse_rfc2822_to_utc(ts: &str) -> Option<DateTime<Utc>> {
    OffsetDateTime::parse(ts, &Rfc2822)
        .ok()
        .map(|dt| dt.to_offset(UtcOffset::UTC).unix_timestamp())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
}

/// Syndication adapter over zero or more configured feed URLs. Each feed is
/// fetched and parsed independently, so one broken feed never blocks the
/// others. No credential required.
pub struct RssAdapter {
    feeds: Vec<String>,
    client: reqwest::Client,
}

impl RssAdapter {
    pub fn new(feeds: Vec<String>) -> Self {
        Self {
            feeds,
            client: super::http_client(),
        }
    }

    /// Parse one feed document into raw records. Items with no usable text
    /// are skipped; items with a broken `pubDate` keep a `None` timestamp
    /// for the normalizer to drop.
    pub fn parse_feed(xml: &str, feed_url: &str) -> Result<Vec<RawRecord>> {
        let xml_clean = scrub_html_entities_for_xml(xml);
        let rss: Rss = from_str(&xml_clean).context("parsing rss xml")?;

        let feed_name = rss
            .channel
            .title
            .map(|t| normalize_text(&t))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| feed_url.to_string());

        let mut out = Vec::with_capacity(rss.channel.item.len());
        for (idx, it) in rss.channel.item.into_iter().enumerate() {
            let title = normalize_text(it.title.as_deref().unwrap_or_default());
            let description = normalize_text(it.description.as_deref().unwrap_or_default());
            if title.is_empty() && description.is_empty() {
                continue;
            }

            // Links are unique across feeds; the fallback keys on the feed
            // so two feeds never collide on the same position.
            let external_id = it
                .link
                .clone()
                .unwrap_or_else(|| format!("{feed_url}#{idx}"));

            let mut rec = RawRecord::text(SourceKind::Rss, external_id, feed_name.clone(), description);
            rec.timestamp = it.pub_date.as_deref().and_then(parse_rfc2822_to_utc);
            rec.source_url = it.link;
            rec.title = (!title.is_empty()).then_some(title);
            out.push(rec);
        }
        Ok(out)
    }

    async fn fetch_one(&self, url: &str) -> Result<Vec<RawRecord>> {
        let body = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("fetching feed {url}"))?
            .error_for_status()
            .with_context(|| format!("feed status {url}"))?
            .text()
            .await
            .with_context(|| format!("reading feed body {url}"))?;
        Self::parse_feed(&body, url)
    }
}

#[async_trait]
impl SourceAdapter for RssAdapter {
    async fn fetch_latest(&self) -> Result<Vec<RawRecord>> {
        let results = join_all(self.feeds.iter().map(|url| self.fetch_one(url))).await;

        let mut out = Vec::new();
        for (url, res) in self.feeds.iter().zip(results) {
            match res {
                Ok(mut v) => out.append(&mut v),
                Err(e) => {
                    tracing::warn!(error = ?e, feed = %url, "feed error");
                    counter!("aggregate_feed_errors_total").increment(1);
                }
            }
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "rss"
    }
}

fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
