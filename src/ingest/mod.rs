// src/ingest/mod.rs
pub mod adapters;
pub mod config;
pub mod normalizer;
pub mod types;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use once_cell::sync::OnceCell;

use crate::event::Event;
use crate::ingest::types::{RawRecord, SourceAdapter};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "aggregate_raw_records_total",
            "Raw records fetched from adapters."
        );
        describe_counter!(
            "aggregate_events_total",
            "Events kept after normalization per pass."
        );
        describe_counter!(
            "aggregate_dropped_total",
            "Raw records dropped during normalization."
        );
        describe_counter!(
            "aggregate_adapter_errors_total",
            "Adapter fetch/parse errors."
        );
        describe_counter!(
            "aggregate_feed_errors_total",
            "Individual syndication feed failures."
        );
        describe_histogram!("aggregate_pass_ms", "Full aggregation pass time in milliseconds.");
        describe_gauge!(
            "aggregate_last_run_ts",
            "Unix ts when the aggregation pipeline last ran."
        );
    });
}

/// Pipeline knobs resolved once at startup.
#[derive(Debug, Clone, Copy)]
pub struct PassConfig {
    pub headline_max_chars: usize,
    /// `None` means no cap on the merged collection.
    pub max_events: Option<usize>,
}

/// Run one aggregation pass: fan out to every adapter concurrently, fan in
/// once all have settled, normalize, merge, sort newest-first, optionally
/// cap. An adapter failure is logged and contributes nothing; the pass
/// itself never fails.
///
/// The sort is stable, so records with equal timestamps keep their
/// concatenation order, which is the adapter registration order.
pub async fn run_pass(adapters: &[Box<dyn SourceAdapter>], cfg: PassConfig) -> Vec<Event> {
    ensure_metrics_described();
    let t0 = std::time::Instant::now();

    let results = join_all(adapters.iter().map(|a| a.fetch_latest())).await;

    let mut raw: Vec<RawRecord> = Vec::new();
    for (adapter, res) in adapters.iter().zip(results) {
        match res {
            Ok(mut v) => {
                counter!("aggregate_raw_records_total").increment(v.len() as u64);
                raw.append(&mut v);
            }
            Err(e) => {
                tracing::warn!(error = ?e, adapter = adapter.name(), "adapter error");
                counter!("aggregate_adapter_errors_total").increment(1);
            }
        }
    }

    let total_raw = raw.len();
    let mut events: Vec<Event> = raw
        .iter()
        .filter_map(|r| normalizer::normalize(r, cfg.headline_max_chars))
        .collect();
    counter!("aggregate_dropped_total").increment((total_raw - events.len()) as u64);

    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    if let Some(cap) = cfg.max_events {
        events.truncate(cap);
    }

    histogram!("aggregate_pass_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
    counter!("aggregate_events_total").increment(events.len() as u64);
    gauge!("aggregate_last_run_ts").set(Utc::now().timestamp().max(0) as f64);

    events
}

/// Normalize text: decode entities, strip tags, collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Normalize curly quotes and guillemets to ASCII
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();
    out = out.trim().to_string();

    // 5) Length cap: 1500 chars
    if out.chars().count() > 1500 {
        out = out.chars().take(1500).collect();
    }

    out
}

pub(crate) fn parse_rfc3339_utc(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_strips_markup_and_collapses_ws() {
        let s = "  <b>Hola&nbsp;&nbsp;mundo</b> &ldquo;ok&rdquo;  ";
        assert_eq!(normalize_text(s), r#"Hola mundo "ok""#);
    }

    #[test]
    fn normalize_text_caps_length() {
        let s = "a".repeat(2000);
        assert_eq!(normalize_text(&s).chars().count(), 1500);
    }

    #[test]
    fn rfc3339_parser_accepts_offsets_and_rejects_garbage() {
        let dt = parse_rfc3339_utc("2025-09-03T02:00:00-07:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-09-03T09:00:00+00:00");
        assert!(parse_rfc3339_utc("ayer").is_none());
    }
}
