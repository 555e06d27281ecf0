// tests/pipeline_order.rs
//
// Invariants of a single aggregation pass:
// - output sorted non-increasing by timestamp for any adapter mix
// - equal timestamps keep adapter registration order (stable merge)
// - a failing adapter contributes nothing and fails nothing
// - records without a parseable timestamp are dropped
// - the optional cap keeps the newest events

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use monson::ingest::types::{RawRecord, SourceAdapter, SourceKind};
use monson::ingest::{run_pass, PassConfig};

fn ts(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 3, hour, min, 0).unwrap()
}

fn record(kind: SourceKind, id: &str, stamp: Option<DateTime<Utc>>) -> RawRecord {
    let mut r = RawRecord::text(kind, id, "test", format!("registro {id}"));
    r.timestamp = stamp;
    r
}

struct FixedAdapter {
    name: &'static str,
    records: Vec<RawRecord>,
}

#[async_trait]
impl SourceAdapter for FixedAdapter {
    async fn fetch_latest(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }
    fn name(&self) -> &'static str {
        self.name
    }
}

struct FailingAdapter;

#[async_trait]
impl SourceAdapter for FailingAdapter {
    async fn fetch_latest(&self) -> Result<Vec<RawRecord>> {
        bail!("simulated outage")
    }
    fn name(&self) -> &'static str {
        "failing"
    }
}

const CFG: PassConfig = PassConfig {
    headline_max_chars: 80,
    max_events: None,
};

#[tokio::test]
async fn output_is_sorted_descending_across_adapters() {
    let adapters: Vec<Box<dyn SourceAdapter>> = vec![
        Box::new(FixedAdapter {
            name: "official",
            records: vec![
                record(SourceKind::Official, "o1", Some(ts(8, 0))),
                record(SourceKind::Official, "o2", Some(ts(12, 0))),
            ],
        }),
        Box::new(FixedAdapter {
            name: "empty",
            records: vec![],
        }),
        Box::new(FixedAdapter {
            name: "social",
            records: vec![record(SourceKind::Twitter, "t1", Some(ts(10, 30)))],
        }),
    ];

    let events = run_pass(&adapters, CFG).await;
    let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["of_o2", "tw_t1", "of_o1"]);
    assert!(events
        .windows(2)
        .all(|w| w[0].timestamp >= w[1].timestamp));
}

#[tokio::test]
async fn equal_timestamps_keep_registration_order() {
    let shared = ts(9, 15);
    let adapters: Vec<Box<dyn SourceAdapter>> = vec![
        Box::new(FixedAdapter {
            name: "official",
            records: vec![record(SourceKind::Official, "o1", Some(shared))],
        }),
        Box::new(FixedAdapter {
            name: "social",
            records: vec![record(SourceKind::Twitter, "t1", Some(shared))],
        }),
        Box::new(FixedAdapter {
            name: "news",
            records: vec![record(SourceKind::NewsApi, "n1", Some(shared))],
        }),
    ];

    let events = run_pass(&adapters, CFG).await;
    let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["of_o1", "tw_t1", "nw_n1"]);
}

#[tokio::test]
async fn failing_adapter_never_fails_the_pass() {
    let adapters: Vec<Box<dyn SourceAdapter>> = vec![
        Box::new(FailingAdapter),
        Box::new(FixedAdapter {
            name: "official",
            records: vec![record(SourceKind::Official, "o1", Some(ts(11, 0)))],
        }),
    ];

    let events = run_pass(&adapters, CFG).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "of_o1");
}

#[tokio::test]
async fn unparsable_timestamps_are_dropped_before_sorting() {
    let adapters: Vec<Box<dyn SourceAdapter>> = vec![Box::new(FixedAdapter {
        name: "official",
        records: vec![
            record(SourceKind::Official, "kept", Some(ts(11, 0))),
            record(SourceKind::Official, "dropped", None),
        ],
    })];

    let events = run_pass(&adapters, CFG).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "of_kept");
}

#[tokio::test]
async fn cap_keeps_only_the_newest_events() {
    let adapters: Vec<Box<dyn SourceAdapter>> = vec![Box::new(FixedAdapter {
        name: "official",
        records: vec![
            record(SourceKind::Official, "old", Some(ts(6, 0))),
            record(SourceKind::Official, "mid", Some(ts(9, 0))),
            record(SourceKind::Official, "new", Some(ts(12, 0))),
        ],
    })];

    let capped = PassConfig {
        headline_max_chars: 80,
        max_events: Some(2),
    };
    let events = run_pass(&adapters, capped).await;
    let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["of_new", "of_mid"]);
}
