//! # Aggregator
//! Cache-or-recompute owner of the aggregation pass.
//!
//! Reads go through the TTL cache; a miss runs one full pass and rewrites
//! the single fixed entry. Concurrent misses may each run a pass and the
//! last write wins, which is acceptable for this data.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::event::Event;
use crate::ingest::types::SourceAdapter;
use crate::ingest::{self, PassConfig};

pub const CACHE_KEY: &str = "emergency_events";

pub struct Aggregator {
    adapters: Vec<Box<dyn SourceAdapter>>,
    cache: TtlCache<Vec<Event>>,
    pass: PassConfig,
}

impl Aggregator {
    /// Adapter registration order is the tie-break order for events with
    /// equal timestamps: official, social, news, syndication.
    pub fn new(adapters: Vec<Box<dyn SourceAdapter>>, ttl: Duration, pass: PassConfig) -> Self {
        Self::with_clock(adapters, ttl, pass, Arc::new(SystemClock))
    }

    pub fn with_clock(
        adapters: Vec<Box<dyn SourceAdapter>>,
        ttl: Duration,
        pass: PassConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            adapters,
            cache: TtlCache::with_clock(ttl, clock),
            pass,
        }
    }

    /// The current event collection: cached within the TTL window,
    /// recomputed from every adapter on a miss.
    pub async fn events(&self) -> Vec<Event> {
        if let Some(hit) = self.cache.get(CACHE_KEY) {
            return hit;
        }
        let events = ingest::run_pass(&self.adapters, self.pass).await;
        self.cache.put(CACHE_KEY, events.clone());
        events
    }

    pub fn cache_ttl_secs(&self) -> u64 {
        self.cache.ttl_secs()
    }
}
