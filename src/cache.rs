//! # TTL Cache
//! Keyed cache with absolute expiry against an injected clock.
//!
//! The aggregator is the only writer; it stores one collection per pass
//! under a fixed key. Expiry is absolute (no sliding refresh on reads),
//! which keeps the miss/hit/expiry cycle observable in tests through a
//! controllable clock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Time source for expiry checks. Production code uses `SystemClock`;
/// tests inject their own implementation.
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> u64;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    expires_at: u64,
}

pub struct TtlCache<V> {
    inner: Mutex<HashMap<String, Entry<V>>>,
    ttl_secs: u64,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            ttl_secs: ttl.as_secs(),
            clock,
        }
    }

    /// Returns the live value for `key`, or `None` when absent or expired.
    /// An entry expires exactly `ttl` after the write that produced it.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_unix();
        let guard = self.inner.lock().expect("cache mutex poisoned");
        guard
            .get(key)
            .filter(|e| now < e.expires_at)
            .map(|e| e.value.clone())
    }

    /// Store `value` under `key`. A concurrent writer racing on the same
    /// key simply wins with the last write; callers accept that.
    pub fn put(&self, key: &str, value: V) {
        let expires_at = self.clock.now_unix().saturating_add(self.ttl_secs);
        let mut guard = self.inner.lock().expect("cache mutex poisoned");
        guard.insert(key.to_string(), Entry { value, expires_at });
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }
}
