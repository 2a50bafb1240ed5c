//! Process-local stores: a TTL cache for responses and a fixed-window rate
//! limiter. Both take an injected clock so tests control time, and both are
//! swept periodically; a lookup racing a sweep just sees a miss.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Deterministic clock for tests: starts at construction time and only moves
/// when advanced.
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        ManualClock::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock().unwrap()
    }
}

struct CacheEntry<T> {
    data: T,
    stored_at: Instant,
}

/// Time-boxed memoization of query/URL responses. Expiry is lazy: an entry
/// past its TTL reads as absent and is dropped by the next sweep.
pub struct TtlCache<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        TtlCache {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.lock().unwrap();
        let entry = entries.get(key)?;
        if self.clock.now().duration_since(entry.stored_at) > self.ttl {
            return None;
        }
        Some(entry.data.clone())
    }

    pub fn insert(&self, key: impl Into<String>, data: T) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.into(),
            CacheEntry {
                data,
                stored_at: self.clock.now(),
            },
        );
    }

    /// Drop expired entries; returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.stored_at) <= self.ttl);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct RateLimitEntry {
    count: u32,
    window_reset: Instant,
}

/// Whether a request may proceed under the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited,
}

/// Fixed-window throttle keyed by client identity. The first request in a
/// window creates the entry; the window resets lazily on the next request
/// after the boundary.
pub struct RateLimiter {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
    max_requests: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self::with_clock(max_requests, window, Arc::new(SystemClock))
    }

    pub fn with_clock(max_requests: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        RateLimiter {
            entries: Mutex::new(HashMap::new()),
            max_requests,
            window,
            clock,
        }
    }

    pub fn check(&self, client: &str) -> RateDecision {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(client.to_string()).or_insert(RateLimitEntry {
            count: 0,
            window_reset: now + self.window,
        });
        if now > entry.window_reset {
            entry.count = 0;
            entry.window_reset = now + self.window;
        }
        entry.count += 1;
        if entry.count > self.max_requests {
            RateDecision::Limited
        } else {
            RateDecision::Allowed
        }
    }

    /// Drop entries whose window has passed; returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.window_reset);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}
