//! LRU cache with per-entry expiry

use crate::types::CacheStats;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// A bounded cache safe to share between tasks
///
/// All bookkeeping sits behind one lock, so recency order and the capacity
/// bound stay consistent under concurrent `get`/`put`.
pub struct LruCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    capacity: usize,
    /// Cache hit counter
    hits: AtomicU64,
    /// Cache miss counter
    misses: AtomicU64,
}

struct Slot<V> {
    value: V,
    expires_at: Instant,
    last_used: u64,
}

struct Inner<K, V> {
    entries: HashMap<K, Slot<V>>,
    /// Use tick -> key, oldest first
    recency: BTreeMap<u64, K>,
    tick: u64,
}

impl<K, V> Inner<K, V>
where
    K: Hash + Eq + Clone,
{
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn get<Q>(&mut self, key: &Q, now: Instant) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let tick = self.tick + 1;
        let slot = self.entries.get_mut(key)?;
        if now >= slot.expires_at {
            return None;
        }

        self.tick = tick;
        let previous = std::mem::replace(&mut slot.last_used, tick);
        if let Some(k) = self.recency.remove(&previous) {
            self.recency.insert(tick, k);
        }
        Some(&slot.value)
    }

    /// Insert or overwrite, returning the evicted key if any
    fn put(&mut self, key: K, value: V, expires_at: Instant, capacity: usize) -> Option<K> {
        let tick = self.next_tick();

        if let Some(slot) = self.entries.get_mut(&key) {
            let previous = std::mem::replace(&mut slot.last_used, tick);
            slot.value = value;
            slot.expires_at = expires_at;
            self.recency.remove(&previous);
            self.recency.insert(tick, key);
            return None;
        }

        let evicted = if self.entries.len() >= capacity {
            self.recency.pop_first().map(|(_, oldest)| {
                self.entries.remove(&oldest);
                oldest
            })
        } else {
            None
        };

        self.recency.insert(tick, key.clone());
        self.entries.insert(
            key,
            Slot {
                value,
                expires_at,
                last_used: tick,
            },
        );
        evicted
    }
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries (minimum one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::with_capacity(capacity.min(1024)),
                recency: BTreeMap::new(),
                tick: 0,
            }),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a live entry; expired entries read as a miss
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        let found = {
            let mut inner = self.inner.lock().await;
            inner.get(key, now).cloned()
        };

        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Store a value for `ttl`; a zero TTL means the value is never stored
    pub async fn put(&self, key: K, value: V, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }

        let expires_at = Instant::now() + ttl;
        let evicted = {
            let mut inner = self.inner.lock().await;
            inner.put(key, value, expires_at, self.capacity)
        };

        if let Some(key) = evicted {
            debug!(key = ?key, "Evicted least recently used cache entry");
        }
    }

    /// Number of stored entries, including expired ones not yet displaced
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get current cache statistics
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len().await,
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
