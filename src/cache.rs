//! Short-lived cache for upstream position responses.
//!
//! Each key owns an async lock that is held across check, fetch and store,
//! so concurrent requests for one key share a single upstream call.

use axum::body::Bytes;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fetched_at: Instant,
    pub body: Bytes,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

type Slot = Arc<Mutex<Option<CacheEntry>>>;

pub struct ResponseCache {
    ttl: Duration,
    max_entries: usize,
    slots: StdMutex<HashMap<String, Slot>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            slots: StdMutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.slots.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cached body for `key` while it is younger than the TTL,
    /// otherwise runs `fetch` and stores its result. Errors are not cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<Bytes, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Bytes, E>>,
    {
        let slot = self.slot(key);
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.is_fresh(Instant::now(), self.ttl) {
                log::debug!("Cache hit for {}", key);
                return Ok(cached.body.clone());
            }
        }

        log::debug!("Cache miss for {}", key);
        let body = fetch().await?;
        *entry = Some(CacheEntry {
            fetched_at: Instant::now(),
            body: body.clone(),
        });
        Ok(body)
    }

    fn slot(&self, key: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap();
        if let Some(slot) = slots.get(key) {
            return slot.clone();
        }

        if slots.len() >= self.max_entries {
            self.evict(&mut slots);
        }

        let slot: Slot = Arc::new(Mutex::new(None));
        slots.insert(key.to_string(), slot.clone());
        slot
    }

    // Slots referenced by an in-flight request are never dropped.
    fn evict(&self, slots: &mut HashMap<String, Slot>) {
        let now = Instant::now();
        let ttl = self.ttl;

        slots.retain(|_, slot| {
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            match slot.try_lock() {
                Ok(entry) => entry.as_ref().is_some_and(|e| e.is_fresh(now, ttl)),
                Err(_) => true,
            }
        });

        if slots.len() < self.max_entries {
            return;
        }

        let oldest = slots
            .iter()
            .filter(|(_, slot)| Arc::strong_count(slot) == 1)
            .filter_map(|(key, slot)| {
                let entry = slot.try_lock().ok()?;
                let fetched_at = entry.as_ref()?.fetched_at;
                Some((key.clone(), fetched_at))
            })
            .min_by_key(|(_, fetched_at)| *fetched_at)
            .map(|(key, _)| key);

        if let Some(key) = oldest {
            log::debug!("Evicting cache entry {}", key);
            slots.remove(&key);
        }
    }
}
