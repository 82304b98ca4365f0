//! In-memory quote cache with a fixed time-to-live.
//!
//! Keeps the last fetched quote per canonical symbol for a short window
//! so repeated lookups do not hammer the upstream providers. Expiry is
//! lazy: a stale entry is dropped on the next access, there is no
//! background sweep. Entries are replaced wholesale, never mutated in
//! place.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

use crate::models::Quote;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

struct CacheEntry {
    quote: Quote,
    fetched_at: Instant,
}

pub struct QuoteCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Custom TTL, used by tests to simulate expiry without waiting a
    /// full minute.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Fetch a fresh quote for `key`, removing the entry if it has
    /// outlived the TTL.
    pub async fn get(&self, key: &str) -> Option<Quote> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.fetched_at.elapsed() < self.ttl => {
                    return Some(entry.quote.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Entry exists but is stale: take the write lock and evict it.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.fetched_at.elapsed() < self.ttl {
                // Refreshed by a concurrent writer between the locks.
                return Some(entry.quote.clone());
            }
            entries.remove(key);
        }
        None
    }

    pub async fn put(&self, key: &str, quote: Quote) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                quote,
                fetched_at: Instant::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new()
    }
}
