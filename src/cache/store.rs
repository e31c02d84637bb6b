//! Cache storage for serialized sitemap documents.
//!
//! One entry per document key, each with its own TTL deadline. Expired
//! entries count as absent and are dropped on read. There is no per-key
//! invalidation: content mutation clears the whole store, trading precision
//! for consistency.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};

use bytes::Bytes;
use metrics::counter;
use tracing::{debug, info, warn};

use super::config::CacheConfig;
use super::keys::DocumentKey;

const SOURCE: &str = "cache::store";

struct CachedDocument {
    body: Bytes,
    expires_at: Instant,
}

/// TTL-bounded storage for generated sitemap documents.
pub struct DocumentStore {
    enabled: bool,
    entries: RwLock<HashMap<DocumentKey, CachedDocument>>,
}

impl DocumentStore {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch a live document; expired entries are removed and reported as
    /// absent.
    pub fn get(&self, key: DocumentKey) -> Option<Bytes> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&self, key: DocumentKey, now: Instant) -> Option<Bytes> {
        if !self.enabled {
            return None;
        }

        let mut entries = self.write_entries("get");
        match entries.get(&key) {
            Some(cached) if cached.expires_at > now => {
                counter!("sentiero_sitemap_cache_hit_total", "document" => key.label())
                    .increment(1);
                Some(cached.body.clone())
            }
            Some(_) => {
                entries.remove(&key);
                counter!("sentiero_sitemap_cache_miss_total", "document" => key.label())
                    .increment(1);
                debug!(target = SOURCE, document = key.label(), "cache entry expired");
                None
            }
            None => {
                counter!("sentiero_sitemap_cache_miss_total", "document" => key.label())
                    .increment(1);
                None
            }
        }
    }

    /// Store a freshly generated document under its TTL.
    pub fn put(&self, key: DocumentKey, body: Bytes, ttl: Duration) {
        if !self.enabled {
            return;
        }

        let expires_at = Instant::now() + ttl;
        self.write_entries("put")
            .insert(key, CachedDocument { body, expires_at });
        counter!("sentiero_sitemap_cache_store_total", "document" => key.label()).increment(1);
    }

    /// Drop every cached document. Called when the platform reports any
    /// content save or delete.
    pub fn invalidate_all(&self) {
        let mut entries = self.write_entries("invalidate_all");
        let dropped = entries.len();
        entries.clear();
        counter!("sentiero_sitemap_cache_purge_total").increment(1);
        info!(target = SOURCE, dropped, "cleared sitemap document cache");
    }

    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_entries(&self, op: &'static str) -> RwLockWriteGuard<'_, HashMap<DocumentKey, CachedDocument>> {
        match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    target = SOURCE,
                    op,
                    result = "poisoned_recovered",
                    hint = "state may be stale after panic in another thread",
                    "Recovered from poisoned document cache lock"
                );
                poisoned.into_inner()
            }
        }
    }
}
