use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::weather::models::BeachWeather;

/// Thread-safe map whose entries expire after a fixed TTL
pub struct TtlCache<K, V> {
    data: DashMap<K, CacheEntry<V>>,
    ttl: Duration,
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh value for `key`; an expired entry is evicted on the way
    pub fn get(&self, key: &K) -> Option<V> {
        let entry = self.data.get(key)?;
        if entry.expires_at > Instant::now() {
            return Some(entry.value.clone());
        }
        drop(entry);
        self.data.remove(key);
        None
    }

    pub fn insert(&self, key: K, value: V) {
        self.data.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drop every expired entry and return how many were removed
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let before = self.data.len();
        self.data.retain(|_, entry| entry.expires_at > now);
        before.saturating_sub(self.data.len())
    }

    /// Number of entries, expired ones included
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Scored weather per beach id
pub type WeatherCache = Arc<TtlCache<String, BeachWeather>>;

pub fn create_weather_cache(ttl: Duration) -> WeatherCache {
    Arc::new(TtlCache::new(ttl))
}

/// Cache key for a beach id: trimmed, case-insensitive
pub fn beach_cache_key(beach_id: &str) -> String {
    beach_id.trim().to_lowercase()
}

/// Periodically evict expired weather entries
pub fn start_cache_cleanup_task(cache: WeatherCache) {
    let period = cache.ttl().max(Duration::from_secs(60));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let removed = cache.cleanup();
            if removed > 0 {
                tracing::debug!(
                    removed,
                    remaining = cache.len(),
                    "Weather cache cleanup completed"
                );
            }
        }
    });
}
