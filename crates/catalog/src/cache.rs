//! Offline snapshot cache.
//!
//! The app keeps the last good catalog snapshot so the list and map pages
//! still render without connectivity. The cache is purely in-process; the
//! host persists it wherever it likes (the reference shell uses device
//! storage) via the JSON round-trip helpers. Time is caller-supplied epoch
//! millis so cache policy stays testable and the crate never reads a clock.

use crate::{Attraction, Result};
use serde::{Deserialize, Serialize};

/// Cache policy knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a snapshot stays usable, in milliseconds.
    pub ttl_ms: i64,
    /// Upper bound on cached records; oldest-listed records beyond the cap
    /// are dropped at store time.
    pub max_records: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 24 * 60 * 60 * 1000, // 24 hours
            max_records: 100,
        }
    }
}

/// Serializable cache contents for host persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheSnapshot {
    stored_at_ms: i64,
    attractions: Vec<Attraction>,
}

/// TTL-bounded cache of the last catalog snapshot.
#[derive(Debug, Default)]
pub struct OfflineCache {
    config: CacheConfig,
    snapshot: Option<CacheSnapshot>,
}

impl OfflineCache {
    /// Create a cache with the given policy.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            snapshot: None,
        }
    }

    /// Replace the cached snapshot, applying the record cap.
    pub fn store(&mut self, attractions: &[Attraction], now_ms: i64) {
        let mut kept: Vec<Attraction> = attractions.to_vec();
        if kept.len() > self.config.max_records {
            tracing::debug!(
                total = kept.len(),
                cap = self.config.max_records,
                "capping cached snapshot"
            );
            kept.truncate(self.config.max_records);
        }

        self.snapshot = Some(CacheSnapshot {
            stored_at_ms: now_ms,
            attractions: kept,
        });
    }

    /// The cached records, or `None` when nothing usable is cached.
    pub fn get(&self, now_ms: i64) -> Option<&[Attraction]> {
        let snapshot = self.snapshot.as_ref()?;
        if self.is_stale(now_ms) {
            tracing::debug!(stored_at_ms = snapshot.stored_at_ms, "cached snapshot is stale");
            return None;
        }
        Some(&snapshot.attractions)
    }

    /// True when the cache is empty or past its TTL.
    pub fn is_stale(&self, now_ms: i64) -> bool {
        match &self.snapshot {
            None => true,
            Some(snapshot) => now_ms.saturating_sub(snapshot.stored_at_ms) >= self.config.ttl_ms,
        }
    }

    /// Drop the cached snapshot.
    pub fn clear(&mut self) {
        self.snapshot = None;
    }

    /// Serialize the cache contents for host persistence. Empty caches
    /// serialize as JSON null.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot)?)
    }

    /// Rebuild a cache from persisted contents. Staleness is re-checked on
    /// every `get`, so loading an expired snapshot is harmless.
    pub fn from_json(config: CacheConfig, json: &str) -> Result<Self> {
        let snapshot: Option<CacheSnapshot> = serde_json::from_str(json)?;
        Ok(Self { config, snapshot })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;
    use crate::testutil::attraction;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    fn catalog(n: usize) -> Vec<Attraction> {
        (0..n)
            .map(|i| attraction(&format!("a{i:03}"), "Spot", Category::Cultural, 40.0, -73.0))
            .collect()
    }

    #[test]
    fn test_empty_cache_is_stale() {
        let cache = OfflineCache::new(CacheConfig::default());
        assert!(cache.is_stale(0));
        assert!(cache.get(0).is_none());
    }

    #[test]
    fn test_store_and_get() {
        let mut cache = OfflineCache::new(CacheConfig::default());
        cache.store(&catalog(3), 1_000);

        let cached = cache.get(2_000).unwrap();
        assert_eq!(cached.len(), 3);
    }

    #[test]
    fn test_ttl_expiry() {
        let mut cache = OfflineCache::new(CacheConfig::default());
        cache.store(&catalog(3), 0);

        assert!(cache.get(23 * HOUR_MS).is_some());
        assert!(cache.get(24 * HOUR_MS).is_none());
        assert!(cache.is_stale(25 * HOUR_MS));
    }

    #[test]
    fn test_record_cap() {
        let mut cache = OfflineCache::new(CacheConfig::default());
        cache.store(&catalog(150), 0);

        assert_eq!(cache.get(0).unwrap().len(), 100);
    }

    #[test]
    fn test_clear() {
        let mut cache = OfflineCache::new(CacheConfig::default());
        cache.store(&catalog(1), 0);
        cache.clear();
        assert!(cache.get(0).is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut cache = OfflineCache::new(CacheConfig::default());
        cache.store(&catalog(2), 5_000);

        let json = cache.to_json().unwrap();
        let restored = OfflineCache::from_json(CacheConfig::default(), &json).unwrap();

        let cached = restored.get(6_000).unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].id, "a000");
    }

    #[test]
    fn test_restored_cache_respects_ttl() {
        let mut cache = OfflineCache::new(CacheConfig::default());
        cache.store(&catalog(2), 0);

        let json = cache.to_json().unwrap();
        let restored = OfflineCache::from_json(CacheConfig::default(), &json).unwrap();
        assert!(restored.get(48 * HOUR_MS).is_none());
    }
}
