//! Read-through profile cache.
//!
//! Profile reads back almost every operation (session listings join both
//! participants, notifications render names), so instead of re-fetching on
//! every call the service keeps a small TTL cache keyed by profile id and
//! invalidates entries explicitly whenever a profile is written.

use std::time::Duration;

use moka::future::Cache;

use crate::config::CacheConfig;
use crate::directory::Profile;
use crate::metrics::get_metrics;

/// Profile cache keyed by profile id.
///
/// Disabled configurations degrade to pass-through: every read misses.
#[derive(Clone)]
pub struct ProfileCache {
    inner: Option<Cache<String, Profile>>,
}

impl ProfileCache {
    /// Create a cache from configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let inner = config.enabled.then(|| {
            Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(Duration::from_secs(config.ttl_secs))
                .build()
        });
        Self { inner }
    }

    /// Create a disabled (pass-through) cache.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Look up a profile by id.
    pub async fn get(&self, id: &str) -> Option<Profile> {
        let metrics = get_metrics();
        match &self.inner {
            Some(cache) => match cache.get(id).await {
                Some(profile) => {
                    metrics.cache_hits_total.inc();
                    Some(profile)
                }
                None => {
                    metrics.cache_misses_total.inc();
                    None
                }
            },
            None => {
                metrics.cache_misses_total.inc();
                None
            }
        }
    }

    /// Store a profile under its id.
    pub async fn put(&self, profile: Profile) {
        if let Some(cache) = &self.inner {
            cache.insert(profile.id.clone(), profile).await;
        }
    }

    /// Drop a profile entry after a write.
    pub async fn invalidate(&self, id: &str) {
        if let Some(cache) = &self.inner {
            cache.invalidate(id).await;
        }
    }

    /// Number of cached entries.
    pub fn entry_count(&self) -> u64 {
        self.inner.as_ref().map_or(0, Cache::entry_count)
    }
}
