//! In-memory cache for hot read endpoints.
//!
//! Public listing endpoints (camps, homepage, stats) are read far more often
//! than anything changes, so responses are kept as serialized JSON behind a
//! short TTL. Invalidation is synchronous and exact: every mutating handler
//! drops the keys its write made stale before returning.

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::config::CacheConfig;

/// Cache key, one variant per cacheable query shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Camps,
    Camp(Uuid),
    Registrations { camp_id: Option<Uuid> },
    Templates { template_type: Option<String> },
    HomepageSections { include_hidden: bool },
    CampTypes,
    Stats,
}

struct CacheEntry {
    stored_at: Instant,
    value: JsonValue,
}

/// TTL response cache shared through the application state.
pub struct ResponseCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    enabled: bool,
}

impl ResponseCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(config.ttl_secs),
            enabled: config.enabled,
        }
    }

    /// Returns the cached value for a key if it is still fresh.
    pub fn get(&self, key: &CacheKey) -> Option<JsonValue> {
        if !self.enabled {
            return None;
        }

        let entries = self.entries.read().unwrap();
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() >= self.ttl {
            // Stale entries are overwritten by the next put; no need to
            // upgrade to a write lock here.
            return None;
        }
        Some(entry.value.clone())
    }

    /// Stores a value under a key.
    pub fn put(&self, key: CacheKey, value: JsonValue) {
        if !self.enabled {
            return;
        }

        let mut entries = self.entries.write().unwrap();
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                value,
            },
        );
    }

    /// Drops camp listing keys, the single-camp key when known, and stats.
    pub fn invalidate_camps(&self, camp_id: Option<Uuid>) {
        let mut entries = self.entries.write().unwrap();
        entries.remove(&CacheKey::Camps);
        entries.remove(&CacheKey::Stats);
        if let Some(id) = camp_id {
            entries.remove(&CacheKey::Camp(id));
        }
    }

    /// Drops every registrations listing (all camp filters) and stats.
    pub fn invalidate_registrations(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.retain(|key, _| !matches!(key, CacheKey::Registrations { .. }));
        entries.remove(&CacheKey::Stats);
    }

    /// Drops every template listing (all type filters).
    pub fn invalidate_templates(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.retain(|key, _| !matches!(key, CacheKey::Templates { .. }));
    }

    /// Drops both visible-only and all-sections homepage listings.
    pub fn invalidate_homepage(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.retain(|key, _| !matches!(key, CacheKey::HomepageSections { .. }));
    }

    /// Drops the camp type descriptions listing.
    pub fn invalidate_camp_types(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.remove(&CacheKey::CampTypes);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("ttl", &self.ttl)
            .field("enabled", &self.enabled)
            .field("entries", &self.entries.read().unwrap().len())
            .finish()
    }
}
