use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use super::store::KeyValueStore;

/// Envelope version written alongside every cached payload.
const ENTRY_VERSION: &str = "1.0";

/// Default staleness threshold when a key has no specific one.
pub const DEFAULT_MAX_AGE_HOURS: i64 = 24;

/// Storage keys for the offline datasets and the pending-action queue.
pub mod keys {
    pub const VISIT_HISTORY: &str = "offline_historial_visitas";
    pub const STATS: &str = "offline_estadisticas";
    pub const DAILY_SCANS: &str = "offline_escaneos_dia";
    pub const POSTS: &str = "offline_publicaciones";
    pub const ANNOUNCEMENTS: &str = "offline_comunicados";
    pub const RESIDENT_VISITS: &str = "offline_visitas_residente";
    pub const GUARD_SCANS: &str = "offline_escaneos_guardia";
    pub const PENDING_ACTIONS: &str = "pendingActions";

    /// Every dataset key this crate writes (queue excluded).
    pub const ALL_DATASETS: &[&str] = &[
        VISIT_HISTORY,
        STATS,
        DAILY_SCANS,
        POSTS,
        ANNOUNCEMENTS,
        RESIDENT_VISITS,
        GUARD_SCANS,
    ];
}

/// Staleness threshold for a dataset key. Statistics age out fastest,
/// social content after half a day, history and scans after a full day.
pub fn max_age_hours(key: &str) -> i64 {
    match key {
        keys::STATS => 6,
        keys::POSTS | keys::ANNOUNCEMENTS => 12,
        _ => DEFAULT_MAX_AGE_HOURS,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEntry<T> {
    pub data: T,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl<T> CachedEntry<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            timestamp: Utc::now(),
            version: ENTRY_VERSION.to_string(),
        }
    }

    pub fn age_hours(&self) -> i64 {
        (Utc::now() - self.timestamp).num_hours()
    }

    pub fn age_display(&self) -> String {
        let minutes = (Utc::now() - self.timestamp).num_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

/// Staleness-bounded cache over an injected key-value store.
///
/// Reads older than the key's threshold are evicted and reported as misses.
/// Storage failures never propagate: a failed write reports `false`, a failed
/// read reports a miss, both with a log line.
#[derive(Clone)]
pub struct OfflineCache {
    store: Arc<dyn KeyValueStore>,
}

impl OfflineCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist a dataset under `key`, stamped with the current time.
    pub fn save<T: Serialize>(&self, key: &str, data: &T) -> bool {
        let entry = CachedEntry::new(data);
        let serialized = match serde_json::to_string(&entry) {
            Ok(s) => s,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize cache entry");
                return false;
            }
        };
        match self.store.set(key, &serialized) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "Failed to write cache entry");
                false
            }
        }
    }

    /// Read a dataset if it is younger than `max_age_hours`.
    /// A stale entry is removed from storage and treated as a miss.
    pub fn read<T: DeserializeOwned>(&self, key: &str, max_age_hours: i64) -> Option<T> {
        let stored = match self.store.get(key) {
            Ok(Some(s)) => s,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read cache entry");
                return None;
            }
        };

        let entry: CachedEntry<T> = match serde_json::from_str(&stored) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, error = %e, "Failed to parse cache entry");
                return None;
            }
        };

        let age = Utc::now() - entry.timestamp;
        if age > chrono::Duration::hours(max_age_hours) {
            debug!(key, age_hours = age.num_hours(), max_age_hours, "Evicting stale cache entry");
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "Failed to evict stale cache entry");
            }
            return None;
        }

        Some(entry.data)
    }

    /// True when a non-stale entry exists for `key` at its default threshold.
    pub fn exists(&self, key: &str) -> bool {
        self.read::<serde_json::Value>(key, DEFAULT_MAX_AGE_HOURS).is_some()
    }

    /// Age of the entry under `key` for display, if one is stored.
    pub fn age_of(&self, key: &str) -> Option<String> {
        let stored = self.store.get(key).ok().flatten()?;
        let entry: CachedEntry<serde_json::Value> = serde_json::from_str(&stored).ok()?;
        Some(entry.age_display())
    }

    /// Remove every dataset entry. The pending-action queue is not touched.
    pub fn clear_all(&self) -> bool {
        let mut ok = true;
        for key in keys::ALL_DATASETS {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "Failed to clear cache entry");
                ok = false;
            }
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::MemoryStore;

    fn memory_cache() -> (Arc<MemoryStore>, OfflineCache) {
        let store = Arc::new(MemoryStore::new());
        let cache = OfflineCache::new(store.clone());
        (store, cache)
    }

    #[test]
    fn test_read_after_save() {
        let (_, cache) = memory_cache();
        assert!(cache.save(keys::STATS, &vec![1, 2, 3]));
        let read: Vec<i32> = cache.read(keys::STATS, 1).expect("fresh entry");
        assert_eq!(read, vec![1, 2, 3]);
    }

    #[test]
    fn test_stale_entry_evicted_on_read() {
        let (store, cache) = memory_cache();

        // Write an entry backdated past the 6h statistics threshold
        let mut entry = CachedEntry::new(serde_json::json!({"total_visitas": 10}));
        entry.timestamp = Utc::now() - chrono::Duration::hours(7);
        store
            .set(keys::STATS, &serde_json::to_string(&entry).unwrap())
            .unwrap();

        let read: Option<serde_json::Value> = cache.read(keys::STATS, max_age_hours(keys::STATS));
        assert!(read.is_none());
        // Eviction removed the underlying entry
        assert!(store.get(keys::STATS).unwrap().is_none());
    }

    #[test]
    fn test_entry_within_threshold_survives() {
        let (store, cache) = memory_cache();

        let mut entry = CachedEntry::new(serde_json::json!({"total_visitas": 10}));
        entry.timestamp = Utc::now() - chrono::Duration::hours(5);
        store
            .set(keys::STATS, &serde_json::to_string(&entry).unwrap())
            .unwrap();

        let read: Option<serde_json::Value> = cache.read(keys::STATS, 6);
        assert!(read.is_some());
    }

    #[test]
    fn test_corrupt_entry_is_a_miss() {
        let (store, cache) = memory_cache();
        store.set(keys::POSTS, "not json at all").unwrap();
        let read: Option<serde_json::Value> = cache.read(keys::POSTS, 12);
        assert!(read.is_none());
    }

    #[test]
    fn test_exists_uses_default_threshold() {
        let (_, cache) = memory_cache();
        assert!(!cache.exists(keys::VISIT_HISTORY));
        cache.save(keys::VISIT_HISTORY, &serde_json::json!([]));
        assert!(cache.exists(keys::VISIT_HISTORY));
    }

    #[test]
    fn test_per_key_max_ages() {
        assert_eq!(max_age_hours(keys::STATS), 6);
        assert_eq!(max_age_hours(keys::POSTS), 12);
        assert_eq!(max_age_hours(keys::ANNOUNCEMENTS), 12);
        assert_eq!(max_age_hours(keys::VISIT_HISTORY), 24);
        assert_eq!(max_age_hours(keys::GUARD_SCANS), 24);
    }

    #[test]
    fn test_clear_all_leaves_queue() {
        let (store, cache) = memory_cache();
        cache.save(keys::POSTS, &serde_json::json!([]));
        store.set(keys::PENDING_ACTIONS, "[]").unwrap();

        assert!(cache.clear_all());
        assert!(store.get(keys::POSTS).unwrap().is_none());
        assert!(store.get(keys::PENDING_ACTIONS).unwrap().is_some());
    }

    #[test]
    fn test_age_display() {
        let fresh = CachedEntry::new(1);
        assert_eq!(fresh.age_display(), "just now");

        let mut old = CachedEntry::new(1);
        old.timestamp = Utc::now() - chrono::Duration::hours(3);
        assert_eq!(old.age_display(), "3h ago");
    }
}
