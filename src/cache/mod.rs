//! Local caching module for offline data access.
//!
//! This module provides the `OfflineCache` for storing and retrieving
//! backend datasets locally. Entries are JSON envelopes stamped with a write
//! timestamp and expire per dataset: statistics after 6 hours, posts and
//! announcements after 12, visit history and scans after 24.
//!
//! Persistence goes through the `KeyValueStore` trait so the pending-action
//! queue shares the same backing store and tests can run fully in memory.

pub mod manager;
pub mod store;

pub use manager::{keys, max_age_hours, CachedEntry, OfflineCache, DEFAULT_MAX_AGE_HOURS};
pub use store::{FileStore, KeyValueStore, MemoryStore};
