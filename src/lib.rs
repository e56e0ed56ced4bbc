//! gatesync - offline-aware client for a residential access-control API.
//!
//! The backend handles visitor QR codes, guard check-in/out and resident
//! visit requests; gate guards cannot stop scanning when the network drops.
//! This crate keeps the application usable offline:
//!
//! - [`cache`]: staleness-bounded local cache of fetched datasets
//! - [`sync`]: durable pending-action queue plus the connectivity monitor
//!   that replays it on reconnect
//! - [`ops`]: per-role operations that pick between the live API, the cache
//!   and the queue on every call
//! - [`api`], [`auth`], [`models`], [`config`]: the HTTP client, session,
//!   wire types and configuration underneath
//!
//! ```no_run
//! use std::sync::Arc;
//! use gatesync::api::ApiClient;
//! use gatesync::cache::{FileStore, OfflineCache};
//! use gatesync::ops::{HttpReplayer, OfflineOps};
//! use gatesync::sync::{ConnectivityMonitor, PendingQueue};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let store = Arc::new(FileStore::new("/tmp/gatesync".into())?);
//! let api = ApiClient::new("https://backend.example.com")?.with_token("...".into());
//! let queue = PendingQueue::new(store.clone());
//! let monitor = ConnectivityMonitor::new(
//!     queue.clone(),
//!     Arc::new(HttpReplayer::new(api.clone())),
//!     true,
//! );
//! let ops = OfflineOps::new(api, OfflineCache::new(store), queue, monitor.handle());
//!
//! let scans = ops.guard().daily_scans().await?;
//! println!("{} scans ({})", scans.data.total, scans.source);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod models;
pub mod ops;
pub mod sync;
