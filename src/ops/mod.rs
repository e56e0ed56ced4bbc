//! Offline-aware data operations.
//!
//! `OfflineOps` is the layer UI code talks to. Every read goes through
//! `load`: live fetch when online (refreshing the cache), cache fallback when
//! the fetch fails, cache only when offline. Writes split by role: guard
//! entry/exit scans are queued and accepted when they cannot reach the
//! backend; resident visit creation fails hard while offline because the
//! backend must mint and distribute the QR code.
//!
//! Nothing here panics or leaks a raw transport error for the recoverable
//! cases; callers always get a structured result.

pub mod admin;
pub mod guard;
pub mod resident;

use anyhow::Result;
use chrono::Utc;
use futures::future::BoxFuture;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::cache::OfflineCache;
use crate::models::{NewVisit, VisitReceipt};
use crate::sync::{ActionKind, ConnectivityHandle, PendingAction, PendingQueue, Replay};

pub use admin::AdminOps;
pub use guard::GuardOps;
pub use resident::ResidentOps;

/// User-facing messages. The application surface is Spanish.
pub mod messages {
    pub const ENTRY_QUEUED: &str =
        "Entrada registrada offline. Se sincronizará cuando se recupere la conexión.";
    pub const EXIT_QUEUED: &str =
        "Salida registrada offline. Se sincronizará cuando se recupere la conexión.";
    pub const VISIT_OFFLINE: &str = "No se pueden crear visitas sin conexión a internet.";
    pub const VISIT_FAILED: &str = "Error al crear visita.";
}

#[derive(Error, Debug)]
pub enum OfflineError {
    #[error("No hay datos offline disponibles")]
    NoOfflineData,
}

/// Where a successful read came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    Online,
    Offline,
    OfflineFallback,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Online => write!(f, "online"),
            DataSource::Offline => write!(f, "offline"),
            DataSource::OfflineFallback => write!(f, "offline-fallback"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadResult<T> {
    pub data: T,
    pub source: DataSource,
}

/// Outcome of a guard entry/exit registration. `Queued` is an accepted
/// result: the scan is recorded locally and will sync later.
#[derive(Debug)]
pub enum RegisterOutcome {
    Completed { data: serde_json::Value },
    Queued { action: PendingAction, message: String },
    Rejected { error: String },
}

impl RegisterOutcome {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, RegisterOutcome::Rejected { .. })
    }
}

/// Outcome of a resident visit creation. There is no queued variant:
/// visits cannot be deferred.
#[derive(Debug)]
pub enum VisitOutcome {
    Created(Vec<VisitReceipt>),
    Rejected { error: String },
}

/// Per-role façade over the live API, the offline cache and the pending
/// queue. Clone shares the underlying client, cache and queue.
#[derive(Clone)]
pub struct OfflineOps {
    api: ApiClient,
    cache: OfflineCache,
    queue: PendingQueue,
    connectivity: ConnectivityHandle,
}

impl OfflineOps {
    pub fn new(
        api: ApiClient,
        cache: OfflineCache,
        queue: PendingQueue,
        connectivity: ConnectivityHandle,
    ) -> Self {
        Self {
            api,
            cache,
            queue,
            connectivity,
        }
    }

    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn admin(&self) -> AdminOps<'_> {
        AdminOps { ops: self }
    }

    pub fn guard(&self) -> GuardOps<'_> {
        GuardOps { ops: self }
    }

    pub fn resident(&self) -> ResidentOps<'_> {
        ResidentOps { ops: self }
    }

    /// Read `endpoint` with offline fallback under `cache_key`.
    ///
    /// Online: live GET, cache refresh, `source = Online`. Online but the GET
    /// failed: non-stale cache entry if any (`OfflineFallback`), otherwise the
    /// original error. Offline: non-stale cache entry (`Offline`) or
    /// `OfflineError::NoOfflineData`.
    pub async fn load<T>(
        &self,
        endpoint: &str,
        cache_key: &str,
        max_age_hours: i64,
    ) -> Result<LoadResult<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        self.load_with(endpoint, cache_key, max_age_hours, |data| data)
            .await
    }

    /// `load` with a transform applied to live data before caching, so the
    /// cache holds the same shape later offline reads will see.
    pub async fn load_with<T, F>(
        &self,
        endpoint: &str,
        cache_key: &str,
        max_age_hours: i64,
        transform: F,
    ) -> Result<LoadResult<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(T) -> T,
    {
        if !self.connectivity.is_online() {
            return match self.cache.read(cache_key, max_age_hours) {
                Some(data) => {
                    debug!(cache_key, "Serving offline read from cache");
                    Ok(LoadResult {
                        data,
                        source: DataSource::Offline,
                    })
                }
                None => Err(OfflineError::NoOfflineData.into()),
            };
        }

        match self.api.get::<T>(endpoint).await {
            Ok(data) => {
                let data = transform(data);
                self.cache.save(cache_key, &data);
                Ok(LoadResult {
                    data,
                    source: DataSource::Online,
                })
            }
            Err(e) => match self.cache.read(cache_key, max_age_hours) {
                Some(data) => {
                    warn!(endpoint, error = %e, "Live fetch failed, serving cached data");
                    Ok(LoadResult {
                        data,
                        source: DataSource::OfflineFallback,
                    })
                }
                None => Err(e),
            },
        }
    }

    /// Register a guard entry scan; see `register_scan`.
    pub async fn register_entry(&self, qr_data: &str) -> RegisterOutcome {
        self.register_scan(ActionKind::RegisterEntry, qr_data).await
    }

    /// Register a guard exit scan; see `register_scan`.
    pub async fn register_exit(&self, qr_data: &str) -> RegisterOutcome {
        self.register_scan(ActionKind::RegisterExit, qr_data).await
    }

    /// Entry/exit are physical events that already happened at the gate, so
    /// they must be recorded even when the backend is unreachable: a failed
    /// or offline submission is queued and reported as accepted.
    async fn register_scan(&self, kind: ActionKind, qr_data: &str) -> RegisterOutcome {
        if self.connectivity.is_online() {
            let attempt = match kind {
                ActionKind::RegisterEntry => self.api.register_entry(qr_data).await,
                ActionKind::RegisterExit => self.api.register_exit(qr_data).await,
                ActionKind::CreateVisit => unreachable!("visits are not registered as scans"),
            };
            match attempt {
                Ok(data) => return RegisterOutcome::Completed { data },
                Err(e) => {
                    warn!(kind = %kind, error = %e, "Live registration failed, queueing for sync");
                }
            }
        }
        self.queue_scan(kind, qr_data)
    }

    fn queue_scan(&self, kind: ActionKind, qr_data: &str) -> RegisterOutcome {
        // guard_id stays null; the replayed request resolves the guard from
        // the bearer token, same as a live one.
        let data = serde_json::json!({
            "qr_data": qr_data,
            "timestamp": Utc::now(),
            "guard_id": null,
        });

        match self.queue.enqueue(kind, data) {
            Ok(action) => {
                let message = match kind {
                    ActionKind::RegisterExit => messages::EXIT_QUEUED,
                    _ => messages::ENTRY_QUEUED,
                };
                RegisterOutcome::Queued {
                    action,
                    message: message.to_string(),
                }
            }
            Err(e) => {
                // Queue storage failing means the scan cannot be recorded at
                // all; claiming acceptance here would silently lose it.
                warn!(kind = %kind, error = %e, "Failed to queue scan");
                RegisterOutcome::Rejected {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Create a visit. Requires connectivity: the backend generates and
    /// distributes the QR code, which cannot be deferred.
    pub async fn create_visit(&self, visit: &NewVisit) -> VisitOutcome {
        if !self.connectivity.is_online() {
            return VisitOutcome::Rejected {
                error: messages::VISIT_OFFLINE.to_string(),
            };
        }

        match self.api.create_visit(visit).await {
            Ok(receipts) => VisitOutcome::Created(receipts),
            Err(e) => {
                warn!(error = %e, "Visit creation failed");
                VisitOutcome::Rejected {
                    error: messages::VISIT_FAILED.to_string(),
                }
            }
        }
    }

    /// Replayer for the pending queue, submitting over this façade's client.
    pub fn replayer(&self) -> HttpReplayer {
        HttpReplayer {
            api: self.api.clone(),
        }
    }
}

/// Replays queued actions as the HTTP requests they stand for.
#[derive(Clone)]
pub struct HttpReplayer {
    api: ApiClient,
}

impl HttpReplayer {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn qr_data(action: &PendingAction) -> Result<&str> {
        action
            .data
            .get("qr_data")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Pending action {} has no qr_data", action.id))
    }
}

impl Replay for HttpReplayer {
    fn replay<'a>(&'a self, action: &'a PendingAction) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match action.kind {
                ActionKind::RegisterEntry => {
                    self.api.register_entry(Self::qr_data(action)?).await?;
                }
                ActionKind::RegisterExit => {
                    self.api.register_exit(Self::qr_data(action)?).await?;
                }
                ActionKind::CreateVisit => {
                    let visit: NewVisit = serde_json::from_value(action.data.clone())?;
                    self.api.create_visit(&visit).await?;
                }
            }
            Ok(())
        })
    }
}
