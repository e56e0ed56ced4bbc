use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cache::{keys, KeyValueStore};

use super::replay::Replay;

/// The closed set of deferrable write operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "REGISTER_ENTRY")]
    RegisterEntry,
    #[serde(rename = "REGISTER_EXIT")]
    RegisterExit,
    #[serde(rename = "CREATE_VISIT")]
    CreateVisit,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::RegisterEntry => write!(f, "REGISTER_ENTRY"),
            ActionKind::RegisterExit => write!(f, "REGISTER_EXIT"),
            ActionKind::CreateVisit => write!(f, "CREATE_VISIT"),
        }
    }
}

/// A write recorded while the backend was unreachable, awaiting replay.
///
/// No idempotency token is attached: retrying the same physical event
/// enqueues a second action. See DESIGN.md for the tradeoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingAction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl PendingAction {
    fn new(kind: ActionKind, data: serde_json::Value) -> Self {
        // Millisecond timestamp plus a random component keeps ids unique
        // even for actions enqueued within the same millisecond.
        let id = format!("{}-{:08x}", Utc::now().timestamp_millis(), rand::random::<u32>());
        Self {
            id,
            kind,
            data,
            timestamp: Utc::now(),
        }
    }
}

/// Outcome of a queue drain: which action ids replayed and which remain.
#[derive(Debug, Default)]
pub struct DrainReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

/// Durable FIFO of pending actions, persisted in the shared key-value store
/// so it survives restarts. Insertion order is preserved; nothing is deduped.
#[derive(Clone)]
pub struct PendingQueue {
    store: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write cycles on the queue key. The store only
    // orders individual get/set calls, not the cycle as a whole.
    write_lock: Arc<Mutex<()>>,
}

impl PendingQueue {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Record a deferred write. Returns the stored action, id assigned.
    pub fn enqueue(&self, kind: ActionKind, data: serde_json::Value) -> Result<PendingAction> {
        let action = PendingAction::new(kind, data);
        let _guard = self.lock()?;
        let mut actions = self.list();
        actions.push(action.clone());
        self.persist(&actions)?;
        debug!(kind = %action.kind, id = %action.id, "Pending action enqueued");
        Ok(action)
    }

    /// Current queue contents in insertion order.
    /// A missing or unreadable queue reads as empty.
    pub fn list(&self) -> Vec<PendingAction> {
        let stored = match self.store.get(keys::PENDING_ACTIONS) {
            Ok(Some(s)) => s,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read pending-action queue");
                return Vec::new();
            }
        };
        match serde_json::from_str(&stored) {
            Ok(actions) => actions,
            Err(e) => {
                warn!(error = %e, "Failed to parse pending-action queue");
                Vec::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    /// Remove a single action by id. Returns whether anything was removed.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let _guard = self.lock()?;
        let actions = self.list();
        let before = actions.len();
        let remaining: Vec<PendingAction> =
            actions.into_iter().filter(|a| a.id != id).collect();
        let removed = remaining.len() != before;
        if removed {
            self.persist(&remaining)?;
        }
        Ok(removed)
    }

    /// Replay every queued action in order through `replayer`.
    ///
    /// Best-effort: one action failing does not stop the rest. Successful
    /// actions leave the queue; failed ones stay, keeping their relative
    /// order, for a later drain. Each success is removed from the live queue
    /// individually, so actions enqueued while a replay is in flight are
    /// never clobbered by a stale snapshot.
    pub async fn drain<R: Replay + ?Sized>(&self, replayer: &R) -> DrainReport {
        let actions = self.list();
        if actions.is_empty() {
            return DrainReport::default();
        }

        info!(count = actions.len(), "Replaying pending actions");

        let mut report = DrainReport::default();
        for action in &actions {
            match replayer.replay(action).await {
                Ok(()) => {
                    debug!(id = %action.id, kind = %action.kind, "Pending action replayed");
                    if let Err(e) = self.remove(&action.id) {
                        warn!(id = %action.id, error = %e, "Failed to dequeue replayed action");
                    }
                    report.succeeded.push(action.id.clone());
                }
                Err(e) => {
                    warn!(id = %action.id, kind = %action.kind, error = %e, "Pending action replay failed");
                    report.failed.push(action.id.clone());
                }
            }
        }

        if !report.succeeded.is_empty() {
            info!(count = report.succeeded.len(), "Pending actions synced");
        }
        if !report.failed.is_empty() {
            warn!(count = report.failed.len(), "Pending actions still queued after drain");
        }

        report
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("Pending-action queue lock poisoned"))
    }

    fn persist(&self, actions: &[PendingAction]) -> Result<()> {
        let serialized =
            serde_json::to_string(actions).context("Failed to serialize pending-action queue")?;
        self.store
            .set(keys::PENDING_ACTIONS, &serialized)
            .context("Failed to write pending-action queue")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::sync::replay::Replay;
    use futures::future::BoxFuture;

    fn queue() -> PendingQueue {
        PendingQueue::new(Arc::new(MemoryStore::new()))
    }

    /// Replayer whose verdict depends on the action payload.
    struct SelectiveReplayer;

    impl Replay for SelectiveReplayer {
        fn replay<'a>(&'a self, action: &'a PendingAction) -> BoxFuture<'a, Result<()>> {
            Box::pin(async move {
                if action.data.get("fail").is_some() {
                    anyhow::bail!("replay rejected");
                }
                Ok(())
            })
        }
    }

    #[test]
    fn test_enqueue_preserves_order_and_distinct_ids() {
        let queue = queue();
        for i in 0..5 {
            queue
                .enqueue(ActionKind::RegisterEntry, serde_json::json!({ "qr_data": i }))
                .unwrap();
        }

        let actions = queue.list();
        assert_eq!(actions.len(), 5);
        for (i, action) in actions.iter().enumerate() {
            assert_eq!(action.data["qr_data"], i);
        }

        let mut ids: Vec<&str> = actions.iter().map(|a| a.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_queue_survives_reload() {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let queue = PendingQueue::new(store.clone());
        queue
            .enqueue(ActionKind::RegisterExit, serde_json::json!({"qr_data": "abc"}))
            .unwrap();

        // A fresh queue over the same store sees the persisted action
        let reloaded = PendingQueue::new(store);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.list()[0].kind, ActionKind::RegisterExit);
    }

    #[test]
    fn test_remove_by_id() {
        let queue = queue();
        let a = queue
            .enqueue(ActionKind::RegisterEntry, serde_json::json!({}))
            .unwrap();
        let b = queue
            .enqueue(ActionKind::RegisterExit, serde_json::json!({}))
            .unwrap();

        assert!(queue.remove(&a.id).unwrap());
        assert!(!queue.remove("no-such-id").unwrap());

        let remaining = queue.list();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    }

    #[test]
    fn test_wire_format_matches_stored_shape() {
        let action = PendingAction::new(
            ActionKind::RegisterEntry,
            serde_json::json!({"qr_data": "QR-1"}),
        );
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "REGISTER_ENTRY");
        assert!(json["id"].is_string());
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_drain_removes_succeeded_keeps_failed_in_order() {
        let queue = queue();
        queue
            .enqueue(ActionKind::RegisterEntry, serde_json::json!({"n": 1}))
            .unwrap();
        let failing_a = queue
            .enqueue(ActionKind::RegisterExit, serde_json::json!({"n": 2, "fail": true}))
            .unwrap();
        queue
            .enqueue(ActionKind::RegisterEntry, serde_json::json!({"n": 3}))
            .unwrap();
        let failing_b = queue
            .enqueue(ActionKind::RegisterEntry, serde_json::json!({"n": 4, "fail": true}))
            .unwrap();

        let report = queue.drain(&SelectiveReplayer).await;
        assert_eq!(report.succeeded.len(), 2);
        assert_eq!(report.failed, vec![failing_a.id.clone(), failing_b.id.clone()]);

        // Failed actions remain, in their original relative order
        let remaining = queue.list();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].id, failing_a.id);
        assert_eq!(remaining[1].id, failing_b.id);
    }

    /// Replayer that holds each replay open long enough for concurrent
    /// queue activity to land mid-drain.
    struct SlowReplayer;

    impl Replay for SlowReplayer {
        fn replay<'a>(&'a self, _action: &'a PendingAction) -> BoxFuture<'a, Result<()>> {
            Box::pin(async {
                tokio::time::sleep(std::time::Duration::from_millis(150)).await;
                Ok(())
            })
        }
    }

    #[tokio::test]
    async fn test_enqueue_during_drain_survives() {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let queue = PendingQueue::new(store);
        queue
            .enqueue(ActionKind::RegisterEntry, serde_json::json!({"qr_data": "QR-1"}))
            .unwrap();

        let draining = queue.clone();
        let drain = tokio::spawn(async move { draining.drain(&SlowReplayer).await });

        // Land a new action while the first replay is still in flight
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let late = queue
            .enqueue(ActionKind::RegisterExit, serde_json::json!({"qr_data": "QR-2"}))
            .unwrap();

        let report = drain.await.unwrap();
        assert_eq!(report.succeeded.len(), 1);

        let remaining = queue.list();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, late.id);
    }

    #[tokio::test]
    async fn test_drain_empty_queue_is_noop() {
        let queue = queue();
        let report = queue.drain(&SelectiveReplayer).await;
        assert!(report.succeeded.is_empty());
        assert!(report.failed.is_empty());
    }
}
