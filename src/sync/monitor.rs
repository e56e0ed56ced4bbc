use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use super::queue::{DrainReport, PendingAction, PendingQueue};
use super::replay::Replay;

/// What subscribers see on every connectivity change.
#[derive(Debug, Clone)]
pub struct ConnectivitySnapshot {
    pub is_online: bool,
    pub pending_actions: Vec<PendingAction>,
}

/// Cheap shared view of the current online flag, for code that only needs
/// to ask "are we online right now?" without holding the whole monitor.
#[derive(Clone)]
pub struct ConnectivityHandle {
    online: Arc<AtomicBool>,
}

impl ConnectivityHandle {
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

type SubscriberFn = Box<dyn Fn(&ConnectivitySnapshot) + Send + Sync>;

/// Identifier returned by `subscribe`, used to unsubscribe.
pub type SubscriptionId = u64;

/// Two-state connectivity tracker.
///
/// External connectivity signals feed `set_online`; going from offline to
/// online drains the pending queue exactly once per transition, regardless
/// of how many subscribers are attached. Subscribers are notified after the
/// drain so their snapshot reflects the post-replay queue.
pub struct ConnectivityMonitor {
    online: Arc<AtomicBool>,
    queue: PendingQueue,
    replayer: Arc<dyn Replay>,
    subscribers: Mutex<Vec<(SubscriptionId, SubscriberFn)>>,
    next_subscription: AtomicU64,
}

impl ConnectivityMonitor {
    pub fn new(queue: PendingQueue, replayer: Arc<dyn Replay>, initially_online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(initially_online)),
            queue,
            replayer,
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    pub fn handle(&self) -> ConnectivityHandle {
        ConnectivityHandle {
            online: self.online.clone(),
        }
    }

    pub fn snapshot(&self) -> ConnectivitySnapshot {
        ConnectivitySnapshot {
            is_online: self.is_online(),
            pending_actions: self.queue.list(),
        }
    }

    /// Register a callback for connectivity changes. Each subscriber gets an
    /// independent snapshot; any number may be attached.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ConnectivitySnapshot) + Send + Sync + 'static,
    {
        let id = self.next_subscription.fetch_add(1, Ordering::SeqCst);
        match self.subscribers.lock() {
            Ok(mut subs) => subs.push((id, Box::new(callback))),
            Err(_) => warn!("Subscriber lock poisoned, subscription dropped"),
        }
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|(sub_id, _)| *sub_id != id);
        }
    }

    /// Feed the current connectivity signal into the monitor.
    ///
    /// Returns the drain report when this call was the offline-to-online
    /// transition, `None` otherwise (including repeated online signals).
    pub async fn set_online(&self, online: bool) -> Option<DrainReport> {
        let was_online = self.online.swap(online, Ordering::SeqCst);
        if was_online == online {
            return None;
        }

        let report = if online {
            info!("Connectivity restored, draining pending actions");
            Some(self.queue.drain(self.replayer.as_ref()).await)
        } else {
            info!("Connectivity lost, offline mode active");
            None
        };

        self.notify();
        report
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        if let Ok(subs) = self.subscribers.lock() {
            for (_, callback) in subs.iter() {
                callback(&snapshot);
            }
        }
    }
}
