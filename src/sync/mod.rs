//! Offline synchronization: the pending-action queue, the connectivity
//! monitor that drains it, and the replay seam between them.
//!
//! Writes that cannot reach the backend are recorded as `PendingAction`s in
//! the shared key-value store. When the `ConnectivityMonitor` observes the
//! offline-to-online transition it replays the queue through a `Replay`
//! implementation, removing actions that succeed and keeping the rest for a
//! later attempt.

pub mod monitor;
pub mod queue;
pub mod replay;

pub use monitor::{ConnectivityHandle, ConnectivityMonitor, ConnectivitySnapshot, SubscriptionId};
pub use queue::{ActionKind, DrainReport, PendingAction, PendingQueue};
pub use replay::Replay;
