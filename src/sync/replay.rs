use anyhow::Result;
use futures::future::BoxFuture;

use super::queue::PendingAction;

/// Replays a queued action against the backend.
///
/// The queue dispatches actions here without knowing how they are submitted;
/// the concrete HTTP replay lives with the offline-aware operations. Boxed
/// futures keep the trait object-safe so the connectivity monitor can hold
/// any replayer behind a pointer.
pub trait Replay: Send + Sync {
    fn replay<'a>(&'a self, action: &'a PendingAction) -> BoxFuture<'a, Result<()>>;
}
