use anyhow::Result;

use crate::api::endpoints;
use crate::cache::{keys, max_age_hours};
use crate::models::DailyScans;

use super::{LoadResult, OfflineOps, RegisterOutcome};

/// Gate-guard operations: entry/exit scan registration with offline
/// queueing, plus the guard's own scan log.
pub struct GuardOps<'a> {
    pub(super) ops: &'a OfflineOps,
}

impl GuardOps<'_> {
    /// Record a visitor entry from a scanned QR payload.
    /// Accepted even without connectivity; syncs on reconnect.
    pub async fn register_entry(&self, qr_data: &str) -> RegisterOutcome {
        self.ops.register_entry(qr_data).await
    }

    /// Record a visitor exit from a scanned QR payload.
    /// Accepted even without connectivity; syncs on reconnect.
    pub async fn register_exit(&self, qr_data: &str) -> RegisterOutcome {
        self.ops.register_exit(qr_data).await
    }

    /// Scans this guard registered today.
    pub async fn daily_scans(&self) -> Result<LoadResult<DailyScans>> {
        self.ops
            .load(
                endpoints::GUARD_DAILY_SCANS,
                keys::GUARD_SCANS,
                max_age_hours(keys::GUARD_SCANS),
            )
            .await
    }
}
