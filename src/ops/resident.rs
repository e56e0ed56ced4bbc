use anyhow::Result;

use crate::api::endpoints;
use crate::cache::{keys, max_age_hours};
use crate::models::{NewVisit, Post, VisitReceipt};

use super::{LoadResult, OfflineOps, VisitOutcome};

/// Resident operations: visit creation (online only) and cacheable reads.
pub struct ResidentOps<'a> {
    pub(super) ops: &'a OfflineOps,
}

impl ResidentOps<'_> {
    /// Create a visit and receive its QR receipt(s).
    /// Rejected while offline: the QR must come from the backend.
    pub async fn create_visit(&self, visit: &NewVisit) -> VisitOutcome {
        self.ops.create_visit(visit).await
    }

    /// Announcements from the administration.
    pub async fn announcements(&self) -> Result<LoadResult<Vec<Post>>> {
        self.ops
            .load(
                endpoints::ANNOUNCEMENTS,
                keys::ANNOUNCEMENTS,
                max_age_hours(keys::ANNOUNCEMENTS),
            )
            .await
    }

    /// The resident's own visits, QR receipts included.
    pub async fn my_visits(&self) -> Result<LoadResult<Vec<VisitReceipt>>> {
        self.ops
            .load(
                endpoints::RESIDENT_VISITS,
                keys::RESIDENT_VISITS,
                max_age_hours(keys::RESIDENT_VISITS),
            )
            .await
    }
}
