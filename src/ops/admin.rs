use anyhow::Result;

use crate::api::endpoints;
use crate::cache::{keys, max_age_hours};
use crate::models::{DailyScans, Post, StatsReport, VisitHistory};

use super::{LoadResult, OfflineOps};

/// Administrator reads: dashboards and reports, all cacheable for offline.
pub struct AdminOps<'a> {
    pub(super) ops: &'a OfflineOps,
}

impl AdminOps<'_> {
    /// Full visit history across the residencial.
    pub async fn visit_history(&self) -> Result<LoadResult<VisitHistory>> {
        self.ops
            .load(
                endpoints::ADMIN_VISIT_HISTORY,
                keys::VISIT_HISTORY,
                max_age_hours(keys::VISIT_HISTORY),
            )
            .await
    }

    /// Aggregate statistics. Shortest staleness window of the datasets.
    pub async fn stats(&self) -> Result<LoadResult<StatsReport>> {
        self.ops
            .load(endpoints::ADMIN_STATS, keys::STATS, max_age_hours(keys::STATS))
            .await
    }

    /// All QR scans registered today.
    pub async fn daily_scans(&self) -> Result<LoadResult<DailyScans>> {
        self.ops
            .load(
                endpoints::ADMIN_DAILY_SCANS,
                keys::DAILY_SCANS,
                max_age_hours(keys::DAILY_SCANS),
            )
            .await
    }

    /// Social publications.
    pub async fn posts(&self) -> Result<LoadResult<Vec<Post>>> {
        self.ops
            .load(endpoints::SOCIAL_POSTS, keys::POSTS, max_age_hours(keys::POSTS))
            .await
    }
}
