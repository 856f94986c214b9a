use async_trait::async_trait;

use crate::model::vo::{GlobalFilter, Technology, UsageCollection};

/// Turns raw inventory into license usage rows.
#[async_trait]
pub trait LicenseUsageCollector: Send + Sync {
    /// Read every host, cluster and catalog entry in scope of `filter` and build one
    /// usage row per (host, database, license type), metric factor applied.
    async fn collect(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<UsageCollection>;
}
