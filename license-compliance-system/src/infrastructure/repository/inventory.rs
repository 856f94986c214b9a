use chrono::{DateTime, Utc};
use domain_license::{
    model::{
        entity::{Cluster, HostInventory},
        vo::GlobalFilter,
    },
    repository::InventoryRepo,
};

use super::JsonSnapshotRepo;

#[async_trait::async_trait]
impl InventoryRepo for JsonSnapshotRepo {
    async fn get_host_inventories(
        &self,
        as_of: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Vec<HostInventory>> {
        Ok(self.latest_hosts(as_of).into_iter().cloned().collect())
    }

    /// Clusters whose reporting host is in scope of `filter`.
    async fn get_clusters(&self, filter: &GlobalFilter) -> anyhow::Result<Vec<Cluster>> {
        Ok(self
            .clusters
            .iter()
            .filter(|el| self.in_scope(&el.hostname, filter))
            .cloned()
            .collect())
    }

    async fn host_exists(&self, hostname: &str) -> anyhow::Result<bool> {
        Ok(self.hosts.iter().any(|el| el.hostname == hostname))
    }
}
