use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::{
    entity::{Cluster, HostInventory},
    vo::GlobalFilter,
};

#[async_trait]
pub trait InventoryRepo: Send + Sync {
    /// Latest snapshot of every host, or the latest one taken before `as_of`.
    async fn get_host_inventories(
        &self,
        as_of: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Vec<HostInventory>>;
    async fn get_clusters(&self, filter: &GlobalFilter) -> anyhow::Result<Vec<Cluster>>;
    async fn host_exists(&self, hostname: &str) -> anyhow::Result<bool>;
}
