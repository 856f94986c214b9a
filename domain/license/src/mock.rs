use crate::{
    model::{
        entity::{Cluster, Contract, HostInventory, LicenseType},
        vo::{GlobalFilter, Technology},
    },
    repository::{ContractRepo, InventoryRepo},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;

mock! {
    pub InventoryRepo {}
    #[async_trait]
    impl InventoryRepo for InventoryRepo {
        async fn get_host_inventories(
            &self,
            as_of: Option<DateTime<Utc>>,
        ) -> anyhow::Result<Vec<HostInventory>>;
        async fn get_clusters(&self, filter: &GlobalFilter) -> anyhow::Result<Vec<Cluster>>;
        async fn host_exists(&self, hostname: &str) -> anyhow::Result<bool>;
    }
}

mock! {
    pub ContractRepo {}
    #[async_trait]
    impl ContractRepo for ContractRepo {
        async fn list_contracts(
            &self,
            technology: Technology,
            filter: &GlobalFilter,
        ) -> anyhow::Result<Vec<Contract>>;
        async fn list_license_types(&self, technology: Technology) -> anyhow::Result<Vec<LicenseType>>;
    }
}
