use async_trait::async_trait;

use crate::model::{
    entity::{Contract, LicenseType},
    vo::{GlobalFilter, Technology},
};

#[async_trait]
pub trait ContractRepo: Send + Sync {
    async fn list_contracts(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<Contract>>;
    /// License-type catalog of a technology.
    async fn list_license_types(&self, technology: Technology) -> anyhow::Result<Vec<LicenseType>>;
}
