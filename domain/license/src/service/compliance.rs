use async_trait::async_trait;

use crate::model::{
    entity::{LicenseCompliance, LicenseUsage},
    vo::{
        ComplianceStats, ContractCoverage, GlobalFilter, LicenseUsageByCluster, LicenseUsageByHost,
        LicenseUsageByVeritasCluster, Technology, TechnologyCompliance,
    },
};

/// Entry point of the engine.
///
/// Every call reads fresh data from the repositories and runs
/// collection, attribution and exclusion before its own stage.
/// A repository failure aborts the call.
#[async_trait]
pub trait ComplianceService: Send + Sync {
    /// Attributed usage rows, redundant licenses excluded.
    async fn license_usages(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<LicenseUsage>>;
    async fn usages_by_host(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<LicenseUsageByHost>>;
    async fn usages_by_cluster(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<LicenseUsageByCluster>>;
    async fn usages_by_veritas_cluster(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<LicenseUsageByVeritasCluster>>;
    async fn license_compliance(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<LicenseCompliance>>;
    /// How every contract of `technology` is spread over its hosts.
    async fn contract_coverage(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<ContractCoverage>>;
    async fn technology_compliance(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<TechnologyCompliance>;
    /// Roll-up of `technologies` plus their mean.
    async fn compliance_stats(
        &self,
        technologies: &[Technology],
        filter: &GlobalFilter,
    ) -> anyhow::Result<ComplianceStats>;
}
