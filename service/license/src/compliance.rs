use std::sync::Arc;

use async_trait::async_trait;
use domain_license::{
    exception::LicenseException,
    model::{
        entity::{Contract, LicenseCompliance, LicenseUsage},
        vo::{
            ComplianceStats, ContractCoverage, GlobalFilter, LicenseUsageByCluster,
            LicenseUsageByHost, LicenseUsageByVeritasCluster, Technology, TechnologyCompliance,
            UsageCollection,
        },
    },
    repository::{ContractRepo, InventoryRepo},
    service::{
        ClusterAttributionService, ComplianceAggregator, ComplianceService,
        ContractAssignmentService, ContractCoverageService, DependencyExclusionService,
        LicenseUsageCollector, UsageViewService,
    },
};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct ComplianceServiceImpl {
    inventory_repo: Arc<dyn InventoryRepo>,
    contract_repo: Arc<dyn ContractRepo>,
    collector: Arc<dyn LicenseUsageCollector>,
    attribution_service: Arc<dyn ClusterAttributionService>,
    exclusion_service: Arc<dyn DependencyExclusionService>,
    coverage_service: Arc<dyn ContractCoverageService>,
    assignment_service: Arc<dyn ContractAssignmentService>,
    aggregator: Arc<dyn ComplianceAggregator>,
    usage_view_service: Arc<dyn UsageViewService>,
}

impl ComplianceServiceImpl {
    async fn attributed_usages(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<UsageCollection> {
        let mut collection = self.collector.collect(technology, filter).await?;
        let usages = std::mem::take(&mut collection.usages);
        let usages = self.attribution_service.attribute(&collection.fleet, usages);
        collection.usages = self.exclusion_service.exclude(&collection.fleet, usages);
        tracing::debug!(
            "{} {technology} license usages left after attribution and exclusion",
            collection.usages.len()
        );
        Ok(collection)
    }

    /// Contracts of `technology` with the hostnames unknown to the inventory dropped.
    async fn contracts(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<Contract>> {
        let mut contracts = self.contract_repo.list_contracts(technology, filter).await?;
        for contract in contracts.iter_mut() {
            let mut hostnames = Vec::with_capacity(contract.hostnames.len());
            for hostname in contract.hostnames.drain(..) {
                if self.inventory_repo.host_exists(&hostname).await? {
                    hostnames.push(hostname);
                } else {
                    let e = LicenseException::HostNotFound { hostname };
                    tracing::warn!("Contract {}: {e}", contract.contract_id);
                }
            }
            contract.hostnames = hostnames;
        }
        Ok(contracts)
    }

    async fn compliance_of(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<(UsageCollection, Vec<LicenseCompliance>)> {
        let contracts = self.contracts(technology, filter).await?;
        let collection = self.attributed_usages(technology, filter).await?;
        let coverages = self.coverage_service.compute(&collection, &contracts);
        let compliances = self.aggregator.license_compliance(&collection.license_types, &coverages);
        Ok((collection, compliances))
    }
}

#[async_trait]
impl ComplianceService for ComplianceServiceImpl {
    async fn license_usages(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<LicenseUsage>> {
        Ok(self.attributed_usages(technology, filter).await?.usages)
    }

    async fn usages_by_host(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<LicenseUsageByHost>> {
        let collection = self.attributed_usages(technology, filter).await?;
        Ok(self.usage_view_service.by_host(&collection.usages))
    }

    async fn usages_by_cluster(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<LicenseUsageByCluster>> {
        let collection = self.attributed_usages(technology, filter).await?;
        Ok(self.usage_view_service.by_cluster(&collection.usages))
    }

    async fn usages_by_veritas_cluster(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<LicenseUsageByVeritasCluster>> {
        let collection = self.attributed_usages(technology, filter).await?;
        Ok(self.usage_view_service.by_veritas_cluster(&collection.usages))
    }

    async fn license_compliance(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<LicenseCompliance>> {
        Ok(self.compliance_of(technology, filter).await?.1)
    }

    async fn contract_coverage(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<ContractCoverage>> {
        let contracts = self.contracts(technology, filter).await?;
        let collection = self.attributed_usages(technology, filter).await?;
        Ok(self.assignment_service.assign(&collection, &contracts))
    }

    async fn technology_compliance(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<TechnologyCompliance> {
        let (collection, compliances) = self.compliance_of(technology, filter).await?;
        let (count, host_count) = collection.fleet.instance_and_host_count(technology);
        Ok(self
            .aggregator
            .technology_compliance(technology, count, host_count, &compliances))
    }

    async fn compliance_stats(
        &self,
        technologies: &[Technology],
        filter: &GlobalFilter,
    ) -> anyhow::Result<ComplianceStats> {
        let mut stats = Vec::with_capacity(technologies.len());
        for technology in technologies.iter() {
            stats.push(self.technology_compliance(*technology, filter).await?);
        }
        Ok(ComplianceStats {
            total: self.aggregator.total(&stats),
            technologies: stats,
        })
    }
}
