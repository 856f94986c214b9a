use std::sync::Arc;

use domain_license::{
    repository::{ContractRepo, InventoryRepo},
    service::ComplianceService,
};
use service_license::{
    ClusterAttributionServiceImpl, ComplianceAggregatorImpl, ComplianceServiceImpl,
    ContractAssignmentServiceImpl, ContractCoverageServiceImpl, DependencyExclusionServiceImpl,
    LicenseUsageCollectorImpl, UsageViewServiceImpl,
};

use super::{config::LicenseConfig, repository::JsonSnapshotRepo};

/// Owns the configuration and the wired-up compliance engine.
pub struct ServiceProvider {
    config: LicenseConfig,
    compliance_service: Arc<dyn ComplianceService>,
}

impl ServiceProvider {
    pub async fn build(config: LicenseConfig) -> anyhow::Result<Self> {
        let repo = Arc::new(JsonSnapshotRepo::new(&config.repository.snapshot_dir).await?);
        Ok(Self::with_repositories(config, repo.clone(), repo))
    }

    pub fn with_repositories(
        config: LicenseConfig,
        inventory_repo: Arc<dyn InventoryRepo>,
        contract_repo: Arc<dyn ContractRepo>,
    ) -> Self {
        let settings = Arc::new(config.licensing.clone());
        let collector = Arc::new(
            LicenseUsageCollectorImpl::builder()
                .inventory_repo(inventory_repo.clone())
                .contract_repo(contract_repo.clone())
                .settings(settings.clone())
                .build(),
        );
        let attribution_service = Arc::new(
            ClusterAttributionServiceImpl::builder()
                .settings(settings.clone())
                .build(),
        );
        let exclusion_service = Arc::new(
            DependencyExclusionServiceImpl::builder()
                .settings(settings.clone())
                .build(),
        );
        let assignment_service = Arc::new(
            ContractAssignmentServiceImpl::builder()
                .settings(settings)
                .build(),
        );
        let compliance_service = Arc::new(
            ComplianceServiceImpl::builder()
                .inventory_repo(inventory_repo)
                .contract_repo(contract_repo)
                .collector(collector)
                .attribution_service(attribution_service)
                .exclusion_service(exclusion_service)
                .coverage_service(Arc::new(ContractCoverageServiceImpl::default()))
                .assignment_service(assignment_service)
                .aggregator(Arc::new(ComplianceAggregatorImpl::default()))
                .usage_view_service(Arc::new(UsageViewServiceImpl::default()))
                .build(),
        );
        Self {
            config,
            compliance_service,
        }
    }

    pub fn config(&self) -> &LicenseConfig {
        &self.config
    }

    pub fn compliance_service(&self) -> Arc<dyn ComplianceService> {
        self.compliance_service.clone()
    }
}
