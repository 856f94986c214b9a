mod cluster_attribution;
mod collector;
mod compliance;
mod compliance_aggregator;
mod contract_assignment;
mod contract_coverage;
mod dependency_exclusion;
mod usage_view;

#[rustfmt::skip]
pub use {
    cluster_attribution::ClusterAttributionService,
    collector::LicenseUsageCollector,
    compliance::ComplianceService,
    compliance_aggregator::ComplianceAggregator,
    contract_assignment::ContractAssignmentService,
    contract_coverage::ContractCoverageService,
    dependency_exclusion::DependencyExclusionService,
    usage_view::UsageViewService,
};
