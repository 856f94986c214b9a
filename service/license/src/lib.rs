mod cluster_attribution;
mod collector;
mod compliance;
mod compliance_aggregator;
mod contract_assignment;
mod contract_coverage;
mod dependency_exclusion;
mod usage_views;

#[rustfmt::skip]
pub use {
    cluster_attribution::ClusterAttributionServiceImpl,
    collector::LicenseUsageCollectorImpl,
    compliance::ComplianceServiceImpl,
    compliance_aggregator::ComplianceAggregatorImpl,
    contract_assignment::ContractAssignmentServiceImpl,
    contract_coverage::ContractCoverageServiceImpl,
    dependency_exclusion::DependencyExclusionServiceImpl,
    usage_views::UsageViewServiceImpl,
};
