mod cluster_type;
pub mod coverage;
mod filter;
mod fleet;
mod metric;
mod settings;
pub mod stats;
mod technology;
pub mod usage_view;

#[rustfmt::skip]
pub use {
    cluster_type::{ClusterType, ContractScope, Edition},
    coverage::{AssociatedHostCoverage, ContractCoverage, LicenseCoverage},
    filter::GlobalFilter,
    fleet::{Fleet, UsageCollection},
    metric::Metric,
    settings::{DependencyRule, LicensingSettings},
    stats::{ComplianceStats, TechnologyCompliance, TechnologyTotal},
    technology::Technology,
    usage_view::{LicenseUsageByCluster, LicenseUsageByHost, LicenseUsageByVeritasCluster},
};
