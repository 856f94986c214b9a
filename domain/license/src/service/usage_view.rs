use crate::model::{
    entity::LicenseUsage,
    vo::{LicenseUsageByCluster, LicenseUsageByHost, LicenseUsageByVeritasCluster},
};

/// Groups attributed usage rows by billing unit.
pub trait UsageViewService: Send + Sync {
    fn by_host(&self, usages: &[LicenseUsage]) -> Vec<LicenseUsageByHost>;
    fn by_cluster(&self, usages: &[LicenseUsage]) -> Vec<LicenseUsageByCluster>;
    fn by_veritas_cluster(&self, usages: &[LicenseUsage]) -> Vec<LicenseUsageByVeritasCluster>;
}
