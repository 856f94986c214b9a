use crate::model::{entity::LicenseUsage, vo::Fleet};

/// Drops rows made redundant by a license installed in the same HA domain.
pub trait DependencyExclusionService: Send + Sync {
    fn exclude(&self, fleet: &Fleet, usages: Vec<LicenseUsage>) -> Vec<LicenseUsage>;
}
