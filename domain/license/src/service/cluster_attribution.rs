use crate::model::{entity::LicenseUsage, vo::Fleet};

/// Decides the billing unit of every usage row.
pub trait ClusterAttributionService: Send + Sync {
    fn attribute(&self, fleet: &Fleet, usages: Vec<LicenseUsage>) -> Vec<LicenseUsage>;
}
