use serde::{Deserialize, Serialize};

use super::Metric;

/// Licenses used by one host for one license type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseUsageByHost {
    pub hostname: String,
    pub database_names: Vec<String>,
    pub license_type_id: String,
    pub description: String,
    pub metric: Metric,
    pub used_licenses: f64,
    pub cluster_licenses: f64,
    pub olvm_capped: bool,
}

/// Licenses used by one hypervisor cluster for one license type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseUsageByCluster {
    pub cluster: String,
    pub hostnames: Vec<String>,
    pub license_type_id: String,
    pub description: String,
    pub metric: Metric,
    pub used_licenses: f64,
}

/// Licenses used by one Veritas failover cluster for one license type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseUsageByVeritasCluster {
    /// Synthetic identity, the sorted and comma-joined peer hostnames.
    pub id: String,
    pub hostnames: Vec<String>,
    pub license_type_id: String,
    pub description: String,
    pub metric: Metric,
    pub count: f64,
}
