use serde::{Deserialize, Serialize};

use crate::model::vo::{ClusterType, Edition, Metric, Technology};

/// License consumption of one (host, database, license type) triple.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseUsage {
    pub technology: Technology,
    pub hostname: String,
    pub db_name: String,
    pub edition: Edition,
    pub license_type_id: String,
    pub description: String,
    pub metric: Metric,
    /// Host level quantity, already multiplied by the metric factor.
    pub used_licenses: f64,
    /// Empty unless the host is a recognised cluster member.
    pub cluster_name: String,
    pub cluster_type: ClusterType,
    /// Cluster level quantity, already multiplied by the metric factor.
    pub cluster_licenses: f64,
    pub ignored: bool,
    pub ignored_comment: String,
    /// Billed at host level because every inventoried VM of its cluster is CPU-capped.
    pub olvm_capped: bool,
}

impl LicenseUsage {
    pub fn is_clustered(&self) -> bool {
        !self.cluster_name.is_empty()
    }

    /// Name of the billing unit: the cluster for clustered rows, the host otherwise.
    pub fn billing_name(&self) -> &str {
        if self.is_clustered() {
            &self.cluster_name
        } else {
            &self.hostname
        }
    }

    /// Quantity this row charges to its billing unit.
    pub fn consumed(&self) -> f64 {
        if self.is_clustered() {
            self.cluster_licenses
        } else {
            self.used_licenses
        }
    }

    pub fn clear_cluster(&mut self) {
        self.cluster_name.clear();
        self.cluster_type = ClusterType::None;
        self.cluster_licenses = 0.0;
    }
}
