use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::vo::{Edition, Technology};

/// Snapshot of one host sent by its inventory agent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInventory {
    pub hostname: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    pub cpu_cores: i64,
    #[serde(default)]
    pub cpu_sockets: i64,
    #[serde(default)]
    pub veritas_cluster_server: bool,
    /// Failover peers, the host itself included. Order is irrelevant.
    #[serde(default)]
    pub veritas_cluster_hostnames: Vec<String>,
    #[serde(default)]
    pub databases: Vec<DatabaseInstance>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseInstance {
    pub name: String,
    pub technology: Technology,
    #[serde(default)]
    pub edition: Edition,
    #[serde(default)]
    pub licenses: Vec<LicenseLineItem>,
}

/// A license detected on a database by the agent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseLineItem {
    pub license_type_id: String,
    /// Licenses needed, expressed in the license type's own metric.
    pub count: f64,
    #[serde(default)]
    pub ignored: bool,
    #[serde(default)]
    pub ignored_comment: String,
}

impl HostInventory {
    pub fn databases_of(&self, technology: Technology) -> impl Iterator<Item = &DatabaseInstance> {
        self.databases.iter().filter(move |el| el.technology == technology)
    }

    /// Whether any database of `technology` uses `license_type_id`.
    pub fn uses_license(&self, technology: Technology, license_type_id: &str) -> bool {
        self.databases_of(technology)
            .flat_map(|el| el.licenses.iter())
            .any(|el| el.license_type_id == license_type_id && el.count > 0.0)
    }
}
