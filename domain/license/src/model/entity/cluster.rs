use serde::{Deserialize, Serialize};

use crate::model::vo::ClusterType;

/// Virtualization cluster as reported by its management agent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub name: String,
    /// Host running the agent that reported the cluster.
    #[serde(default)]
    pub hostname: String,
    /// Cores of the whole cluster.
    pub cpu: i64,
    /// Sockets of the whole cluster, 0 when unknown.
    #[serde(default)]
    pub sockets: i64,
    #[serde(rename = "type", default = "Cluster::default_type")]
    pub cluster_type: ClusterType,
    #[serde(default)]
    pub vms: Vec<VirtualMachine>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachine {
    pub hostname: String,
    #[serde(default)]
    pub capped_cpu: bool,
    /// The VM runs the inventory agent, so its databases are known.
    #[serde(default)]
    pub is_ercole_installed: bool,
}

impl Cluster {
    fn default_type() -> ClusterType {
        ClusterType::Hypervisor
    }

    pub fn is_hypervisor(&self) -> bool {
        self.cluster_type == ClusterType::Hypervisor
    }

    pub fn hostnames(&self) -> impl Iterator<Item = &str> {
        self.vms.iter().map(|el| el.hostname.as_str())
    }

    /// VMs whose inventory is available.
    pub fn inventoried_vms(&self) -> impl Iterator<Item = &VirtualMachine> {
        self.vms.iter().filter(|el| el.is_ercole_installed)
    }
}
