use serde::{Deserialize, Serialize};

/// Billing unit kind a usage row was attributed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClusterType {
    #[default]
    None,
    /// Virtualization cluster, every VM can be moved on every physical host.
    Hypervisor,
    /// Active/passive failover cluster built from Veritas peers.
    VeritasCluster,
}

/// Database edition, only Standard and Enterprise change the licensing arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edition {
    Standard,
    Enterprise,
    #[default]
    #[serde(other)]
    Other,
}

/// What a purchased contract covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractScope {
    Host,
    Cluster,
    Unlimited,
    #[serde(other)]
    Unknown,
}
