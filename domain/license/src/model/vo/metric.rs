use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Unit a license is purchased in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Processor Perpetual")]
    ProcessorPerpetual,
    #[serde(rename = "Named User Plus Perpetual")]
    NamedUserPlusPerpetual,
    #[serde(rename = "Computer Perpetual")]
    ComputerPerpetual,
    #[serde(rename = "Stream Perpetual")]
    StreamPerpetual,
    /// Per-host agreement, used by MySQL and SQL Server contracts.
    #[serde(rename = "HOST")]
    Host,
    /// Per-cluster agreement, used by MySQL and SQL Server contracts.
    #[serde(rename = "CLUSTER")]
    Cluster,
    /// Any value the catalog carries that the engine can't price.
    #[serde(other)]
    Unknown,
}

impl Metric {
    pub fn is_named_user(&self) -> bool {
        matches!(self, Metric::NamedUserPlusPerpetual)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Metric::Unknown)
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Metric::ProcessorPerpetual => "Processor Perpetual",
            Metric::NamedUserPlusPerpetual => "Named User Plus Perpetual",
            Metric::ComputerPerpetual => "Computer Perpetual",
            Metric::StreamPerpetual => "Stream Perpetual",
            Metric::Host => "HOST",
            Metric::Cluster => "CLUSTER",
            Metric::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}
