use serde::{Deserialize, Serialize};

use super::Technology;

/// Compliance roll-up of one technology.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyCompliance {
    pub technology: Technology,
    /// Number of database instances in scope.
    pub count: usize,
    /// Number of hosts running at least one instance.
    pub host_count: usize,
    pub compliance_percentage_val: f64,
    pub compliance_percentage_str: String,
}

/// Compliance of every requested technology plus the fleet-wide mean.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStats {
    pub total: TechnologyTotal,
    pub technologies: Vec<TechnologyCompliance>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyTotal {
    pub count: usize,
    pub host_count: usize,
    pub compliance_percentage_val: f64,
    pub compliance_percentage_str: String,
}

pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}
