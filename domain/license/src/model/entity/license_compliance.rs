use serde::{Deserialize, Serialize};

use crate::model::vo::Metric;

/// Consumption against purchases of one license type, as reported to users.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseCompliance {
    pub license_type_id: String,
    pub description: String,
    pub metric: Metric,
    pub cost: Option<f64>,
    pub consumed: f64,
    pub covered: f64,
    pub purchased: f64,
    pub available: f64,
    /// Ratio in `[0, 1]` of the consumption covered by contracts.
    pub compliance: f64,
    pub unlimited: bool,
}
