use serde::{Deserialize, Serialize};

use crate::model::vo::{Edition, Metric};

/// Catalog entry of a license part number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseType {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub metric: Metric,
    /// `None` when unknown, `Some(0.0)` for free licenses.
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub edition: Edition,
}

impl LicenseType {
    pub fn is_free(&self) -> bool {
        self.cost == Some(0.0)
    }
}
