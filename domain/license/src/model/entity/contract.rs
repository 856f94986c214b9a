use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::vo::ContractScope;

/// Purchased licenses of a single license type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: Uuid,
    /// Reference printed on the agreement.
    #[serde(default)]
    pub contract_id: String,
    pub license_type_id: String,
    pub scope: ContractScope,
    #[serde(default)]
    pub hostnames: Vec<String>,
    #[serde(default)]
    pub cluster_names: Vec<String>,
    #[serde(default)]
    pub quantity: f64,
    /// Leftover licenses may cover any host, not only the associated ones.
    #[serde(default)]
    pub basket: bool,
    /// Covers only the associated hosts, never their whole cluster.
    #[serde(default)]
    pub restricted: bool,
}

impl Contract {
    pub fn is_unlimited(&self) -> bool {
        self.scope == ContractScope::Unlimited
    }
}
