use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unrounded coverage of one license type, input of the compliance aggregation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseCoverage {
    pub license_type_id: String,
    pub consumed: f64,
    pub covered: f64,
    pub purchased: f64,
    pub available: f64,
    pub unlimited: bool,
}

/// How a single contract was spread over the hosts it names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCoverage {
    pub id: Uuid,
    pub contract_id: String,
    pub license_type_id: String,
    pub quantity: f64,
    pub unlimited: bool,
    pub basket: bool,
    pub restricted: bool,
    /// Licenses of this contract assigned to some usage.
    pub covered_licenses: f64,
    /// Licenses of this contract still unassigned.
    pub available_licenses: f64,
    pub hosts: Vec<AssociatedHostCoverage>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociatedHostCoverage {
    pub hostname: String,
    /// Licenses the host needs for the contract's license type.
    pub consumed_licenses_count: f64,
    /// Part of the need covered by this contract.
    pub covered_licenses_count: f64,
    /// Part of the need covered by every contract together.
    pub total_covered_licenses_count: f64,
}
