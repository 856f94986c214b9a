#[derive(Debug, thiserror::Error)]
pub enum LicenseException {
    #[error("Technology: {technology} is not tracked.")]
    UnknownTechnology { technology: String },

    #[error("Host: {hostname} has no inventory.")]
    HostNotFound { hostname: String },

    #[error("Cluster: {name} doesn't exist.")]
    ClusterNotFound { name: String },

    #[error("License type: {license_type_id} is missing from the catalog.")]
    LicenseTypeNotFound { license_type_id: String },

    #[error("License type: {license_type_id} has an unrecognized metric.")]
    UnknownMetric { license_type_id: String },

    #[error("Contract: {contract_id} of license type: {license_type_id} has an unknown scope.")]
    UnknownContractScope {
        contract_id: String,
        license_type_id: String,
    },
}
