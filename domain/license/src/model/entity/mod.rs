mod cluster;
mod contract;
mod host_inventory;
mod license_compliance;
mod license_type;
mod license_usage;

#[rustfmt::skip]
pub use {
    cluster::{Cluster, VirtualMachine},
    contract::Contract,
    host_inventory::{DatabaseInstance, HostInventory, LicenseLineItem},
    license_compliance::LicenseCompliance,
    license_type::LicenseType,
    license_usage::LicenseUsage,
};
