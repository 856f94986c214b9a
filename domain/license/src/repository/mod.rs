mod contract;
mod inventory;

#[rustfmt::skip]
pub use {
    contract::ContractRepo,
    inventory::InventoryRepo,
};
