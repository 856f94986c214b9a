use crate::model::{
    entity::Contract,
    vo::{ContractCoverage, UsageCollection},
};

/// Spreads the quantity of each contract over the hosts it names.
pub trait ContractAssignmentService: Send + Sync {
    fn assign(&self, collection: &UsageCollection, contracts: &[Contract]) -> Vec<ContractCoverage>;
}
