use crate::model::{
    entity::Contract,
    vo::{LicenseCoverage, UsageCollection},
};

/// Matches consumption with purchases, one result per license type.
pub trait ContractCoverageService: Send + Sync {
    /// Coverage of every license type that is consumed or purchased, sorted by id.
    fn compute(&self, collection: &UsageCollection, contracts: &[Contract]) -> Vec<LicenseCoverage>;
}
