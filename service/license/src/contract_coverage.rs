use std::collections::{BTreeMap, HashMap, HashSet};

use domain_license::{
    exception::LicenseException,
    model::{
        entity::Contract,
        vo::{ContractScope, Edition, LicenseCoverage, Technology, UsageCollection},
    },
    service::ContractCoverageService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(TypedBuilder, Default)]
pub struct ContractCoverageServiceImpl {}

impl ContractCoverageService for ContractCoverageServiceImpl {
    fn compute(&self, collection: &UsageCollection, contracts: &[Contract]) -> Vec<LicenseCoverage> {
        let mut coverages = consumption(collection);

        let overlapped = overlapped_standard_contracts(collection, contracts);
        for contract in contracts.iter() {
            if overlapped.contains(&contract.id) {
                tracing::debug!(
                    "Contract {} overlaps an enterprise cluster contract, not purchased",
                    contract.contract_id
                );
                continue;
            }
            if contract.scope == ContractScope::Unknown {
                let e = LicenseException::UnknownContractScope {
                    contract_id: contract.contract_id.to_owned(),
                    license_type_id: contract.license_type_id.to_owned(),
                };
                tracing::error!("{e}");
                continue;
            }
            let coverage = coverages
                .entry(contract.license_type_id.to_owned())
                .or_insert_with(|| new_coverage(&contract.license_type_id));
            coverage.purchased += contract.quantity;
            coverage.unlimited |= contract.is_unlimited();
        }

        coverages
            .into_values()
            .map(|mut el| {
                el.covered = if el.unlimited {
                    el.consumed
                } else {
                    el.purchased.min(el.consumed)
                };
                el.available = (el.purchased - el.covered).max(0.0);
                el
            })
            .collect()
    }
}

fn new_coverage(license_type_id: &str) -> LicenseCoverage {
    LicenseCoverage {
        license_type_id: license_type_id.to_owned(),
        ..Default::default()
    }
}

/// Consumption per license type, each billing unit counted once at its largest row.
fn consumption(collection: &UsageCollection) -> BTreeMap<String, LicenseCoverage> {
    let mut coverages = BTreeMap::new();
    let mut per_unit = HashMap::<(&str, &str), f64>::new();
    for usage in collection.usages.iter() {
        coverages
            .entry(usage.license_type_id.to_owned())
            .or_insert_with(|| new_coverage(&usage.license_type_id));
        if usage.ignored {
            continue;
        }
        let unit = per_unit
            .entry((usage.license_type_id.as_str(), usage.billing_name()))
            .or_insert(0.0);
        *unit = unit.max(usage.consumed());
    }
    for ((license_type_id, _), quantity) in per_unit {
        if let Some(el) = coverages.get_mut(license_type_id) {
            el.consumed += quantity;
        }
    }
    coverages
}

/// Host scoped Standard contracts whose hosts sit in a cluster already bought as Enterprise.
fn overlapped_standard_contracts(collection: &UsageCollection, contracts: &[Contract]) -> HashSet<Uuid> {
    if collection.technology != Technology::SqlServer {
        return HashSet::new();
    }
    let edition_of = |contract: &Contract| {
        collection
            .license_type(&contract.license_type_id)
            .map(|el| el.edition)
            .unwrap_or_default()
    };

    let mut enterprise_hosts = HashSet::new();
    for contract in contracts
        .iter()
        .filter(|el| el.scope == ContractScope::Cluster && edition_of(el) == Edition::Enterprise)
    {
        for name in contract.cluster_names.iter() {
            match collection.fleet.cluster_named(name) {
                Some(cluster) => enterprise_hosts.extend(cluster.hostnames()),
                None => {
                    let e = LicenseException::ClusterNotFound { name: name.to_owned() };
                    tracing::warn!("Contract {}: {e}", contract.contract_id);
                }
            }
        }
    }

    contracts
        .iter()
        .filter(|el| el.scope == ContractScope::Host && edition_of(el) == Edition::Standard)
        .filter(|el| el.hostnames.iter().any(|host| enterprise_hosts.contains(host.as_str())))
        .map(|el| el.id)
        .collect()
}
