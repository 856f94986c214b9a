use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use domain_license::{
    exception::LicenseException,
    model::{
        entity::Contract,
        vo::{
            AssociatedHostCoverage, ClusterType, ContractCoverage, ContractScope, Fleet,
            LicensingSettings, UsageCollection,
        },
    },
    service::ContractAssignmentService,
};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct ContractAssignmentServiceImpl {
    #[builder(default)]
    settings: Arc<LicensingSettings>,
}

/// Keyed by (license type id, billing unit name).
type ObjectKey = (String, String);

/// Licenses a billing unit still needs for one license type.
struct LicensingObject {
    cluster_type: ClusterType,
    original: f64,
    remaining: f64,
}

struct ContractState {
    coverage: ContractCoverage,
    available: f64,
    /// Named user contracts are consumed in whole multiples of this.
    named_user_factor: Option<f64>,
}

impl ContractState {
    fn has_available(&self) -> bool {
        self.coverage.unlimited || self.available > 0.0
    }

    /// Cover up to `requested` licenses, returning the covered amount.
    fn take(&mut self, requested: f64) -> f64 {
        if requested <= 0.0 {
            return 0.0;
        }
        let covered = if self.coverage.unlimited {
            requested
        } else {
            let covered = self.available.min(requested);
            let covered = match self.named_user_factor {
                Some(factor) if factor > 0.0 => (covered / factor).floor() * factor,
                _ => covered,
            }
            .max(0.0);
            self.available -= covered;
            covered
        };
        self.coverage.covered_licenses += covered;
        covered
    }

    fn object_key(&self, name: &str) -> ObjectKey {
        (self.coverage.license_type_id.to_owned(), name.to_owned())
    }
}

impl ContractAssignmentService for ContractAssignmentServiceImpl {
    fn assign(&self, collection: &UsageCollection, contracts: &[Contract]) -> Vec<ContractCoverage> {
        let mut objects = licensing_objects(collection);
        let mut states = contracts
            .iter()
            .filter_map(|el| self.new_state(collection, el))
            .collect::<Vec<_>>();
        states.sort_by(|a, b| {
            a.coverage
                .basket
                .cmp(&b.coverage.basket)
                .then(a.coverage.unlimited.cmp(&b.coverage.unlimited))
                .then(b.coverage.quantity.total_cmp(&a.coverage.quantity))
        });

        let mut covered_clusters = HashSet::new();
        for state in states.iter_mut() {
            assign_to_associated_hosts(&collection.fleet, state, &mut objects, &mut covered_clusters);
        }
        assign_from_baskets(&mut states, &mut objects);

        for state in states.iter_mut() {
            for i in 0..state.coverage.hosts.len() {
                let key = state.object_key(&state.coverage.hosts[i].hostname);
                if let Some(object) = objects.get(&key) {
                    let host = &mut state.coverage.hosts[i];
                    host.consumed_licenses_count = object.original;
                    host.total_covered_licenses_count = object.original - object.remaining;
                }
            }
        }

        states
            .into_iter()
            .map(|mut el| {
                el.coverage.available_licenses = if el.coverage.unlimited {
                    0.0
                } else {
                    el.available.max(0.0)
                };
                el.coverage
            })
            .collect()
    }
}

impl ContractAssignmentServiceImpl {
    fn new_state(&self, collection: &UsageCollection, contract: &Contract) -> Option<ContractState> {
        if contract.scope == ContractScope::Unknown {
            let e = LicenseException::UnknownContractScope {
                contract_id: contract.contract_id.to_owned(),
                license_type_id: contract.license_type_id.to_owned(),
            };
            tracing::error!("{e}");
            return None;
        }
        let named_user_factor = match collection.license_type(&contract.license_type_id) {
            Some(el) if el.metric.is_named_user() => {
                Some(self.settings.metric_factor(collection.technology, el.metric))
            }
            Some(_) => None,
            None => {
                let e = LicenseException::LicenseTypeNotFound {
                    license_type_id: contract.license_type_id.to_owned(),
                };
                tracing::warn!("Contract {}: {e}", contract.contract_id);
                None
            }
        };

        let mut hostnames = contract.hostnames.to_owned();
        for name in contract.cluster_names.iter() {
            match collection.fleet.cluster_named(name) {
                Some(cluster) => hostnames.extend(cluster.hostnames().map(str::to_owned)),
                None => {
                    let e = LicenseException::ClusterNotFound { name: name.to_owned() };
                    tracing::warn!("Contract {}: {e}", contract.contract_id);
                }
            }
        }
        let mut seen = HashSet::new();
        hostnames.retain(|el| seen.insert(el.to_owned()));

        Some(ContractState {
            coverage: ContractCoverage {
                id: contract.id,
                contract_id: contract.contract_id.to_owned(),
                license_type_id: contract.license_type_id.to_owned(),
                quantity: contract.quantity,
                unlimited: contract.is_unlimited(),
                basket: contract.basket,
                restricted: contract.restricted,
                covered_licenses: 0.0,
                available_licenses: contract.quantity,
                hosts: hostnames
                    .into_iter()
                    .map(|hostname| AssociatedHostCoverage {
                        hostname,
                        ..Default::default()
                    })
                    .collect(),
            },
            available: contract.quantity,
            named_user_factor,
        })
    }
}

/// One object per billing unit and license type, at the unit's largest row.
fn licensing_objects(collection: &UsageCollection) -> BTreeMap<ObjectKey, LicensingObject> {
    let mut objects = BTreeMap::<ObjectKey, LicensingObject>::new();
    for usage in collection.usages.iter().filter(|el| !el.ignored) {
        let object = objects
            .entry((usage.license_type_id.to_owned(), usage.billing_name().to_owned()))
            .or_insert(LicensingObject {
                cluster_type: usage.cluster_type,
                original: 0.0,
                remaining: 0.0,
            });
        object.original = object.original.max(usage.consumed());
        object.remaining = object.original;
    }
    objects
}

fn cluster_contains(fleet: &Fleet, object: &LicensingObject, name: &str, hostname: &str) -> bool {
    match object.cluster_type {
        ClusterType::Hypervisor => fleet
            .cluster_named(name)
            .map_or(false, |el| el.hostnames().any(|vm| vm == hostname)),
        ClusterType::VeritasCluster => name.split(',').any(|el| el == hostname),
        ClusterType::None => false,
    }
}

fn assign_to_associated_hosts(
    fleet: &Fleet,
    state: &mut ContractState,
    objects: &mut BTreeMap<ObjectKey, LicensingObject>,
    covered_clusters: &mut HashSet<ObjectKey>,
) {
    let remaining_of = |hostname: &str| {
        objects
            .get(&state.object_key(hostname))
            .map_or(0.0, |el| el.remaining)
    };
    let mut order = (0..state.coverage.hosts.len())
        .map(|i| (i, remaining_of(&state.coverage.hosts[i].hostname)))
        .collect::<Vec<_>>();
    order.sort_by(|a, b| b.1.total_cmp(&a.1));

    for (i, _) in order {
        if !state.has_available() {
            continue;
        }
        let hostname = state.coverage.hosts[i].hostname.to_owned();

        if !state.coverage.restricted {
            let clusters = objects
                .iter()
                .filter(|((license_type_id, name), object)| {
                    *license_type_id == state.coverage.license_type_id
                        && cluster_contains(fleet, object, name, &hostname)
                })
                .map(|(key, _)| key.to_owned())
                .collect::<Vec<_>>();
            for key in clusters {
                if !covered_clusters.insert(key.to_owned()) {
                    continue;
                }
                if let Some(object) = objects.get_mut(&key) {
                    let covered = state.take(object.remaining);
                    object.remaining -= covered;
                }
            }
        }

        if let Some(object) = objects.get_mut(&state.object_key(&hostname)) {
            let covered = state.take(object.remaining);
            object.remaining -= covered;
            state.coverage.hosts[i].covered_licenses_count += covered;
        }
    }
}

fn assign_from_baskets(states: &mut [ContractState], objects: &mut BTreeMap<ObjectKey, LicensingObject>) {
    let mut leftovers = objects
        .iter_mut()
        .filter(|(_, object)| object.remaining > 0.0)
        .collect::<Vec<_>>();
    leftovers.sort_by(|a, b| b.1.remaining.total_cmp(&a.1.remaining));

    for ((license_type_id, name), object) in leftovers {
        for state in states
            .iter_mut()
            .filter(|el| el.coverage.basket && el.coverage.license_type_id == *license_type_id)
        {
            if object.remaining <= 0.0 || !state.has_available() {
                continue;
            }
            let covered = state.take(object.remaining);
            object.remaining -= covered;
            tracing::debug!(
                "Basket contract {} covered {covered} {license_type_id} licenses of {name}",
                state.coverage.contract_id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_license::model::{
        entity::{Cluster, LicenseType, LicenseUsage, VirtualMachine},
        vo::{Edition, Metric, Technology},
    };
    use uuid::Uuid;

    fn usage(hostname: &str, license_type_id: &str, used: f64) -> LicenseUsage {
        LicenseUsage {
            technology: Technology::Oracle,
            hostname: hostname.to_string(),
            db_name: "ERCOLE".to_string(),
            edition: Edition::Enterprise,
            license_type_id: license_type_id.to_string(),
            description: String::new(),
            metric: Metric::ProcessorPerpetual,
            used_licenses: used,
            cluster_name: String::new(),
            cluster_type: ClusterType::None,
            cluster_licenses: 0.0,
            ignored: false,
            ignored_comment: String::new(),
            olvm_capped: false,
        }
    }

    fn contract(license_type_id: &str, quantity: f64, hostnames: &[&str]) -> Contract {
        Contract {
            id: Uuid::new_v4(),
            contract_id: format!("C-{quantity}"),
            license_type_id: license_type_id.to_string(),
            scope: ContractScope::Host,
            hostnames: hostnames.iter().map(|el| el.to_string()).collect(),
            cluster_names: vec![],
            quantity,
            basket: false,
            restricted: false,
        }
    }

    fn license_type(id: &str, metric: Metric) -> LicenseType {
        LicenseType {
            id: id.to_string(),
            description: String::new(),
            metric,
            cost: None,
            edition: Edition::Enterprise,
        }
    }

    fn collection(usages: Vec<LicenseUsage>, clusters: Vec<Cluster>) -> UsageCollection {
        UsageCollection {
            technology: Technology::Oracle,
            fleet: Fleet::new(vec![], clusters),
            license_types: vec![
                license_type("PROC", Metric::ProcessorPerpetual),
                license_type("NUP", Metric::NamedUserPlusPerpetual),
            ],
            usages,
        }
    }

    fn service() -> ContractAssignmentServiceImpl {
        ContractAssignmentServiceImpl::builder().build()
    }

    #[test]
    fn test_largest_host_first() {
        let collection = collection(vec![usage("h1", "PROC", 2.0), usage("h2", "PROC", 6.0)], vec![]);
        let result = service().assign(&collection, &[contract("PROC", 5.0, &["h1", "h2"])]);

        let hosts = &result[0].hosts;
        assert_eq!(hosts[0].hostname, "h1");
        assert_eq!(hosts[0].covered_licenses_count, 0.0);
        assert_eq!(hosts[0].consumed_licenses_count, 2.0);
        assert_eq!(hosts[1].covered_licenses_count, 5.0);
        assert_eq!(hosts[1].total_covered_licenses_count, 5.0);
        assert_eq!(result[0].covered_licenses, 5.0);
        assert_eq!(result[0].available_licenses, 0.0);
    }

    #[test]
    fn test_named_user_covered_in_multiples_of_factor() {
        let collection = collection(vec![usage("h1", "NUP", 75.0)], vec![]);
        let result = service().assign(&collection, &[contract("NUP", 60.0, &["h1"])]);

        assert_eq!(result[0].hosts[0].covered_licenses_count, 50.0);
        assert_eq!(result[0].available_licenses, 10.0);
    }

    #[test]
    fn test_named_user_request_below_available_is_floored() {
        let collection = collection(vec![usage("h1", "NUP", 30.0)], vec![]);
        let result = service().assign(&collection, &[contract("NUP", 60.0, &["h1"])]);

        let covered = result[0].hosts[0].covered_licenses_count;
        assert_eq!(covered % 25.0, 0.0);
        assert_eq!(covered, 25.0);
        assert_eq!(result[0].hosts[0].total_covered_licenses_count, 25.0);
        assert_eq!(result[0].available_licenses, 35.0);
    }

    #[test]
    fn test_cluster_covered_once_per_license_type() {
        let cluster = Cluster {
            name: "vmware".to_string(),
            cpu: 16,
            cluster_type: ClusterType::Hypervisor,
            vms: ["vm1", "vm2"]
                .iter()
                .map(|el| VirtualMachine {
                    hostname: el.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        let clustered = |hostname: &str| LicenseUsage {
            cluster_name: "vmware".to_string(),
            cluster_type: ClusterType::Hypervisor,
            cluster_licenses: 8.0,
            ..usage(hostname, "PROC", 1.0)
        };
        let collection = collection(vec![clustered("vm1"), clustered("vm2")], vec![cluster]);
        let result = service().assign(
            &collection,
            &[contract("PROC", 20.0, &["vm1", "vm2"]), contract("PROC", 10.0, &["vm1"])],
        );

        assert_eq!(result[0].covered_licenses, 8.0);
        assert_eq!(result[0].available_licenses, 12.0);
        assert_eq!(result[1].covered_licenses, 0.0);
    }

    #[test]
    fn test_restricted_contract_skips_cluster() {
        let cluster = Cluster {
            name: "vmware".to_string(),
            cpu: 16,
            cluster_type: ClusterType::Hypervisor,
            vms: vec![VirtualMachine {
                hostname: "vm1".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let row = LicenseUsage {
            cluster_name: "vmware".to_string(),
            cluster_type: ClusterType::Hypervisor,
            cluster_licenses: 8.0,
            ..usage("vm1", "PROC", 1.0)
        };
        let mut restricted = contract("PROC", 20.0, &["vm1"]);
        restricted.restricted = true;
        let result = service().assign(&collection(vec![row], vec![cluster]), &[restricted]);

        assert_eq!(result[0].covered_licenses, 0.0);
    }

    #[test]
    fn test_basket_covers_leftovers() {
        let collection = collection(vec![usage("h1", "PROC", 4.0), usage("h2", "PROC", 3.0)], vec![]);
        let mut basket = contract("PROC", 10.0, &[]);
        basket.basket = true;
        let result = service().assign(&collection, &[basket, contract("PROC", 2.0, &["h1"])]);

        // Non basket contracts are processed first.
        assert!(!result[0].basket);
        assert_eq!(result[0].hosts[0].covered_licenses_count, 2.0);
        assert_eq!(result[0].hosts[0].total_covered_licenses_count, 4.0);
        assert_eq!(result[1].covered_licenses, 5.0);
        assert_eq!(result[1].available_licenses, 5.0);
    }

    #[test]
    fn test_unlimited_covers_everything() {
        let collection = collection(vec![usage("h1", "PROC", 40.0)], vec![]);
        let mut unlimited = contract("PROC", 0.0, &["h1"]);
        unlimited.scope = ContractScope::Unlimited;
        let result = service().assign(&collection, &[unlimited]);

        assert_eq!(result[0].hosts[0].covered_licenses_count, 40.0);
        assert_eq!(result[0].available_licenses, 0.0);
    }
}
