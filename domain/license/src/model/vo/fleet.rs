use std::collections::HashMap;

use crate::model::entity::{Cluster, HostInventory, LicenseType, LicenseUsage};

use super::Technology;

/// Hosts and clusters in scope of one computation, indexed by hostname.
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    hosts: HashMap<String, HostInventory>,
    clusters: Vec<Cluster>,
    cluster_by_host: HashMap<String, usize>,
}

impl Fleet {
    pub fn new(hosts: Vec<HostInventory>, clusters: Vec<Cluster>) -> Self {
        let mut cluster_by_host = HashMap::new();
        for (i, cluster) in clusters.iter().enumerate() {
            for hostname in cluster.hostnames() {
                // First cluster listing a VM owns it.
                cluster_by_host.entry(hostname.to_owned()).or_insert(i);
            }
        }
        let hosts = hosts.into_iter().map(|el| (el.hostname.to_owned(), el)).collect();
        Self {
            hosts,
            clusters,
            cluster_by_host,
        }
    }

    pub fn host(&self, hostname: &str) -> Option<&HostInventory> {
        self.hosts.get(hostname)
    }

    pub fn hosts(&self) -> impl Iterator<Item = &HostInventory> {
        self.hosts.values()
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster_of(&self, hostname: &str) -> Option<&Cluster> {
        self.cluster_by_host.get(hostname).map(|i| &self.clusters[*i])
    }

    pub fn cluster_named(&self, name: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|el| el.name == name)
    }

    /// Database instances of `technology` and the number of hosts running them.
    pub fn instance_and_host_count(&self, technology: Technology) -> (usize, usize) {
        self.hosts.values().fold((0, 0), |(instances, hosts), host| {
            let count = host.databases_of(technology).count();
            (instances + count, hosts + usize::from(count > 0))
        })
    }
}

/// Output of the collection stage, shared by every later stage.
#[derive(Clone, Debug)]
pub struct UsageCollection {
    pub technology: Technology,
    pub fleet: Fleet,
    pub license_types: Vec<LicenseType>,
    pub usages: Vec<LicenseUsage>,
}

impl UsageCollection {
    pub fn license_type(&self, id: &str) -> Option<&LicenseType> {
        self.license_types.iter().find(|el| el.id == id)
    }
}
