use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::Arc,
};

use domain_license::{
    model::{
        entity::LicenseUsage,
        vo::{DependencyRule, Fleet, LicensingSettings},
    },
    service::DependencyExclusionService,
};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct DependencyExclusionServiceImpl {
    #[builder(default)]
    settings: Arc<LicensingSettings>,
}

impl DependencyExclusionService for DependencyExclusionServiceImpl {
    fn exclude(&self, fleet: &Fleet, mut usages: Vec<LicenseUsage>) -> Vec<LicenseUsage> {
        let graph = HostGraph::new(fleet);
        for rule in self.settings.dependency_rules.iter() {
            let reached = graph.reachable(seeds(rule, &usages));
            let before = usages.len();
            usages.retain(|el| {
                !(reached.contains(el.hostname.as_str()) && rule.remove.contains(&el.license_type_id))
            });
            if usages.len() != before {
                tracing::debug!("Rule '{}' removed {} usages", rule.name, before - usages.len());
            }
        }
        usages
    }
}

fn seeds(rule: &DependencyRule, usages: &[LicenseUsage]) -> Vec<String> {
    usages
        .iter()
        .filter(|el| rule.given.contains(&el.license_type_id))
        .map(|el| el.hostname.to_owned())
        .collect()
}

/// Hosts linked by a shared hypervisor cluster or a Veritas peering.
struct HostGraph<'a> {
    edges: HashMap<&'a str, HashSet<&'a str>>,
}

impl<'a> HostGraph<'a> {
    fn new(fleet: &'a Fleet) -> Self {
        let mut graph = Self {
            edges: HashMap::new(),
        };
        for cluster in fleet.clusters().iter().filter(|el| el.is_hypervisor()) {
            let members = cluster.hostnames().collect::<Vec<_>>();
            for (i, a) in members.iter().copied().enumerate() {
                for b in members[i + 1..].iter().copied() {
                    graph.link(a, b);
                }
            }
        }
        for host in fleet.hosts().filter(|el| el.veritas_cluster_server) {
            for peer in host.veritas_cluster_hostnames.iter() {
                graph.link(&host.hostname, peer);
            }
        }
        graph
    }

    fn link(&mut self, a: &'a str, b: &'a str) {
        if a == b {
            return;
        }
        self.edges.entry(a).or_default().insert(b);
        self.edges.entry(b).or_default().insert(a);
    }

    fn reachable(&self, seeds: Vec<String>) -> HashSet<String> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from(seeds);
        while let Some(hostname) = queue.pop_front() {
            if visited.contains(&hostname) {
                continue;
            }
            if let Some(next) = self.edges.get(hostname.as_str()) {
                queue.extend(
                    next.iter()
                        .filter(|el| !visited.contains(**el))
                        .map(|el| el.to_string()),
                );
            }
            visited.insert(hostname);
        }
        visited
    }
}
