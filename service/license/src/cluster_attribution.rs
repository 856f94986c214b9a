use std::{collections::HashSet, sync::Arc};

use domain_license::{
    exception::LicenseException,
    model::{
        entity::{Cluster, HostInventory, LicenseUsage},
        vo::{ClusterType, Edition, Fleet, LicensingSettings},
    },
    service::ClusterAttributionService,
};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct ClusterAttributionServiceImpl {
    #[builder(default)]
    settings: Arc<LicensingSettings>,
}

impl ClusterAttributionService for ClusterAttributionServiceImpl {
    fn attribute(&self, fleet: &Fleet, mut usages: Vec<LicenseUsage>) -> Vec<LicenseUsage> {
        let installed = usages
            .iter()
            .map(|el| (el.hostname.to_owned(), el.license_type_id.to_owned()))
            .collect::<HashSet<_>>();

        for usage in usages.iter_mut() {
            usage.clear_cluster();
            usage.olvm_capped = false;
            let factor = self.settings.metric_factor(usage.technology, usage.metric);

            if let Some(cluster) = fleet.cluster_of(&usage.hostname).filter(|el| el.is_hypervisor()) {
                if capped_override(cluster, &usage.license_type_id, &installed) {
                    usage.olvm_capped = true;
                    continue;
                }
                usage.cluster_name = cluster.name.to_owned();
                usage.cluster_type = ClusterType::Hypervisor;
                usage.cluster_licenses = self.hypervisor_quantity(cluster, usage.edition) * factor;
                continue;
            }

            match fleet.host(&usage.hostname) {
                Some(host) if host.veritas_cluster_server => {
                    self.attribute_veritas(fleet, host, usage, factor)
                }
                Some(_) => {}
                None => {
                    let e = LicenseException::HostNotFound {
                        hostname: usage.hostname.to_owned(),
                    };
                    tracing::warn!("Usage of {} stays on its host: {e}", usage.license_type_id);
                }
            }
        }
        usages
    }
}

impl ClusterAttributionServiceImpl {
    fn hypervisor_quantity(&self, cluster: &Cluster, edition: Edition) -> f64 {
        if edition == Edition::Standard && cluster.sockets > 0 {
            cluster.sockets as f64
        } else {
            cluster.cpu as f64 * self.settings.core_factor
        }
    }

    fn attribute_veritas(
        &self,
        fleet: &Fleet,
        host: &HostInventory,
        usage: &mut LicenseUsage,
        factor: f64,
    ) {
        let mut peers = host.veritas_cluster_hostnames.iter().map(String::as_str).collect::<Vec<_>>();
        peers.sort_unstable();
        peers.dedup();
        if peers.is_empty() {
            tracing::warn!(
                "Host {} runs Veritas cluster server without peers, billing it alone",
                host.hostname
            );
            return;
        }

        let quantity = if self.settings.is_veritas_per_node(&usage.license_type_id) {
            // One license per inventoried node.
            peers.iter().filter(|peer| fleet.host(peer).is_some()).count() as f64
        } else {
            let cores = peers
                .iter()
                .map(|peer| match fleet.host(peer) {
                    Some(el) => el.cpu_cores,
                    None => {
                        let e = LicenseException::HostNotFound {
                            hostname: peer.to_string(),
                        };
                        tracing::warn!("Counting cores of {} for Veritas peer: {e}", host.hostname);
                        host.cpu_cores
                    }
                })
                .sum::<i64>();
            cores as f64 * self.settings.core_factor
        };

        usage.cluster_name = peers.join(",");
        usage.cluster_type = ClusterType::VeritasCluster;
        usage.cluster_licenses = quantity * factor;
    }
}

/// Every inventoried VM is capped, and the license runs on capped VMs only.
fn capped_override(
    cluster: &Cluster,
    license_type_id: &str,
    installed: &HashSet<(String, String)>,
) -> bool {
    if cluster.inventoried_vms().next().is_none()
        || cluster.inventoried_vms().any(|el| !el.capped_cpu)
    {
        return false;
    }
    let mut on_capped = false;
    for vm in cluster.vms.iter() {
        if !installed.contains(&(vm.hostname.to_owned(), license_type_id.to_owned())) {
            continue;
        }
        if !vm.capped_cpu {
            return false;
        }
        on_capped = true;
    }
    on_capped
}
