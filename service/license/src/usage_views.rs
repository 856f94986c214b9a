use std::collections::BTreeMap;

use domain_license::{
    model::{
        entity::LicenseUsage,
        vo::{ClusterType, LicenseUsageByCluster, LicenseUsageByHost, LicenseUsageByVeritasCluster},
    },
    service::UsageViewService,
};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder, Default)]
pub struct UsageViewServiceImpl {}

fn push_sorted(names: &mut Vec<String>, name: &str) {
    if let Err(i) = names.binary_search_by(|el| el.as_str().cmp(name)) {
        names.insert(i, name.to_owned());
    }
}

impl UsageViewService for UsageViewServiceImpl {
    fn by_host(&self, usages: &[LicenseUsage]) -> Vec<LicenseUsageByHost> {
        let mut views = BTreeMap::<(&str, &str), LicenseUsageByHost>::new();
        for usage in usages.iter() {
            let view = views
                .entry((usage.hostname.as_str(), usage.license_type_id.as_str()))
                .or_insert_with(|| LicenseUsageByHost {
                    hostname: usage.hostname.to_owned(),
                    database_names: vec![],
                    license_type_id: usage.license_type_id.to_owned(),
                    description: usage.description.to_owned(),
                    metric: usage.metric,
                    used_licenses: 0.0,
                    cluster_licenses: 0.0,
                    olvm_capped: false,
                });
            push_sorted(&mut view.database_names, &usage.db_name);
            view.used_licenses = view.used_licenses.max(usage.used_licenses);
            view.cluster_licenses = view.cluster_licenses.max(usage.cluster_licenses);
            view.olvm_capped |= usage.olvm_capped;
        }
        views.into_values().collect()
    }

    fn by_cluster(&self, usages: &[LicenseUsage]) -> Vec<LicenseUsageByCluster> {
        let mut views = BTreeMap::<(&str, &str), LicenseUsageByCluster>::new();
        for usage in usages.iter().filter(|el| el.cluster_type == ClusterType::Hypervisor) {
            let view = views
                .entry((usage.cluster_name.as_str(), usage.license_type_id.as_str()))
                .or_insert_with(|| LicenseUsageByCluster {
                    cluster: usage.cluster_name.to_owned(),
                    hostnames: vec![],
                    license_type_id: usage.license_type_id.to_owned(),
                    description: usage.description.to_owned(),
                    metric: usage.metric,
                    used_licenses: 0.0,
                });
            push_sorted(&mut view.hostnames, &usage.hostname);
            view.used_licenses = view.used_licenses.max(usage.cluster_licenses);
        }
        views.into_values().collect()
    }

    fn by_veritas_cluster(&self, usages: &[LicenseUsage]) -> Vec<LicenseUsageByVeritasCluster> {
        let mut views = BTreeMap::<(&str, &str), LicenseUsageByVeritasCluster>::new();
        for usage in usages.iter().filter(|el| el.cluster_type == ClusterType::VeritasCluster) {
            let view = views
                .entry((usage.cluster_name.as_str(), usage.license_type_id.as_str()))
                .or_insert_with(|| LicenseUsageByVeritasCluster {
                    id: usage.cluster_name.to_owned(),
                    hostnames: usage.cluster_name.split(',').map(str::to_owned).collect(),
                    license_type_id: usage.license_type_id.to_owned(),
                    description: usage.description.to_owned(),
                    metric: usage.metric,
                    count: 0.0,
                });
            view.count = view.count.max(usage.cluster_licenses);
        }
        views.into_values().collect()
    }
}
