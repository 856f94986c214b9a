use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use domain_license::{
    exception::LicenseException,
    model::{
        entity::{LicenseType, LicenseUsage},
        vo::{ClusterType, Fleet, GlobalFilter, LicensingSettings, Technology, UsageCollection},
    },
    repository::{ContractRepo, InventoryRepo},
    service::LicenseUsageCollector,
};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct LicenseUsageCollectorImpl {
    inventory_repo: Arc<dyn InventoryRepo>,
    contract_repo: Arc<dyn ContractRepo>,
    #[builder(default)]
    settings: Arc<LicensingSettings>,
}

#[async_trait]
impl LicenseUsageCollector for LicenseUsageCollectorImpl {
    async fn collect(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<UsageCollection> {
        let hosts = self
            .inventory_repo
            .get_host_inventories(filter.older_than)
            .await?
            .into_iter()
            .filter(|el| filter.matches(&el.location, &el.environment))
            .collect::<Vec<_>>();
        let clusters = self.inventory_repo.get_clusters(filter).await?;
        let license_types = self.contract_repo.list_license_types(technology).await?;

        let catalog = license_types
            .iter()
            .map(|el| (el.id.as_str(), el))
            .collect::<HashMap<&str, &LicenseType>>();

        let mut usages = vec![];
        for host in hosts.iter() {
            for database in host.databases_of(technology) {
                for item in database.licenses.iter().filter(|el| el.count > 0.0) {
                    let Some(license_type) = catalog.get(item.license_type_id.as_str()) else {
                        let e = LicenseException::LicenseTypeNotFound {
                            license_type_id: item.license_type_id.to_owned(),
                        };
                        tracing::warn!("Skipping license of {}/{}: {e}", host.hostname, database.name);
                        continue;
                    };
                    if !license_type.metric.is_known() {
                        let e = LicenseException::UnknownMetric {
                            license_type_id: license_type.id.to_owned(),
                        };
                        tracing::error!("Skipping license of {}/{}: {e}", host.hostname, database.name);
                        continue;
                    }
                    let factor = self.settings.metric_factor(technology, license_type.metric);
                    usages.push(LicenseUsage {
                        technology,
                        hostname: host.hostname.to_owned(),
                        db_name: database.name.to_owned(),
                        edition: database.edition,
                        license_type_id: license_type.id.to_owned(),
                        description: license_type.description.to_owned(),
                        metric: license_type.metric,
                        used_licenses: item.count * factor,
                        cluster_name: String::new(),
                        cluster_type: ClusterType::None,
                        cluster_licenses: 0.0,
                        ignored: item.ignored,
                        ignored_comment: item.ignored_comment.to_owned(),
                        olvm_capped: false,
                    });
                }
            }
        }
        tracing::debug!(
            "Collected {} {technology} license usages from {} hosts",
            usages.len(),
            hosts.len()
        );

        Ok(UsageCollection {
            technology,
            fleet: Fleet::new(hosts, clusters),
            license_types,
            usages,
        })
    }
}
