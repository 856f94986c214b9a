mod contract;
mod inventory;

use std::{collections::HashMap, path::Path};

use anyhow::Context;
use domain_license::model::{
    entity::{Cluster, Contract, HostInventory, LicenseType},
    vo::{GlobalFilter, Technology},
};
use serde::de::DeserializeOwned;

/// Read-only repository over a directory of JSON exports:
///
/// ```text
/// hosts.json                 every host snapshot, several per host allowed
/// clusters.json              hypervisor clusters
/// contracts/<tech>.json      contracts of a technology
/// license_types/<tech>.json  license-type catalog of a technology
/// ```
///
/// Missing files read as empty collections.
pub struct JsonSnapshotRepo {
    hosts: Vec<HostInventory>,
    clusters: Vec<Cluster>,
    contracts: HashMap<Technology, Vec<Contract>>,
    license_types: HashMap<Technology, Vec<LicenseType>>,
}

impl JsonSnapshotRepo {
    pub async fn new(snapshot_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = snapshot_dir.as_ref();
        let hosts: Vec<HostInventory> = read_json(&dir.join("hosts.json")).await?;
        let clusters: Vec<Cluster> = read_json(&dir.join("clusters.json")).await?;
        let mut contracts = HashMap::new();
        let mut license_types = HashMap::new();
        for technology in Technology::ALL {
            let file_name = format!("{technology}.json");
            contracts.insert(
                technology,
                read_json(&dir.join("contracts").join(&file_name)).await?,
            );
            license_types.insert(
                technology,
                read_json(&dir.join("license_types").join(&file_name)).await?,
            );
        }
        tracing::info!(
            "Loaded {} host snapshots and {} clusters from {}",
            hosts.len(),
            clusters.len(),
            dir.display()
        );
        Ok(Self {
            hosts,
            clusters,
            contracts,
            license_types,
        })
    }

    /// Latest snapshot of every host taken no later than `as_of`, sorted by hostname.
    fn latest_hosts(&self, as_of: Option<chrono::DateTime<chrono::Utc>>) -> Vec<&HostInventory> {
        let mut latest = HashMap::<&str, &HostInventory>::new();
        for host in self
            .hosts
            .iter()
            .filter(|el| as_of.map_or(true, |as_of| el.updated_at <= as_of))
        {
            latest
                .entry(host.hostname.as_str())
                .and_modify(|el| {
                    if host.updated_at > el.updated_at {
                        *el = host;
                    }
                })
                .or_insert(host);
        }
        let mut hosts = latest.into_values().collect::<Vec<_>>();
        hosts.sort_by(|a, b| a.hostname.cmp(&b.hostname));
        hosts
    }

    /// Whether `hostname` is in scope of `filter`. Unknown hosts are only in scope
    /// of filters that restrict neither location nor environment.
    fn in_scope(&self, hostname: &str, filter: &GlobalFilter) -> bool {
        if filter.location.is_none() && filter.environment.is_none() {
            return true;
        }
        self.latest_hosts(filter.older_than)
            .into_iter()
            .find(|el| el.hostname == hostname)
            .map_or(false, |el| filter.matches(&el.location, &el.environment))
    }
}

async fn read_json<T: DeserializeOwned + Default>(path: &Path) -> anyhow::Result<T> {
    if !path.is_file() {
        tracing::debug!("{} not found, reading as empty", path.display());
        return Ok(T::default());
    }
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_slice(&content).with_context(|| format!("Cannot parse {}", path.display()))
}
