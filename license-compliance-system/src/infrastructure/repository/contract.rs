use domain_license::{
    model::{
        entity::{Contract, LicenseType},
        vo::{GlobalFilter, Technology},
    },
    repository::ContractRepo,
};

use super::JsonSnapshotRepo;

#[async_trait::async_trait]
impl ContractRepo for JsonSnapshotRepo {
    /// Contracts of `technology`. With a location or environment filter, host-bound
    /// contracts are kept only when one of their hosts is in scope.
    async fn list_contracts(
        &self,
        technology: Technology,
        filter: &GlobalFilter,
    ) -> anyhow::Result<Vec<Contract>> {
        Ok(self
            .contracts
            .get(&technology)
            .into_iter()
            .flatten()
            .filter(|el| {
                el.hostnames.is_empty()
                    || el.hostnames.iter().any(|hostname| self.in_scope(hostname, filter))
            })
            .cloned()
            .collect())
    }

    async fn list_license_types(&self, technology: Technology) -> anyhow::Result<Vec<LicenseType>> {
        Ok(self
            .license_types
            .get(&technology)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::write;
    use super::*;
    use domain_license::model::vo::{ContractScope, Metric};
    use indoc::indoc;

    #[tokio::test]
    async fn test_contracts_by_technology_and_scope() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "hosts.json", indoc! {r#"
            [
              {"hostname": "h1", "location": "Italy", "cpuCores": 4},
              {"hostname": "h2", "location": "Germany", "cpuCores": 4}
            ]
        "#});
        write(dir.path(), "contracts/oracle.json", indoc! {r#"
            [
              {"id": "6f1c0c8e-0d7a-4a39-9c53-5d1b1b7f0a01", "licenseTypeId": "A90611",
               "scope": "Host", "hostnames": ["h1"], "quantity": 4},
              {"id": "6f1c0c8e-0d7a-4a39-9c53-5d1b1b7f0a02", "licenseTypeId": "A90611",
               "scope": "Host", "hostnames": ["h2"], "quantity": 2},
              {"id": "6f1c0c8e-0d7a-4a39-9c53-5d1b1b7f0a03", "licenseTypeId": "A90649",
               "scope": "Unlimited"}
            ]
        "#});
        write(dir.path(), "license_types/oracle.json", indoc! {r#"
            [{"id": "A90611", "description": "Enterprise Edition", "metric": "Processor Perpetual", "cost": 47500}]
        "#});
        let repo = JsonSnapshotRepo::new(dir.path()).await.unwrap();

        let all = repo
            .list_contracts(Technology::Oracle, &GlobalFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].scope, ContractScope::Unlimited);

        let filter = GlobalFilter {
            location: Some("Italy".to_string()),
            ..Default::default()
        };
        let italy = repo.list_contracts(Technology::Oracle, &filter).await.unwrap();
        assert_eq!(italy.len(), 2);
        assert_eq!(italy[0].quantity, 4.0);

        assert!(repo
            .list_contracts(Technology::MySql, &filter)
            .await
            .unwrap()
            .is_empty());

        let license_types = repo.list_license_types(Technology::Oracle).await.unwrap();
        assert_eq!(license_types[0].metric, Metric::ProcessorPerpetual);
        assert_eq!(license_types[0].cost, Some(47500.0));
    }
}
