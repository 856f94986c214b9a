use std::sync::Arc;

use domain_license::{
    mock::{MockContractRepo, MockInventoryRepo},
    model::{
        entity::{
            Cluster, Contract, DatabaseInstance, HostInventory, LicenseLineItem, LicenseType,
            VirtualMachine,
        },
        vo::{ClusterType, ContractScope, Edition, GlobalFilter, LicensingSettings, Metric, Technology},
    },
    service::ComplianceService,
};
use service_license::{
    ClusterAttributionServiceImpl, ComplianceAggregatorImpl, ComplianceServiceImpl,
    ContractAssignmentServiceImpl, ContractCoverageServiceImpl, DependencyExclusionServiceImpl,
    LicenseUsageCollectorImpl, UsageViewServiceImpl,
};
use uuid::Uuid;

fn host(hostname: &str, cores: i64, licenses: &[(&str, f64)]) -> HostInventory {
    HostInventory {
        hostname: hostname.to_string(),
        location: "Italy".to_string(),
        environment: "PROD".to_string(),
        cpu_cores: cores,
        databases: vec![DatabaseInstance {
            name: format!("{hostname}-db"),
            technology: Technology::Oracle,
            edition: Edition::Enterprise,
            licenses: licenses
                .iter()
                .map(|(id, count)| LicenseLineItem {
                    license_type_id: id.to_string(),
                    count: *count,
                    ..Default::default()
                })
                .collect(),
        }],
        ..Default::default()
    }
}

fn license_type(id: &str, metric: Metric, cost: Option<f64>) -> LicenseType {
    LicenseType {
        id: id.to_string(),
        description: format!("{id} description"),
        metric,
        cost,
        edition: Edition::Enterprise,
    }
}

fn contract(license_type_id: &str, scope: ContractScope, quantity: f64, hostnames: &[&str]) -> Contract {
    Contract {
        id: Uuid::new_v4(),
        contract_id: format!("{license_type_id}-{quantity}"),
        license_type_id: license_type_id.to_string(),
        scope,
        hostnames: hostnames.iter().map(|el| el.to_string()).collect(),
        cluster_names: vec![],
        quantity,
        basket: false,
        restricted: false,
    }
}

fn compliance_service(
    hosts: Vec<HostInventory>,
    clusters: Vec<Cluster>,
    license_types: Vec<LicenseType>,
    contracts: Vec<Contract>,
) -> ComplianceServiceImpl {
    let known = hosts.iter().map(|el| el.hostname.to_owned()).collect::<Vec<_>>();
    let mut inventory_repo = MockInventoryRepo::new();
    inventory_repo
        .expect_get_host_inventories()
        .returning(move |_| Ok(hosts.clone()));
    inventory_repo
        .expect_get_clusters()
        .returning(move |_| Ok(clusters.clone()));
    inventory_repo
        .expect_host_exists()
        .returning(move |hostname| Ok(known.iter().any(|el| el == hostname)));
    let mut contract_repo = MockContractRepo::new();
    contract_repo
        .expect_list_license_types()
        .returning(move |_| Ok(license_types.clone()));
    contract_repo
        .expect_list_contracts()
        .returning(move |_, _| Ok(contracts.clone()));

    let inventory_repo = Arc::new(inventory_repo);
    let contract_repo = Arc::new(contract_repo);
    let settings = Arc::new(LicensingSettings::default());
    ComplianceServiceImpl::builder()
        .inventory_repo(inventory_repo.clone())
        .contract_repo(contract_repo.clone())
        .collector(Arc::new(
            LicenseUsageCollectorImpl::builder()
                .inventory_repo(inventory_repo)
                .contract_repo(contract_repo)
                .settings(settings.clone())
                .build(),
        ))
        .attribution_service(Arc::new(
            ClusterAttributionServiceImpl::builder()
                .settings(settings.clone())
                .build(),
        ))
        .exclusion_service(Arc::new(
            DependencyExclusionServiceImpl::builder()
                .settings(settings.clone())
                .build(),
        ))
        .coverage_service(Arc::new(ContractCoverageServiceImpl::default()))
        .assignment_service(Arc::new(
            ContractAssignmentServiceImpl::builder().settings(settings).build(),
        ))
        .aggregator(Arc::new(ComplianceAggregatorImpl::default()))
        .usage_view_service(Arc::new(UsageViewServiceImpl::default()))
        .build()
}

#[tokio::test]
async fn test_veritas_cluster_with_missing_peers() {
    let mut h1 = host("H1", 42, &[("A90649", 2.0)]);
    h1.veritas_cluster_server = true;
    h1.veritas_cluster_hostnames = ["H1", "H2", "H3", "H4"].iter().map(|el| el.to_string()).collect();
    let service = compliance_service(
        vec![h1],
        vec![],
        vec![license_type("A90649", Metric::NamedUserPlusPerpetual, None)],
        vec![contract("A90649", ContractScope::Host, 1050.0, &["H1"])],
    );
    let filter = GlobalFilter::default();

    let usages = service.license_usages(Technology::Oracle, &filter).await.unwrap();
    assert_eq!(usages.len(), 1);
    assert_eq!(usages[0].used_licenses, 50.0);
    assert_eq!(usages[0].cluster_licenses, 2100.0);
    assert_eq!(usages[0].cluster_type, ClusterType::VeritasCluster);

    let compliance = service.license_compliance(Technology::Oracle, &filter).await.unwrap();
    assert_eq!(compliance[0].consumed, 2100.0);
    assert_eq!(compliance[0].covered, 1050.0);
    assert_eq!(compliance[0].compliance, 0.5);

    let veritas = service
        .usages_by_veritas_cluster(Technology::Oracle, &filter)
        .await
        .unwrap();
    assert_eq!(veritas[0].id, "H1,H2,H3,H4");
    assert_eq!(veritas[0].count, 2100.0);
}

#[tokio::test]
async fn test_hypervisor_cluster_billed_once() {
    let cluster = Cluster {
        name: "vmware".to_string(),
        hostname: "vcenter".to_string(),
        cpu: 16,
        sockets: 0,
        cluster_type: ClusterType::Hypervisor,
        vms: ["H1", "H2"]
            .iter()
            .map(|el| VirtualMachine {
                hostname: el.to_string(),
                capped_cpu: false,
                is_ercole_installed: true,
            })
            .collect(),
    };
    let service = compliance_service(
        vec![host("H1", 4, &[("A90611", 2.0)]), host("H2", 4, &[("A90611", 2.0)])],
        vec![cluster],
        vec![license_type("A90611", Metric::ProcessorPerpetual, Some(47500.0))],
        vec![contract("A90611", ContractScope::Host, 6.0, &["H1", "UNKNOWN"])],
    );
    let filter = GlobalFilter::default();

    let compliance = service.license_compliance(Technology::Oracle, &filter).await.unwrap();
    assert_eq!(compliance[0].consumed, 8.0);
    assert_eq!(compliance[0].purchased, 6.0);
    assert_eq!(compliance[0].covered, 6.0);
    assert_eq!(compliance[0].compliance, 0.75);

    let by_cluster = service.usages_by_cluster(Technology::Oracle, &filter).await.unwrap();
    assert_eq!(by_cluster[0].hostnames, vec!["H1", "H2"]);
    assert_eq!(by_cluster[0].used_licenses, 8.0);

    let coverage = service.contract_coverage(Technology::Oracle, &filter).await.unwrap();
    assert_eq!(coverage[0].hosts.len(), 1);
    assert_eq!(coverage[0].covered_licenses, 6.0);
}

#[tokio::test]
async fn test_exclusion_and_stats() {
    let peers = ["A", "B"].iter().map(|el| el.to_string()).collect::<Vec<_>>();
    let mut a = host("A", 4, &[("A90611", 2.0), ("A90612", 2.0)]);
    a.veritas_cluster_server = true;
    a.veritas_cluster_hostnames = peers.clone();
    let mut b = host("B", 4, &[("A90611", 2.0), ("A10532", 2.0)]);
    b.veritas_cluster_server = true;
    b.veritas_cluster_hostnames = peers;
    let d = host("D", 4, &[("A10532", 2.0)]);
    let service = compliance_service(
        vec![a, b, d],
        vec![],
        vec![
            license_type("A90611", Metric::ProcessorPerpetual, None),
            license_type("A90612", Metric::ProcessorPerpetual, Some(0.0)),
            license_type("A10532", Metric::ProcessorPerpetual, None),
        ],
        vec![contract("A90611", ContractScope::Unlimited, 0.0, &[])],
    );
    let filter = GlobalFilter::default();

    let usages = service.license_usages(Technology::Oracle, &filter).await.unwrap();
    assert!(!usages
        .iter()
        .any(|el| el.hostname == "B" && el.license_type_id == "A10532"));
    assert!(usages
        .iter()
        .any(|el| el.hostname == "D" && el.license_type_id == "A10532"));

    let stats = service
        .compliance_stats(&[Technology::Oracle, Technology::MySql], &filter)
        .await
        .unwrap();
    // A90611 unlimited, A90612 free, A10532 uncovered on D.
    let oracle = &stats.technologies[0];
    assert_eq!(oracle.count, 3);
    assert_eq!(oracle.host_count, 3);
    assert!((oracle.compliance_percentage_val - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(oracle.compliance_percentage_str, "66.67%");
    assert_eq!(stats.technologies[1].compliance_percentage_val, 100.0);
    assert!((stats.total.compliance_percentage_val - 250.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_active_data_guard_kept_without_golden_gate() {
    let service = compliance_service(
        vec![
            host("erp1", 8, &[("A90611", 4.0), ("A10532", 4.0)]),
            host("erp2", 8, &[("A90611", 4.0), ("A10532", 4.0)]),
        ],
        vec![],
        vec![
            license_type("A90611", Metric::ProcessorPerpetual, Some(47500.0)),
            license_type("A10532", Metric::ProcessorPerpetual, Some(11500.0)),
        ],
        vec![contract("A10532", ContractScope::Unlimited, 0.0, &[])],
    );
    let filter = GlobalFilter::default();

    let usages = service.license_usages(Technology::Oracle, &filter).await.unwrap();
    assert_eq!(
        usages.iter().filter(|el| el.license_type_id == "A10532").count(),
        2
    );

    let compliance = service.license_compliance(Technology::Oracle, &filter).await.unwrap();
    let active_data_guard = compliance
        .iter()
        .find(|el| el.license_type_id == "A10532")
        .unwrap();
    assert_eq!(active_data_guard.consumed, 8.0);
    assert_eq!(active_data_guard.covered, 8.0);
}

#[tokio::test]
async fn test_repository_failure_aborts() {
    let mut inventory_repo = MockInventoryRepo::new();
    inventory_repo
        .expect_get_host_inventories()
        .returning(|_| Err(anyhow::anyhow!("inventory unavailable")));
    let mut contract_repo = MockContractRepo::new();
    contract_repo.expect_list_contracts().returning(|_, _| Ok(vec![]));
    let inventory_repo = Arc::new(inventory_repo);
    let contract_repo = Arc::new(contract_repo);
    let service = ComplianceServiceImpl::builder()
        .inventory_repo(inventory_repo.clone())
        .contract_repo(contract_repo.clone())
        .collector(Arc::new(
            LicenseUsageCollectorImpl::builder()
                .inventory_repo(inventory_repo)
                .contract_repo(contract_repo)
                .build(),
        ))
        .attribution_service(Arc::new(ClusterAttributionServiceImpl::builder().build()))
        .exclusion_service(Arc::new(DependencyExclusionServiceImpl::builder().build()))
        .coverage_service(Arc::new(ContractCoverageServiceImpl::default()))
        .assignment_service(Arc::new(ContractAssignmentServiceImpl::builder().build()))
        .aggregator(Arc::new(ComplianceAggregatorImpl::default()))
        .usage_view_service(Arc::new(UsageViewServiceImpl::default()))
        .build();

    let err = service
        .license_compliance(Technology::Oracle, &GlobalFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "inventory unavailable");
}
