use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use colored::{ColoredString, Colorize};
use domain_license::{
    model::vo::{ComplianceStats, GlobalFilter, Technology},
    service::ComplianceService,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "license-compliance")]
#[command(about = "Database license usage and compliance from inventory snapshots")]
#[command(version)]
pub struct Cli {
    /// Extra yaml configuration files, applied after ./config.yaml
    #[arg(long, short, global = true)]
    pub config: Vec<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Per-database license usage after cluster attribution and exclusions
    Usages(TechnologyArgs),
    /// Usage grouped by host and license type
    ByHost(TechnologyArgs),
    /// Usage grouped by hypervisor cluster and license type
    ByCluster(TechnologyArgs),
    /// Usage grouped by Veritas cluster and license type
    ByVeritasCluster(TechnologyArgs),
    /// Consumed, covered and purchased licenses per license type
    Compliance(TechnologyArgs),
    /// How every contract is spread over its hosts
    Contracts(TechnologyArgs),
    /// Compliance percentage of one technology
    Technology(TechnologyArgs),
    /// Compliance percentage of several technologies and their mean
    Stats {
        /// Technologies to include, every known one when omitted
        #[arg(long = "technology", short)]
        technologies: Vec<Technology>,
        #[command(flatten)]
        filter: FilterArgs,
        /// Print a table instead of JSON
        #[arg(long)]
        summary: bool,
    },
}

#[derive(Args, Debug)]
pub struct TechnologyArgs {
    #[arg(long, short, default_value_t = Technology::Oracle)]
    pub technology: Technology,
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub environment: Option<String>,
    /// Read the inventory as it was at this instant (RFC 3339)
    #[arg(long)]
    pub older_than: Option<DateTime<Utc>>,
}

impl From<FilterArgs> for GlobalFilter {
    fn from(value: FilterArgs) -> Self {
        Self {
            location: value.location,
            environment: value.environment,
            older_than: value.older_than,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Runs `command` and renders its result.
pub async fn execute(command: Commands, service: &dyn ComplianceService) -> anyhow::Result<String> {
    match command {
        Commands::Usages(args) => {
            to_json(&service.license_usages(args.technology, &args.filter.into()).await?)
        }
        Commands::ByHost(args) => {
            to_json(&service.usages_by_host(args.technology, &args.filter.into()).await?)
        }
        Commands::ByCluster(args) => {
            to_json(&service.usages_by_cluster(args.technology, &args.filter.into()).await?)
        }
        Commands::ByVeritasCluster(args) => to_json(
            &service
                .usages_by_veritas_cluster(args.technology, &args.filter.into())
                .await?,
        ),
        Commands::Compliance(args) => {
            to_json(&service.license_compliance(args.technology, &args.filter.into()).await?)
        }
        Commands::Contracts(args) => {
            to_json(&service.contract_coverage(args.technology, &args.filter.into()).await?)
        }
        Commands::Technology(args) => to_json(
            &service
                .technology_compliance(args.technology, &args.filter.into())
                .await?,
        ),
        Commands::Stats {
            technologies,
            filter,
            summary,
        } => {
            let technologies = if technologies.is_empty() {
                Technology::ALL.to_vec()
            } else {
                technologies
            };
            let stats = service.compliance_stats(&technologies, &filter.into()).await?;
            if summary {
                Ok(render_summary(&stats))
            } else {
                to_json(&stats)
            }
        }
    }
}

fn paint(value: f64, text: String) -> ColoredString {
    if value >= 100.0 {
        text.green()
    } else if value >= 80.0 {
        text.yellow()
    } else {
        text.red()
    }
}

fn render_summary(stats: &ComplianceStats) -> String {
    let mut lines = vec![format!(
        "{:<12}{:>10}{:>8}{:>12}",
        "TECHNOLOGY", "INSTANCES", "HOSTS", "COMPLIANCE"
    )
    .bold()
    .to_string()];
    for el in stats.technologies.iter() {
        lines.push(format!(
            "{:<12}{:>10}{:>8}{}",
            el.technology.as_str(),
            el.count,
            el.host_count,
            paint(
                el.compliance_percentage_val,
                format!("{:>12}", el.compliance_percentage_str)
            )
        ));
    }
    let total = &stats.total;
    lines.push(format!(
        "{:<12}{:>10}{:>8}{}",
        "total".bold(),
        total.count,
        total.host_count,
        paint(
            total.compliance_percentage_val,
            format!("{:>12}", total.compliance_percentage_str)
        )
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{config::load_config, repository, ServiceProvider};
    use indoc::{formatdoc, indoc};
    use std::io::Write;

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "license-compliance",
            "compliance",
            "--technology",
            "MySQL",
            "--location",
            "Italy",
            "--older-than",
            "2024-01-01T00:00:00Z",
            "-c",
            "extra.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, vec![PathBuf::from("extra.yaml")]);
        let Commands::Compliance(args) = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(args.technology, Technology::MySql);
        let filter: GlobalFilter = args.filter.into();
        assert_eq!(filter.location.as_deref(), Some("Italy"));
        assert!(filter.older_than.is_some());
    }

    #[test]
    fn test_unknown_technology_is_rejected() {
        assert!(Cli::try_parse_from(["license-compliance", "usages", "-t", "db2"]).is_err());
    }

    async fn service_provider(dir: &tempfile::TempDir) -> ServiceProvider {
        repository::tests::write(dir.path(), "hosts.json", indoc! {r#"
            [
              {"hostname": "h1", "location": "Italy", "environment": "PROD", "cpuCores": 4,
               "databases": [{"name": "ERP", "technology": "oracle", "edition": "Enterprise",
                              "licenses": [{"licenseTypeId": "A90611", "count": 2}]}]},
              {"hostname": "h2", "location": "Italy", "environment": "PROD", "cpuCores": 4,
               "databases": [{"name": "CRM", "technology": "oracle", "edition": "Enterprise",
                              "licenses": [{"licenseTypeId": "A90611", "count": 2}]}]}
            ]
        "#});
        repository::tests::write(dir.path(), "license_types/oracle.json", indoc! {r#"
            [{"id": "A90611", "description": "Oracle Database Enterprise Edition",
              "metric": "Processor Perpetual", "cost": 47500}]
        "#});
        repository::tests::write(dir.path(), "contracts/oracle.json", indoc! {r#"
            [{"id": "0b8f7a76-5c7e-4d1e-9d55-7a3f7a0c1e11", "contractId": "PO-1",
              "licenseTypeId": "A90611", "scope": "Host", "hostnames": ["h1"], "quantity": 2}]
        "#});
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(
            formatdoc! {"
                telemetry:
                  enable: false
                repository:
                  snapshot_dir: {dir}
            ", dir = dir.path().display()}
            .as_bytes(),
        )
        .unwrap();
        ServiceProvider::build(load_config(&[file.path()]).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_compliance_from_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let sp = service_provider(&dir).await;
        assert!(!sp.config().telemetry.enable);

        let output = execute(
            Commands::Compliance(TechnologyArgs {
                technology: Technology::Oracle,
                filter: FilterArgs::default(),
            }),
            sp.compliance_service().as_ref(),
        )
        .await
        .unwrap();
        let compliance: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(compliance[0]["licenseTypeId"], "A90611");
        assert_eq!(compliance[0]["consumed"], 4.0);
        assert_eq!(compliance[0]["covered"], 2.0);
        assert_eq!(compliance[0]["compliance"], 0.5);
    }

    #[tokio::test]
    async fn test_stats_summary() {
        let dir = tempfile::tempdir().unwrap();
        let sp = service_provider(&dir).await;

        let output = execute(
            Commands::Stats {
                technologies: vec![Technology::Oracle, Technology::MySql],
                filter: FilterArgs::default(),
                summary: true,
            },
            sp.compliance_service().as_ref(),
        )
        .await
        .unwrap();
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("oracle") && lines[1].contains("50.00%"));
        assert!(lines[2].contains("mysql") && lines[2].contains("100.00%"));
        assert!(lines[3].contains("75.00%"));
    }
}
