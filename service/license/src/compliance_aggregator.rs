use std::collections::HashMap;

use domain_license::{
    model::{
        entity::{LicenseCompliance, LicenseType},
        vo::{
            stats::format_percentage, LicenseCoverage, Metric, Technology, TechnologyCompliance,
            TechnologyTotal,
        },
    },
    service::ComplianceAggregator,
};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder, Default)]
pub struct ComplianceAggregatorImpl {}

impl ComplianceAggregator for ComplianceAggregatorImpl {
    fn license_compliance(
        &self,
        license_types: &[LicenseType],
        coverages: &[LicenseCoverage],
    ) -> Vec<LicenseCompliance> {
        let catalog = license_types
            .iter()
            .map(|el| (el.id.as_str(), el))
            .collect::<HashMap<_, _>>();

        coverages
            .iter()
            .map(|coverage| {
                let license_type = catalog.get(coverage.license_type_id.as_str());
                let free = license_type.map_or(false, |el| el.is_free());
                let compliance = if coverage.consumed == 0.0 || coverage.unlimited || free {
                    1.0
                } else {
                    coverage.covered / coverage.consumed
                };
                LicenseCompliance {
                    license_type_id: coverage.license_type_id.to_owned(),
                    description: license_type.map(|el| el.description.to_owned()).unwrap_or_default(),
                    metric: license_type.map_or(Metric::Unknown, |el| el.metric),
                    cost: license_type.and_then(|el| el.cost),
                    consumed: coverage.consumed.round(),
                    covered: coverage.covered.round(),
                    purchased: coverage.purchased.round(),
                    available: coverage.available.round(),
                    compliance,
                    unlimited: coverage.unlimited,
                }
            })
            .collect()
    }

    fn technology_compliance(
        &self,
        technology: Technology,
        count: usize,
        host_count: usize,
        compliances: &[LicenseCompliance],
    ) -> TechnologyCompliance {
        let percentage = if compliances.is_empty() {
            100.0
        } else {
            compliances.iter().map(|el| el.compliance).sum::<f64>() / compliances.len() as f64 * 100.0
        };
        TechnologyCompliance {
            technology,
            count,
            host_count,
            compliance_percentage_val: percentage,
            compliance_percentage_str: format_percentage(percentage),
        }
    }

    fn total(&self, technologies: &[TechnologyCompliance]) -> TechnologyTotal {
        let percentage = if technologies.is_empty() {
            100.0
        } else {
            technologies.iter().map(|el| el.compliance_percentage_val).sum::<f64>()
                / technologies.len() as f64
        };
        TechnologyTotal {
            count: technologies.iter().map(|el| el.count).sum(),
            host_count: technologies.iter().map(|el| el.host_count).sum(),
            compliance_percentage_val: percentage,
            compliance_percentage_str: format_percentage(percentage),
        }
    }
}
