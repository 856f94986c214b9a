use crate::model::{
    entity::{LicenseCompliance, LicenseType},
    vo::{LicenseCoverage, Technology, TechnologyCompliance, TechnologyTotal},
};

/// Rolls coverage up into compliance ratios.
pub trait ComplianceAggregator: Send + Sync {
    /// Compliance per license type, quantities rounded.
    fn license_compliance(
        &self,
        license_types: &[LicenseType],
        coverages: &[LicenseCoverage],
    ) -> Vec<LicenseCompliance>;
    fn technology_compliance(
        &self,
        technology: Technology,
        count: usize,
        host_count: usize,
        compliances: &[LicenseCompliance],
    ) -> TechnologyCompliance;
    fn total(&self, technologies: &[TechnologyCompliance]) -> TechnologyTotal;
}
