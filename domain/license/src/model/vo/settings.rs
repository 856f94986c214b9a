use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Metric, Technology};

/// A license that makes another one redundant inside the same HA domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRule {
    /// Human readable name, only used in logs.
    #[serde(default)]
    pub name: String,
    /// License type ids whose presence triggers the rule.
    pub given: Vec<String>,
    /// License type ids removed from every host reachable from a `given` host.
    pub remove: Vec<String>,
}

/// Licensing arithmetic knobs shared by the whole engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LicensingSettings {
    /// Processor core factor applied to cluster-wide core counts.
    #[serde(default = "LicensingSettings::default_core_factor")]
    pub core_factor: f64,
    /// Multiplier turning named user licenses into processor-comparable units.
    #[serde(default = "LicensingSettings::default_named_user_factors")]
    pub named_user_factors: HashMap<Technology, f64>,
    #[serde(default = "LicensingSettings::default_dependency_rules")]
    pub dependency_rules: Vec<DependencyRule>,
    /// License types a Veritas cluster needs once per peer instead of per core.
    #[serde(default = "LicensingSettings::default_veritas_per_node_license_type_ids")]
    pub veritas_per_node_license_type_ids: Vec<String>,
}

impl Default for LicensingSettings {
    fn default() -> Self {
        Self {
            core_factor: Self::default_core_factor(),
            named_user_factors: Self::default_named_user_factors(),
            dependency_rules: Self::default_dependency_rules(),
            veritas_per_node_license_type_ids: Self::default_veritas_per_node_license_type_ids(),
        }
    }
}

impl LicensingSettings {
    fn default_core_factor() -> f64 {
        0.5
    }

    fn default_named_user_factors() -> HashMap<Technology, f64> {
        HashMap::from([(Technology::Oracle, 25.0)])
    }

    fn default_dependency_rules() -> Vec<DependencyRule> {
        vec![
            DependencyRule {
                name: "GoldenGate includes Active Data Guard".to_string(),
                given: vec!["A90612".to_string()],
                remove: vec!["A10532".to_string(), "A10533".to_string()],
            },
            DependencyRule {
                name: "RAC includes RAC One Node".to_string(),
                given: vec!["A90613".to_string(), "A90614".to_string()],
                remove: vec!["B72756".to_string(), "B72757".to_string()],
            },
        ]
    }

    fn default_veritas_per_node_license_type_ids() -> Vec<String> {
        vec!["L47837".to_string()]
    }

    /// Factor a quantity expressed in `metric` is multiplied by for `technology`.
    pub fn metric_factor(&self, technology: Technology, metric: Metric) -> f64 {
        if !metric.is_named_user() {
            return 1.0;
        }
        self.named_user_factors.get(&technology).copied().unwrap_or(1.0)
    }

    pub fn is_veritas_per_node(&self, license_type_id: &str) -> bool {
        self.veritas_per_node_license_type_ids.iter().any(|el| el == license_type_id)
    }
}
