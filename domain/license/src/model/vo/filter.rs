use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scope of a compliance computation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalFilter {
    /// Only hosts in this location, `None` for every location.
    #[serde(default)]
    pub location: Option<String>,
    /// Only hosts in this environment, `None` for every environment.
    #[serde(default)]
    pub environment: Option<String>,
    /// Inventory snapshot to read, `None` for the latest one.
    #[serde(default)]
    pub older_than: Option<DateTime<Utc>>,
}

impl GlobalFilter {
    pub fn matches(&self, location: &str, environment: &str) -> bool {
        self.location.as_deref().map_or(true, |el| el.eq_ignore_ascii_case(location))
            && self.environment.as_deref().map_or(true, |el| el.eq_ignore_ascii_case(environment))
    }
}
