use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::exception::LicenseException;

/// Database technology whose licenses are tracked.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Technology {
    #[default]
    Oracle,
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "sqlserver")]
    SqlServer,
    #[serde(rename = "postgresql")]
    PostgreSql,
    #[serde(rename = "mongodb")]
    MongoDb,
}

impl Technology {
    pub const ALL: [Technology; 5] = [
        Technology::Oracle,
        Technology::MySql,
        Technology::SqlServer,
        Technology::PostgreSql,
        Technology::MongoDb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Technology::Oracle => "oracle",
            Technology::MySql => "mysql",
            Technology::SqlServer => "sqlserver",
            Technology::PostgreSql => "postgresql",
            Technology::MongoDb => "mongodb",
        }
    }
}

impl Display for Technology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Technology {
    type Err = LicenseException;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Technology::ALL
            .into_iter()
            .find(|el| el.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LicenseException::UnknownTechnology {
                technology: s.to_owned(),
            })
    }
}
