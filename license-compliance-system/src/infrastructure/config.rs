use std::path::{Path, PathBuf};

use domain_license::model::vo::LicensingSettings;
use serde::*;

use super::telemetry::TelemetryConfig;

#[derive(Default, Deserialize, Clone, Debug)]
pub struct LicenseConfig {
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub licensing: LicensingSettings,
    #[serde(default)]
    pub repository: RepositoryConfig,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RepositoryConfig {
    /// Directory holding `hosts.json`, `clusters.json`, `contracts/` and `license_types/`.
    #[serde(default = "RepositoryConfig::default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: Self::default_snapshot_dir(),
        }
    }
}

impl RepositoryConfig {
    fn default_snapshot_dir() -> PathBuf {
        PathBuf::from("./snapshot")
    }
}

/// Layers `config.yaml` in the working directory, then every yaml file in `files`,
/// then `LICENSE__*` environment variables.
pub fn build_config<P: AsRef<Path>>(files: &[P]) -> anyhow::Result<config::Config> {
    let mut config = config::Config::builder().add_source(
        config::File::with_name("config")
            .required(false)
            .format(config::FileFormat::Yaml),
    );
    for file in files {
        let file = file.as_ref();
        if file
            .extension()
            .map_or(false, |el| el == "yaml" || el == "yml")
        {
            config = config.add_source(
                config::File::from(file)
                    .format(config::FileFormat::Yaml)
                    .required(true),
            );
        } else {
            anyhow::bail!("Config file {} is not yaml", file.display());
        }
    }
    config = config.add_source(
        config::Environment::with_prefix("LICENSE")
            .separator("__")
            .try_parsing(true),
    );
    Ok(config.build()?)
}

pub fn load_config<P: AsRef<Path>>(files: &[P]) -> anyhow::Result<LicenseConfig> {
    Ok(build_config(files)?.try_deserialize()?)
}
