//! Configuration of the `voting-system` binary.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use sov_modules_api::Address;
pub use sov_state::config::Config as StorageConfig;

/// Who deploys the module and under which name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeploymentConfig {
    /// Name of the deployment.
    pub module_name: String,
    /// Address that deploys the module. It becomes the admin.
    pub deployer: Address,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_owned()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

/// Voting system configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VotingSystemConfig {
    /// Deployment configuration.
    pub deployment: DeploymentConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reads a TOML file and deserializes it into `R`.
pub fn from_toml_path<P: AsRef<Path>, R: DeserializeOwned>(path: P) -> anyhow::Result<R> {
    let mut contents = String::new();
    {
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;
    }

    let result: R = toml::from_str(&contents)?;

    Ok(result)
}
