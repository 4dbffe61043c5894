//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::DeployConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "lock-deploy.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Command-line values that replace their config file counterparts.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub network: Option<String>,
    pub rpc_url: Option<String>,
    pub artifacts_dir: Option<String>,
}

impl Overrides {
    /// Apply onto `config` and re-validate the result.
    ///
    /// `rpc_url` replaces the endpoint of whichever network ends up selected.
    pub fn apply(&self, config: &mut DeployConfig) -> Result<(), ConfigError> {
        if let Some(network) = &self.network {
            config.network = network.clone();
        }
        if let Some(rpc_url) = &self.rpc_url {
            if let Some(network) = config.networks.get_mut(&config.network) {
                network.rpc_url = rpc_url.clone();
            }
        }
        if let Some(dir) = &self.artifacts_dir {
            config.artifacts.dir = dir.clone();
        }

        validate_config(config).map_err(ConfigError::Validation)
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DeployConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DeployConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the configuration for a run.
///
/// An explicit path must exist. Without one, `lock-deploy.toml` in the
/// working directory is used if present, otherwise built-in defaults.
/// Callers apply CLI overrides afterwards and validate again.
pub fn resolve_config(explicit: Option<&Path>) -> Result<DeployConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        tracing::debug!(path = %default_path.display(), "Using config file from working directory");
        return load_config(default_path);
    }

    Ok(DeployConfig::default())
}
