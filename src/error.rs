//! Top-level error type and exit code mapping.

use std::process::ExitCode;

use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::config::ConfigError;
use crate::contract::ArtifactError;
use crate::lock::LockError;

/// Anything that ends a run unsuccessfully.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("interrupted before the deployment was confirmed")]
    Interrupted,
}

impl DeployError {
    /// Every failure is reported the same way to the shell.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::FAILURE
    }
}
