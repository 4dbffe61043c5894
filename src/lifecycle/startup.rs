//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn a validated config into a wallet, client and artifact
//! - Run the Lock deployment, racing it against Ctrl-C
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The artifact is resolved before anything touches the network

use std::future::Future;
use std::io::Write;
use std::time::SystemTime;

use crate::blockchain::{BlockchainClient, Wallet};
use crate::config::{ConfigError, DeployConfig, ValidationError};
use crate::contract::{Artifact, ArtifactStore, ContractDeployer, RpcDeployer};
use crate::error::DeployError;
use crate::lifecycle::signals;
use crate::lock::{self, LockDeployment, LockParams};

/// Deploy the configured Lock, writing the summary line to `out`.
///
/// Ctrl-C abandons the deployment with [`DeployError::Interrupted`].
pub async fn run<W: Write>(config: &DeployConfig, out: &mut W) -> Result<LockDeployment, DeployError> {
    run_until(config, out, signals::interrupted()).await
}

/// Same as [`run`], but stops when `shutdown` resolves instead of on Ctrl-C.
pub async fn run_until<W, S>(config: &DeployConfig, out: &mut W, shutdown: S) -> Result<LockDeployment, DeployError>
where
    W: Write,
    S: Future<Output = ()>,
{
    let network = config.selected_network().cloned().ok_or_else(|| {
        ConfigError::Validation(vec![ValidationError::UnknownNetwork(config.network.clone())])
    })?;

    let params = LockParams::from_config(&config.lock)?;
    let artifact = ArtifactStore::new(&config.artifacts.dir).find(&config.lock.contract)?;
    tracing::info!(
        contract = %artifact.fully_qualified_name(),
        network = %config.network,
        rpc_url = %network.rpc_url,
        "Starting deployment"
    );

    let wallet = Wallet::from_env()?;
    let client = BlockchainClient::new(network, &wallet)?;
    let deployer = RpcDeployer::new(client);

    deploy_until(&deployer, &artifact, &params, SystemTime::now(), out, shutdown).await
}

/// Race one Lock deployment against `shutdown`.
///
/// Nothing is written to `out` unless the deployment finishes first.
pub async fn deploy_until<D, W, S>(
    deployer: &D,
    artifact: &Artifact,
    params: &LockParams,
    now: SystemTime,
    out: &mut W,
    shutdown: S,
) -> Result<LockDeployment, DeployError>
where
    D: ContractDeployer,
    W: Write,
    S: Future<Output = ()>,
{
    tokio::select! {
        result = lock::run(deployer, artifact, params, now, out) => Ok(result?),
        _ = shutdown => Err(DeployError::Interrupted),
    }
}
