//! The Lock deployment itself.
//!
//! # Responsibilities
//! - Compute the unlock time from the wall clock
//! - Encode `constructor(uint256 unlockTime)` and attach the locked value
//! - Hand the creation off to a `ContractDeployer` and wait for it
//! - Print the one-line summary
//!
//! # Design Decisions
//! - Strictly sequential: time → deploy → confirm → print
//! - Nothing is written to the output unless the deployment is confirmed
//! - No retries; every failure goes straight back to the caller

use std::io::Write;
use std::time::{Duration, SystemTime};

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, TxHash, U256};
use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::config::LockConfig;
use crate::contract::{Artifact, ArtifactError, ContractDeployer, DeploymentRequest};
use crate::lock::amount::{format_amount, parse_amount, AmountError};
use crate::lock::schedule::{unlock_timestamp, ScheduleError};

#[derive(Debug, Error)]
pub enum LockError {
    #[error("invalid unlock time: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("invalid lock amount: {0}")]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("deployment failed: {0}")]
    Deployment(#[from] BlockchainError),

    #[error("failed to write summary: {0}")]
    Output(#[from] std::io::Error),
}

/// What to lock and for how long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockParams {
    /// Wei attached to the constructor.
    pub amount: U256,
    /// Offset from now to the unlock time.
    pub unlock_delay: Duration,
}

impl LockParams {
    pub fn from_config(config: &LockConfig) -> Result<Self, LockError> {
        Ok(Self {
            amount: parse_amount(&config.amount)?,
            unlock_delay: Duration::from_secs(config.unlock_delay_secs),
        })
    }
}

/// A confirmed Lock deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockDeployment {
    pub address: Address,
    pub tx_hash: TxHash,
    pub amount: U256,
    pub unlock_time: u64,
}

impl LockDeployment {
    /// Human-readable summary line.
    pub fn summary(&self) -> String {
        format!(
            "Lock with {}ETH and unlock timestamp {} deployed to {}",
            format_amount(self.amount),
            self.unlock_time,
            self.address
        )
    }
}

/// Deploy `artifact` as a Lock and write the summary line to `out`.
pub async fn run<D, W>(
    deployer: &D,
    artifact: &Artifact,
    params: &LockParams,
    now: SystemTime,
    out: &mut W,
) -> Result<LockDeployment, LockError>
where
    D: ContractDeployer,
    W: Write,
{
    let unlock_time = unlock_timestamp(now, params.unlock_delay)?;
    let init_code = artifact.deploy_code(
        &[DynSolValue::Uint(U256::from(unlock_time), 256)],
        params.amount,
    )?;

    tracing::debug!(unlock_time, amount_wei = %params.amount, "Lock parameters");

    let deployment = deployer
        .deploy(DeploymentRequest {
            contract: artifact.contract_name.clone(),
            init_code,
            value: params.amount,
        })
        .await?;

    let lock = LockDeployment {
        address: deployment.address,
        tx_hash: deployment.tx_hash,
        amount: params.amount,
        unlock_time,
    };

    writeln!(out, "{}", lock.summary())?;
    tracing::info!(
        address = %lock.address,
        tx_hash = %lock.tx_hash,
        block_number = ?deployment.block_number,
        "Lock deployed"
    );

    Ok(lock)
}
