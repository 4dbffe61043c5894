//! Contract deployment over JSON-RPC.

use std::future::Future;

use alloy::primitives::{Address, Bytes, TxHash, U256};

use crate::blockchain::{BlockchainClient, BlockchainError, BlockchainResult, TxBuilder};

/// A contract creation to perform.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    /// Contract name, for logging.
    pub contract: String,
    /// Creation bytecode with encoded constructor arguments.
    pub init_code: Bytes,
    /// Wei forwarded to the constructor.
    pub value: U256,
}

/// A confirmed deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Publishes contracts and waits until they are confirmed.
pub trait ContractDeployer {
    fn deploy(
        &self,
        request: DeploymentRequest,
    ) -> impl Future<Output = BlockchainResult<Deployment>> + Send;
}

/// Deployer backed by a live node.
#[derive(Debug)]
pub struct RpcDeployer {
    client: BlockchainClient,
}

impl RpcDeployer {
    pub fn new(client: BlockchainClient) -> Self {
        Self { client }
    }

    /// Fail early when the sender cannot cover the attached value.
    async fn check_balance(&self, value: U256) -> BlockchainResult<()> {
        if value.is_zero() {
            return Ok(());
        }

        let address = self.client.sender();
        let balance = self.client.get_balance(address).await?;
        if balance < value {
            return Err(BlockchainError::InsufficientFunds {
                address,
                balance,
                required: value,
            });
        }
        Ok(())
    }
}

impl ContractDeployer for RpcDeployer {
    async fn deploy(&self, request: DeploymentRequest) -> BlockchainResult<Deployment> {
        self.client.verify_chain_id().await?;
        self.check_balance(request.value).await?;

        tracing::info!(
            contract = %request.contract,
            sender = %self.client.sender(),
            value_wei = %request.value,
            code_len = request.init_code.len(),
            "Deploying contract"
        );

        let builder = TxBuilder::new(self.client.clone());
        let tx = builder.build_create(request.init_code, request.value);
        let tx_hash = builder.send(tx).await?;
        let receipt = builder.wait_for_confirmation(tx_hash).await?;

        let address = receipt
            .contract_address
            .ok_or(BlockchainError::NoContractAddress(tx_hash))?;

        Ok(Deployment {
            address,
            tx_hash,
            block_number: receipt.block_number,
        })
    }
}
