//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect a signing provider to the JSON-RPC endpoint
//! - Query chain state (chain id, block number, balances, receipts)
//! - Broadcast signed transactions
//! - Handle timeouts and network errors gracefully

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::Wallet;
use crate::config::NetworkConfig;

/// Blockchain RPC client wrapper with read failover.
#[derive(Clone)]
pub struct BlockchainClient {
    /// Wallet-backed provider on the primary endpoint. Transactions go here only.
    signer: Arc<dyn Provider + Send + Sync>,
    /// Providers for reads (primary first, then failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    /// Configuration.
    config: NetworkConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
    /// Sender address.
    sender: Address,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// Does not touch the network; an unreachable endpoint surfaces on the
    /// first call instead.
    pub fn new(config: NetworkConfig, wallet: &Wallet) -> BlockchainResult<Self> {
        let timeout_duration = config.rpc_timeout();

        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let signer = Arc::new(
            ProviderBuilder::new()
                .wallet(wallet.ethereum_wallet())
                .connect_http(primary_url),
        ) as Arc<dyn Provider + Send + Sync>;

        let mut providers = vec![signer.clone()];
        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>);
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        tracing::debug!(
            rpc_url = %config.rpc_url,
            failovers = providers.len() - 1,
            "Blockchain client initialized"
        );

        Ok(Self {
            signer,
            providers,
            config,
            timeout_duration,
            sender: wallet.address(),
        })
    }

    /// Verify the signing endpoint's chain ID matches configuration, if one is configured.
    ///
    /// Asks the primary only: that is where the transaction will be broadcast.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let Some(expected) = self.config.chain_id else {
            return Ok(());
        };

        let actual = match timeout(self.timeout_duration, self.signer.get_chain_id()).await {
            Ok(Ok(id)) => id,
            Ok(Err(e)) => return Err(BlockchainError::Rpc(e.to_string())),
            Err(_) => return Err(BlockchainError::Timeout(self.config.rpc_timeout_secs)),
        };
        if actual != expected {
            return Err(BlockchainError::ChainMismatch { expected, actual });
        }
        Ok(())
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> BlockchainResult<u64> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_block_number();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(BlockchainError::Rpc("All providers failed to get block number".to_string()))
    }

    /// Get the balance of an address.
    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_balance(address);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(BlockchainError::Rpc("All providers failed to get balance".to_string()))
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<Option<TransactionReceipt>> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_transaction_receipt(tx_hash);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(BlockchainError::Rpc("All providers failed to get receipt".to_string()))
    }

    /// Fill, sign and broadcast a transaction on the primary endpoint.
    ///
    /// Nonce, gas and chain id are filled by the provider. Returns as soon
    /// as the node accepts the transaction.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> BlockchainResult<TxHash> {
        let fut = self.signer.send_transaction(tx);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => Err(BlockchainError::Rpc(e.to_string())),
            Err(_) => Err(BlockchainError::Timeout(self.config.rpc_timeout_secs)),
        }
    }

    /// Address of the signing account.
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Get the configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Get the number of confirmation blocks required.
    pub fn confirmation_blocks(&self) -> u32 {
        self.config.confirmations
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("sender", &self.sender)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
