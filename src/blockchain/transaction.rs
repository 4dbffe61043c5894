//! Creation transaction building and confirmation monitoring.
//!
//! # Responsibilities
//! - Build contract creation transactions with attached value
//! - Broadcast through the signing provider
//! - Poll receipts until the required depth is reached

use alloy::network::TransactionBuilder;
use alloy::primitives::{Bytes, TxHash, U256};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmationStatus};

/// Builds and tracks creation transactions for one client.
pub struct TxBuilder {
    client: BlockchainClient,
}

impl TxBuilder {
    /// Create a new transaction builder.
    pub fn new(client: BlockchainClient) -> Self {
        Self { client }
    }

    /// Build a contract creation request.
    ///
    /// # Arguments
    /// * `init_code` - Creation bytecode with encoded constructor arguments
    /// * `value` - Wei forwarded to the constructor
    pub fn build_create(&self, init_code: Bytes, value: U256) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.client.sender())
            .with_deploy_code(init_code)
            .with_value(value)
    }

    /// Broadcast a transaction and return its hash.
    pub async fn send(&self, tx: TransactionRequest) -> BlockchainResult<TxHash> {
        let tx_hash = self.client.send_transaction(tx).await?;
        tracing::info!(tx_hash = %tx_hash, "Deployment transaction sent");
        Ok(tx_hash)
    }

    /// Wait for a transaction to be confirmed and return its receipt.
    ///
    /// A reverted receipt is an error; so is running past the network's
    /// confirmation timeout.
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<TransactionReceipt> {
        let config = self.client.config();
        let required_confirmations = self.client.confirmation_blocks();

        let result = timeout(config.confirmation_timeout(), async {
            let mut ticker = interval(config.poll_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut status = ConfirmationStatus::Pending;

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, status = ?status, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Err(BlockchainError::Reverted(tx_hash));
                }

                let head = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(head);
                status = ConfirmationStatus::from_depth(tx_block, head, required_confirmations);

                if let ConfirmationStatus::Confirmed { block_number } = status {
                    tracing::info!(tx_hash = %tx_hash, block_number, "Transaction confirmed");
                    return Ok(receipt);
                }

                tracing::debug!(tx_hash = %tx_hash, status = ?status, "Waiting for confirmations");
            }
        })
        .await;

        match result {
            Ok(receipt) => receipt,
            Err(_) => Err(BlockchainError::ConfirmationTimeout {
                tx_hash,
                timeout_secs: config.confirmation_timeout_secs,
            }),
        }
    }

    /// Get the underlying client.
    pub fn client(&self) -> &BlockchainClient {
        &self.client
    }
}
