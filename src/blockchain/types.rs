//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash, U256};
use thiserror::Error;

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not confirmed within the configured wait.
    #[error("Transaction {tx_hash} not confirmed within {timeout_secs} seconds")]
    ConfirmationTimeout { tx_hash: TxHash, timeout_secs: u64 },

    /// Transaction was reverted on-chain.
    #[error("Transaction {0} reverted")]
    Reverted(TxHash),

    /// Invalid private key format or missing key.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Sender cannot cover the value attached to the transaction.
    #[error("Insufficient funds in {address}: balance {balance} wei < required {required} wei")]
    InsufficientFunds {
        address: Address,
        balance: U256,
        required: U256,
    },

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Receipt of a creation transaction carried no contract address.
    #[error("Receipt for {0} has no contract address")]
    NoContractAddress(TxHash),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Transaction confirmation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Transaction is pending in mempool.
    Pending,
    /// Transaction has been mined but not enough confirmations.
    Confirming { current: u32, required: u32 },
    /// Transaction is confirmed with required block depth.
    Confirmed { block_number: u64 },
}

impl ConfirmationStatus {
    /// Classify a mined transaction given the chain head.
    ///
    /// The inclusion block counts as the first confirmation.
    pub fn from_depth(tx_block: u64, head_block: u64, required: u32) -> Self {
        let current = head_block
            .saturating_sub(tx_block)
            .saturating_add(1)
            .min(u64::from(u32::MAX)) as u32;

        if current >= required {
            Self::Confirmed {
                block_number: tx_block,
            }
        } else {
            Self::Confirming { current, required }
        }
    }
}
