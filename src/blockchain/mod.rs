//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key)
//!     → wallet.rs (key loading)
//!     → client.rs (signing provider + read failover, timeouts)
//!     → transaction.rs (build, broadcast, confirm)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use transaction::TxBuilder;
pub use types::{BlockchainError, BlockchainResult, ConfirmationStatus};
pub use wallet::Wallet;
