//! Lock contract deployment library

pub mod blockchain;
pub mod config;
pub mod contract;
pub mod error;
pub mod lifecycle;
pub mod lock;
pub mod observability;

pub use config::schema::DeployConfig;
pub use error::DeployError;
pub use lock::LockDeployment;
