//! Contract artifacts and deployment.
//!
//! # Data Flow
//! ```text
//! artifacts/ (Hardhat output)
//!     → artifact.rs (lookup, ABI + bytecode, constructor encoding)
//!     → deployer.rs (ContractDeployer: send creation tx, wait, read address)
//! ```

pub mod artifact;
pub mod deployer;

pub use artifact::{Artifact, ArtifactError, ArtifactStore};
pub use deployer::{ContractDeployer, Deployment, DeploymentRequest, RpcDeployer};
