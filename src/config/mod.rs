//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! lock-deploy.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides (network, rpc url, artifacts dir)
//!     → validation.rs (semantic checks)
//!     → DeployConfig (validated, immutable for the run)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the tool runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks
//! - Private keys never live in config; see `blockchain::wallet`

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError, Overrides};
pub use schema::{ArtifactsConfig, DeployConfig, LockConfig, NetworkConfig, ObservabilityConfig};
pub use validation::{validate_config, ValidationError};
