//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from `lock-deploy.toml`.
//! Every section has defaults so an absent file reproduces the stock
//! deployment: `Lock` on localhost, 0.001 ether, unlocking in 60 seconds.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Name of the network selected when none is configured.
pub const DEFAULT_NETWORK: &str = "localhost";

/// Root configuration for a deployment run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Name of the entry in `networks` to deploy to.
    pub network: String,

    /// Known networks, keyed by name.
    pub networks: BTreeMap<String, NetworkConfig>,

    /// What to deploy and with which parameters.
    pub lock: LockConfig,

    /// Where compilation artifacts live.
    pub artifacts: ArtifactsConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl Default for DeployConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(DEFAULT_NETWORK.to_string(), NetworkConfig::localhost());

        Self {
            network: DEFAULT_NETWORK.to_string(),
            networks,
            lock: LockConfig::default(),
            artifacts: ArtifactsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl DeployConfig {
    /// The currently selected network, if it is defined.
    pub fn selected_network(&self) -> Option<&NetworkConfig> {
        self.networks.get(&self.network)
    }
}

/// JSON-RPC endpoint and confirmation policy for one chain.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL. Transactions are always sent here.
    pub rpc_url: String,

    /// Read-only fallback endpoints for chain queries.
    pub failover_urls: Vec<String>,

    /// Expected chain ID. When set, deployment refuses to run on any other chain.
    pub chain_id: Option<u64>,

    /// Per-request RPC timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Blocks (including the inclusion block) before a deployment counts as confirmed.
    pub confirmations: u32,

    /// Upper bound on the confirmation wait in seconds.
    pub confirmation_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl NetworkConfig {
    /// A local Hardhat/Anvil node on the default port.
    pub fn localhost() -> Self {
        Self {
            chain_id: Some(31337),
            ..Self::default()
        }
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: None,
            rpc_timeout_secs: 10,
            confirmations: 1,
            confirmation_timeout_secs: 300,
            poll_interval_ms: 1000,
        }
    }
}

/// Lock contract deployment parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LockConfig {
    /// Contract name, bare (`Lock`) or fully qualified (`contracts/Lock.sol:Lock`).
    pub contract: String,

    /// Amount of ether to lock, as a decimal string.
    pub amount: String,

    /// Seconds between now and the unlock time.
    pub unlock_delay_secs: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            contract: "Lock".to_string(),
            amount: "0.001".to_string(),
            unlock_delay_secs: 60,
        }
    }
}

/// Compilation artifact location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Hardhat artifacts directory.
    pub dir: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: "artifacts".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_deployment() {
        let config = DeployConfig::default();
        assert_eq!(config.network, "localhost");
        assert_eq!(config.lock.contract, "Lock");
        assert_eq!(config.lock.amount, "0.001");
        assert_eq!(config.lock.unlock_delay_secs, 60);

        let network = config.selected_network().unwrap();
        assert_eq!(network.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(network.chain_id, Some(31337));
        assert_eq!(network.confirmations, 1);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: DeployConfig = toml::from_str(
            r#"
            network = "sepolia"

            [networks.sepolia]
            rpc_url = "https://rpc.sepolia.org"
            chain_id = 11155111

            [lock]
            amount = "0.5"
            "#,
        )
        .unwrap();

        assert_eq!(config.lock.amount, "0.5");
        assert_eq!(config.lock.unlock_delay_secs, 60);
        assert_eq!(config.artifacts.dir, "artifacts");

        let network = config.selected_network().unwrap();
        assert_eq!(network.chain_id, Some(11155111));
        assert_eq!(network.rpc_timeout_secs, 10);
        assert_eq!(network.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_unknown_network_is_not_selected() {
        let config = DeployConfig {
            network: "mainnet".to_string(),
            ..DeployConfig::default()
        };
        assert!(config.selected_network().is_none());
    }
}
