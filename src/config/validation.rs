//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the selected network exists and its endpoints are usable URLs
//! - Validate value ranges (timeouts > 0, confirmations > 0)
//! - Check the lock amount parses as ether
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DeployConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::{DeployConfig, NetworkConfig};
use crate::lock::amount::parse_amount;
use crate::observability::logging::LOG_LEVELS;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("network '{0}' is not defined under [networks]")]
    UnknownNetwork(String),

    #[error("networks.{network}.{field}: invalid URL '{url}': {reason}")]
    InvalidUrl {
        network: String,
        field: &'static str,
        url: String,
        reason: String,
    },

    #[error("{field} must be greater than zero")]
    Zero { field: String },

    #[error("lock.amount: '{amount}' is not a valid ether amount: {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("lock.contract must not be empty")]
    EmptyContract,

    #[error("observability.log_level: unknown level '{0}'")]
    InvalidLogLevel(String),
}

/// Validate a loaded configuration.
pub fn validate_config(config: &DeployConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.selected_network() {
        Some(network) => validate_network(&config.network, network, &mut errors),
        None => errors.push(ValidationError::UnknownNetwork(config.network.clone())),
    }

    if config.lock.contract.trim().is_empty() {
        errors.push(ValidationError::EmptyContract);
    }

    if let Err(e) = parse_amount(&config.lock.amount) {
        errors.push(ValidationError::InvalidAmount {
            amount: config.lock.amount.clone(),
            reason: e.to_string(),
        });
    }

    // Lock rejects an unlock time that is not strictly in the future.
    if config.lock.unlock_delay_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "lock.unlock_delay_secs".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_network(name: &str, network: &NetworkConfig, errors: &mut Vec<ValidationError>) {
    check_url(name, "rpc_url", &network.rpc_url, errors);
    for url in &network.failover_urls {
        check_url(name, "failover_urls", url, errors);
    }

    let ranges = [
        ("rpc_timeout_secs", network.rpc_timeout_secs),
        ("confirmations", u64::from(network.confirmations)),
        ("confirmation_timeout_secs", network.confirmation_timeout_secs),
        ("poll_interval_ms", network.poll_interval_ms),
    ];
    for (field, value) in ranges {
        if value == 0 {
            errors.push(ValidationError::Zero {
                field: format!("networks.{}.{}", name, field),
            });
        }
    }
}

fn check_url(network: &str, field: &'static str, raw: &str, errors: &mut Vec<ValidationError>) {
    let invalid = |reason: String| ValidationError::InvalidUrl {
        network: network.to_string(),
        field,
        url: raw.to_string(),
        reason,
    };

    match url::Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(invalid(format!("unsupported scheme '{}'", url.scheme()))),
        Err(e) => errors.push(invalid(e.to_string())),
    }
}
