//! Ether amount parsing and display.

use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::U256;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount must not be negative")]
    Negative,

    #[error("{0}")]
    Invalid(String),
}

/// Parse a decimal ether string (`"0.001"`) into wei.
pub fn parse_amount(ether: &str) -> Result<U256, AmountError> {
    let ether = ether.trim();
    if ether.is_empty() {
        return Err(AmountError::Empty);
    }
    if ether.starts_with('-') {
        return Err(AmountError::Negative);
    }
    parse_ether(ether).map_err(|e| AmountError::Invalid(e.to_string()))
}

/// Render wei as ether with trailing zeros trimmed, keeping one decimal.
///
/// `10^15` becomes `0.001`, `10^18` becomes `1.0`.
pub fn format_amount(wei: U256) -> String {
    let full = format_ether(wei);
    let Some((whole, fraction)) = full.split_once('.') else {
        return format!("{}.0", full);
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, fraction)
    }
}
