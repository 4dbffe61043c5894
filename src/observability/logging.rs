//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick the log level from `RUST_LOG`, the config, or `--verbose`
//!
//! # Design Decisions
//! - Logs go to stderr; stdout is reserved for the deployment summary
//! - Dependencies log at `warn` unless `RUST_LOG` says otherwise

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Levels accepted in `observability.log_level`.
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Filter directives used when `RUST_LOG` does not apply.
pub fn default_directives(log_level: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { log_level };
    format!("lock_deploy={},warn", level)
}

/// Install the global subscriber.
///
/// `--verbose` wins over `RUST_LOG`, which wins over the configured level.
/// A second call is a no-op.
pub fn init_logging(log_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(default_directives(log_level, true))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level, false)))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
