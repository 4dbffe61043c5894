//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!
//! Consumers:
//!     → stderr (human-readable fmt layer)
//! ```
//!
//! # Design Decisions
//! - Structured fields (tx hash, address, block) rather than interpolated text
//! - Never log key material

pub mod logging;

pub use logging::init_logging;
