//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Wallet → Client → Artifact → Deploy → Summary
//!
//! Signals (signals.rs):
//!     SIGINT → Abort the pending deployment
//! ```
//!
//! # Design Decisions
//! - Fail fast: the first error ends the run
//! - Subsystems initialize in order, not concurrently

pub mod signals;
pub mod startup;

pub use startup::{deploy_until, run, run_until};
