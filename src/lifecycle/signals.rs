//! OS signal handling.
//!
//! # Responsibilities
//! - Notice Ctrl-C while a deployment is in flight
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - A transaction already broadcast is not cancelled; only the wait stops

/// Resolves when the process receives Ctrl-C.
///
/// If the handler cannot be installed this never resolves, so the
/// deployment simply runs to completion.
pub async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::warn!("Interrupt received, abandoning deployment"),
        Err(e) => {
            tracing::warn!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await
        }
    }
}
