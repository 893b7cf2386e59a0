//! OS signal handling.
//!
//! # Responsibilities
//! - Translate Ctrl+C into the internal shutdown signal
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Signals stop the accept loop; in-flight connections finish on their own

use crate::lifecycle::Shutdown;

/// Spawn a background task that triggers shutdown on Ctrl+C.
pub fn spawn_signal_listener(shutdown: Shutdown) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            return;
        }
        tracing::info!("Shutdown signal received");
        shutdown.trigger();
    });
}
