//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Keep the log level configurable via RUST_LOG
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Default filter keeps this crate at info when RUST_LOG is unset

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Call once at startup, before any other subsystem logs.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_gate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
