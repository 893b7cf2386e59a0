//! Serving loop.
//!
//! # Responsibilities
//! - Bind the admission gate
//! - Accept admitted connections and spawn one task per connection
//! - Isolate per-connection errors; propagate accept errors as fatal
//!
//! # Design Decisions
//! - An accept failure stops the whole server (no automatic retry); the
//!   caller logs it and exits non-zero
//! - Shutdown stops the accept loop only; in-flight connections finish on
//!   their own

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::{ProtocolEngine, RelayPolicy};
use crate::lifecycle::Shutdown;
use crate::net::{AdmissionGate, GateError};

/// The relay front end: admission gate plus per-server policy.
pub struct Server {
    gate: AdmissionGate,
    policy: Arc<RelayPolicy>,
}

impl Server {
    /// Bind the admission gate. A bind failure is fatal at startup.
    pub async fn bind(config: &ServerConfig, policy: RelayPolicy) -> Result<Self, GateError> {
        let gate = AdmissionGate::bind(config).await?;
        Ok(Self {
            gate,
            policy: Arc::new(policy),
        })
    }

    /// The local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.gate.local_addr()
    }

    /// Accept connections until shutdown or a fatal accept error.
    ///
    /// Each admitted connection runs on its own task; its errors (idle
    /// timeout, resets, refused negotiation) are logged and isolated.
    pub async fn run<E: ProtocolEngine>(
        self,
        engine: Arc<E>,
        shutdown: Shutdown,
    ) -> Result<(), GateError> {
        let mut shutdown_rx = shutdown.subscribe();

        loop {
            let conn = tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::info!("Accept loop stopping");
                    return Ok(());
                }
                accepted = self.gate.accept() => accepted?,
            };

            let engine = Arc::clone(&engine);
            let policy = Arc::clone(&self.policy);
            let id = conn.id();
            let peer = conn.peer_addr();

            tokio::spawn(async move {
                if let Err(e) = engine.handle_connection(conn, policy).await {
                    tracing::debug!(
                        connection_id = %id,
                        peer_addr = %peer,
                        error = %e,
                        "Connection ended with error"
                    );
                }
            });
        }
    }
}
