//! Admission-controlled TCP listener.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Enforce max_connections via semaphore (blocking backpressure)
//! - Reject disallowed source IPs before any protocol negotiation
//! - Hand out connection handles that release their slot exactly once
//!
//! # Design Decisions
//! - Over-capacity clients are not refused; the accept path blocks until a
//!   slot frees (intentional backpressure, no queueing limit beyond blocking)
//! - An accept failure releases the slot immediately and propagates; the
//!   serving loop treats it as fatal, with no automatic retry

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Semaphore;

use crate::access::SourceFilter;
use crate::config::ServerConfig;
use crate::net::connection::GuardedConn;
use crate::net::timeout::IdleTimeout;

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// Failed to bind to the configured address.
    #[error("Failed to bind: {0}")]
    Bind(std::io::Error),
    /// The underlying accept call failed.
    #[error("Failed to accept: {0}")]
    Accept(std::io::Error),
}

/// A bounded TCP listener gating admission to the relay.
///
/// At most `max_connections` admission slots exist; each admitted connection
/// holds one from acceptance until closure. When every slot is held, new
/// accept calls wait until one is released.
pub struct AdmissionGate {
    /// The underlying TCP listener.
    inner: TcpListener,
    /// Semaphore backing the admission slots.
    slots: Arc<Semaphore>,
    /// Source-IP allow-list, applied in the accept path.
    source_filter: SourceFilter,
    /// Idle timeout applied to every admitted stream.
    idle_timeout: Duration,
    /// Configured maximum connections.
    max_connections: usize,
}

impl AdmissionGate {
    /// Bind to the configured address with admission limits.
    pub async fn bind(config: &ServerConfig) -> Result<Self, GateError> {
        let addr: SocketAddr = config.bind_address().parse().map_err(|e| {
            GateError::Bind(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
        })?;

        let listener = TcpListener::bind(addr).await.map_err(GateError::Bind)?;
        let local_addr = listener.local_addr().map_err(GateError::Bind)?;

        tracing::info!(
            address = %local_addr,
            max_connections = config.max_connections,
            timeout_secs = config.timeout_secs,
            "Admission gate bound"
        );

        Ok(Self {
            inner: listener,
            slots: Arc::new(Semaphore::new(config.max_connections)),
            source_filter: SourceFilter::new(&config.allowed_ips),
            idle_timeout: config.idle_timeout(),
            max_connections: config.max_connections,
        })
    }

    /// Accept the next admitted connection.
    ///
    /// Acquires an admission slot first (waiting when at capacity), then
    /// delegates to the underlying accept. Connections from disallowed
    /// sources are closed here, their slot released, and the gate keeps
    /// accepting; they never reach the protocol engine.
    pub async fn accept(&self) -> Result<GuardedConn, GateError> {
        loop {
            let permit = self
                .slots
                .clone()
                .acquire_owned()
                .await
                .expect("Semaphore closed unexpectedly");

            let (stream, peer) = match self.inner.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    // Permit dropped here, releasing the slot before the
                    // error propagates.
                    drop(permit);
                    return Err(GateError::Accept(e));
                }
            };

            if !self.source_filter.permits(peer.ip()) {
                tracing::warn!(peer_addr = %peer, "Source address not in allow-list, rejecting");
                continue;
            }

            tracing::debug!(
                peer_addr = %peer,
                available_slots = self.slots.available_permits(),
                "Connection admitted"
            );

            let stream = IdleTimeout::new(stream, self.idle_timeout);
            return Ok(GuardedConn::new(stream, permit, peer));
        }
    }

    /// The local address this gate is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }

    /// Currently available admission slots.
    pub fn available_slots(&self) -> usize {
        self.slots.available_permits()
    }

    /// Configured maximum connections.
    pub fn max_connections(&self) -> usize {
        self.max_connections
    }
}
