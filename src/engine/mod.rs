//! Protocol engine seam.
//!
//! The relay protocol itself (negotiation, authentication challenge and
//! response, destination connect, byte relaying) lives behind this trait.
//! The serving loop hands each admitted connection to the engine together
//! with the read-only relay policy; everything before that point (admission,
//! source filtering, idle timeouts) has already been enforced.

use std::future::Future;
use std::io;
use std::sync::Arc;

use crate::access::DestinationRule;
use crate::auth::Authenticator;
use crate::config::{ServerConfig, ValidationError};
use crate::net::GuardedConn;

/// Read-only per-server policy handed to the engine.
///
/// Derived once from the configuration snapshot; never re-evaluated per
/// connection.
#[derive(Debug, Clone)]
pub struct RelayPolicy {
    /// Credential-verification mode.
    pub authenticator: Authenticator,
    /// Destination-hostname rule.
    pub destination_rule: DestinationRule,
}

impl RelayPolicy {
    /// Derive the policy from the configuration snapshot.
    ///
    /// Fails on the credential invariant (require_auth with an empty
    /// pair); callers treat that as fatal at startup.
    pub fn from_config(config: &ServerConfig) -> Result<Self, Vec<ValidationError>> {
        Ok(Self {
            authenticator: Authenticator::from_config(config)?,
            destination_rule: DestinationRule::from_pattern(&config.allowed_dest_fqdn),
        })
    }
}

/// A relay protocol implementation.
///
/// One call per admitted connection, driven on its own task. Returning an
/// error closes that connection only; the serving loop and every other
/// connection are unaffected. Dropping `conn` releases its admission slot.
pub trait ProtocolEngine: Send + Sync + 'static {
    /// Drive one connection through negotiation and relaying to completion.
    fn handle_connection(
        &self,
        conn: GuardedConn,
        policy: Arc<RelayPolicy>,
    ) -> impl Future<Output = io::Result<()>> + Send;
}

/// Engine that closes every admitted connection without negotiating.
///
/// Stands in until a real protocol engine is linked; admission, source
/// filtering and idle timeouts still apply in full.
pub struct NullEngine;

impl ProtocolEngine for NullEngine {
    async fn handle_connection(
        &self,
        conn: GuardedConn,
        _policy: Arc<RelayPolicy>,
    ) -> io::Result<()> {
        tracing::warn!(
            connection_id = %conn.id(),
            peer_addr = %conn.peer_addr(),
            "No protocol engine linked; closing connection"
        );
        Ok(())
    }
}
