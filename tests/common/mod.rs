//! Shared utilities for integration testing.

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use relay_gate::config::ServerConfig;
use relay_gate::engine::{ProtocolEngine, RelayPolicy};
use relay_gate::net::GuardedConn;

/// Config bound to an ephemeral loopback port, open mode, short timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        listen_ip: "127.0.0.1".to_string(),
        port: 0,
        require_auth: false,
        max_connections: 4,
        timeout_secs: 5,
        ..ServerConfig::default()
    }
}

/// Engine that echoes every byte back until the client closes.
#[allow(dead_code)]
pub struct EchoEngine;

impl ProtocolEngine for EchoEngine {
    async fn handle_connection(
        &self,
        mut conn: GuardedConn,
        _policy: Arc<RelayPolicy>,
    ) -> io::Result<()> {
        let mut buf = [0u8; 1024];
        loop {
            let n = conn.read(&mut buf).await?;
            if n == 0 {
                return Ok(());
            }
            conn.write_all(&buf[..n]).await?;
        }
    }
}

/// Engine that reads a "user password" line, checks it against the policy
/// authenticator, and answers "OK\n" or "DENY\n".
#[allow(dead_code)]
pub struct CredCheckEngine;

impl ProtocolEngine for CredCheckEngine {
    async fn handle_connection(
        &self,
        mut conn: GuardedConn,
        policy: Arc<RelayPolicy>,
    ) -> io::Result<()> {
        let mut buf = [0u8; 256];
        let n = conn.read(&mut buf).await?;
        let line = String::from_utf8_lossy(&buf[..n]);
        let mut parts = line.split_whitespace();
        let user = parts.next().unwrap_or_default();
        let pass = parts.next().unwrap_or_default();

        if policy.authenticator.verify(user, pass) {
            conn.write_all(b"OK\n").await
        } else {
            conn.write_all(b"DENY\n").await
        }
    }
}
