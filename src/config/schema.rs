//! Configuration schema definitions.
//!
//! The snapshot is built once at startup and never mutated. Components
//! receive it (or values derived from it) by reference; there are no
//! process-wide mutable globals.

use serde::Deserialize;
use std::net::IpAddr;

/// Root configuration for the relay front end.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Static username used when authentication is required.
    pub user: String,

    /// Static password used when authentication is required.
    pub password: String,

    /// TCP port to bind.
    pub port: u16,

    /// Interface address to bind.
    pub listen_ip: String,

    /// Destination-hostname allow pattern (e.g. "*.example.com").
    /// Empty = all destinations permitted.
    pub allowed_dest_fqdn: String,

    /// Source-IP allow list. Empty = all sources permitted.
    pub allowed_ips: Vec<IpAddr>,

    /// Whether clients must present the static credential pair.
    pub require_auth: bool,

    /// Maximum concurrent in-flight connections (backpressure).
    pub max_connections: usize,

    /// Idle timeout in seconds applied to every connection.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            user: String::new(),
            password: String::new(),
            port: 1080,
            listen_ip: "0.0.0.0".to_string(),
            allowed_dest_fqdn: String::new(),
            allowed_ips: Vec::new(),
            require_auth: true,
            max_connections: 100,
            timeout_secs: 300,
        }
    }
}

impl ServerConfig {
    /// Socket address string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen_ip, self.port)
    }

    /// Idle timeout as a duration.
    pub fn idle_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}
