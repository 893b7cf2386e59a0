//! Source-IP filtering.
//!
//! Applied at admission time, before any protocol negotiation, so a
//! rejected source incurs no handshake cost.

use std::collections::HashSet;
use std::net::IpAddr;

/// Allow-list of client addresses permitted to use the relay.
///
/// An empty set means unrestricted: every source is permitted.
#[derive(Debug, Clone, Default)]
pub struct SourceFilter {
    allowed: HashSet<IpAddr>,
}

impl SourceFilter {
    /// Build the filter from the configured allow-list.
    pub fn new(allowed_ips: &[IpAddr]) -> Self {
        Self {
            allowed: allowed_ips.iter().copied().collect(),
        }
    }

    /// Returns true if `source` may proceed to protocol negotiation.
    pub fn permits(&self, source: IpAddr) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&source)
    }

    /// True when no allow-list is configured.
    pub fn is_unrestricted(&self) -> bool {
        self.allowed.is_empty()
    }
}
