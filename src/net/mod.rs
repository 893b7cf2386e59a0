//! Network foundation: admission gate, connection handles, idle timeouts.

pub mod connection;
pub mod listener;
pub mod timeout;

pub use connection::{ConnectionId, GuardedConn};
pub use listener::{AdmissionGate, GateError};
pub use timeout::IdleTimeout;
