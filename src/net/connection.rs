//! Admitted-connection handle and lifecycle tracking.
//!
//! # Responsibilities
//! - Tie an accepted stream to its admission slot for the connection's lifetime
//! - Generate unique connection IDs for tracing
//! - Guarantee exactly-once slot release on close, error paths included

use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio::sync::OwnedSemaphorePermit;

use crate::net::timeout::IdleTimeout;

/// Global atomic counter for connection IDs.
/// Relaxed ordering is sufficient since we only need uniqueness.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for an admitted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// An admitted connection holding its admission slot.
///
/// The handle owns the idle-timeout-wrapped stream and the semaphore permit
/// backing its slot. Dropping the handle releases the slot; drop semantics
/// make the release exactly-once however the close is triggered (explicit
/// drop, idle timeout, engine-driven closure, or task panic).
#[derive(Debug)]
pub struct GuardedConn {
    // Declared before the stream so the slot is released first on drop.
    permit: Option<OwnedSemaphorePermit>,
    stream: IdleTimeout<TcpStream>,
    id: ConnectionId,
    peer: SocketAddr,
}

impl GuardedConn {
    pub(crate) fn new(
        stream: IdleTimeout<TcpStream>,
        permit: OwnedSemaphorePermit,
        peer: SocketAddr,
    ) -> Self {
        Self {
            permit: Some(permit),
            stream,
            id: ConnectionId::new(),
            peer,
        }
    }

    /// This connection's ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// The client's address.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

impl Drop for GuardedConn {
    fn drop(&mut self) {
        // The permit is dropped here, before the stream, releasing the slot.
        self.permit.take();
        tracing::trace!(connection_id = %self.id, "Connection closed");
    }
}

impl AsyncRead for GuardedConn {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().stream).poll_read(cx, buf)
    }
}

impl AsyncWrite for GuardedConn {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().stream).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().stream).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().stream).poll_shutdown(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_id_unique() {
        let id1 = ConnectionId::new();
        let id2 = ConnectionId::new();
        assert_ne!(id1, id2);
    }
}
