//! Sliding idle-timeout stream wrapper.
//!
//! # Responsibilities
//! - Wrap a bidirectional stream so every read/write call sets a fresh
//!   deadline of now + idle timeout for its own direction
//! - Surface an expired deadline as an `io::ErrorKind::TimedOut` stream error
//!
//! # Design Decisions
//! - Deadlines are per-direction: a read call arms the read deadline, a
//!   write call arms the write deadline. Steady traffic on one direction
//!   never keeps a stalled opposite direction alive
//! - A timed-out poll resolves to an ordinary I/O error; the connection then
//!   closes through the normal path, which releases its admission slot

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::time::{sleep_until, Instant, Sleep};

/// Stream wrapper enforcing sliding per-direction idle deadlines.
#[derive(Debug)]
pub struct IdleTimeout<S> {
    inner: S,
    timeout: Duration,
    read_deadline: Pin<Box<Sleep>>,
    /// True while a read call is in flight; repolls of the same call must
    /// not re-arm the deadline.
    read_in_flight: bool,
    write_deadline: Pin<Box<Sleep>>,
    write_in_flight: bool,
}

impl<S> IdleTimeout<S> {
    /// Wrap `inner`; each direction's deadline is armed when a call on
    /// that direction starts.
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self {
            inner,
            timeout,
            read_deadline: Box::pin(sleep_until(Instant::now() + timeout)),
            read_in_flight: false,
            write_deadline: Box::pin(sleep_until(Instant::now() + timeout)),
            write_in_flight: false,
        }
    }

    fn timed_out() -> io::Error {
        io::Error::new(io::ErrorKind::TimedOut, "connection idle timeout exceeded")
    }
}

impl<S: AsyncRead + Unpin> AsyncRead for IdleTimeout<S> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if !this.read_in_flight {
            let next = Instant::now() + this.timeout;
            this.read_deadline.as_mut().reset(next);
            this.read_in_flight = true;
        }
        match Pin::new(&mut this.inner).poll_read(cx, buf) {
            Poll::Ready(result) => {
                this.read_in_flight = false;
                Poll::Ready(result)
            }
            Poll::Pending => {
                if this.read_deadline.as_mut().poll(cx).is_ready() {
                    this.read_in_flight = false;
                    Poll::Ready(Err(Self::timed_out()))
                } else {
                    Poll::Pending
                }
            }
        }
    }
}

impl<S: AsyncWrite + Unpin> AsyncWrite for IdleTimeout<S> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        if !this.write_in_flight {
            let next = Instant::now() + this.timeout;
            this.write_deadline.as_mut().reset(next);
            this.write_in_flight = true;
        }
        match Pin::new(&mut this.inner).poll_write(cx, buf) {
            Poll::Ready(result) => {
                this.write_in_flight = false;
                Poll::Ready(result)
            }
            Poll::Pending => {
                if this.write_deadline.as_mut().poll(cx).is_ready() {
                    this.write_in_flight = false;
                    Poll::Ready(Err(Self::timed_out()))
                } else {
                    Poll::Pending
                }
            }
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}
