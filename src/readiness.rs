//! Readiness gate: blocks the calling thread until a socket is ready,
//! a deadline passes, or the peer is gone.
//!
//! This wraps a `mio::Poll` around a single raw descriptor. The gate does
//! not own the descriptor; it only observes readiness. It is created once
//! per transfer call and waited on an unbounded number of times.

use mio::unix::SourceFd;
use mio::{Events, Interest, Poll, Token};
use std::io;
use std::os::unix::io::RawFd;
use std::time::Instant;

const SOCKET: Token = Token(0);

/// Result of one readiness wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// The socket is ready in at least one requested direction.
    Ready,
    /// The deadline passed before the socket became ready.
    Timeout,
    /// The peer disconnected at the transport level, with nothing left
    /// to read.
    Closed,
    /// The multiplexer reported a failure.
    Error(String),
}

/// Readiness multiplexer for a single socket descriptor.
pub struct ReadinessGate {
    poll: Poll,
    events: Events,
    fd: RawFd,
}

impl ReadinessGate {
    /// Create a gate observing `fd`. The descriptor stays owned by the
    /// caller and must outlive the gate.
    pub fn new(fd: RawFd) -> io::Result<Self> {
        let poll = Poll::new()?;
        poll.registry().register(
            &mut SourceFd(&fd),
            SOCKET,
            Interest::READABLE | Interest::WRITABLE,
        )?;
        Ok(Self {
            poll,
            events: Events::with_capacity(4),
            fd,
        })
    }

    /// Block until the socket is ready for the requested directions, the
    /// absolute `deadline` passes, or the peer is detected gone.
    ///
    /// An already-elapsed deadline returns `Timeout` without blocking.
    pub fn wait(&mut self, deadline: Instant, want_read: bool, want_write: bool) -> Readiness {
        let interest = match (want_read, want_write) {
            (true, true) => Interest::READABLE | Interest::WRITABLE,
            (true, false) => Interest::READABLE,
            (false, true) => Interest::WRITABLE,
            (false, false) => {
                return Readiness::Error("readiness wait without any interest".to_string())
            }
        };

        // Re-arm on every wait. mio is edge-triggered, and a retry loop needs
        // the current readiness state, not just new transitions since the
        // last event.
        if let Err(e) = self
            .poll
            .registry()
            .reregister(&mut SourceFd(&self.fd), SOCKET, interest)
        {
            return Readiness::Error(format!("failed to re-arm readiness interest: {e}"));
        }

        loop {
            let remaining = match deadline.checked_duration_since(Instant::now()) {
                Some(d) if !d.is_zero() => d,
                _ => return Readiness::Timeout,
            };

            match self.poll.poll(&mut self.events, Some(remaining)) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Readiness::Error(format!("poll failed: {e}")),
            }

            for event in self.events.iter() {
                // Readiness wins over a closure flag on the same event: the
                // TLS layer must drain buffered records to tell a clean
                // protocol shutdown apart from a transport disconnect.
                if event.is_readable() || event.is_writable() {
                    return Readiness::Ready;
                }
                if event.is_read_closed() || event.is_write_closed() {
                    return Readiness::Closed;
                }
                if event.is_error() {
                    return Readiness::Error("socket error reported by poll".to_string());
                }
            }

            // Spurious or empty wakeup: the deadline check at the top of the
            // loop decides whether to keep waiting.
        }
    }
}

impl Drop for ReadinessGate {
    fn drop(&mut self) {
        let _ = self.poll.registry().deregister(&mut SourceFd(&self.fd));
    }
}
