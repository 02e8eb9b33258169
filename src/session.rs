//! TLS I/O adapter.
//!
//! The transfer engine drives any type implementing [`TlsSession`]. The
//! trait narrows the TLS engine's many native statuses down to the closed
//! [`IoCode`] set the retry loop understands, and exposes the underlying
//! socket descriptor for readiness multiplexing.
//!
//! A blanket implementation covers `openssl::ssl::SslStream` over any
//! readable/writable stream with a raw descriptor.

use openssl::ssl::{ErrorCode, SslStream};
use std::io::{Read, Write};
use std::os::unix::io::{AsRawFd, RawFd};

/// Semantic classification of one TLS read or write attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoCode {
    /// The engine consumed or produced this many bytes. On the write path
    /// this is the full buffer: the engine either takes everything or asks
    /// to be called again.
    Progressed(usize),
    /// The identical call must be retried once the socket is readable.
    WantRead,
    /// The identical call must be retried once the socket is writable.
    WantWrite,
    /// The peer performed a clean TLS-level shutdown.
    CleanClose,
    /// Any other native status: connect/accept-phase codes, X.509 lookup
    /// pause, async-job pause, syscall failure, or an undocumented code.
    Fatal(String),
}

/// One live TLS session, as seen by the transfer engine.
///
/// Implementations own the engine handle for the duration of a call; the
/// engine itself never constructs or destroys sessions. A session is bound
/// to exactly one socket descriptor, which must not change during a call.
pub trait TlsSession {
    /// The socket descriptor the session is bound to, if one is available.
    fn raw_fd(&self) -> Option<RawFd>;

    /// Attempt to write the whole buffer through the TLS engine.
    fn attempt_write(&mut self, buf: &[u8]) -> IoCode;

    /// Attempt to read into the buffer through the TLS engine.
    fn attempt_read(&mut self, buf: &mut [u8]) -> IoCode;

    /// Shut the underlying transport down, both directions.
    ///
    /// Invoked by the engine at most once per call, only when the peer is
    /// detected gone. Subsequent use of the connection fails predictably.
    fn close_transport(&mut self);
}

/// Map a native TLS status onto an [`IoCode`].
///
/// `detail` carries the engine's own rendering of the failure; the raw code
/// is embedded in the fatal message for diagnosability.
fn classify(op: &str, code: ErrorCode, detail: &str) -> IoCode {
    if code == ErrorCode::WANT_READ {
        IoCode::WantRead
    } else if code == ErrorCode::WANT_WRITE {
        IoCode::WantWrite
    } else if code == ErrorCode::ZERO_RETURN {
        IoCode::CleanClose
    } else {
        IoCode::Fatal(format!(
            "{op}: unrecoverable TLS status {code:?}: {detail}"
        ))
    }
}

impl<S: Read + Write + AsRawFd> TlsSession for SslStream<S> {
    fn raw_fd(&self) -> Option<RawFd> {
        let fd = self.get_ref().as_raw_fd();
        if fd < 0 {
            None
        } else {
            Some(fd)
        }
    }

    fn attempt_write(&mut self, buf: &[u8]) -> IoCode {
        match self.ssl_write(buf) {
            Ok(n) => IoCode::Progressed(n),
            Err(e) => classify("SSL_write", e.code(), &e.to_string()),
        }
    }

    fn attempt_read(&mut self, buf: &mut [u8]) -> IoCode {
        match self.ssl_read(buf) {
            Ok(n) => IoCode::Progressed(n),
            Err(e) => classify("SSL_read", e.code(), &e.to_string()),
        }
    }

    fn close_transport(&mut self) {
        // The descriptor is owned by the stream inside the session, so it
        // cannot be close(2)d here; a full shutdown has the same observable
        // effect and no double-close hazard.
        let fd = self.get_ref().as_raw_fd();
        if fd >= 0 {
            unsafe {
                libc::shutdown(fd, libc::SHUT_RDWR);
            }
        }
    }
}
