//! Transfer engine: deadline-bounded transmit/receive over a TLS session.
//!
//! The TLS engine can answer any read or write with "call me again once the
//! socket is readable/writable". The engine here turns that into a plain
//! retry loop: wait for readiness (bounded by an absolute deadline computed
//! once at call entry), attempt the operation with identical arguments, and
//! map every possible answer onto one of four terminal outcomes. The loop
//! never busy-spins: every retry blocks inside the readiness gate.
//!
//! The socket is shut down by this engine only when the peer is detected
//! gone, and at most once per call. On `Ready` and `Error` outcomes the
//! socket's lifetime stays with the caller.

use crate::error::Error;
use crate::readiness::{Readiness, ReadinessGate};
use crate::session::{IoCode, TlsSession};
use crate::types::{ProgressMonitor, TransferCallback, TransferOutcome};
use log::{debug, trace};
use std::time::{Duration, Instant};

/// Logical direction of one transfer call. A want-retry never consumes
/// partial data, so the buffer is carried unchanged across iterations.
enum Direction<'a> {
    Transmit(&'a [u8]),
    Receive(&'a mut [u8]),
}

impl Direction<'_> {
    fn len(&self) -> usize {
        match self {
            Direction::Transmit(buf) => buf.len(),
            Direction::Receive(buf) => buf.len(),
        }
    }

    /// Opaque identity derived from the buffer address, for log correlation.
    fn id(&self) -> usize {
        match self {
            Direction::Transmit(buf) => buf.as_ptr() as usize,
            Direction::Receive(buf) => buf.as_ptr() as usize,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Direction::Transmit(_) => "transmit",
            Direction::Receive(_) => "receive",
        }
    }
}

/// Transmit the buffer content over a TLS session.
///
/// Blocks the calling thread until the engine accepts the whole buffer, the
/// `timeout` (resolved to an absolute deadline at call entry) passes, the
/// peer ends the connection, or an unrecoverable condition occurs. The
/// outcome is reported through `callback` before it is returned.
///
/// Progress monitoring for this transport cannot report partial byte counts
/// mid-transfer; `progress` is invoked with zero bytes transferred on every
/// retry, and returning `false` from it ends the call early with `Ready`.
///
/// An empty buffer is a no-op success.
pub fn transmit<S: TlsSession + ?Sized>(
    session: &mut S,
    buffer: &[u8],
    timeout: Duration,
    callback: Option<&mut dyn TransferCallback>,
    progress: Option<ProgressMonitor<'_>>,
) -> TransferOutcome {
    drive(session, Direction::Transmit(buffer), timeout, callback, progress)
}

/// Receive into the buffer from a TLS session.
///
/// One successful engine read completes the call; the buffer length only
/// caps how much can arrive in that read. A zero-capacity buffer is a no-op
/// success. Deadline, callback, and progress semantics match [`transmit`].
pub fn receive<S: TlsSession + ?Sized>(
    session: &mut S,
    buffer: &mut [u8],
    timeout: Duration,
    callback: Option<&mut dyn TransferCallback>,
    progress: Option<ProgressMonitor<'_>>,
) -> TransferOutcome {
    drive(session, Direction::Receive(buffer), timeout, callback, progress)
}

/// Transmit a string, UTF-8 encoded, over a TLS session.
///
/// `&str` is valid UTF-8 by construction, so unlike loosely-typed callers of
/// the engine there is no encoding failure path here.
pub fn transmit_str<S: TlsSession + ?Sized>(
    session: &mut S,
    text: &str,
    timeout: Duration,
    callback: Option<&mut dyn TransferCallback>,
    progress: Option<ProgressMonitor<'_>>,
) -> TransferOutcome {
    transmit(session, text.as_bytes(), timeout, callback, progress)
}

/// Invoke the progress monitor, if any. Absent monitors never stop a call.
fn note_progress(
    progress: &mut Option<ProgressMonitor<'_>>,
    transferred: usize,
    total: usize,
) -> bool {
    match progress {
        Some(monitor) => monitor(transferred, total),
        None => true,
    }
}

fn drive<S: TlsSession + ?Sized>(
    session: &mut S,
    mut direction: Direction<'_>,
    timeout: Duration,
    mut callback: Option<&mut dyn TransferCallback>,
    mut progress: Option<ProgressMonitor<'_>>,
) -> TransferOutcome {
    let id = direction.id();
    let total = direction.len();

    // Resolve the socket before anything else; a session without one cannot
    // be waited on.
    let fd = match session.raw_fd() {
        Some(fd) => fd,
        None => {
            let message = Error::MissingSocket.to_string();
            let _ = note_progress(&mut progress, 0, 0);
            if let Some(cb) = callback.as_mut() {
                cb.on_error(id, &message);
            }
            return TransferOutcome::Error(message);
        }
    };

    // Empty transfers complete without touching the socket.
    if total == 0 {
        let _ = note_progress(&mut progress, 0, 0);
        if let Some(cb) = callback.as_mut() {
            cb.on_ready(id);
        }
        return TransferOutcome::Ready;
    }

    // The deadline is absolute and computed exactly once; retries never
    // extend it.
    let deadline = Instant::now() + timeout;

    let mut gate = match ReadinessGate::new(fd) {
        Ok(gate) => gate,
        Err(e) => {
            let message = format!("failed to observe socket readiness: {e}");
            let _ = note_progress(&mut progress, 0, total);
            if let Some(cb) = callback.as_mut() {
                cb.on_error(id, &message);
            }
            return TransferOutcome::Error(message);
        }
    };

    loop {
        // Wait for both directions regardless of the logical operation: a
        // TLS re-handshake can want either.
        match gate.wait(deadline, true, true) {
            Readiness::Timeout => {
                let _ = note_progress(&mut progress, 0, total);
                if let Some(cb) = callback.as_mut() {
                    cb.on_timeout(id);
                }
                return TransferOutcome::Timeout;
            }
            Readiness::Closed => {
                session.close_transport();
                let _ = note_progress(&mut progress, 0, total);
                if let Some(cb) = callback.as_mut() {
                    cb.on_closed(id);
                }
                return TransferOutcome::Closed;
            }
            Readiness::Error(message) => {
                let _ = note_progress(&mut progress, 0, total);
                if let Some(cb) = callback.as_mut() {
                    cb.on_error(id, &message);
                }
                return TransferOutcome::Error(message);
            }
            Readiness::Ready => {}
        }

        let code = match &mut direction {
            Direction::Transmit(buf) => session.attempt_write(*buf),
            Direction::Receive(buf) => session.attempt_read(&mut **buf),
        };

        match code {
            IoCode::Progressed(n) => {
                trace!("{} {id:#x}: completed, {n} of {total} bytes", direction.label());
                let _ = note_progress(&mut progress, 0, total);
                if let Some(cb) = callback.as_mut() {
                    cb.on_ready(id);
                }
                return TransferOutcome::Ready;
            }
            IoCode::CleanClose => {
                session.close_transport();
                let _ = note_progress(&mut progress, 0, total);
                if let Some(cb) = callback.as_mut() {
                    cb.on_closed(id);
                }
                return TransferOutcome::Closed;
            }
            IoCode::WantRead | IoCode::WantWrite => {
                trace!("{} {id:#x}: engine wants retry", direction.label());
                if !note_progress(&mut progress, 0, total) {
                    // The monitor asked to stop: early, successful
                    // termination.
                    let _ = note_progress(&mut progress, total, total);
                    if let Some(cb) = callback.as_mut() {
                        cb.on_ready(id);
                    }
                    return TransferOutcome::Ready;
                }
                // Retry with the identical buffer and offset; a want result
                // never consumes data.
            }
            IoCode::Fatal(message) => {
                debug!("{} {id:#x}: {message}", direction.label());
                if let Some(cb) = callback.as_mut() {
                    cb.on_error(id, &message);
                }
                return TransferOutcome::Error(message);
            }
        }
    }
}
