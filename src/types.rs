//! Core types for the transfer engine.

// ============================================================================
// Transfer outcome
// ============================================================================

/// Terminal result of one `transmit` or `receive` call.
///
/// Exactly one outcome is produced per call. `Timeout` and `Closed` are
/// expected, recoverable conditions; only `Error` indicates an operation
/// failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The operation completed in full.
    Ready,
    /// The deadline passed before the operation completed.
    Timeout,
    /// The peer ended the connection, either by a transport-level disconnect
    /// or a clean TLS shutdown.
    Closed,
    /// An unrecoverable condition, with a diagnostic message.
    Error(String),
}

impl TransferOutcome {
    /// Whether the operation completed in full.
    pub fn is_ready(&self) -> bool {
        matches!(self, TransferOutcome::Ready)
    }

    /// Whether the peer ended the connection.
    pub fn is_closed(&self) -> bool {
        matches!(self, TransferOutcome::Closed)
    }

    /// Whether the deadline passed before completion.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransferOutcome::Timeout)
    }
}

// ============================================================================
// Per-call callbacks
// ============================================================================

/// Completion callback invoked exactly once, just before a transfer call
/// returns.
///
/// All methods default to no-ops, so an implementation only overrides the
/// outcomes it cares about. `id` is an opaque identity derived from the
/// buffer's base address, useful only for correlating log lines across the
/// callback and the caller.
pub trait TransferCallback {
    /// The transfer completed in full.
    fn on_ready(&mut self, _id: usize) {}

    /// The deadline passed before the transfer completed.
    fn on_timeout(&mut self, _id: usize) {}

    /// The peer ended the connection.
    fn on_closed(&mut self, _id: usize) {}

    /// The transfer failed with an unrecoverable condition.
    fn on_error(&mut self, _id: usize, _message: &str) {}
}

/// Progress monitor invoked on every retry of a transfer.
///
/// Receives `(bytes_transferred, total_bytes)`. The TLS engine cannot report
/// partial byte counts mid-transfer, so `bytes_transferred` is zero on every
/// invocation except the final one after an early stop. Returning `false`
/// requests early termination: the call then reports `Ready` without
/// completing the full byte count.
pub type ProgressMonitor<'a> = &'a mut dyn FnMut(usize, usize) -> bool;
