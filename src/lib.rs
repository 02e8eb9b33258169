//! tls-transfer - deadline-bounded TLS transfer over non-blocking sockets.
//!
//! A TLS engine driven over a non-blocking socket may answer any read or
//! write with "retry this exact call once the socket is ready". This crate
//! turns that into blocking transmit/receive primitives with a caller-chosen
//! deadline: a readiness gate multiplexes the socket against the deadline,
//! the adapter classifies every engine status into a small semantic set, and
//! the transfer engine loops until one of four terminal outcomes is reached
//! (`Ready`, `Timeout`, `Closed`, `Error`).
//!
//! It also ships a key manager for RSA key-pair generation and PEM/DER
//! export, with optional passphrase encryption of the private half.
//!
//! # Quick start
//!
//! ```ignore
//! use std::time::Duration;
//! use tls_transfer::{transmit, receive, TransferOutcome};
//!
//! // `stream` is an openssl::ssl::SslStream over a non-blocking TcpStream
//! // with the handshake already complete.
//! let outcome = transmit(&mut stream, b"hello", Duration::from_secs(5), None, None);
//! assert!(outcome.is_ready());
//!
//! let mut buf = [0u8; 4096];
//! match receive(&mut stream, &mut buf, Duration::from_secs(5), None, None) {
//!     TransferOutcome::Ready => { /* buf holds the received bytes */ }
//!     TransferOutcome::Timeout => { /* deadline passed; retry later */ }
//!     TransferOutcome::Closed => { /* peer ended the session */ }
//!     TransferOutcome::Error(msg) => eprintln!("transfer failed: {msg}"),
//! }
//! ```
//!
//! # Concurrency model
//!
//! Synchronous, thread-per-call: every operation blocks its calling thread
//! for its entire duration. Driving one session or key manager from two
//! threads concurrently is a caller error; use separate sessions or external
//! synchronization.

mod encoding;
mod error;
mod keys;
mod readiness;
mod session;
mod transfer;
mod types;

// Re-exports
pub use encoding::{EncodedFile, FileEncoding};
pub use error::{Error, Result};
pub use keys::{KeyManager, KeyProtection};
pub use readiness::{Readiness, ReadinessGate};
pub use session::{IoCode, TlsSession};
pub use transfer::{receive, transmit, transmit_str};
pub use types::{ProgressMonitor, TransferCallback, TransferOutcome};
