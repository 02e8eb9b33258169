use std::fmt;
use std::io;

/// Errors returned by the transfer engine and key manager.
#[derive(Debug)]
pub enum Error {
    /// Underlying socket or file operation failed.
    Io(io::Error),
    /// The session could not produce a usable socket descriptor.
    MissingSocket,
    /// The TLS engine reported an unrecoverable status.
    Tls(String),
    /// Key generation failed at the native layer.
    KeyGeneration(String),
    /// An export was requested before any key pair was generated.
    NoKey,
    /// Serialized key material could not be converted to text.
    Encoding(String),
    /// Key material could not be written to the requested file.
    File(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::MissingSocket => write!(f, "missing socket descriptor from TLS session"),
            Error::Tls(msg) => write!(f, "TLS engine: {msg}"),
            Error::KeyGeneration(msg) => write!(f, "key generation: {msg}"),
            Error::NoKey => write!(f, "no key pair has been generated"),
            Error::Encoding(msg) => write!(f, "encoding: {msg}"),
            Error::File(msg) => write!(f, "file: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<openssl::error::ErrorStack> for Error {
    fn from(e: openssl::error::ErrorStack) -> Self {
        Error::Tls(e.to_string())
    }
}

/// Result alias used by every fallible public operation.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_io() {
        let e = Error::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(e.to_string().contains("denied"));
    }

    #[test]
    fn test_display_missing_socket() {
        let e = Error::MissingSocket;
        assert!(e.to_string().contains("missing socket"));
    }

    #[test]
    fn test_source_io() {
        let e = Error::from(io::Error::other("inner"));
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn test_source_non_io() {
        let e = Error::NoKey;
        assert!(std::error::Error::source(&e).is_none());
    }
}
