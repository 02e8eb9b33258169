//! File encodings for key and certificate material.

use openssl::ssl::SslFiletype;
use std::path::{Path, PathBuf};

/// Supported on-disk encodings for keys and certificates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEncoding {
    /// Single-record binary form (DER). One key or certificate per file.
    Asn1,
    /// Multi-record text form. A PEM file can hold several keys and/or
    /// certificates; often only the first record is used.
    Pem,
}

impl FileEncoding {
    /// The TLS engine's file-type constant for this encoding.
    pub fn as_filetype(&self) -> SslFiletype {
        match self {
            FileEncoding::Asn1 => SslFiletype::ASN1,
            FileEncoding::Pem => SslFiletype::PEM,
        }
    }
}

/// A file containing a key or certificate: a path plus its encoding.
///
/// Pure value; carries no behavior beyond describing an export destination
/// or import source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    /// Location of the file.
    pub path: PathBuf,
    /// How the file content is encoded.
    pub encoding: FileEncoding,
}

impl EncodedFile {
    /// Describe a PEM text file.
    pub fn pem<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            encoding: FileEncoding::Pem,
        }
    }

    /// Describe a single-record DER file.
    pub fn asn1<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            encoding: FileEncoding::Asn1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filetype_mapping() {
        assert_eq!(
            FileEncoding::Pem.as_filetype().as_raw(),
            SslFiletype::PEM.as_raw()
        );
        assert_eq!(
            FileEncoding::Asn1.as_filetype().as_raw(),
            SslFiletype::ASN1.as_raw()
        );
    }

    #[test]
    fn test_constructors() {
        let pem = EncodedFile::pem("/tmp/key.pem");
        assert_eq!(pem.encoding, FileEncoding::Pem);
        assert_eq!(pem.path, PathBuf::from("/tmp/key.pem"));

        let der = EncodedFile::asn1("/tmp/key.der");
        assert_eq!(der.encoding, FileEncoding::Asn1);
    }

    #[test]
    fn test_value_semantics() {
        let a = EncodedFile::pem("/tmp/a.pem");
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, EncodedFile::asn1("/tmp/a.pem"));
    }
}
