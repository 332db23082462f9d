//! Error type shared by every fallible operation in the crate.
//!
//! Arithmetic on field and group elements is total and never fails. Errors
//! only surface at the boundaries: decoding byte strings, constructing keys,
//! converting between coordinate systems through the dynamic
//! [`GroupElement`](crate::ed25519::GroupElement) facade, and talking to the
//! system randomness source.

use crate::ed25519::CoordinateSystem;

/// Errors reported by this crate.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An encoded field element or group element has the wrong size.
    #[error("invalid encoding length {0}, expected 32 or 64 bytes")]
    InvalidEncodingLength(usize),

    /// A public key is not a 32-byte compressed point.
    #[error("public key must be in compressed form")]
    PublicKeyNotCompressed,

    /// Signing or decrypting requires a private key the key pair does not hold.
    #[error("key pair does not hold a private key")]
    MissingPrivateKey,

    /// A 32-byte string does not decode to a point on the curve.
    #[error("encoding does not describe a point on the curve")]
    InvalidCurvePoint,

    /// A freshly generated signature failed the canonical check.
    ///
    /// This indicates an internal inconsistency, retrying will not help.
    #[error("generated signature is not canonical")]
    NonCanonicalSignatureGenerated,

    /// The requested coordinate system cannot be reached from the current one.
    #[error("cannot convert group element from {from:?} to {to:?}")]
    UnsupportedConversion {
        from: CoordinateSystem,
        to: CoordinateSystem,
    },

    /// A group operation was requested on an element in the wrong coordinate system.
    #[error("{operation} is not defined for {system:?} coordinates")]
    UnsupportedOperation {
        operation: &'static str,
        system: CoordinateSystem,
    },

    /// A binary signature is not exactly 64 bytes.
    #[error("binary signature must be 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// The operating system refused to provide random bytes.
    #[error("system randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// An encrypted envelope is shorter than salt, IV and one cipher block.
    #[error("ciphertext of {0} bytes is too short")]
    CiphertextTooShort(usize),

    /// The ciphertext did not decrypt to a correctly padded plaintext.
    #[error("decryption failed")]
    DecryptionFailed,
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::InvalidHex(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
