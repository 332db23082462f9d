//! EdDSA over Edwards25519 with SHA3-512.
//!
//! Signing follows the Ed25519 construction with every SHA-512 call
//! replaced by SHA3-512:
//!
//! ```text
//! h = SHA3-512(seed)
//! a = clamp(h[0..32])
//! r = SHA3-512(h[32..64] ‖ M) mod ℓ
//! R = r·B
//! k = SHA3-512(R ‖ A ‖ M) mod ℓ
//! S = (r + k·a) mod ℓ
//! ```
//!
//! Verification recomputes `R' = S·B − k·A` and compares encodings. It
//! never errors: every malformed input simply fails to verify.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::ed25519::{BASE_POINT, EncodedFieldElement, GeP3, PrecomputedPoint, scalar};
use crate::error::{Error, Result};
use crate::hash;
use crate::keys::KeyPair;

/// Length of a binary signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// An `(R, S)` signature pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
}

impl Signature {
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// Splits a 64-byte `R ‖ S` string.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSignatureLength`] for any other length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(Error::InvalidSignatureLength(bytes.len()));
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(Signature { r, s })
    }

    pub fn from_hex(input: &str) -> Result<Self> {
        Self::from_bytes(&hex::decode(input)?)
    }

    /// The encoded point `R`.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// The scalar `S`.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// `R ‖ S`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);

        out
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.to_bytes()))
    }
}

/// Digital signature algorithm bound to a key pair.
pub trait DsaSigner {
    /// Signs `message`. Deterministic: the same key and message always give
    /// the same signature.
    fn sign(&self, message: &[u8]) -> Result<Signature>;

    /// `true` iff `signature` is a valid signature of `message`.
    fn verify(&self, message: &[u8], signature: &Signature) -> bool;

    /// `S` is non-zero and below the group order.
    fn is_canonical_signature(&self, signature: &Signature) -> bool;

    /// Reduces `S` modulo the group order, keeping `R`.
    fn make_signature_canonical(&self, signature: &Signature) -> Signature;
}

/// Ed25519/SHA3-512 signer.
#[derive(Debug, Clone)]
pub struct Ed25519DsaSigner {
    key_pair: KeyPair,
}

impl Ed25519DsaSigner {
    pub fn new(key_pair: KeyPair) -> Self {
        Ed25519DsaSigner { key_pair }
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }
}

/// `SHA3-512(R ‖ A ‖ M) mod ℓ`.
fn challenge(r: &[u8], public_key: &[u8], message: &[u8]) -> EncodedFieldElement {
    EncodedFieldElement::from(hash::sha3_512_parts(&[r, public_key, message])).mod_q()
}

impl DsaSigner for Ed25519DsaSigner {
    fn sign(&self, message: &[u8]) -> Result<Signature> {
        let private_key = self.key_pair.require_private_key()?;
        let public_key = self.key_pair.public_key().raw();

        let expanded = private_key.expand();
        let a = private_key.clamped_scalar();

        let nonce = Zeroizing::new(hash::sha3_512_parts(&[&expanded[32..], message]));
        let r = EncodedFieldElement::from(*nonce).mod_q();

        let encoded_r = BASE_POINT.scalar_multiply(&r).to_bytes();

        let k = challenge(&encoded_r, public_key, message);
        let s = k.multiply_and_add_mod_q(&EncodedFieldElement::from(*a), &r);

        let signature = Signature::new(encoded_r, s.to_scalar_bytes());

        if !self.is_canonical_signature(&signature) {
            tracing::error!(signature = %signature, "generated signature is not canonical");
            return Err(Error::NonCanonicalSignatureGenerated);
        }

        Ok(signature)
    }

    fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        if !self.is_canonical_signature(signature) {
            tracing::debug!("rejecting non-canonical signature");
            return false;
        }

        let public_key = self.key_pair.public_key().raw();

        if public_key.iter().all(|&byte| byte == 0) {
            tracing::debug!("rejecting signature for all-zero public key");
            return false;
        }

        let Some(point) = self
            .key_pair
            .public_key()
            .to_array()
            .and_then(|bytes| GeP3::decode(&bytes).ok())
        else {
            tracing::debug!("rejecting signature for undecodable public key");
            return false;
        };

        let a = PrecomputedPoint::new(point);
        let k = challenge(&signature.r, public_key, message);
        let s = EncodedFieldElement::from(signature.s);

        let calculated_r = BASE_POINT.double_scalar_multiply_variable_time(&a, &k, &s);

        calculated_r.to_bytes().ct_eq(&signature.r).into()
    }

    fn is_canonical_signature(&self, signature: &Signature) -> bool {
        EncodedFieldElement::from(signature.s).is_non_zero() && scalar::is_canonical(&signature.s)
    }

    fn make_signature_canonical(&self, signature: &Signature) -> Signature {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&signature.s);

        let s = EncodedFieldElement::from(wide).mod_q();

        Signature::new(signature.r, s.to_scalar_bytes())
    }
}
