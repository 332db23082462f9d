//! Key material and key management.
//!
//! A [`PrivateKey`] is a raw 32-byte seed. The signing scalar is never
//! stored; it is derived on demand by hashing the seed with SHA3-512 and
//! clamping the low half. A [`PublicKey`] is the compressed encoding of
//! `scalar·B`.
//!
//! A [`KeyPair`] always carries a public key and optionally the private key
//! it was derived from. Verification-only pairs hold no private key.

use std::fmt;

use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::ed25519::{BASE_POINT, EncodedFieldElement, scalar};
use crate::error::{Error, Result};
use crate::hash;
use crate::rng::{self, OsRng};

/// Length of a private key seed and of a compressed public key.
pub const KEY_LENGTH: usize = 32;

/// A 32-byte private key seed. Zeroized on drop.
#[derive(Clone)]
pub struct PrivateKey([u8; KEY_LENGTH]);

impl PrivateKey {
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        PrivateKey(bytes)
    }

    /// Parses a 64-character hex string.
    pub fn from_hex(input: &str) -> Result<Self> {
        let decoded = Zeroizing::new(hex::decode(input)?);

        let bytes: [u8; KEY_LENGTH] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| Error::InvalidEncodingLength(decoded.len()))?;

        Ok(PrivateKey(bytes))
    }

    pub fn raw(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }

    /// `SHA3-512(seed)`: the clamped scalar comes from the low half, the
    /// nonce prefix from the high half.
    pub(crate) fn expand(&self) -> Zeroizing<[u8; 64]> {
        Zeroizing::new(hash::sha3_512(&self.0))
    }

    /// The clamped secret scalar used for signing and key agreement.
    pub(crate) fn clamped_scalar(&self) -> Zeroizing<[u8; 32]> {
        let expanded = self.expand();

        let mut a = Zeroizing::new([0u8; 32]);
        a.copy_from_slice(&expanded[..32]);
        scalar::clamp(&mut a);

        a
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// A public key as raw bytes.
///
/// Any byte string can be wrapped; [`KeyAnalyzer::is_key_compressed`]
/// decides whether it is usable. Key pairs only accept compressed keys.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey(Vec<u8>);

impl PublicKey {
    pub fn new(raw: impl Into<Vec<u8>>) -> Self {
        PublicKey(raw.into())
    }

    pub fn from_hex(input: &str) -> Result<Self> {
        Ok(PublicKey(hex::decode(input)?))
    }

    pub fn raw(&self) -> &[u8] {
        &self.0
    }

    /// The key as a fixed 32-byte array, if it has that length.
    pub fn to_array(&self) -> Option<[u8; KEY_LENGTH]> {
        self.0.as_slice().try_into().ok()
    }
}

impl From<[u8; KEY_LENGTH]> for PublicKey {
    fn from(bytes: [u8; KEY_LENGTH]) -> Self {
        PublicKey(bytes.to_vec())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

/// Upper-case hex.
impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(&self.0))
    }
}

/// Inspects public keys.
pub trait KeyAnalyzer {
    /// `true` if `public_key` has the compressed encoding length.
    fn is_key_compressed(&self, public_key: &PublicKey) -> bool;
}

/// Creates key pairs.
pub trait KeyGenerator {
    /// A fresh key pair seeded from the operating system.
    fn generate_key_pair(&self) -> Result<KeyPair> {
        self.generate_key_pair_with_rng(&mut OsRng)
    }

    /// A fresh key pair seeded from `rng`.
    fn generate_key_pair_with_rng<R>(&self, rng: &mut R) -> Result<KeyPair>
    where
        R: RngCore + CryptoRng + ?Sized;

    /// The public key belonging to `private_key`.
    fn derive_public_key(&self, private_key: &PrivateKey) -> PublicKey;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519KeyAnalyzer;

impl KeyAnalyzer for Ed25519KeyAnalyzer {
    fn is_key_compressed(&self, public_key: &PublicKey) -> bool {
        public_key.raw().len() == KEY_LENGTH
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519KeyGenerator;

impl KeyGenerator for Ed25519KeyGenerator {
    fn generate_key_pair_with_rng<R>(&self, rng: &mut R) -> Result<KeyPair>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let seed = Zeroizing::new(rng::random_bytes::<KEY_LENGTH, R>(rng)?);
        let key_pair = KeyPair::from_private_key(PrivateKey::from_bytes(*seed));

        tracing::debug!(public_key = %key_pair.public_key(), "generated key pair");

        Ok(key_pair)
    }

    fn derive_public_key(&self, private_key: &PrivateKey) -> PublicKey {
        let a = private_key.clamped_scalar();
        let point = BASE_POINT.scalar_multiply(&EncodedFieldElement::from(*a));

        PublicKey::from(point.to_bytes())
    }
}

/// A public key with an optional private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    private_key: Option<PrivateKey>,
    public_key: PublicKey,
}

impl KeyPair {
    /// Pairs the given keys. The public key is not re-derived.
    ///
    /// # Errors
    ///
    /// [`Error::PublicKeyNotCompressed`] unless the public key is 32 bytes.
    pub fn new(private_key: Option<PrivateKey>, public_key: PublicKey) -> Result<Self> {
        if !Ed25519KeyAnalyzer.is_key_compressed(&public_key) {
            return Err(Error::PublicKeyNotCompressed);
        }

        Ok(KeyPair {
            private_key,
            public_key,
        })
    }

    /// Derives the public key from `private_key`.
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = Ed25519KeyGenerator.derive_public_key(&private_key);

        KeyPair {
            private_key: Some(private_key),
            public_key,
        }
    }

    /// A verification-only pair.
    pub fn from_public_key(public_key: PublicKey) -> Result<Self> {
        Self::new(None, public_key)
    }

    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    pub(crate) fn require_private_key(&self) -> Result<&PrivateKey> {
        self.private_key.as_ref().ok_or(Error::MissingPrivateKey)
    }
}
