//! Factory tying the curve to its algorithms.
//!
//! A [`CryptoEngine`] hands out the signer, cipher, key generator and key
//! analyzer for one curve. Only Ed25519 exists; [`default_engine`] returns
//! it.

use crate::ed25519::Curve;
use crate::encryption::{BlockCipher, Ed25519BlockCipher};
use crate::keys::{Ed25519KeyAnalyzer, Ed25519KeyGenerator, KeyAnalyzer, KeyGenerator, KeyPair};
use crate::signatures::{DsaSigner, Ed25519DsaSigner};

/// Creates the algorithm objects for a curve.
pub trait CryptoEngine {
    type DsaSigner: DsaSigner;
    type BlockCipher: BlockCipher;
    type KeyGenerator: KeyGenerator;
    type KeyAnalyzer: KeyAnalyzer;

    fn curve(&self) -> Curve;

    fn create_dsa_signer(&self, key_pair: KeyPair) -> Self::DsaSigner;

    /// A cipher that encrypts from `sender` to `recipient`, or decrypts what
    /// `sender` sent to `recipient`.
    fn create_block_cipher(&self, sender: KeyPair, recipient: KeyPair) -> Self::BlockCipher;

    fn create_key_generator(&self) -> Self::KeyGenerator;

    fn create_key_analyzer(&self) -> Self::KeyAnalyzer;
}

/// Ed25519 with SHA3 hashing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ed25519Engine;

impl CryptoEngine for Ed25519Engine {
    type DsaSigner = Ed25519DsaSigner;
    type BlockCipher = Ed25519BlockCipher;
    type KeyGenerator = Ed25519KeyGenerator;
    type KeyAnalyzer = Ed25519KeyAnalyzer;

    fn curve(&self) -> Curve {
        Curve
    }

    fn create_dsa_signer(&self, key_pair: KeyPair) -> Ed25519DsaSigner {
        Ed25519DsaSigner::new(key_pair)
    }

    fn create_block_cipher(&self, sender: KeyPair, recipient: KeyPair) -> Ed25519BlockCipher {
        Ed25519BlockCipher::new(sender, recipient)
    }

    fn create_key_generator(&self) -> Ed25519KeyGenerator {
        Ed25519KeyGenerator
    }

    fn create_key_analyzer(&self) -> Ed25519KeyAnalyzer {
        Ed25519KeyAnalyzer
    }
}

/// The engine used when none is chosen explicitly.
pub const fn default_engine() -> Ed25519Engine {
    Ed25519Engine
}
