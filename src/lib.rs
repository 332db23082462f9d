//! Ed25519 signatures and ECDH encryption with SHA3 hashing.
//!
//! This crate implements the key, signature and encryption primitives of the
//! NEM/Catapult family of blockchains on top of a from-scratch Edwards25519
//! implementation. The curve arithmetic is the Ed25519 reference design;
//! the difference to RFC 8032 is the hash: every SHA-512 is a SHA3-512.
//!
//! # Module overview
//!
//! - `ed25519`  
//!   Field arithmetic over GF(2²⁵⁵ − 19), scalar arithmetic modulo the
//!   group order, group elements in six coordinate systems, and
//!   precomputed-table scalar multiplication.
//!
//! - `hash`  
//!   SHA3-256, SHA3-512 and RIPEMD-160.
//!
//! - `rng`  
//!   Fallible access to system randomness.
//!
//! - `keys`  
//!   Private keys, public keys, key pairs, key generation and analysis.
//!
//! - `signatures`  
//!   The EdDSA signer: sign, verify and canonical signature handling.
//!
//! - `encryption`  
//!   ECDH-derived shared keys and the salt ‖ IV ‖ AES-256-CBC envelope.
//!
//! - `engine`  
//!   The [`CryptoEngine`] factory and its Ed25519 implementation.
//!
//! # Example
//!
//! ```
//! use nem_crypto::{CryptoEngine, DsaSigner, KeyGenerator, default_engine};
//!
//! let engine = default_engine();
//! let key_pair = engine.create_key_generator().generate_key_pair()?;
//! let signer = engine.create_dsa_signer(key_pair);
//!
//! let signature = signer.sign(b"transfer 100 xem")?;
//! assert!(signer.verify(b"transfer 100 xem", &signature));
//! # Ok::<(), nem_crypto::Error>(())
//! ```
//!
//! Logging goes through `tracing`; the crate never installs a subscriber and
//! never logs secret material.

pub mod ed25519;
pub mod encryption;
pub mod engine;
pub mod error;
pub mod hash;
pub mod keys;
pub mod rng;
pub mod signatures;

pub use encryption::{BlockCipher, Ed25519BlockCipher};
pub use engine::{CryptoEngine, Ed25519Engine, default_engine};
pub use error::{Error, Result};
pub use keys::{
    Ed25519KeyAnalyzer, Ed25519KeyGenerator, KeyAnalyzer, KeyGenerator, KeyPair, PrivateKey,
    PublicKey,
};
pub use signatures::{DsaSigner, Ed25519DsaSigner, Signature};
