//! Hash algorithms exposed by the crate.
//!
//! - SHA3-512 derives signing scalars and challenges
//! - SHA3-256 turns an ECDH point into a symmetric key
//! - RIPEMD-160 is not used internally; it is exposed for address
//!   derivation on top of public keys
//!
//! All functions are one-shot and return fixed-size arrays.

use ripemd::Ripemd160;
use sha3::{Digest, Sha3_256, Sha3_512};

/// SHA3-256 of `input`.
pub fn sha3_256(input: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    output.copy_from_slice(&Sha3_256::digest(input));

    output
}

/// SHA3-512 of `input`.
pub fn sha3_512(input: &[u8]) -> [u8; 64] {
    sha3_512_parts(&[input])
}

/// SHA3-512 of the concatenation of `parts`, without building it.
pub fn sha3_512_parts(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Sha3_512::new();

    for part in parts {
        hasher.update(part);
    }

    let mut output = [0u8; 64];
    output.copy_from_slice(&hasher.finalize());

    output
}

/// RIPEMD-160 of `input`.
pub fn ripemd160(input: &[u8]) -> [u8; 20] {
    let mut output = [0u8; 20];
    output.copy_from_slice(&Ripemd160::digest(input));

    output
}
