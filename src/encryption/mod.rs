//! ECDH key agreement with an AES-256-CBC envelope.
//!
//! The shared key for a sender `(a, A)` and recipient `(b, B)` is
//!
//! ```text
//! K = SHA3-256(encode(a·B) ⊕ salt)
//! ```
//!
//! where `a` is the clamped scalar of the private key. Both sides arrive at
//! the same point since `a·B = a·b·G = b·A`.
//!
//! An encrypted message is laid out as
//!
//! ```text
//! salt (32) ‖ IV (16) ‖ AES-256-CBC-PKCS7(K, IV, plaintext)
//! ```
//!
//! The envelope is not authenticated. A wrong key or a tampered ciphertext is
//! only caught when the padding fails to check out.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::ed25519::{EncodedFieldElement, GeP3, PrecomputedPoint};
use crate::error::{Error, Result};
use crate::hash;
use crate::keys::{KeyPair, PrivateKey, PublicKey};
use crate::rng::{self, OsRng};

/// Salt length, equal to the shared key length.
pub const SALT_LENGTH: usize = 32;

/// AES block and IV length.
pub const IV_LENGTH: usize = 16;

/// Salt, IV and a single cipher block.
pub const MIN_CIPHERTEXT_LENGTH: usize = SALT_LENGTH + IV_LENGTH + IV_LENGTH;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Symmetric encryption between two key pairs.
pub trait BlockCipher {
    /// Encrypts `plaintext` for the recipient using fresh OS randomness.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_with_rng(plaintext, &mut OsRng)
    }

    /// Encrypts `plaintext` drawing salt and IV from `rng`.
    fn encrypt_with_rng<R>(&self, plaintext: &[u8], rng: &mut R) -> Result<Vec<u8>>
    where
        R: RngCore + CryptoRng + ?Sized;

    /// Decrypts an envelope produced by [`encrypt`](Self::encrypt).
    fn decrypt(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// Derives the symmetric key shared between `private_key` and `public_key`.
///
/// # Errors
///
/// [`Error::InvalidEncodingLength`] or [`Error::InvalidCurvePoint`] when the
/// public key does not decode.
pub fn get_shared_key(
    private_key: &PrivateKey,
    public_key: &PublicKey,
    salt: &[u8; SALT_LENGTH],
) -> Result<Zeroizing<[u8; 32]>> {
    let bytes = public_key
        .to_array()
        .ok_or(Error::InvalidEncodingLength(public_key.raw().len()))?;

    let point = PrecomputedPoint::new(GeP3::decode(&bytes)?);
    point.precompute_for_scalar_multiplication();

    let a = private_key.clamped_scalar();
    let mut shared = Zeroizing::new(
        point
            .scalar_multiply(&EncodedFieldElement::from(*a))
            .to_bytes(),
    );

    for (byte, salt_byte) in shared.iter_mut().zip(salt) {
        *byte ^= salt_byte;
    }

    Ok(Zeroizing::new(hash::sha3_256(&*shared)))
}

/// ECDH + AES-256-CBC cipher between a sender and a recipient.
///
/// Encryption needs the sender's private key, decryption the recipient's.
#[derive(Debug, Clone)]
pub struct Ed25519BlockCipher {
    sender: KeyPair,
    recipient: KeyPair,
}

impl Ed25519BlockCipher {
    pub fn new(sender: KeyPair, recipient: KeyPair) -> Self {
        Ed25519BlockCipher { sender, recipient }
    }

    pub fn sender(&self) -> &KeyPair {
        &self.sender
    }

    pub fn recipient(&self) -> &KeyPair {
        &self.recipient
    }
}

impl BlockCipher for Ed25519BlockCipher {
    fn encrypt_with_rng<R>(&self, plaintext: &[u8], rng: &mut R) -> Result<Vec<u8>>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let private_key = self.sender.require_private_key()?;

        let salt = rng::random_bytes::<SALT_LENGTH, R>(rng)?;
        let iv = rng::random_bytes::<IV_LENGTH, R>(rng)?;

        let key = get_shared_key(private_key, self.recipient.public_key(), &salt)?;

        let ciphertext = Aes256CbcEnc::new(&(*key).into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut output = Vec::with_capacity(SALT_LENGTH + IV_LENGTH + ciphertext.len());
        output.extend_from_slice(&salt);
        output.extend_from_slice(&iv);
        output.extend_from_slice(&ciphertext);

        Ok(output)
    }

    fn decrypt(&self, input: &[u8]) -> Result<Vec<u8>> {
        if input.len() < MIN_CIPHERTEXT_LENGTH {
            tracing::debug!(length = input.len(), "ciphertext too short");
            return Err(Error::CiphertextTooShort(input.len()));
        }

        let private_key = self.recipient.require_private_key()?;

        let (salt, rest) = input.split_at(SALT_LENGTH);
        let (iv, ciphertext) = rest.split_at(IV_LENGTH);

        let mut salt_bytes = [0u8; SALT_LENGTH];
        salt_bytes.copy_from_slice(salt);

        let mut iv_bytes = [0u8; IV_LENGTH];
        iv_bytes.copy_from_slice(iv);

        let key = get_shared_key(private_key, self.sender.public_key(), &salt_bytes)?;

        Aes256CbcDec::new(&(*key).into(), &iv_bytes.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| {
                tracing::debug!("ciphertext padding check failed");
                Error::DecryptionFailed
            })
    }
}
