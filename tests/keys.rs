use nem_crypto::{
    BlockCipher, CryptoEngine, DsaSigner, Ed25519KeyAnalyzer, Ed25519KeyGenerator, Error, KeyAnalyzer,
    KeyGenerator, KeyPair, PrivateKey, PublicKey, default_engine,
};

use rand::SeedableRng;
use rand::rngs::StdRng;

const PRIVATE_KEY: &str = "abf4cf55a2b3f742d7543d9cc17f50447b969e6e06f5ea9195d428ab12b7318d";
const PUBLIC_KEY: &str = "F0272A141749DD038C22E7DF0FA18303C24C1FFEFEB55D5B39DC0134B459821E";

const COUNTING_PUBLIC_KEY: &str =
    "13c6c45b3c3043fc0dd58c02955dd3bfbbe05b43feda45b5799a0b4582f70315";

#[test]
fn derives_known_public_keys() {
    let private_key = PrivateKey::from_hex(PRIVATE_KEY).unwrap();
    let public_key = Ed25519KeyGenerator.derive_public_key(&private_key);
    assert_eq!(public_key.to_string(), PUBLIC_KEY);

    let mut counting = [0u8; 32];
    for (index, byte) in counting.iter_mut().enumerate() {
        *byte = index as u8;
    }
    let public_key = Ed25519KeyGenerator.derive_public_key(&PrivateKey::from_bytes(counting));
    assert_eq!(hex::encode(public_key.raw()), COUNTING_PUBLIC_KEY);
}

#[test]
fn from_private_key_derives_public_key() {
    let key_pair = KeyPair::from_private_key(PrivateKey::from_hex(PRIVATE_KEY).unwrap());

    assert!(key_pair.has_private_key());
    assert_eq!(key_pair.public_key(), &PublicKey::from_hex(PUBLIC_KEY).unwrap());
    assert_eq!(key_pair.private_key().unwrap().raw(), &hex_array(PRIVATE_KEY));
}

#[test]
fn seeded_generation_is_reproducible() {
    let first = Ed25519KeyGenerator
        .generate_key_pair_with_rng(&mut StdRng::seed_from_u64(42))
        .unwrap();
    let second = Ed25519KeyGenerator
        .generate_key_pair_with_rng(&mut StdRng::seed_from_u64(42))
        .unwrap();
    let third = Ed25519KeyGenerator
        .generate_key_pair_with_rng(&mut StdRng::seed_from_u64(43))
        .unwrap();

    assert_eq!(first, second);
    assert_ne!(first.public_key(), third.public_key());
}

#[test]
fn generated_keys_are_consistent() {
    let key_pair = Ed25519KeyGenerator.generate_key_pair().unwrap();
    let private_key = key_pair.private_key().unwrap();

    assert_eq!(
        &Ed25519KeyGenerator.derive_public_key(private_key),
        key_pair.public_key()
    );
    assert!(Ed25519KeyAnalyzer.is_key_compressed(key_pair.public_key()));
}

#[test]
fn analyzer_checks_length() {
    assert!(Ed25519KeyAnalyzer.is_key_compressed(&PublicKey::new([1u8; 32])));
    assert!(!Ed25519KeyAnalyzer.is_key_compressed(&PublicKey::new([1u8; 31])));
    assert!(!Ed25519KeyAnalyzer.is_key_compressed(&PublicKey::new([1u8; 33])));
    assert!(!Ed25519KeyAnalyzer.is_key_compressed(&PublicKey::new(Vec::new())));
}

#[test]
fn key_pair_requires_compressed_public_key() {
    assert_eq!(
        KeyPair::new(None, PublicKey::new([0u8; 33])).unwrap_err(),
        Error::PublicKeyNotCompressed
    );
    assert_eq!(
        KeyPair::from_public_key(PublicKey::new([0u8; 64])).unwrap_err(),
        Error::PublicKeyNotCompressed
    );

    let verify_only = KeyPair::from_public_key(PublicKey::from_hex(PUBLIC_KEY).unwrap()).unwrap();
    assert!(!verify_only.has_private_key());
    assert!(verify_only.private_key().is_none());
}

#[test]
fn key_pair_new_keeps_given_keys() {
    let private_key = PrivateKey::from_hex(PRIVATE_KEY).unwrap();
    let unrelated = PublicKey::new([9u8; 32]);

    let key_pair = KeyPair::new(Some(private_key.clone()), unrelated.clone()).unwrap();

    assert_eq!(key_pair.private_key(), Some(&private_key));
    assert_eq!(key_pair.public_key(), &unrelated);
}

#[test]
fn hex_parsing() {
    assert!(matches!(PrivateKey::from_hex("xyz"), Err(Error::InvalidHex(_))));
    assert_eq!(
        PrivateKey::from_hex("abcd").unwrap_err(),
        Error::InvalidEncodingLength(2)
    );
    assert!(matches!(PublicKey::from_hex("0"), Err(Error::InvalidHex(_))));

    let upper = PrivateKey::from_hex(&PRIVATE_KEY.to_uppercase()).unwrap();
    assert_eq!(upper, PrivateKey::from_hex(PRIVATE_KEY).unwrap());
}

#[test]
fn formatting() {
    let public_key = PublicKey::from_hex(&PUBLIC_KEY.to_lowercase()).unwrap();

    assert_eq!(public_key.to_string(), PUBLIC_KEY);
    assert_eq!(format!("{public_key:?}"), format!("PublicKey({PUBLIC_KEY})"));

    let private_key = PrivateKey::from_hex(PRIVATE_KEY).unwrap();
    let debug = format!("{private_key:?}");
    assert!(!debug.to_lowercase().contains(&PRIVATE_KEY[..8]));
}

#[test]
fn engine_creates_working_components() {
    let engine = default_engine();

    assert_eq!(engine.curve().name(), "ed25519");

    let key_pair = engine
        .create_key_generator()
        .generate_key_pair_with_rng(&mut StdRng::seed_from_u64(7))
        .unwrap();
    assert!(engine.create_key_analyzer().is_key_compressed(key_pair.public_key()));

    let signer = engine.create_dsa_signer(key_pair.clone());
    let signature = signer.sign(b"engine").unwrap();
    assert!(signer.verify(b"engine", &signature));

    let recipient = engine.create_key_generator().generate_key_pair().unwrap();
    let cipher = engine.create_block_cipher(key_pair, recipient);

    let ciphertext = cipher.encrypt(b"engine").unwrap();
    assert_eq!(cipher.decrypt(&ciphertext).unwrap(), b"engine");
}

fn hex_array(input: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&hex::decode(input).unwrap());
    out
}
