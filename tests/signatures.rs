use nem_crypto::ed25519::constants::GROUP_ORDER;
use nem_crypto::{
    DsaSigner, Ed25519DsaSigner, Ed25519KeyGenerator, Error, KeyGenerator, KeyPair, PrivateKey,
    PublicKey, Signature,
};

use quickcheck::QuickCheck;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

const PRIVATE_KEY: &str = "abf4cf55a2b3f742d7543d9cc17f50447b969e6e06f5ea9195d428ab12b7318d";
const PUBLIC_KEY: &str = "F0272A141749DD038C22E7DF0FA18303C24C1FFEFEB55D5B39DC0134B459821E";

const EMPTY_MESSAGE_SIGNATURE: &str = "F8751F199CBCAE34943135097A4442AF98FD66043E9FEE20EBC8BD9468A474469C1CFCC11D808192F961A9284841F796EA4ABF0AD3ADFF0D270C5E8BDB44330A";

const MESSAGE: &str = "8ce03cd60514233b86789729102ea09e867fc6d964dea8c2018ef7d0a2e0e24bf7e348e917116690b9";
const MESSAGE_SIGNATURE: &str = "26E2C18BD0865AC141EDC181C61D2EC74231A4C8EB644C732D4830E82EB143094E7078086648964B0B91363E555907EC53E2AE7BD185D609805099F5C3A4CF07";

fn known_signer() -> Ed25519DsaSigner {
    let key_pair = KeyPair::from_private_key(PrivateKey::from_hex(PRIVATE_KEY).unwrap());
    Ed25519DsaSigner::new(key_pair)
}

fn random_signer(rng: &mut StdRng) -> Ed25519DsaSigner {
    Ed25519DsaSigner::new(Ed25519KeyGenerator.generate_key_pair_with_rng(rng).unwrap())
}

fn random_message(rng: &mut StdRng) -> Vec<u8> {
    let mut message = vec![0u8; rng.gen_range(0..200)];
    rng.fill_bytes(&mut message);
    message
}

fn with_s(signature: &Signature, s: [u8; 32]) -> Signature {
    Signature::new(*signature.r(), s)
}

#[test]
fn signs_known_vectors() {
    let signer = known_signer();

    assert_eq!(signer.key_pair().public_key().to_string(), PUBLIC_KEY);

    let empty = signer.sign(b"").unwrap();
    assert_eq!(empty.to_string(), EMPTY_MESSAGE_SIGNATURE);

    let message = hex::decode(MESSAGE).unwrap();
    let signature = signer.sign(&message).unwrap();
    assert_eq!(signature.to_string(), MESSAGE_SIGNATURE);
}

#[test]
fn verifies_known_vectors_with_public_key_only() {
    let key_pair = KeyPair::from_public_key(PublicKey::from_hex(PUBLIC_KEY).unwrap()).unwrap();
    let verifier = Ed25519DsaSigner::new(key_pair);

    let empty = Signature::from_hex(EMPTY_MESSAGE_SIGNATURE).unwrap();
    assert!(verifier.verify(b"", &empty));

    let message = hex::decode(MESSAGE).unwrap();
    let signature = Signature::from_hex(MESSAGE_SIGNATURE).unwrap();
    assert!(verifier.verify(&message, &signature));
    assert!(!verifier.verify(b"", &signature));
}

#[test]
fn sign_then_verify() {
    fn prop(seed: u64) -> bool {
        let mut rng = StdRng::seed_from_u64(seed);
        let signer = random_signer(&mut rng);
        let message = random_message(&mut rng);

        let signature = signer.sign(&message).unwrap();

        signer.is_canonical_signature(&signature) && signer.verify(&message, &signature)
    }

    QuickCheck::new().tests(50).quickcheck(prop as fn(u64) -> bool);
}

#[test]
fn signing_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(1);
    let signer = random_signer(&mut rng);
    let message = random_message(&mut rng);

    assert_eq!(signer.sign(&message).unwrap(), signer.sign(&message).unwrap());
    assert_ne!(signer.sign(&message).unwrap(), signer.sign(b"other").unwrap());
}

#[test]
fn other_key_does_not_verify() {
    let mut rng = StdRng::seed_from_u64(2);
    let signer = random_signer(&mut rng);
    let other = random_signer(&mut rng);
    let message = random_message(&mut rng);

    let signature = signer.sign(&message).unwrap();

    assert!(!other.verify(&message, &signature));
}

#[test]
fn tampered_input_does_not_verify() {
    let mut rng = StdRng::seed_from_u64(3);
    let signer = random_signer(&mut rng);
    let mut message = random_message(&mut rng);
    message.push(0x42);

    let signature = signer.sign(&message).unwrap();
    let bytes = signature.to_bytes();

    for index in [0, 17, 31, 32, 45, 62] {
        let mut tampered = bytes;
        tampered[index] ^= 0x01;

        assert!(!signer.verify(&message, &Signature::from_bytes(&tampered).unwrap()));
    }

    let mut changed = message.clone();
    changed[0] ^= 0x80;
    assert!(!signer.verify(&changed, &signature));

    message.pop();
    assert!(!signer.verify(&message, &signature));
}

#[test]
fn canonical_signature_checks() {
    let signer = known_signer();
    let signature = signer.sign(b"canonical").unwrap();

    assert!(signer.is_canonical_signature(&signature));

    assert!(!signer.is_canonical_signature(&with_s(&signature, [0u8; 32])));
    assert!(!signer.is_canonical_signature(&with_s(&signature, GROUP_ORDER)));

    let mut one = [0u8; 32];
    one[0] = 1;
    assert!(signer.is_canonical_signature(&with_s(&signature, one)));

    let mut below_order = GROUP_ORDER;
    below_order[0] -= 1;
    assert!(signer.is_canonical_signature(&with_s(&signature, below_order)));

    let mut above_order = GROUP_ORDER;
    above_order[0] += 1;
    assert!(!signer.is_canonical_signature(&with_s(&signature, above_order)));
}

#[test]
fn non_canonical_signature_does_not_verify() {
    let signer = known_signer();
    let signature = signer.sign(b"malleable").unwrap();

    // S + ℓ passes the group equation but is rejected
    let mut s_plus_order = [0u8; 32];
    let mut carry = 0u16;
    for (index, byte) in s_plus_order.iter_mut().enumerate() {
        let sum = signature.s()[index] as u16 + GROUP_ORDER[index] as u16 + carry;
        *byte = sum as u8;
        carry = sum >> 8;
    }
    let malleated = with_s(&signature, s_plus_order);

    assert!(!signer.is_canonical_signature(&malleated));
    assert!(!signer.verify(b"malleable", &malleated));

    let canonical = signer.make_signature_canonical(&malleated);
    assert_eq!(canonical, signature);
    assert!(signer.verify(b"malleable", &canonical));
}

#[test]
fn make_canonical_keeps_canonical_signatures() {
    let signer = known_signer();
    let signature = signer.sign(b"already canonical").unwrap();

    assert_eq!(signer.make_signature_canonical(&signature), signature);

    let reduced = signer.make_signature_canonical(&with_s(&signature, GROUP_ORDER));
    assert_eq!(reduced.s(), &[0u8; 32]);
    assert_eq!(reduced.r(), signature.r());
}

#[test]
fn signing_requires_private_key() {
    let public_key = known_signer().key_pair().public_key().clone();
    let verifier = Ed25519DsaSigner::new(KeyPair::from_public_key(public_key).unwrap());

    assert_eq!(verifier.sign(b"message").unwrap_err(), Error::MissingPrivateKey);
}

#[test]
fn all_zero_public_key_never_verifies() {
    let signature = known_signer().sign(b"zero").unwrap();
    let verifier =
        Ed25519DsaSigner::new(KeyPair::from_public_key(PublicKey::from([0u8; 32])).unwrap());

    assert!(!verifier.verify(b"zero", &signature));
}

#[test]
fn undecodable_public_key_never_verifies() {
    let signature = known_signer().sign(b"bad key").unwrap();

    let mut encoded = [0u8; 32];
    encoded[0] = 2;
    let verifier =
        Ed25519DsaSigner::new(KeyPair::from_public_key(PublicKey::from(encoded)).unwrap());

    assert!(!verifier.verify(b"bad key", &signature));
}

#[test]
fn signature_length_is_checked() {
    assert_eq!(
        Signature::from_bytes(&[0u8; 63]).unwrap_err(),
        Error::InvalidSignatureLength(63)
    );
    assert_eq!(
        Signature::from_bytes(&[0u8; 65]).unwrap_err(),
        Error::InvalidSignatureLength(65)
    );
    assert!(matches!(Signature::from_hex("zz"), Err(Error::InvalidHex(_))));

    let signature = Signature::from_hex(MESSAGE_SIGNATURE).unwrap();
    assert_eq!(Signature::from_bytes(&signature.to_bytes()).unwrap(), signature);
    assert_eq!(&signature.to_bytes()[..32], signature.r());
    assert_eq!(&signature.to_bytes()[32..], signature.s());
}

#[test]
fn signature_from_fixed_seed_verifies() {
    let signer = Ed25519DsaSigner::new(KeyPair::from_private_key(PrivateKey::from_bytes([7; 32])));
    let signature = signer.sign(b"hello").unwrap();

    assert!(signer.verify(b"hello", &signature));
}
