//! Curve and group constants for Edwards25519.
//!
//! The curve is the twisted Edwards curve
//!
//! ```text
//! −x² + y² = 1 + d·x²·y²,   d = −121665 / 121666
//! ```
//!
//! over GF(2²⁵⁵ − 19). Field constants are stored directly as limbs; points
//! are stored as their little-endian coordinate encodings.

use super::field::FieldElement;

/// The curve parameter `d`.
pub const D: FieldElement = FieldElement::new([
    -10913610, 13857413, -15372611, 6949391, 114729, -8787816, -6275908, -3247719, -18696448,
    -12055116,
]);

/// `2·d`, used by the cached and precomputed representations.
pub const D2: FieldElement = FieldElement::new([
    -21827239, -5839606, -30745221, 13898782, 229458, 15978800, -12551817, -6495438, 29715968,
    9444199,
]);

/// `√−1 mod p`.
pub const I: FieldElement = FieldElement::new([
    -32595792, -7943725, 9377950, 3500415, 12389472, -272473, -25146209, -2005654, 326686,
    11406482,
]);

/// The group order `ℓ = 2²⁵² + 27742317777372353535851937790883648493`, little-endian.
pub const GROUP_ORDER: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

/// `⌊ℓ / 2⌋`, little-endian.
pub const HALF_GROUP_ORDER: [u8; 32] = [
    0xf6, 0xe9, 0x7a, 0x2e, 0x8d, 0x31, 0x09, 0x2c, 0x6b, 0xce, 0x7b, 0x51, 0xef, 0x7c, 0x6f, 0x0a,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08,
];

/// Compressed encoding of the base point `B`: `y = 4/5`, `x` even.
pub const BASE_POINT_ENCODED: [u8; 32] = [
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
];

/// Affine `x` coordinate of the base point, little-endian.
pub(crate) const BASE_POINT_X: [u8; 32] = [
    0x1a, 0xd5, 0x25, 0x8f, 0x60, 0x2d, 0x56, 0xc9, 0xb2, 0xa7, 0x25, 0x95, 0x60, 0xc7, 0x2c, 0x69,
    0x5c, 0xdc, 0xd6, 0xfd, 0x31, 0xe2, 0xa4, 0xc0, 0xfe, 0x53, 0x6e, 0xcd, 0xd3, 0x36, 0x69, 0x21,
];
