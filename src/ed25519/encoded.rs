//! Byte-string form of field elements and scalars.
//!
//! An [`EncodedFieldElement`] holds either 32 bytes (a field element or a
//! reduced scalar) or 64 bytes (a hash output awaiting reduction modulo the
//! group order). Both are little-endian.

use std::fmt;

use subtle::{Choice, ConstantTimeEq};

use super::field::FieldElement;
use super::scalar;
use crate::error::{Error, Result};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Raw {
    Short([u8; 32]),
    Wide([u8; 64]),
}

/// A 32- or 64-byte little-endian encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedFieldElement(Raw);

impl EncodedFieldElement {
    /// The 32-byte encoding of zero.
    pub const ZERO: Self = EncodedFieldElement(Raw::Short([0; 32]));

    /// Validates and copies `raw`, which must be 32 or 64 bytes long.
    pub fn new(raw: &[u8]) -> Result<Self> {
        if let Ok(short) = <[u8; 32]>::try_from(raw) {
            return Ok(EncodedFieldElement(Raw::Short(short)));
        }

        if let Ok(wide) = <[u8; 64]>::try_from(raw) {
            return Ok(EncodedFieldElement(Raw::Wide(wide)));
        }

        Err(Error::InvalidEncodingLength(raw.len()))
    }

    pub(crate) fn from_field_bytes(bytes: [u8; 32]) -> Self {
        EncodedFieldElement(Raw::Short(bytes))
    }

    /// The underlying bytes.
    pub fn raw(&self) -> &[u8] {
        match &self.0 {
            Raw::Short(bytes) => bytes,
            Raw::Wide(bytes) => bytes,
        }
    }

    /// 32 or 64.
    pub fn len(&self) -> usize {
        self.raw().len()
    }

    /// Always `false`; kept alongside [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The first 32 bytes.
    fn low(&self) -> [u8; 32] {
        match &self.0 {
            Raw::Short(bytes) => *bytes,
            Raw::Wide(bytes) => {
                let mut low = [0u8; 32];
                low.copy_from_slice(&bytes[..32]);
                low
            }
        }
    }

    /// Zero-extended 64-byte view.
    fn wide(&self) -> [u8; 64] {
        match &self.0 {
            Raw::Short(bytes) => {
                let mut wide = [0u8; 64];
                wide[..32].copy_from_slice(bytes);
                wide
            }
            Raw::Wide(bytes) => *bytes,
        }
    }

    /// Interprets the first 32 bytes as a field element, ignoring bit 255.
    pub fn decode(&self) -> FieldElement {
        FieldElement::from_bytes(&self.low())
    }

    /// Reduces the encoded integer modulo the group order.
    ///
    /// 32-byte inputs are zero-extended. The result is always 32 bytes.
    pub fn mod_q(&self) -> Self {
        EncodedFieldElement(Raw::Short(scalar::reduce(&self.wide())))
    }

    /// Computes `(self·b + c) mod q`.
    ///
    /// 64-byte operands are reduced first.
    pub fn multiply_and_add_mod_q(&self, b: &Self, c: &Self) -> Self {
        EncodedFieldElement(Raw::Short(scalar::mul_add(
            &self.to_scalar_bytes(),
            &b.to_scalar_bytes(),
            &c.to_scalar_bytes(),
        )))
    }

    /// 32 scalar bytes: reduced when wide, copied as-is otherwise.
    pub(crate) fn to_scalar_bytes(&self) -> [u8; 32] {
        match &self.0 {
            Raw::Short(bytes) => *bytes,
            Raw::Wide(bytes) => scalar::reduce(bytes),
        }
    }

    /// Lowest bit of the first byte.
    pub fn is_negative(&self) -> bool {
        self.raw()[0] & 1 == 1
    }

    /// `true` if any byte is non-zero. Constant time over the bytes.
    pub fn is_non_zero(&self) -> bool {
        let raw = self.raw();
        let zero = [0u8; 64];

        !bool::from(raw.ct_eq(&zero[..raw.len()]))
    }
}

impl From<[u8; 32]> for EncodedFieldElement {
    fn from(bytes: [u8; 32]) -> Self {
        EncodedFieldElement(Raw::Short(bytes))
    }
}

impl From<[u8; 64]> for EncodedFieldElement {
    fn from(bytes: [u8; 64]) -> Self {
        EncodedFieldElement(Raw::Wide(bytes))
    }
}

impl TryFrom<&[u8]> for EncodedFieldElement {
    type Error = Error;

    fn try_from(raw: &[u8]) -> Result<Self> {
        Self::new(raw)
    }
}

impl AsRef<[u8]> for EncodedFieldElement {
    fn as_ref(&self) -> &[u8] {
        self.raw()
    }
}

impl ConstantTimeEq for EncodedFieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.raw().ct_eq(other.raw())
    }
}

impl fmt::Debug for EncodedFieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedFieldElement({})", hex::encode(self.raw()))
    }
}
