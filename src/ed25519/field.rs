//! Finite field arithmetic for Ed25519.
//!
//! This module implements arithmetic in the prime field
//!
//! ```text
//! 𝔽ₚ where p = 2²⁵⁵ − 19
//! ```
//!
//! ## Representation
//!
//! Field elements are represented using 10 signed limbs with alternating
//! widths:
//!
//! ```text
//! [26, 25, 26, 25, 26, 25, 26, 25, 26, 25] bits
//! ```
//!
//! Limbs are stored as `i32`; every product and accumulation is promoted to
//! `i64`. Additions and subtractions are deferred: they never carry, so their
//! result may exceed the canonical limb bounds. Multiplication and squaring
//! accept limbs up to roughly `1.65·2²⁶` and return limbs bounded by
//! `1.01·2²⁵` / `1.01·2²⁶`, so a sum or difference of two products can be
//! multiplied again without an explicit reduction.
//!
//! Values are immutable. Every operation returns a new element.
//!
//! ## Equality
//!
//! Two representations of the same residue may differ limb by limb. Equality
//! and hashing therefore always go through the canonical 32-byte encoding.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::encoded::EncodedFieldElement;

/// Multiplies two limbs with explicit promotion to `i64`.
macro_rules! mul {
    ($a:expr, $b:expr) => {
        ($a as i64) * ($b as i64)
    };
}

/// Load 3 bytes from a little-endian byte slice into a `u64`.
#[inline(always)]
pub(crate) fn load_3(input: &[u8]) -> u64 {
    (input[0] as u64) | ((input[1] as u64) << 8) | ((input[2] as u64) << 16)
}

/// Load 4 bytes from a little-endian byte slice into a `u64`.
#[inline(always)]
pub(crate) fn load_4(input: &[u8]) -> u64 {
    (input[0] as u64)
        | ((input[1] as u64) << 8)
        | ((input[2] as u64) << 16)
        | ((input[3] as u64) << 24)
}

/// Width in bits of limb `index`.
#[inline(always)]
const fn limb_bits(index: usize) -> u32 {
    if index % 2 == 0 { 26 } else { 25 }
}

/// Rounding carry out of limb `index` into its successor.
///
/// The carry out of limb 9 wraps into limb 0 multiplied by 19, since
/// `2²⁵⁵ ≡ 19 (mod p)`. After the call limb `index` lies in
/// `[-2^(bits-1), 2^(bits-1))`.
#[inline(always)]
fn carry(h: &mut [i64; 10], index: usize) {
    let bits = limb_bits(index);
    let c = (h[index] + (1i64 << (bits - 1))) >> bits;
    h[index] -= c << bits;

    if index == 9 {
        h[0] += c * 19;
    } else {
        h[index + 1] += c;
    }
}

/// The 12-step chain that brings product limbs back into bounds.
const PRODUCT_CARRY_CHAIN: [usize; 12] = [0, 4, 1, 5, 2, 6, 3, 7, 4, 8, 9, 0];

/// Carry order used when unpacking 32 bytes into limbs.
const DECODE_CARRY_CHAIN: [usize; 10] = [9, 1, 3, 5, 7, 0, 2, 4, 6, 8];

/// Element of GF(2²⁵⁵ − 19) in radix 2²⁵·⁵.
#[derive(Clone, Copy)]
pub struct FieldElement(pub(crate) [i32; 10]);

impl FieldElement {
    /// The additive identity (0).
    pub const ZERO: Self = FieldElement([0; 10]);

    /// The multiplicative identity (1).
    pub const ONE: Self = FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Two.
    pub const TWO: Self = FieldElement([2, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Wraps raw limbs. No bound checks are performed.
    pub const fn new(limbs: [i32; 10]) -> Self {
        FieldElement(limbs)
    }

    /// Raw limbs of this (possibly unreduced) representation.
    pub fn limbs(&self) -> [i32; 10] {
        self.0
    }

    fn reduce_wide(mut h: [i64; 10], chain: &[usize]) -> Self {
        for &index in chain {
            carry(&mut h, index);
        }

        FieldElement(h.map(|x| x as i32))
    }

    /// Unpacks a 32-byte little-endian string into limbs.
    ///
    /// Bit 255 is ignored. The value is not reduced modulo `p`; strings
    /// encoding integers in `[p, 2²⁵⁵)` yield equivalent representations.
    pub(crate) fn from_bytes(input: &[u8; 32]) -> Self {
        // (byte_offset, load_size, left_shift)
        let load_configs = [
            (0, 4, 0),
            (4, 3, 6),
            (7, 3, 5),
            (10, 3, 3),
            (13, 3, 2),
            (16, 4, 0),
            (20, 3, 7),
            (23, 3, 5),
            (26, 3, 4),
            (29, 3, 2),
        ];

        let mut h = [0i64; 10];

        for (index, &(offset, size, shift)) in load_configs.iter().enumerate() {
            let mut value = if size == 4 {
                load_4(&input[offset..])
            } else {
                load_3(&input[offset..])
            };

            if index == 9 {
                // drop bit 255
                value &= 0x7f_ffff;
            }

            h[index] = (value << shift) as i64;
        }

        Self::reduce_wide(h, &DECODE_CARRY_CHAIN)
    }

    /// Canonical 32-byte little-endian encoding of the residue.
    ///
    /// The output is fully reduced into `[0, p)`, so bit 255 is always clear.
    pub(crate) fn to_bytes(self) -> [u8; 32] {
        let mut h = self.0.map(|x| x as i64);

        // q = floor(h / p), computed without branching.
        let mut q = (19 * h[9] + (1i64 << 24)) >> 25;
        for (index, limb) in h.iter().enumerate() {
            q = (limb + q) >> limb_bits(index);
        }

        h[0] += 19 * q;

        for index in 0..9 {
            let bits = limb_bits(index);
            let c = h[index] >> bits;
            h[index + 1] += c;
            h[index] -= c << bits;
        }

        let c = h[9] >> 25;
        h[9] -= c << 25;

        let mut output = [0u8; 32];
        let mut acc = 0u64;
        let mut acc_bits = 0u32;
        let mut position = 0;

        for (index, &limb) in h.iter().enumerate() {
            acc |= (limb as u64) << acc_bits;
            acc_bits += limb_bits(index);

            while acc_bits >= 8 {
                output[position] = acc as u8;
                acc >>= 8;
                acc_bits -= 8;
                position += 1;
            }
        }

        output[31] = acc as u8;

        output
    }

    /// Canonical encoding of this element.
    pub fn encode(&self) -> EncodedFieldElement {
        EncodedFieldElement::from_field_bytes(self.to_bytes())
    }

    /// `true` unless the element is congruent to zero. Constant time.
    pub fn is_non_zero(&self) -> bool {
        !bool::from(self.to_bytes().ct_eq(&[0u8; 32]))
    }

    /// `true` if the canonical residue is odd. Constant time.
    pub fn is_negative(&self) -> bool {
        self.to_bytes()[0] & 1 == 1
    }

    /// Computes `self²`.
    pub fn square(&self) -> Self {
        Self::reduce_wide(self.square_limbs(), &PRODUCT_CARRY_CHAIN)
    }

    /// Computes `2·self²` with a single reduction pass.
    pub fn square_and_double(&self) -> Self {
        let h = self.square_limbs().map(|x| x << 1);

        Self::reduce_wide(h, &PRODUCT_CARRY_CHAIN)
    }

    /// Unreduced limbs of `self²`.
    ///
    /// Each cross term `f[i]·f[j]` with `i < j` appears twice, terms between two
    /// 25-bit limbs pick up an extra factor 2, and terms whose weight reaches
    /// `2²⁵⁵` are folded back with the factor 19.
    fn square_limbs(&self) -> [i64; 10] {
        let f = self.0;
        let mut h = [0i64; 10];

        for i in 0..10 {
            for j in i..10 {
                let mut term = mul!(f[i], f[j]);

                if i != j {
                    term <<= 1;
                }

                if i & j & 1 == 1 {
                    term <<= 1;
                }

                if i + j >= 10 {
                    term *= 19;
                }

                h[(i + j) % 10] += term;
            }
        }

        h
    }

    /// Computes `self^(2ⁿ)`.
    pub(crate) fn n_square(self, n: usize) -> Self {
        (0..n).fold(self, |acc, _| acc.square())
    }

    /// Raises this element to `(p − 5) / 8 = 2²⁵² − 3`.
    pub(crate) fn pow22523(&self) -> Self {
        let mut t0 = self.square();
        let mut t1 = t0.n_square(2);

        t1 = *self * t1;
        t0 = t0 * t1;

        t0 = t0.square();
        t0 = t1 * t0;

        t1 = t0.n_square(5);
        t0 = t1 * t0;

        t1 = t0.n_square(10);
        t1 = t1 * t0;

        let mut t2 = t1.n_square(20);
        t1 = t2 * t1;

        t1 = t1.n_square(10);
        t0 = t1 * t0;

        t1 = t0.n_square(50);
        t1 = t1 * t0;

        t2 = t1.n_square(100);
        t1 = t2 * t1;

        t1 = t1.n_square(50);
        t0 = t1 * t0;

        t0 = t0.n_square(2);

        t0 * *self
    }

    /// Computes `self⁻¹ = self^(p − 2)`.
    ///
    /// The inverse of zero does not exist; zero maps to zero and callers must
    /// not rely on that value.
    pub fn invert(&self) -> Self {
        let mut t0 = self.square();
        let mut t1 = t0.n_square(2);

        t1 = *self * t1;
        t0 = t0 * t1;

        let mut t2 = t0.square();
        t1 = t1 * t2;

        t2 = t1.n_square(5);
        t1 = t2 * t1;

        t2 = t1.n_square(10);
        t2 = t2 * t1;

        let mut t3 = t2.n_square(20);
        t2 = t3 * t2;

        t2 = t2.n_square(10);
        t1 = t2 * t1;

        t2 = t1.n_square(50);
        t2 = t2 * t1;

        t3 = t2.n_square(100);
        t2 = t3 * t2;

        t2 = t2.n_square(50);
        t1 = t2 * t1;

        t1 = t1.n_square(5);

        t1 * t0
    }

    /// Computes one of the square roots of `u / v`.
    ///
    /// Returns `x = (u·v³)·(u·v⁷)^((p − 5) / 8)`. When `u / v` is a square,
    /// `v·x²` equals either `u` or `−u`; in the second case `x·√−1` is a root.
    /// Callers check which case applies.
    pub fn sqrt(u: &FieldElement, v: &FieldElement) -> FieldElement {
        let v3 = v.square() * *v;
        let uv3 = *u * v3;
        let uv7 = *u * v3.square() * *v;

        uv7.pow22523() * uv3
    }

    /// Constant-time conditional move: replaces `self` by `rhs` when `choice` is set.
    pub fn cmov(&mut self, rhs: &Self, choice: Choice) {
        self.conditional_assign(rhs, choice);
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut limbs = [0i32; 10];

        for (index, limb) in limbs.iter_mut().enumerate() {
            *limb = i32::conditional_select(&a.0[index], &b.0[index], choice);
        }

        FieldElement(limbs)
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl Hash for FieldElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bytes().hash(state);
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", hex::encode(self.to_bytes()))
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        FieldElement(std::array::from_fn(|index| self.0[index] + rhs.0[index]))
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        FieldElement(std::array::from_fn(|index| self.0[index] - rhs.0[index]))
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self::Output {
        FieldElement(self.0.map(|x| -x))
    }
}

/// Schoolbook multiplication with the reduction folded in.
///
/// Limb `i` has weight `2^⌈25.5·i⌉`. The product of two 25-bit limbs lands one
/// bit short of its slot and is doubled; any term whose weight reaches
/// `2²⁵⁵` wraps around multiplied by 19.
impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let f = self.0;
        let g = rhs.0;
        let mut h = [0i64; 10];

        for i in 0..10 {
            for j in 0..10 {
                let mut term = mul!(f[i], g[j]);

                if i & j & 1 == 1 {
                    term <<= 1;
                }

                if i + j >= 10 {
                    term *= 19;
                }

                h[(i + j) % 10] += term;
            }
        }

        Self::reduce_wide(h, &PRODUCT_CARRY_CHAIN)
    }
}
