//! Scalar arithmetic modulo the Ed25519 group order.
//!
//! Scalars are integers modulo
//!
//! ```text
//! ℓ = 2^252 + 27742317777372353535851937790883648493
//! ```
//!
//! stored as 32 little-endian bytes. Hash outputs enter as 64-byte strings and
//! are reduced with [`reduce`].
//!
//! ## Representation
//!
//! During reduction a scalar is split into signed 21-bit limbs (radix 2²¹).
//! Limbs above position 12 carry weight `2^252·2^(21·k)` and are folded back
//! using
//!
//! ```text
//! 2^252 ≡ −27742317777372353535851937790883648493 (mod ℓ)
//! ```
//!
//! whose radix-2²¹ digits are the six coefficients in [`FOLD`].
//!
//! [`reduce`] and [`mul_add`] run in constant time. [`slide`] and
//! [`is_canonical`] branch on their input and must only see public data.

use super::constants::GROUP_ORDER;
use super::field::load_4;

/// Radix-2²¹ digits of `−(ℓ − 2^252)`.
const FOLD: [i64; 6] = [666643, 470296, 654183, -997805, 136657, -683901];

const LIMB_MASK: i64 = 0x1f_ffff;

/// Splits `bytes` into `N` limbs of 21 bits. The top limb is left unmasked.
fn load_limbs<const N: usize>(bytes: &[u8]) -> [i64; N] {
    std::array::from_fn(|index| {
        let bit = 21 * index;
        let value = (load_4(&bytes[bit / 8..]) >> (bit % 8)) as i64;

        if index == N - 1 {
            value
        } else {
            value & LIMB_MASK
        }
    })
}

/// Rounding carry from limb `index` into `index + 1`.
#[inline(always)]
fn carry_round(s: &mut [i64; 24], index: usize) {
    let carry = (s[index] + (1 << 20)) >> 21;
    s[index + 1] += carry;
    s[index] -= carry << 21;
}

/// Flooring carry from limb `index` into `index + 1`.
#[inline(always)]
fn carry_floor(s: &mut [i64; 24], index: usize) {
    let carry = s[index] >> 21;
    s[index + 1] += carry;
    s[index] -= carry << 21;
}

/// Folds limb `index` (>= 12) into the six limbs starting at `index - 12`.
#[inline(always)]
fn fold(s: &mut [i64; 24], index: usize) {
    let high = s[index];

    for (offset, coeff) in FOLD.iter().enumerate() {
        s[index - 12 + offset] += high * coeff;
    }

    s[index] = 0;
}

/// Reduces 24 limbs of at most ~21 bits each modulo ℓ and packs the result.
fn reduce_limbs(mut s: [i64; 24]) -> [u8; 32] {
    for index in (18..24).rev() {
        fold(&mut s, index);
    }

    for index in (6..=16).step_by(2) {
        carry_round(&mut s, index);
    }

    for index in (7..=15).step_by(2) {
        carry_round(&mut s, index);
    }

    for index in (12..18).rev() {
        fold(&mut s, index);
    }

    for index in (0..=10).step_by(2) {
        carry_round(&mut s, index);
    }

    for index in (1..=11).step_by(2) {
        carry_round(&mut s, index);
    }

    fold(&mut s, 12);

    for index in 0..12 {
        carry_floor(&mut s, index);
    }

    fold(&mut s, 12);

    for index in 0..11 {
        carry_floor(&mut s, index);
    }

    pack(&s)
}

/// Serializes limbs `s[0..12]`, each in `[0, 2²¹)`, into 32 bytes.
fn pack(s: &[i64; 24]) -> [u8; 32] {
    let mut output = [0u8; 32];
    let mut acc = 0u64;
    let mut acc_bits = 0;
    let mut position = 0;

    for &limb in s.iter().take(12) {
        acc |= (limb as u64) << acc_bits;
        acc_bits += 21;

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

/// Reduces a 512-bit little-endian integer modulo ℓ.
///
/// The result is canonical: strictly less than ℓ.
pub fn reduce(wide: &[u8; 64]) -> [u8; 32] {
    reduce_limbs(load_limbs::<24>(wide))
}

/// Computes `(a·b + c) mod ℓ`.
///
/// Inputs must be below 2²⁵⁶; they need not be reduced. The product is
/// accumulated directly in radix 2²¹, no 64-byte intermediate is produced.
pub fn mul_add(a: &[u8; 32], b: &[u8; 32], c: &[u8; 32]) -> [u8; 32] {
    let a = load_limbs::<12>(a);
    let b = load_limbs::<12>(b);
    let c = load_limbs::<12>(c);

    let mut s = [0i64; 24];
    s[..12].copy_from_slice(&c);

    for i in 0..12 {
        for j in 0..12 {
            s[i + j] += a[i] * b[j];
        }
    }

    for index in (0..=22).step_by(2) {
        carry_round(&mut s, index);
    }

    for index in (1..=21).step_by(2) {
        carry_round(&mut s, index);
    }

    reduce_limbs(s)
}

/// Recodes a scalar into 64 signed radix-16 digits in `[-8, 7]`.
///
/// `scalar[31]` must be at most 127, which holds for clamped and reduced
/// scalars. The last digit then lies in `[-8, 8]`.
pub fn to_radix16(scalar: &[u8; 32]) -> [i8; 64] {
    let mut e = [0i8; 64];

    for (index, &byte) in scalar.iter().enumerate() {
        e[2 * index] = (byte & 0x0f) as i8;
        e[2 * index + 1] = ((byte >> 4) & 0x0f) as i8;
    }

    let mut carry = 0i8;
    for digit in e.iter_mut().take(63) {
        *digit += carry;
        carry = (*digit + 8) >> 4;
        *digit -= carry << 4;
    }

    e[63] += carry;

    e
}

/// Signed sliding-window representation of a scalar.
///
/// One digit per bit position; non-zero digits are odd, lie in `[-15, 15]`
/// and are separated by at least five zeros.
pub type Slide = [i8; 256];

/// Computes the sliding-window recoding used by variable-time multiplication.
pub fn slide(scalar: &[u8; 32]) -> Slide {
    let mut r: Slide = std::array::from_fn(|index| ((scalar[index >> 3] >> (index & 7)) & 1) as i8);

    for index in 0..256 {
        if r[index] == 0 {
            continue;
        }

        let mut b = 1;

        while b <= 6 && index + b < 256 {
            if r[index + b] != 0 {
                let rb = (r[index + b] as i32) << b;
                let ri = r[index] as i32;

                if ri + rb <= 15 {
                    r[index] = (ri + rb) as i8;
                    r[index + b] = 0;
                } else if ri - rb >= -15 {
                    r[index] = (ri - rb) as i8;

                    for v in r.iter_mut().skip(index + b) {
                        if *v == 0 {
                            *v = 1;
                            break;
                        }

                        *v = 0;
                    }
                } else {
                    break;
                }
            }

            b += 1;
        }
    }

    r
}

/// `true` if the little-endian integer `s` is strictly below ℓ.
pub fn is_canonical(s: &[u8; 32]) -> bool {
    for index in (0..32).rev() {
        if s[index] != GROUP_ORDER[index] {
            return s[index] < GROUP_ORDER[index];
        }
    }

    false
}

/// Ed25519 clamping: clears the cofactor bits and bit 255, sets bit 254.
pub fn clamp(bytes: &mut [u8; 32]) {
    bytes[0] &= 248;
    bytes[31] &= 127;
    bytes[31] |= 64;
}
