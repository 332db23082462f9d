//! Precomputed multiples and scalar multiplication.
//!
//! A [`PrecomputedPoint`] owns a P3 point and two lazily built tables:
//!
//! * the **single** table, `table[i][j] = (j + 1)·256^i·P` for `i < 32`,
//!   `j < 8`, used by the constant-time fixed-base multiplication;
//! * the **double** table, the odd multiples `P, 3P, …, 15P`, used by the
//!   variable-time double-scalar multiplication during verification.
//!
//! Both are stored as affine [`GePrecomp`] entries. Each table is built at
//! most once; concurrent callers block until the first build completes.

use once_cell::sync::{Lazy, OnceCell};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::encoded::EncodedFieldElement;
use super::group::{GeP2, GeP3, GePrecomp};
use super::scalar;

/// Rows of the single table, one per byte of the scalar.
const SINGLE_ROWS: usize = 32;

/// Entries per row; radix-16 digits after recoding lie in `[-8, 8]`.
const ROW_ENTRIES: usize = 8;

/// Fixed-base table: `(j + 1)·256^i·P`.
pub type SingleTable = [[GePrecomp; ROW_ENTRIES]; SINGLE_ROWS];

/// Odd multiples `(2j + 1)·P` for `j < 8`.
pub type DoubleTable = [GePrecomp; 8];

/// The Ed25519 base point with both tables built eagerly on first access.
pub static BASE_POINT: Lazy<PrecomputedPoint> = Lazy::new(|| {
    let base = PrecomputedPoint::new(GeP3::base_point());
    base.precompute_for_scalar_multiplication();
    base.precompute_for_double_scalar_multiplication();

    base
});

/// A point together with its cached multiplication tables.
#[derive(Debug, Clone)]
pub struct PrecomputedPoint {
    point: GeP3,
    single: OnceCell<Box<SingleTable>>,
    double: OnceCell<DoubleTable>,
}

/// Scalar bytes whose top byte is at most 127.
///
/// Values with bit 255 set are replaced by their reduction modulo the group
/// order under a conditional move; everything else is left untouched.
fn recodable_scalar(a: &EncodedFieldElement) -> [u8; 32] {
    let mut bytes = a.to_scalar_bytes();

    let mut wide = [0u8; 64];
    wide[..32].copy_from_slice(&bytes);
    let reduced = scalar::reduce(&wide);

    let high = Choice::from(bytes[31] >> 7);
    for (byte, reduced_byte) in bytes.iter_mut().zip(reduced.iter()) {
        byte.conditional_assign(reduced_byte, high);
    }

    bytes
}

impl From<GeP3> for PrecomputedPoint {
    fn from(point: GeP3) -> Self {
        Self::new(point)
    }
}

impl PrecomputedPoint {
    /// Wraps `point` without building any table.
    pub fn new(point: GeP3) -> Self {
        PrecomputedPoint {
            point,
            single: OnceCell::new(),
            double: OnceCell::new(),
        }
    }

    pub fn point(&self) -> &GeP3 {
        &self.point
    }

    pub fn has_single_table(&self) -> bool {
        self.single.get().is_some()
    }

    pub fn has_double_table(&self) -> bool {
        self.double.get().is_some()
    }

    /// Builds (once) and returns the fixed-base table.
    ///
    /// Row `i` starts at `Bi = 256^i·P`; each entry adds `Bi` to the previous
    /// one, and `Bi` is doubled eight times before the next row.
    pub fn precompute_for_scalar_multiplication(&self) -> &SingleTable {
        self.single.get_or_init(|| {
            tracing::trace!("building fixed-base table");

            let mut table = Box::new([[GePrecomp::ZERO; ROW_ENTRIES]; SINGLE_ROWS]);
            let mut bi = self.point;

            for row in table.iter_mut() {
                let bi_cached = bi.to_cached();
                let mut bij = bi;

                for entry in row.iter_mut() {
                    *entry = bij.to_precomputed();
                    bij = bij.add(&bi_cached).to_p3();
                }

                for _ in 0..8 {
                    bi = bi.add(&bi.to_cached()).to_p3();
                }
            }

            table
        })
    }

    /// Builds (once) and returns the odd-multiples table.
    pub fn precompute_for_double_scalar_multiplication(&self) -> &DoubleTable {
        self.double.get_or_init(|| {
            tracing::trace!("building odd-multiples table");

            let mut table = [GePrecomp::ZERO; 8];
            let two_p = self.point.dbl().to_p3().to_cached();
            let mut bi = self.point;

            for entry in table.iter_mut() {
                *entry = bi.to_precomputed();
                bi = bi.add(&two_p).to_p3();
            }

            table
        })
    }

    /// Returns `b·256^pos·P` from the single table without branching on `b`.
    ///
    /// `b` must lie in `[-8, 8]`. Every row entry is visited; the match is
    /// moved in with a conditional move and negated under a mask when `b` is
    /// negative.
    pub fn select(&self, pos: usize, b: i8) -> GePrecomp {
        let table = self.precompute_for_scalar_multiplication();

        let mask = (b as i16) >> 7;
        let abs = ((b as i16 + mask) ^ mask) as u16;
        let negative = Choice::from((mask & 1) as u8);

        let mut t = GePrecomp::ZERO;
        for (index, entry) in table[pos].iter().enumerate() {
            t.cmov(entry, abs.ct_eq(&((index + 1) as u16)));
        }

        let minus_t = -t;
        t.conditional_assign(&minus_t, negative);

        t
    }

    /// Constant-time `a·P`.
    ///
    /// `a` is recoded into 64 signed radix-16 digits. Odd digits are
    /// accumulated first, the sum is multiplied by 16, then even digits are
    /// added. A 64-byte `a` is reduced modulo the group order first, as is a
    /// 32-byte `a` with bit 255 set.
    pub fn scalar_multiply(&self, a: &EncodedFieldElement) -> GeP3 {
        let e = scalar::to_radix16(&recodable_scalar(a));
        let mut h = GeP3::ZERO;

        for index in (1..64).step_by(2) {
            h = h.precomputed_add(&self.select(index / 2, e[index])).to_p3();
        }

        h = h.dbl().to_p2().dbl().to_p2().dbl().to_p2().dbl().to_p3();

        for index in (0..64).step_by(2) {
            h = h.precomputed_add(&self.select(index / 2, e[index])).to_p3();
        }

        h
    }

    /// Variable-time `b·P − a·A`, with `self` as `P`.
    ///
    /// Both scalars are recoded with sliding windows and processed from the
    /// most significant position down, skipping leading positions where both
    /// digits are zero. Only for public scalars.
    pub fn double_scalar_multiply_variable_time(
        &self,
        big_a: &PrecomputedPoint,
        a: &EncodedFieldElement,
        b: &EncodedFieldElement,
    ) -> GeP2 {
        let a_slide = scalar::slide(&a.to_scalar_bytes());
        let b_slide = scalar::slide(&b.to_scalar_bytes());

        let a_table = big_a.precompute_for_double_scalar_multiplication();
        let b_table = self.precompute_for_double_scalar_multiplication();

        let Some(top) = (0..256).rev().find(|&i| a_slide[i] != 0 || b_slide[i] != 0) else {
            return GeP2::ZERO;
        };

        let mut r = GeP2::ZERO;

        for index in (0..=top).rev() {
            let mut t = r.dbl();

            let ai = a_slide[index];
            if ai > 0 {
                t = t.to_p3().precomputed_subtract(&a_table[(ai / 2) as usize]);
            } else if ai < 0 {
                t = t.to_p3().precomputed_add(&a_table[(-ai / 2) as usize]);
            }

            let bi = b_slide[index];
            if bi > 0 {
                t = t.to_p3().precomputed_add(&b_table[(bi / 2) as usize]);
            } else if bi < 0 {
                t = t.to_p3().precomputed_subtract(&b_table[(-bi / 2) as usize]);
            }

            r = t.to_p2();
        }

        r
    }
}
