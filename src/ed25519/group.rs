//! Edwards25519 points in their working coordinate systems.
//!
//! Each coordinate system is its own type, so a formula can only be applied
//! to the representations it is defined for:
//!
//! | Type        | Stored values                 | Meaning                           |
//! |-------------|-------------------------------|-----------------------------------|
//! | [`GeAffine`]| `(x, y)`                      | affine point                      |
//! | [`GeP2`]    | `(X : Y : Z)`                 | `x = X/Z`, `y = Y/Z`              |
//! | [`GeP3`]    | `(X : Y : Z : T)`             | as P2 with `XY = ZT`              |
//! | [`GeP1P1`]  | `((X : Z), (Y : T))`          | `x = X/Z`, `y = Y/T`              |
//! | [`GePrecomp`]| `(y + x, y − x, 2d·x·y)`     | affine, ready for mixed addition  |
//! | [`GeCached`]| `(Y + X, Y − X, Z, 2d·T)`     | projective, ready for addition    |
//!
//! Additions and doublings land in P1xP1 and are converted to P2 or P3
//! depending on what the next step consumes. None of the formulas branch on
//! their inputs.

use std::ops::Neg;

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::constants::{BASE_POINT_ENCODED, BASE_POINT_X, D, D2, I};
use super::encoded::EncodedFieldElement;
use super::field::FieldElement;
use crate::error::{Error, Result};

/// A point in affine coordinates.
#[derive(Clone, Copy, Debug)]
pub struct GeAffine {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

/// A point in projective coordinates `(X : Y : Z)`.
#[derive(Clone, Copy, Debug)]
pub struct GeP2 {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

/// A point in extended coordinates `(X : Y : Z : T)` with `X·Y = Z·T`.
///
/// This is the form every decoded point starts in, and the left operand of
/// all additions.
#[derive(Clone, Copy, Debug)]
pub struct GeP3 {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

/// The completed representation produced by additions and doublings.
#[derive(Clone, Copy, Debug)]
pub struct GeP1P1 {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

/// Affine point prepared for mixed addition: `(y + x, y − x, 2d·x·y)`.
#[derive(Clone, Copy, Debug)]
pub struct GePrecomp {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) xy2d: FieldElement,
}

/// Projective point prepared for addition: `(Y + X, Y − X, Z, 2d·T)`.
#[derive(Clone, Copy, Debug)]
pub struct GeCached {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t2d: FieldElement,
}

/// Encodes `y` with the parity of `x` in bit 255.
fn encode_affine(x: &FieldElement, y: &FieldElement) -> [u8; 32] {
    let mut output = y.to_bytes();
    output[31] |= (x.is_negative() as u8) << 7;

    output
}

/// Checks `−x² + y² = 1 + d·x²·y²`.
fn on_curve(x: &FieldElement, y: &FieldElement) -> bool {
    let xx = x.square();
    let yy = y.square();
    let dxxyy = D * xx * yy;

    (yy - xx) == (FieldElement::ONE + dxxyy)
}

impl GeAffine {
    pub fn new(x: FieldElement, y: FieldElement) -> Self {
        GeAffine { x, y }
    }

    pub fn x(&self) -> FieldElement {
        self.x
    }

    pub fn y(&self) -> FieldElement {
        self.y
    }

    pub fn satisfies_curve_equation(&self) -> bool {
        on_curve(&self.x, &self.y)
    }
}

impl GeP2 {
    /// The neutral element `(0 : 1 : 1)`.
    pub const ZERO: Self = GeP2 {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
    };

    pub fn new(x: FieldElement, y: FieldElement, z: FieldElement) -> Self {
        GeP2 { x, y, z }
    }

    /// Affine coordinates, at the cost of one inversion.
    pub fn to_affine(&self) -> GeAffine {
        let recip = self.z.invert();

        GeAffine {
            x: self.x * recip,
            y: self.y * recip,
        }
    }

    /// Doubles the point.
    ///
    /// ```text
    /// XX = X²,  YY = Y²,  B = 2·Z²,  AA = (X + Y)²
    /// R  = (AA − (YY + XX), YY + XX, YY − XX, B − (YY − XX))
    /// ```
    pub fn dbl(&self) -> GeP1P1 {
        let xx = self.x.square();
        let yy = self.y.square();
        let b = self.z.square_and_double();
        let aa = (self.x + self.y).square();
        let yy_plus_xx = yy + xx;
        let yy_minus_xx = yy - xx;

        GeP1P1 {
            x: aa - yy_plus_xx,
            y: yy_plus_xx,
            z: yy_minus_xx,
            t: b - yy_minus_xx,
        }
    }

    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        let affine = self.to_affine();

        encode_affine(&affine.x, &affine.y)
    }

    /// 32-byte compressed encoding.
    pub fn encode(&self) -> EncodedFieldElement {
        EncodedFieldElement::from_field_bytes(self.to_bytes())
    }

    pub fn satisfies_curve_equation(&self) -> bool {
        self.to_affine().satisfies_curve_equation()
    }
}

impl GeP3 {
    /// The neutral element `(0 : 1 : 1 : 0)`.
    pub const ZERO: Self = GeP3 {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
        t: FieldElement::ZERO,
    };

    pub fn new(x: FieldElement, y: FieldElement, z: FieldElement, t: FieldElement) -> Self {
        GeP3 { x, y, z, t }
    }

    /// The Ed25519 base point, without precomputed tables.
    pub fn base_point() -> Self {
        let x = FieldElement::from_bytes(&BASE_POINT_X);
        let y = FieldElement::from_bytes(&BASE_POINT_ENCODED);

        GeP3 {
            x,
            y,
            z: FieldElement::ONE,
            t: x * y,
        }
    }

    /// Decompresses a 32-byte point encoding.
    ///
    /// Recovers `x` from
    ///
    /// ```text
    /// x² = (y² − 1) / (d·y² + 1)
    /// ```
    ///
    /// and picks the root whose parity matches bit 255. Runs on public data
    /// and branches freely.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCurvePoint`] if `x²` has no square root.
    pub fn decode(encoded: &[u8; 32]) -> Result<Self> {
        let y = FieldElement::from_bytes(encoded);
        let yy = y.square();
        let u = yy - FieldElement::ONE;
        let v = yy * D + FieldElement::ONE;

        let mut x = FieldElement::sqrt(&u, &v);

        let vxx = x.square() * v;
        if (vxx - u).is_non_zero() {
            if (vxx + u).is_non_zero() {
                return Err(Error::InvalidCurvePoint);
            }

            x = x * I;
        }

        let sign = encoded[31] >> 7 == 1;
        if x.is_negative() != sign {
            x = -x;
        }

        Ok(GeP3 {
            x,
            y,
            z: FieldElement::ONE,
            t: x * y,
        })
    }

    pub fn to_p2(&self) -> GeP2 {
        GeP2 {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    pub fn to_cached(&self) -> GeCached {
        GeCached {
            y_plus_x: self.y + self.x,
            y_minus_x: self.y - self.x,
            z: self.z,
            t2d: self.t * D2,
        }
    }

    /// Affine precomputed form. Costs one inversion.
    pub fn to_precomputed(&self) -> GePrecomp {
        let recip = self.z.invert();
        let x = self.x * recip;
        let y = self.y * recip;

        GePrecomp {
            y_plus_x: y + x,
            y_minus_x: y - x,
            xy2d: x * y * D2,
        }
    }

    pub fn to_affine(&self) -> GeAffine {
        self.to_p2().to_affine()
    }

    /// Doubles the point; `T` is not needed.
    pub fn dbl(&self) -> GeP1P1 {
        self.to_p2().dbl()
    }

    /// `self + q` using the extended-coordinate addition law.
    ///
    /// ```text
    /// A = (Y + X)·(Y₂ + X₂)   B = (Y − X)·(Y₂ − X₂)
    /// C = 2d·T₂·T             D = 2·Z·Z₂
    /// R = (A − B, A + B, D + C, D − C)
    /// ```
    pub fn add(&self, q: &GeCached) -> GeP1P1 {
        let a = (self.y + self.x) * q.y_plus_x;
        let b = (self.y - self.x) * q.y_minus_x;
        let c = q.t2d * self.t;
        let zz = self.z * q.z;
        let d = zz + zz;

        GeP1P1 {
            x: a - b,
            y: a + b,
            z: d + c,
            t: d - c,
        }
    }

    /// `self − q`.
    pub fn subtract(&self, q: &GeCached) -> GeP1P1 {
        let a = (self.y + self.x) * q.y_minus_x;
        let b = (self.y - self.x) * q.y_plus_x;
        let c = q.t2d * self.t;
        let zz = self.z * q.z;
        let d = zz + zz;

        GeP1P1 {
            x: a - b,
            y: a + b,
            z: d - c,
            t: d + c,
        }
    }

    /// Mixed addition with an affine precomputed point (`Z₂ = 1`).
    pub fn precomputed_add(&self, q: &GePrecomp) -> GeP1P1 {
        let a = (self.y + self.x) * q.y_plus_x;
        let b = (self.y - self.x) * q.y_minus_x;
        let c = q.xy2d * self.t;
        let d = self.z + self.z;

        GeP1P1 {
            x: a - b,
            y: a + b,
            z: d + c,
            t: d - c,
        }
    }

    /// Mixed subtraction of an affine precomputed point.
    pub fn precomputed_subtract(&self, q: &GePrecomp) -> GeP1P1 {
        let a = (self.y + self.x) * q.y_minus_x;
        let b = (self.y - self.x) * q.y_plus_x;
        let c = q.xy2d * self.t;
        let d = self.z + self.z;

        GeP1P1 {
            x: a - b,
            y: a + b,
            z: d - c,
            t: d + c,
        }
    }

    /// `−self`, flipping the sign of `X` and `T`.
    pub fn negate(&self) -> Self {
        GeP3 {
            x: -self.x,
            y: self.y,
            z: self.z,
            t: -self.t,
        }
    }

    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        self.to_p2().to_bytes()
    }

    /// 32-byte compressed encoding.
    pub fn encode(&self) -> EncodedFieldElement {
        self.to_p2().encode()
    }

    pub fn satisfies_curve_equation(&self) -> bool {
        self.to_p2().satisfies_curve_equation()
    }
}

impl GeP1P1 {
    pub fn new(x: FieldElement, y: FieldElement, z: FieldElement, t: FieldElement) -> Self {
        GeP1P1 { x, y, z, t }
    }

    /// `(X·T, Y·Z, Z·T)`.
    pub fn to_p2(&self) -> GeP2 {
        GeP2 {
            x: self.x * self.t,
            y: self.y * self.z,
            z: self.z * self.t,
        }
    }

    /// `(X·T, Y·Z, Z·T, X·Y)`.
    pub fn to_p3(&self) -> GeP3 {
        GeP3 {
            x: self.x * self.t,
            y: self.y * self.z,
            z: self.z * self.t,
            t: self.x * self.y,
        }
    }
}

impl GePrecomp {
    /// The neutral element `(1, 1, 0)`.
    pub const ZERO: Self = GePrecomp {
        y_plus_x: FieldElement::ONE,
        y_minus_x: FieldElement::ONE,
        xy2d: FieldElement::ZERO,
    };

    pub fn new(y_plus_x: FieldElement, y_minus_x: FieldElement, xy2d: FieldElement) -> Self {
        GePrecomp {
            y_plus_x,
            y_minus_x,
            xy2d,
        }
    }

    /// Replaces `self` by `u` when `choice` is set, in constant time.
    pub fn cmov(&mut self, u: &Self, choice: Choice) {
        self.conditional_assign(u, choice);
    }
}

impl GeCached {
    pub fn new(
        y_plus_x: FieldElement,
        y_minus_x: FieldElement,
        z: FieldElement,
        t2d: FieldElement,
    ) -> Self {
        GeCached {
            y_plus_x,
            y_minus_x,
            z,
            t2d,
        }
    }
}

impl Neg for GePrecomp {
    type Output = Self;

    fn neg(self) -> Self::Output {
        GePrecomp {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            xy2d: -self.xy2d,
        }
    }
}

impl ConditionallySelectable for GePrecomp {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        GePrecomp {
            y_plus_x: FieldElement::conditional_select(&a.y_plus_x, &b.y_plus_x, choice),
            y_minus_x: FieldElement::conditional_select(&a.y_minus_x, &b.y_minus_x, choice),
            xy2d: FieldElement::conditional_select(&a.xy2d, &b.xy2d, choice),
        }
    }
}

impl ConstantTimeEq for GePrecomp {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.y_plus_x.ct_eq(&other.y_plus_x)
            & self.y_minus_x.ct_eq(&other.y_minus_x)
            & self.xy2d.ct_eq(&other.xy2d)
    }
}

impl ConstantTimeEq for GeCached {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.y_plus_x.ct_eq(&other.y_plus_x)
            & self.y_minus_x.ct_eq(&other.y_minus_x)
            & self.z.ct_eq(&other.z)
            & self.t2d.ct_eq(&other.t2d)
    }
}

impl ConstantTimeEq for GeP3 {
    /// Compares `X₁·Z₂ = X₂·Z₁` and `Y₁·Z₂ = Y₂·Z₁`.
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.x * other.z).ct_eq(&(other.x * self.z))
            & (self.y * other.z).ct_eq(&(other.y * self.z))
    }
}

impl PartialEq for GeP3 {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for GeP3 {}
