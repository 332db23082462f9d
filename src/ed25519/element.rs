//! Coordinate-system-tagged group elements.
//!
//! [`GroupElement`] wraps the typed representations from
//! [`group`](super::group) behind one value whose coordinate system is only
//! known at runtime. Operations check the tag and report
//! [`Error::UnsupportedOperation`] or [`Error::UnsupportedConversion`] instead
//! of silently producing garbage.
//!
//! The legal conversions are
//!
//! ```text
//! P2          -> P2
//! P3          -> P2, P3, Cached
//! P1xP1       -> P2, P3, P1xP1
//! Precomputed -> Precomputed
//! Cached      -> Cached
//! ```

use subtle::{Choice, ConstantTimeEq};

use super::encoded::EncodedFieldElement;
use super::field::FieldElement;
use super::group::{GeAffine, GeCached, GeP1P1, GeP2, GeP3, GePrecomp};
use crate::error::{Error, Result};

/// Representation a [`GroupElement`] is held in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateSystem {
    Affine,
    P2,
    P3,
    P1xP1,
    Precomputed,
    Cached,
}

/// A curve point in one of six coordinate systems.
#[derive(Debug, Clone, Copy)]
pub enum GroupElement {
    Affine(GeAffine),
    P2(GeP2),
    P3(GeP3),
    P1xP1(GeP1P1),
    Precomputed(GePrecomp),
    Cached(GeCached),
}

impl GroupElement {
    pub fn affine(x: FieldElement, y: FieldElement) -> Self {
        GroupElement::Affine(GeAffine::new(x, y))
    }

    pub fn p2(x: FieldElement, y: FieldElement, z: FieldElement) -> Self {
        GroupElement::P2(GeP2::new(x, y, z))
    }

    pub fn p3(x: FieldElement, y: FieldElement, z: FieldElement, t: FieldElement) -> Self {
        GroupElement::P3(GeP3::new(x, y, z, t))
    }

    pub fn p1xp1(x: FieldElement, y: FieldElement, z: FieldElement, t: FieldElement) -> Self {
        GroupElement::P1xP1(GeP1P1::new(x, y, z, t))
    }

    pub fn precomputed(y_plus_x: FieldElement, y_minus_x: FieldElement, xy2d: FieldElement) -> Self {
        GroupElement::Precomputed(GePrecomp::new(y_plus_x, y_minus_x, xy2d))
    }

    pub fn cached(
        y_plus_x: FieldElement,
        y_minus_x: FieldElement,
        z: FieldElement,
        t2d: FieldElement,
    ) -> Self {
        GroupElement::Cached(GeCached::new(y_plus_x, y_minus_x, z, t2d))
    }

    /// Decodes a 32-byte compressed point into P3 coordinates.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidEncodingLength`] for any other length and
    /// [`Error::InvalidCurvePoint`] when no `x` exists for the encoded `y`.
    pub fn decode(encoded: &[u8]) -> Result<Self> {
        let bytes: &[u8; 32] = encoded
            .try_into()
            .map_err(|_| Error::InvalidEncodingLength(encoded.len()))?;

        GeP3::decode(bytes).map(GroupElement::P3)
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        match self {
            GroupElement::Affine(_) => CoordinateSystem::Affine,
            GroupElement::P2(_) => CoordinateSystem::P2,
            GroupElement::P3(_) => CoordinateSystem::P3,
            GroupElement::P1xP1(_) => CoordinateSystem::P1xP1,
            GroupElement::Precomputed(_) => CoordinateSystem::Precomputed,
            GroupElement::Cached(_) => CoordinateSystem::Cached,
        }
    }

    /// The first slot: `x`, `X`, `Y + X` depending on the system.
    pub fn x(&self) -> FieldElement {
        match self {
            GroupElement::Affine(g) => g.x,
            GroupElement::P2(g) => g.x,
            GroupElement::P3(g) => g.x,
            GroupElement::P1xP1(g) => g.x,
            GroupElement::Precomputed(g) => g.y_plus_x,
            GroupElement::Cached(g) => g.y_plus_x,
        }
    }

    /// The second slot: `y`, `Y`, `Y − X` depending on the system.
    pub fn y(&self) -> FieldElement {
        match self {
            GroupElement::Affine(g) => g.y,
            GroupElement::P2(g) => g.y,
            GroupElement::P3(g) => g.y,
            GroupElement::P1xP1(g) => g.y,
            GroupElement::Precomputed(g) => g.y_minus_x,
            GroupElement::Cached(g) => g.y_minus_x,
        }
    }

    /// The third slot. Affine points report `1`; precomputed points `2d·x·y`.
    pub fn z(&self) -> FieldElement {
        match self {
            GroupElement::Affine(_) => FieldElement::ONE,
            GroupElement::P2(g) => g.z,
            GroupElement::P3(g) => g.z,
            GroupElement::P1xP1(g) => g.z,
            GroupElement::Precomputed(g) => g.xy2d,
            GroupElement::Cached(g) => g.z,
        }
    }

    /// The fourth slot, absent for Affine, P2 and Precomputed.
    pub fn t(&self) -> Option<FieldElement> {
        match self {
            GroupElement::P3(g) => Some(g.t),
            GroupElement::P1xP1(g) => Some(g.t),
            GroupElement::Cached(g) => Some(g.t2d),
            _ => None,
        }
    }

    /// Converts to `target`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedConversion`] for pairs outside the table in the
    /// module documentation.
    pub fn to_coordinate_system(&self, target: CoordinateSystem) -> Result<Self> {
        let converted = match (self, target) {
            (GroupElement::P2(g), CoordinateSystem::P2) => GroupElement::P2(*g),

            (GroupElement::P3(g), CoordinateSystem::P2) => GroupElement::P2(g.to_p2()),
            (GroupElement::P3(g), CoordinateSystem::P3) => GroupElement::P3(*g),
            (GroupElement::P3(g), CoordinateSystem::Cached) => GroupElement::Cached(g.to_cached()),

            (GroupElement::P1xP1(g), CoordinateSystem::P2) => GroupElement::P2(g.to_p2()),
            (GroupElement::P1xP1(g), CoordinateSystem::P3) => GroupElement::P3(g.to_p3()),
            (GroupElement::P1xP1(g), CoordinateSystem::P1xP1) => GroupElement::P1xP1(*g),

            (GroupElement::Precomputed(g), CoordinateSystem::Precomputed) => {
                GroupElement::Precomputed(*g)
            }

            (GroupElement::Cached(g), CoordinateSystem::Cached) => GroupElement::Cached(*g),

            (_, to) => {
                return Err(Error::UnsupportedConversion {
                    from: self.coordinate_system(),
                    to,
                });
            }
        };

        Ok(converted)
    }

    pub fn to_p2(&self) -> Result<Self> {
        self.to_coordinate_system(CoordinateSystem::P2)
    }

    pub fn to_p3(&self) -> Result<Self> {
        self.to_coordinate_system(CoordinateSystem::P3)
    }

    pub fn to_cached(&self) -> Result<Self> {
        self.to_coordinate_system(CoordinateSystem::Cached)
    }

    /// The typed P3 point, if this element is held in P3.
    pub fn as_p3(&self) -> Option<&GeP3> {
        match self {
            GroupElement::P3(g) => Some(g),
            _ => None,
        }
    }

    /// Affine coordinates of Affine, P2, P3 and P1xP1 elements.
    fn affine_coordinates(&self) -> Option<GeAffine> {
        match self {
            GroupElement::Affine(g) => Some(*g),
            GroupElement::P2(g) => Some(g.to_affine()),
            GroupElement::P3(g) => Some(g.to_affine()),
            GroupElement::P1xP1(g) => Some(g.to_p2().to_affine()),
            GroupElement::Precomputed(_) | GroupElement::Cached(_) => None,
        }
    }

    fn unsupported(&self, operation: &'static str) -> Error {
        Error::UnsupportedOperation {
            operation,
            system: self.coordinate_system(),
        }
    }

    fn require_p3(&self, operation: &'static str) -> Result<&GeP3> {
        self.as_p3().ok_or_else(|| self.unsupported(operation))
    }

    /// `2·self` in P1xP1. Defined for P2 and P3.
    pub fn dbl(&self) -> Result<Self> {
        match self {
            GroupElement::P2(g) => Ok(GroupElement::P1xP1(g.dbl())),
            GroupElement::P3(g) => Ok(GroupElement::P1xP1(g.dbl())),
            _ => Err(self.unsupported("dbl")),
        }
    }

    /// `self + q` for P3 `self` and Cached `q`.
    pub fn add(&self, q: &GroupElement) -> Result<Self> {
        let p = self.require_p3("add")?;

        match q {
            GroupElement::Cached(q) => Ok(GroupElement::P1xP1(p.add(q))),
            _ => Err(q.unsupported("add")),
        }
    }

    /// `self − q` for P3 `self` and Cached `q`.
    pub fn subtract(&self, q: &GroupElement) -> Result<Self> {
        let p = self.require_p3("subtract")?;

        match q {
            GroupElement::Cached(q) => Ok(GroupElement::P1xP1(p.subtract(q))),
            _ => Err(q.unsupported("subtract")),
        }
    }

    /// `self + q` for P3 `self` and Precomputed `q`.
    pub fn precomputed_add(&self, q: &GroupElement) -> Result<Self> {
        let p = self.require_p3("precomputed_add")?;

        match q {
            GroupElement::Precomputed(q) => Ok(GroupElement::P1xP1(p.precomputed_add(q))),
            _ => Err(q.unsupported("precomputed_add")),
        }
    }

    /// `self − q` for P3 `self` and Precomputed `q`.
    pub fn precomputed_subtract(&self, q: &GroupElement) -> Result<Self> {
        let p = self.require_p3("precomputed_subtract")?;

        match q {
            GroupElement::Precomputed(q) => Ok(GroupElement::P1xP1(p.precomputed_subtract(q))),
            _ => Err(q.unsupported("precomputed_subtract")),
        }
    }

    /// `−self`, in P3.
    pub fn negate(&self) -> Result<Self> {
        self.require_p3("negate").map(|p| GroupElement::P3(p.negate()))
    }

    /// Constant-time select between two precomputed elements.
    ///
    /// Returns `u` when `choice` is set and `self` otherwise.
    pub fn cmov(&self, u: &GroupElement, choice: Choice) -> Result<Self> {
        match (self, u) {
            (GroupElement::Precomputed(a), GroupElement::Precomputed(b)) => {
                let mut selected = *a;
                selected.cmov(b, choice);

                Ok(GroupElement::Precomputed(selected))
            }
            (GroupElement::Precomputed(_), other) => Err(other.unsupported("cmov")),
            _ => Err(self.unsupported("cmov")),
        }
    }

    /// Compressed 32-byte encoding; systems other than P2 and P3 go through P2.
    pub fn encode(&self) -> Result<EncodedFieldElement> {
        match self {
            GroupElement::P2(g) => Ok(g.encode()),
            GroupElement::P3(g) => Ok(g.encode()),
            _ => self.to_p2()?.encode(),
        }
    }

    /// Whether the affine coordinates satisfy the curve equation.
    pub fn satisfies_curve_equation(&self) -> Result<bool> {
        match self {
            GroupElement::P2(g) => Ok(g.satisfies_curve_equation()),
            GroupElement::P3(g) => Ok(g.satisfies_curve_equation()),
            _ => self.to_p2()?.satisfies_curve_equation(),
        }
    }
}

impl From<GeP3> for GroupElement {
    fn from(point: GeP3) -> Self {
        GroupElement::P3(point)
    }
}

impl From<GeP2> for GroupElement {
    fn from(point: GeP2) -> Self {
        GroupElement::P2(point)
    }
}

impl From<GeP1P1> for GroupElement {
    fn from(point: GeP1P1) -> Self {
        GroupElement::P1xP1(point)
    }
}

impl From<GePrecomp> for GroupElement {
    fn from(point: GePrecomp) -> Self {
        GroupElement::Precomputed(point)
    }
}

impl From<GeCached> for GroupElement {
    fn from(point: GeCached) -> Self {
        GroupElement::Cached(point)
    }
}

/// Two elements are equal when they describe the same point.
///
/// Elements held in different systems are compared after converting the
/// right-hand side into the left-hand side's system; if that conversion is
/// not allowed the elements compare unequal. Affine elements compare by
/// affine coordinates against any projective system.
impl PartialEq for GroupElement {
    fn eq(&self, other: &Self) -> bool {
        if matches!(self, GroupElement::Affine(_)) || matches!(other, GroupElement::Affine(_)) {
            return match (self.affine_coordinates(), other.affine_coordinates()) {
                (Some(a), Some(b)) => a.x == b.x && a.y == b.y,
                _ => false,
            };
        }

        let converted;
        let other = if self.coordinate_system() == other.coordinate_system() {
            other
        } else {
            match other.to_coordinate_system(self.coordinate_system()) {
                Ok(element) => {
                    converted = element;
                    &converted
                }
                Err(_) => return false,
            }
        };

        match (self, other) {
            (GroupElement::P2(a), GroupElement::P2(b)) => a.to_bytes() == b.to_bytes(),
            (GroupElement::P3(a), GroupElement::P3(b)) => a == b,
            (GroupElement::P1xP1(a), GroupElement::P1xP1(b)) => {
                a.to_p2().to_bytes() == b.to_p2().to_bytes()
            }
            (GroupElement::Precomputed(a), GroupElement::Precomputed(b)) => a.ct_eq(b).into(),
            (GroupElement::Cached(a), GroupElement::Cached(b)) => a.ct_eq(b).into(),
            _ => false,
        }
    }
}
