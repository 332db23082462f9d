//! Edwards25519 arithmetic.
//!
//! The layers build on each other:
//!
//! - [`field`]: elements of GF(2²⁵⁵ − 19) in ten signed limbs
//! - [`encoded`]: their 32/64-byte little-endian form, plus scalar
//!   reduction modulo the group order
//! - [`scalar`]: radix-2²¹ reduction, multiply-add and digit recodings
//! - [`group`]: one type per coordinate system and the addition laws
//! - [`element`]: [`GroupElement`], the runtime-tagged facade over [`group`]
//! - [`table`]: precomputed tables, fixed-base and double-scalar multiplication
//!
//! Only [`table::PrecomputedPoint::double_scalar_multiply_variable_time`]
//! and point decoding branch on their inputs. Everything that touches
//! private scalars goes through conditional moves.

pub mod constants;
pub mod curve;
pub mod element;
pub mod encoded;
pub mod field;
pub mod group;
pub mod scalar;
pub mod table;

pub use curve::Curve;
pub use element::{CoordinateSystem, GroupElement};
pub use encoded::EncodedFieldElement;
pub use field::FieldElement;
pub use group::{GeAffine, GeCached, GeP1P1, GeP2, GeP3, GePrecomp};
pub use table::{BASE_POINT, PrecomputedPoint};
