//! Descriptor for the curve used by [`Ed25519Engine`](crate::engine::Ed25519Engine).

use super::constants::{GROUP_ORDER, HALF_GROUP_ORDER};
use super::table::{BASE_POINT, PrecomputedPoint};

/// Static facts about Edwards25519.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Curve;

impl Curve {
    pub const NAME: &'static str = "ed25519";

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// `ℓ`, little-endian.
    pub fn group_order(&self) -> &'static [u8; 32] {
        &GROUP_ORDER
    }

    /// `⌊ℓ / 2⌋`, little-endian.
    pub fn half_group_order(&self) -> &'static [u8; 32] {
        &HALF_GROUP_ORDER
    }

    /// The base point with its tables built.
    pub fn base_point(&self) -> &'static PrecomputedPoint {
        &BASE_POINT
    }
}
