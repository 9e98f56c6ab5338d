//! Fixed-point values scaled by 1e18.
//!
//! Products are formed in 256 bits and narrowed back with an overflow check,
//! so `a * b / c` never wraps even when `a * b` exceeds `u128::MAX`.
//! Division truncates; the lost remainder is accepted dust.

#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use uint::construct_uint;

construct_uint! {
    pub struct U256(4);
}

/// Fixed-point scaling factor.
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// `a * b / denominator` in 256-bit precision, truncating.
///
/// Returns `None` when `denominator` is zero or the quotient does not fit in `u128`.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let product = U256::from(a).checked_mul(U256::from(b))?;
    narrow(product / U256::from(denominator))
}

fn narrow(value: U256) -> Option<u128> {
    if value > U256::from(u128::MAX) {
        None
    } else {
        Some(value.as_u128())
    }
}

/// A non-negative quantity carrying 18 decimal places.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Scaled(u128);

impl Scaled {
    pub const ZERO: Scaled = Scaled(0);

    pub const fn from_raw(raw: u128) -> Self {
        Scaled(raw)
    }

    pub const fn raw(self) -> u128 {
        self.0
    }

    /// Lifts a whole token amount into fixed point.
    pub fn from_amount(amount: u64) -> Option<Self> {
        (amount as u128).checked_mul(SCALE).map(Scaled)
    }

    /// `numerator / denominator` as a fixed-point value.
    pub fn ratio(numerator: u64, denominator: u64) -> Option<Self> {
        mul_div(numerator as u128, SCALE, denominator as u128).map(Scaled)
    }

    pub fn checked_add(self, rhs: Scaled) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Scaled)
    }

    pub fn checked_sub(self, rhs: Scaled) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Scaled)
    }

    /// `self * multiplier / divisor`, staying in fixed point.
    pub fn mul_div(self, multiplier: u128, divisor: u128) -> Option<Self> {
        mul_div(self.0, multiplier, divisor).map(Scaled)
    }

    /// `amount * self`, truncated back to whole base units.
    pub fn apply_to(self, amount: u64) -> Option<u64> {
        mul_div(amount as u128, self.0, SCALE).and_then(|v| u64::try_from(v).ok())
    }

    /// Whole base units contained in `self`, truncated.
    pub fn to_amount(self) -> Option<u64> {
        u64::try_from(self.0 / SCALE).ok()
    }
}
