//! Two's-complement helpers shared by the signed arithmetic (`SDIV`,
//! `SMOD`) and bitwise (`SAR`) handlers. Kept as plain `U256` bit
//! manipulation rather than routing through `alloy::primitives::I256` so
//! the wraparound behavior at the signed extremes (`MIN / -1`, shifts by
//! `>= 256`) stays explicit: a word `x` is negative iff its top bit is
//! set, in which case its signed value is `x − 2²⁵⁶`.

use alloy::primitives::U256;

pub(crate) fn is_negative(x: U256) -> bool {
    x.bit(255)
}

/// Two's-complement negation, wrapping at the signed extremes exactly as
/// the real EVM's 256-bit arithmetic does (`negate(MIN) == MIN`).
pub(crate) fn negate(x: U256) -> U256 {
    (!x).wrapping_add(U256::from(1))
}

pub(crate) fn abs(x: U256) -> U256 {
    if is_negative(x) { negate(x) } else { x }
}
