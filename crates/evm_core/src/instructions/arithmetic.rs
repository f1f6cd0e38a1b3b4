//! `STOP` and the arithmetic family (`ADD`..`SIGNEXTEND`).

use alloy::primitives::U256;
use primitives::errors::EvmError;

use crate::{instructions::signed, Action, Interpreter};

pub fn stop(_interp: &mut Interpreter) -> Result<Action, EvmError> {
    Ok(Action::Halt)
}

pub fn add(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    interp.stack.push(a.wrapping_add(b))?;
    Ok(Action::Step)
}

pub fn mul(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    interp.stack.push(a.wrapping_mul(b))?;
    Ok(Action::Step)
}

pub fn sub(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    interp.stack.push(a.wrapping_sub(b))?;
    Ok(Action::Step)
}

pub fn div(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    let result = if b.is_zero() { U256::ZERO } else { a / b };
    interp.stack.push(result)?;
    Ok(Action::Step)
}

/// Signed division. Both operands are two's-complement 256-bit integers;
/// division truncates toward zero. `SDIV(a, 0) = 0`, and `SDIV(MIN, -1)`
/// wraps back to `MIN` rather than overflowing — this falls out of the
/// abs/sign split below without a dedicated special case: `abs(MIN)` is
/// `MIN`'s own unsigned bit pattern, and with both operands negative the
/// sign of the quotient is positive, so the result is returned unnegated.
pub fn sdiv(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    let result = if b.is_zero() {
        U256::ZERO
    } else {
        let neg_a = signed::is_negative(a);
        let neg_b = signed::is_negative(b);
        let quotient = signed::abs(a) / signed::abs(b);
        if neg_a != neg_b {
            signed::negate(quotient)
        } else {
            quotient
        }
    };
    interp.stack.push(result)?;
    Ok(Action::Step)
}

pub fn modulo(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    let result = if b.is_zero() { U256::ZERO } else { a % b };
    interp.stack.push(result)?;
    Ok(Action::Step)
}

/// Signed remainder. `SMOD(a, 0) = 0`; otherwise the result takes the
/// sign of the dividend `a`, matching truncated (not floored) division.
pub fn smod(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    let result = if b.is_zero() {
        U256::ZERO
    } else {
        let rem = signed::abs(a) % signed::abs(b);
        if signed::is_negative(a) && !rem.is_zero() {
            signed::negate(rem)
        } else {
            rem
        }
    };
    interp.stack.push(result)?;
    Ok(Action::Step)
}

/// `(a + b) % n` computed without widening past 256 bits. `overflowing_add`
/// reports whether `a + b` wrapped; when it did, the true sum is `2²⁵⁶ +
/// wrapped_sum`, and since both `a` and `b` were already reduced mod `n`
/// (so each is `< n <= 2²⁵⁶`), `2²⁵⁶ mod n` can be folded in as a single
/// extra subtraction: `wrapped_sum - n` is guaranteed not to underflow,
/// because `wrapped_sum + 2²⁵⁶ >= n` and `wrapped_sum < n` together force
/// `2²⁵⁶ >= n - wrapped_sum`, i.e. `wrapped_sum - n (mod 2²⁵⁶)` lands back
/// in range.
fn add_mod_u256(a: U256, b: U256, n: U256) -> U256 {
    let (sum, overflowed) = a.overflowing_add(b);
    if overflowed {
        sum.wrapping_sub(n)
    } else if sum >= n {
        sum - n
    } else {
        sum
    }
}

/// `(a * b) % n` via binary double-and-add, built entirely from
/// [`add_mod_u256`] so the product never needs a width wider than 256
/// bits.
fn mul_mod_u256(mut a: U256, mut b: U256, n: U256) -> U256 {
    let mut result = U256::ZERO;
    a %= n;
    while !b.is_zero() {
        if b.bit(0) {
            result = add_mod_u256(result, a, n);
        }
        a = add_mod_u256(a, a, n);
        b >>= 1;
    }
    result
}

pub fn addmod(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    let n = interp.stack.pop()?;
    let result = if n.is_zero() {
        U256::ZERO
    } else {
        add_mod_u256(a % n, b % n, n)
    };
    interp.stack.push(result)?;
    Ok(Action::Step)
}

pub fn mulmod(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    let n = interp.stack.pop()?;
    let result = if n.is_zero() {
        U256::ZERO
    } else {
        mul_mod_u256(a, b, n)
    };
    interp.stack.push(result)?;
    Ok(Action::Step)
}

/// `aᵉ mod 2²⁵⁶` via binary square-and-multiply, built entirely from
/// `wrapping_mul` so neither the squaring nor the multiply step ever
/// panics on overflow — the same shape as [`mul_mod_u256`] above, minus
/// the final reduction.
fn exp_u256(mut base: U256, mut exponent: U256) -> U256 {
    let mut result = U256::from(1);
    while !exponent.is_zero() {
        if exponent.bit(0) {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exponent >>= 1;
    }
    result
}

pub fn exp(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let base = interp.stack.pop()?;
    let exponent = interp.stack.pop()?;
    interp.stack.push(exp_u256(base, exponent))?;
    Ok(Action::Step)
}

/// Sign-extend the low `byte_num + 1` bytes of `x` out to the full width.
/// `byte_num >= 31` is a no-op: byte 31 already spans the entire 256-bit
/// word, so "extending" it changes nothing (and also keeps the later
/// `1 << (bit_index + 1)` shift amount below 256).
pub fn signextend(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let byte_num = interp.stack.pop()?;
    let x = interp.stack.pop()?;
    let result = if byte_num >= U256::from(31) {
        x
    } else {
        let byte_num = byte_num.as_limbs()[0] as usize;
        let bit_index = 8 * byte_num + 7;
        let mask = (U256::from(1u64) << (bit_index + 1)) - U256::from(1u64);
        if x.bit(bit_index) {
            x | !mask
        } else {
            x & mask
        }
    };
    interp.stack.push(result)?;
    Ok(Action::Step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Bytes, U256};
    use primitives::evm_types::{BlockEnv, EvmStorage, Transaction};

    fn interp(state: &mut EvmStorage) -> Interpreter<'_> {
        Interpreter::new(
            Bytes::new(),
            Transaction::default(),
            BlockEnv::default(),
            state,
            true,
            0,
        )
    }

    #[test]
    fn add_wraps_on_overflow() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(U256::MAX).unwrap();
        i.stack.push(U256::from(1)).unwrap();
        add(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::ZERO);
    }

    #[test]
    fn div_by_zero_is_zero() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(U256::ZERO).unwrap();
        i.stack.push(U256::from(5)).unwrap();
        div(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::ZERO);
    }

    #[test]
    fn sdiv_min_by_minus_one_wraps_to_min() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        let min = U256::from(1u64) << 255;
        let minus_one = U256::MAX;
        i.stack.push(minus_one).unwrap();
        i.stack.push(min).unwrap();
        sdiv(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), min);
    }

    #[test]
    fn sdiv_negative_by_positive_is_negative() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        // a = -8, b = 2 -> -4
        let neg_eight = signed::negate(U256::from(8));
        i.stack.push(U256::from(2)).unwrap();
        i.stack.push(neg_eight).unwrap();
        sdiv(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), signed::negate(U256::from(4)));
    }

    #[test]
    fn smod_takes_sign_of_dividend() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        // a = -7, b = 3 -> -1 (truncated division remainder)
        let neg_seven = signed::negate(U256::from(7));
        i.stack.push(U256::from(3)).unwrap();
        i.stack.push(neg_seven).unwrap();
        smod(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), signed::negate(U256::from(1)));
    }

    #[test]
    fn addmod_reduces_past_wraparound() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(U256::from(8)).unwrap();
        i.stack.push(U256::MAX).unwrap();
        i.stack.push(U256::from(2)).unwrap();
        addmod(&mut i).unwrap();
        // (MAX + 2) % 8 == (2^256 + 1) % 8 == 1
        assert_eq!(i.stack.pop().unwrap(), U256::from(1));
    }

    #[test]
    fn mulmod_matches_addmod_based_reference() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(U256::from(7)).unwrap();
        i.stack.push(U256::from(5)).unwrap();
        i.stack.push(U256::from(4)).unwrap();
        mulmod(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::from((4 * 5) % 7));
    }

    #[test]
    fn mulmod_with_zero_modulus_is_zero() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(U256::ZERO).unwrap();
        i.stack.push(U256::from(5)).unwrap();
        i.stack.push(U256::from(4)).unwrap();
        mulmod(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::ZERO);
    }

    #[test]
    fn exp_computes_small_power() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(U256::from(10)).unwrap();
        i.stack.push(U256::from(2)).unwrap();
        exp(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::from(1024));
    }

    #[test]
    fn exp_wraps_on_overflow_instead_of_panicking() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        // 2 ** 256 == 2^256 mod 2^256 == 0.
        i.stack.push(U256::from(256)).unwrap();
        i.stack.push(U256::from(2)).unwrap();
        exp(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::ZERO);
    }

    #[test]
    fn signextend_extends_negative_byte() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        // byte 0 of 0xff is negative -> sign-extend to all-ones
        i.stack.push(U256::from(0xffu64)).unwrap();
        i.stack.push(U256::ZERO).unwrap();
        signextend(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::MAX);
    }

    #[test]
    fn signextend_leaves_positive_byte_zero_padded() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(U256::from(0x7fu64)).unwrap();
        i.stack.push(U256::ZERO).unwrap();
        signextend(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::from(0x7fu64));
    }

    #[test]
    fn signextend_noop_past_byte_31() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(U256::from(0xabu64)).unwrap();
        i.stack.push(U256::from(31)).unwrap();
        signextend(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::from(0xabu64));
    }
}
