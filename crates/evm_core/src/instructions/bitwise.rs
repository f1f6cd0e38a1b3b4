//! Bitwise opcodes (`AND`..`SAR`).

use alloy::primitives::U256;
use primitives::errors::EvmError;

use crate::{instructions::signed, Action, Interpreter};

pub fn and(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    interp.stack.push(a & b)?;
    Ok(Action::Step)
}

pub fn or(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    interp.stack.push(a | b)?;
    Ok(Action::Step)
}

pub fn xor(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    interp.stack.push(a ^ b)?;
    Ok(Action::Step)
}

pub fn not(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    interp.stack.push(!a)?;
    Ok(Action::Step)
}

/// `BYTE(i, x)`: the `i`-th byte of `x` counting from the most
/// significant end, zero if `i >= 32`.
pub fn byte(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let i = interp.stack.pop()?;
    let x = interp.stack.pop()?;
    let result = if i >= U256::from(32) {
        U256::ZERO
    } else {
        let i = i.as_limbs()[0] as usize;
        let shift = (31 - i) * 8;
        (x >> shift) & U256::from(0xffu64)
    };
    interp.stack.push(result)?;
    Ok(Action::Step)
}

/// Logical left shift, saturating to `0` once the shift amount reaches
/// 256 rather than masking it down to `shift % 256` — shifting a 256-bit
/// word left by 256 or more always clears it entirely.
pub fn shl(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let shift = interp.stack.pop()?;
    let value = interp.stack.pop()?;
    let result = if shift >= U256::from(256) {
        U256::ZERO
    } else {
        value << shift.as_limbs()[0] as usize
    };
    interp.stack.push(result)?;
    Ok(Action::Step)
}

/// Logical right shift, same saturation rule as `SHL`.
pub fn shr(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let shift = interp.stack.pop()?;
    let value = interp.stack.pop()?;
    let result = if shift >= U256::from(256) {
        U256::ZERO
    } else {
        value >> shift.as_limbs()[0] as usize
    };
    interp.stack.push(result)?;
    Ok(Action::Step)
}

/// Arithmetic right shift: sign-extends from the top rather than
/// zero-filling. A shift of `>= 256` collapses to `0` for a non-negative
/// value or `-1` (all ones) for a negative one, since every original bit
/// has shifted out and only the sign remains.
pub fn sar(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let shift = interp.stack.pop()?;
    let value = interp.stack.pop()?;
    let negative = signed::is_negative(value);
    let result = if shift >= U256::from(256) {
        if negative { U256::MAX } else { U256::ZERO }
    } else {
        let n = shift.as_limbs()[0] as usize;
        if n == 0 {
            value
        } else {
            let shifted = value >> n;
            if negative {
                let sign_mask = U256::MAX << (256 - n);
                shifted | sign_mask
            } else {
                shifted
            }
        }
    };
    interp.stack.push(result)?;
    Ok(Action::Step)
}
