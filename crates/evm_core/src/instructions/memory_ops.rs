//! Byte-addressable volatile memory opcodes (`MLOAD`..`MSIZE`, `MCOPY`).

use alloy::primitives::U256;
use primitives::errors::EvmError;

use crate::{instructions::as_usize, Action, Interpreter};

pub fn mload(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let offset = interp.stack.pop()?;
    let value = interp.memory.load_word(as_usize(offset));
    interp.stack.push(value)?;
    Ok(Action::Step)
}

pub fn mstore(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let offset = interp.stack.pop()?;
    let value = interp.stack.pop()?;
    interp.memory.store_word(as_usize(offset), value);
    Ok(Action::Step)
}

/// Stores only the low-order byte of `value` at `offset`.
pub fn mstore8(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let offset = interp.stack.pop()?;
    let value = interp.stack.pop()?;
    let byte = value.as_limbs()[0] as u8;
    interp.memory.store_byte(as_usize(offset), byte);
    Ok(Action::Step)
}

pub fn msize(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(U256::from(interp.memory.msize()))?;
    Ok(Action::Step)
}

/// `MCOPY(dest, src, length)`: copy within this frame's own memory,
/// handling overlap correctly.
pub fn mcopy(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let dest = interp.stack.pop()?;
    let src = interp.stack.pop()?;
    let length = interp.stack.pop()?;
    interp
        .memory
        .copy_within(as_usize(dest), as_usize(src), as_usize(length));
    Ok(Action::Step)
}
