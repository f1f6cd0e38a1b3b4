//! Pure stack-shuffling opcodes: `POP`, `PUSH0`..`PUSH32`, `DUP1`..`DUP16`,
//! `SWAP1`..`SWAP16`.
//!
//! `PUSHn`/`DUPn`/`SWAPn` each occupy 16 (or 32) adjacent opcode values
//! that differ only in `n`; rather than generate 64 near-identical
//! handlers, one handler per family re-reads the opcode byte it was
//! dispatched from off `interp.code[interp.pc]` and derives `n` from it.

use alloy::primitives::U256;
use primitives::errors::EvmError;

use crate::{opcodes, Action, Interpreter};

pub fn pop(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.pop()?;
    Ok(Action::Step)
}

/// `PUSH1`..`PUSH32`: read the `n` bytes right after the opcode,
/// big-endian, and push them. Sets `pc` itself (past the immediate) and
/// reports [`Action::Jumped`] so the dispatch loop doesn't also advance
/// it by one.
pub fn push(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let op = interp.code[interp.pc];
    let len = opcodes::push_immediate_len(op).expect("push handler dispatched for non-PUSH op");
    let start = interp.pc + 1;
    let end = (start + len).min(interp.code.len());
    let mut bytes = [0u8; 32];
    let available = &interp.code[start..end];
    bytes[32 - len..32 - len + available.len()].copy_from_slice(available);
    interp.stack.push(U256::from_be_bytes(bytes))?;
    interp.pc = start + len;
    Ok(Action::Jumped)
}

pub fn push0(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(U256::ZERO)?;
    Ok(Action::Step)
}

/// `DUP1`..`DUP16`.
pub fn dup(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let op = interp.code[interp.pc];
    let n = opcodes::dup_depth(op).expect("dup handler dispatched for non-DUP op");
    interp.stack.dup(n)?;
    Ok(Action::Step)
}

/// `SWAP1`..`SWAP16`.
pub fn swap(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let op = interp.code[interp.pc];
    let n = opcodes::swap_depth(op).expect("swap handler dispatched for non-SWAP op");
    interp.stack.swap(n)?;
    Ok(Action::Step)
}

/// `PC`: the offset of the `PC` opcode itself, not the offset after it.
pub fn pc(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(U256::from(interp.pc))?;
    Ok(Action::Step)
}
