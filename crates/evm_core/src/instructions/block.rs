//! Block-context accessors (`BLOCKHASH`..`BASEFEE`).

use alloy::primitives::U256;
use primitives::errors::EvmError;

use crate::{instructions::address_to_word, Action, Interpreter};

/// No block-chain consensus is in scope, so there is no history of real
/// block hashes to answer from; this pushes 0 unconditionally, the
/// degenerate case for "outside the lookback window" on every input.
pub fn blockhash(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.pop()?;
    interp.stack.push(U256::ZERO)?;
    Ok(Action::Step)
}

pub fn coinbase(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(address_to_word(interp.block.coinbase))?;
    Ok(Action::Step)
}

pub fn timestamp(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(interp.block.timestamp)?;
    Ok(Action::Step)
}

pub fn number(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(interp.block.number)?;
    Ok(Action::Step)
}

pub fn difficulty(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(interp.block.difficulty)?;
    Ok(Action::Step)
}

pub fn gaslimit(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(interp.block.gas_limit)?;
    Ok(Action::Step)
}

pub fn chainid(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(interp.block.chain_id)?;
    Ok(Action::Step)
}

pub fn basefee(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(interp.block.base_fee)?;
    Ok(Action::Step)
}
