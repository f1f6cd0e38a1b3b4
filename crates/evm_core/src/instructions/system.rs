//! Opcodes that end a frame (`RETURN`, `REVERT`, `INVALID`,
//! `SELFDESTRUCT`) plus `SHA3`, the one hashing primitive the interpreter
//! itself needs (for `EXTCODEHASH` parity — see `instructions::environment`).

use alloy::primitives::U256;
use primitives::errors::EvmError;

use crate::{
    instructions::{as_usize, word_to_address},
    opcodes::Opcode,
    Action, Interpreter,
};

/// `SHA3`/`KECCAK256(offset, length)`: hash the memory slice and push the
/// digest as a word.
pub fn sha3(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let offset = as_usize(interp.stack.pop()?);
    let length = as_usize(interp.stack.pop()?);
    let bytes = interp.memory.load_range(offset, length);
    let digest = alloy::primitives::keccak256(&bytes);
    interp.stack.push(U256::from_be_bytes(digest.0))?;
    Ok(Action::Step)
}

pub fn ret(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let offset = as_usize(interp.stack.pop()?);
    let length = as_usize(interp.stack.pop()?);
    interp.return_data = interp.memory.load_range(offset, length).into();
    Ok(Action::Halt)
}

/// `REVERT` reports failure through the same `Err` path every other
/// error kind uses; the dispatch loop's `EvmError::revert_data()` call
/// recovers the payload for the caller's `ExecutionOutcome`.
pub fn revert(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let offset = as_usize(interp.stack.pop()?);
    let length = as_usize(interp.stack.pop()?);
    let data = interp.memory.load_range(offset, length);
    Err(EvmError::Revert(data.into()))
}

pub fn invalid(_interp: &mut Interpreter) -> Result<Action, EvmError> {
    Err(EvmError::InvalidOpcode(Opcode::INVALID as u8))
}

/// `SELFDESTRUCT(beneficiary)`: move the executing account's entire
/// balance to `beneficiary` (creating it if absent) and remove the
/// executing account from world state, then halt with no return payload.
pub fn selfdestruct(interp: &mut Interpreter) -> Result<Action, EvmError> {
    if !interp.writable {
        return Err(EvmError::StaticCallViolation);
    }
    let beneficiary = word_to_address(interp.stack.pop()?);
    let executing = interp.tx.address;
    let balance = interp.state.balance_of(executing);
    interp.state.transfer(executing, beneficiary, balance);
    interp.state.remove_account(executing);
    Ok(Action::Halt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, Bytes};
    use primitives::evm_types::{BlockEnv, EvmStorage, Transaction};

    fn interp(tx: Transaction, state: &mut EvmStorage) -> Interpreter<'_> {
        Interpreter::new(Bytes::new(), tx, BlockEnv::default(), state, true, 0)
    }

    #[test]
    fn sha3_of_empty_range_is_well_known_digest() {
        let mut state = EvmStorage::default();
        let mut i = interp(Transaction::default(), &mut state);
        i.stack.push(U256::ZERO).unwrap();
        i.stack.push(U256::ZERO).unwrap();
        sha3(&mut i).unwrap();
        let got = i.stack.pop().unwrap();
        let expected = U256::from_be_bytes(alloy::primitives::keccak256([]).0);
        assert_eq!(got, expected);
    }

    #[test]
    fn return_captures_memory_slice() {
        let mut state = EvmStorage::default();
        let mut i = interp(Transaction::default(), &mut state);
        i.memory.store_word(0, U256::from(42));
        i.stack.push(U256::from(32)).unwrap();
        i.stack.push(U256::from(0)).unwrap();
        let action = ret(&mut i).unwrap();
        assert_eq!(action, Action::Halt);
        assert_eq!(i.return_data.len(), 32);
    }

    #[test]
    fn revert_carries_payload_through_the_error() {
        let mut state = EvmStorage::default();
        let mut i = interp(Transaction::default(), &mut state);
        i.memory.store_byte(0, 0xAB);
        i.stack.push(U256::from(1)).unwrap();
        i.stack.push(U256::from(0)).unwrap();
        match revert(&mut i) {
            Err(EvmError::Revert(data)) => assert_eq!(data.as_ref(), &[0xAB]),
            other => panic!("expected Revert, got {other:?}"),
        }
    }

    #[test]
    fn selfdestruct_moves_balance_and_removes_account() {
        let mut state = EvmStorage::default();
        let executing = Address::from([1u8; 20]);
        let beneficiary = Address::from([2u8; 20]);
        state.account_mut(executing).balance = U256::from(100);
        let tx = Transaction {
            address: executing,
            ..Default::default()
        };
        let mut i = interp(tx, &mut state);
        i.stack
            .push(crate::instructions::address_to_word(beneficiary))
            .unwrap();
        let action = selfdestruct(&mut i).unwrap();
        assert_eq!(action, Action::Halt);
        drop(i);
        assert_eq!(state.balance_of(beneficiary), U256::from(100));
        assert!(state.account(executing).is_none());
    }
}
