//! Persistent storage opcodes (`SLOAD`, `SSTORE`), keyed by the executing
//! frame's own address — a storage opcode never takes an address operand,
//! so a frame can only ever mutate the storage map for `tx.address`.

use primitives::errors::EvmError;

use crate::{Action, Interpreter};

pub fn sload(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let key = interp.stack.pop()?;
    let value = interp.state.s_load(interp.tx.address, key);
    interp.stack.push(value)?;
    Ok(Action::Step)
}

pub fn sstore(interp: &mut Interpreter) -> Result<Action, EvmError> {
    if !interp.writable {
        return Err(EvmError::StaticCallViolation);
    }
    let key = interp.stack.pop()?;
    let value = interp.stack.pop()?;
    interp.state.s_store(interp.tx.address, key, value);
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
    fn sstore_sload_round_trip() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(U256::from(42)).unwrap();
        i.stack.push(U256::from(1)).unwrap();
        sstore(&mut i).unwrap();
        i.stack.push(U256::from(1)).unwrap();
        sload(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::from(42));
    }

    #[test]
    fn sstore_fails_in_static_context() {
        let mut state = EvmStorage::default();
        let mut i = Interpreter::new(
            Bytes::new(),
            Transaction::default(),
            BlockEnv::default(),
            &mut state,
            false,
            0,
        );
        i.stack.push(U256::from(1)).unwrap();
        i.stack.push(U256::from(1)).unwrap();
        assert!(matches!(sstore(&mut i), Err(EvmError::StaticCallViolation)));
    }

    #[test]
    fn sload_on_missing_key_is_zero() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(U256::from(99)).unwrap();
        sload(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::ZERO);
    }
}
