//! Transaction/code/account inspection opcodes: `ADDRESS`..`EXTCODEHASH`,
//! `RETURNDATASIZE`/`RETURNDATACOPY`, `SELFBALANCE`.

use alloy::primitives::U256;
use primitives::errors::EvmError;

use crate::{
    instructions::{address_to_word, as_usize, word_to_address},
    Action, Interpreter,
};

/// Read `len` bytes starting at `offset` out of an immutable byte buffer
/// (calldata, code, return-data — anything that isn't frame memory),
/// zero-padding past the buffer's end. Shared by `CALLDATALOAD`/
/// `CALLDATACOPY`, `CODECOPY`, `EXTCODECOPY`, and `RETURNDATACOPY`.
fn read_padded(data: &[u8], offset: usize, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    if offset >= data.len() {
        return out;
    }
    let available = &data[offset..];
    let copy_len = available.len().min(len);
    out[..copy_len].copy_from_slice(&available[..copy_len]);
    out
}

pub fn address(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(address_to_word(interp.tx.address))?;
    Ok(Action::Step)
}

/// `BALANCE(addr)`: 0 for an account that doesn't exist in world state,
/// matching storage's "missing keys read as 0" convention.
pub fn balance(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let addr = word_to_address(interp.stack.pop()?);
    interp.stack.push(interp.state.balance_of(addr))?;
    Ok(Action::Step)
}

pub fn origin(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(address_to_word(interp.tx.origin))?;
    Ok(Action::Step)
}

pub fn caller(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(address_to_word(interp.tx.caller))?;
    Ok(Action::Step)
}

pub fn callvalue(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(interp.tx.value)?;
    Ok(Action::Step)
}

pub fn calldataload(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let offset = as_usize(interp.stack.pop()?);
    let bytes = read_padded(&interp.tx.data, offset, 32);
    interp.stack.push(U256::from_be_slice(&bytes))?;
    Ok(Action::Step)
}

pub fn calldatasize(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(U256::from(interp.tx.data.len()))?;
    Ok(Action::Step)
}

pub fn calldatacopy(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let dest_offset = as_usize(interp.stack.pop()?);
    let offset = as_usize(interp.stack.pop()?);
    let len = as_usize(interp.stack.pop()?);
    let bytes = read_padded(&interp.tx.data, offset, len);
    interp.memory.store_range(dest_offset, &bytes);
    Ok(Action::Step)
}

pub fn codesize(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(U256::from(interp.code.len()))?;
    Ok(Action::Step)
}

pub fn codecopy(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let dest_offset = as_usize(interp.stack.pop()?);
    let offset = as_usize(interp.stack.pop()?);
    let len = as_usize(interp.stack.pop()?);
    let code = interp.code.clone();
    let bytes = read_padded(&code, offset, len);
    interp.memory.store_range(dest_offset, &bytes);
    Ok(Action::Step)
}

/// `GASPRICE` pushes `tx.gas_price` — the *top-level* transaction's gas
/// price, propagated unchanged down every CALL-family sub-frame in
/// `crate::call`. This is kept textually distinct from the `gas` operand
/// popped for `CALL`, which never overwrites it.
pub fn gasprice(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(interp.tx.gas_price)?;
    Ok(Action::Step)
}

pub fn extcodesize(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let addr = word_to_address(interp.stack.pop()?);
    interp
        .stack
        .push(U256::from(interp.state.code_of(addr).len()))?;
    Ok(Action::Step)
}

pub fn extcodecopy(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let addr = word_to_address(interp.stack.pop()?);
    let dest_offset = as_usize(interp.stack.pop()?);
    let offset = as_usize(interp.stack.pop()?);
    let len = as_usize(interp.stack.pop()?);
    let code = interp.state.code_of(addr);
    let bytes = read_padded(&code, offset, len);
    interp.memory.store_range(dest_offset, &bytes);
    Ok(Action::Step)
}

/// Byte length of `last_sub_return`, the most recent CALL-family or
/// CREATE-family sub-frame's return payload. Represented as a byte buffer
/// rather than a single word so a payload with leading zero bytes still
/// reports its true length.
pub fn returndatasize(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp
        .stack
        .push(U256::from(interp.last_sub_return.len()))?;
    Ok(Action::Step)
}

pub fn returndatacopy(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let dest_offset = as_usize(interp.stack.pop()?);
    let offset = as_usize(interp.stack.pop()?);
    let len = as_usize(interp.stack.pop()?);
    let data = interp.last_sub_return.clone();
    let bytes = read_padded(&data, offset, len);
    interp.memory.store_range(dest_offset, &bytes);
    Ok(Action::Step)
}

/// `EXTCODEHASH(addr)`: 0 for an account absent from world state,
/// `keccak256(code)` otherwise — including the well-known
/// `keccak256("")` for an existing account with empty code, matching
/// real EVM behavior.
pub fn extcodehash(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let addr = word_to_address(interp.stack.pop()?);
    let result = match interp.state.account(addr) {
        Some(account) => U256::from_be_bytes(alloy::primitives::keccak256(&account.code).0),
        None => U256::ZERO,
    };
    interp.stack.push(result)?;
    Ok(Action::Step)
}

/// `SELFBALANCE`: equivalent to `BALANCE(ADDRESS)` without needing the
/// address operand on the stack.
pub fn selfbalance(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let bal = interp.state.balance_of(interp.tx.address);
    interp.stack.push(bal)?;
    Ok(Action::Step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, Bytes};
    use primitives::evm_types::{BlockEnv, EvmStorage, Transaction};

    fn interp(state: &mut EvmStorage) -> Interpreter<'_> {
        let tx = Transaction {
            address: Address::from([1u8; 20]),
            caller: Address::from([2u8; 20]),
            origin: Address::from([3u8; 20]),
            gas_price: U256::from(7),
            value: U256::from(9),
            data: Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
        };
        Interpreter::new(Bytes::new(), tx, BlockEnv::default(), state, true, 0)
    }

    #[test]
    fn address_round_trips_through_word() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        let addr = i.tx.address;
        address(&mut i).unwrap();
        let word = i.stack.pop().unwrap();
        assert_eq!(word_to_address(word), addr);
    }

    #[test]
    fn calldataload_zero_pads_past_end() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(U256::ZERO).unwrap();
        calldataload(&mut i).unwrap();
        let expected = U256::from_be_slice(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(i.stack.pop().unwrap(), expected << (28 * 8));
    }

    #[test]
    fn calldatasize_matches_data_len() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        calldatasize(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::from(4));
    }

    #[test]
    fn balance_of_absent_account_is_zero() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(address_to_word(Address::from([9u8; 20]))).unwrap();
        balance(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::ZERO);
    }

    #[test]
    fn extcodehash_absent_account_is_zero() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(address_to_word(Address::from([9u8; 20]))).unwrap();
        extcodehash(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::ZERO);
    }

    #[test]
    fn gasprice_reads_transaction_field_not_gas_limit() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        gasprice(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::from(7));
    }
}
