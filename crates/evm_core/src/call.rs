//! `CALL`/`CALLCODE`/`DELEGATECALL`/`STATICCALL`/`CREATE`/`CREATE2`: the
//! nested-frame recursion. Each handler derives a sub-frame's
//! `Transaction`, snapshots world state, runs the sub-frame via
//! [`crate::run_at_depth`], and either commits or rolls back depending on
//! the sub-frame's outcome.

use alloy::primitives::{Address, Bytes, U256};
use primitives::{errors::EvmError, evm_types::Transaction};

use crate::{
    instructions::{as_usize, word_to_address},
    Action, Interpreter, MAX_CALL_DEPTH,
};

#[derive(Clone, Copy)]
enum CallKind {
    Call,
    CallCode,
    DelegateCall,
    StaticCall,
}

pub fn call(interp: &mut Interpreter) -> Result<Action, EvmError> {
    call_family(interp, CallKind::Call)
}

pub fn callcode(interp: &mut Interpreter) -> Result<Action, EvmError> {
    call_family(interp, CallKind::CallCode)
}

pub fn delegatecall(interp: &mut Interpreter) -> Result<Action, EvmError> {
    call_family(interp, CallKind::DelegateCall)
}

pub fn staticcall(interp: &mut Interpreter) -> Result<Action, EvmError> {
    call_family(interp, CallKind::StaticCall)
}

/// Shared body for the four CALL-family opcodes; `kind` determines how
/// the sub-frame's address/caller/value/writable fields are derived.
fn call_family(interp: &mut Interpreter, kind: CallKind) -> Result<Action, EvmError> {
    // Plain CALL (and only CALL) fails outright under a static context —
    // CALLCODE/DELEGATECALL/STATICCALL stay permitted, with STATICCALL
    // itself forcing the sub-frame static.
    if matches!(kind, CallKind::Call) && !interp.writable {
        return Err(EvmError::StaticCallViolation);
    }

    let _gas = interp.stack.pop()?;
    let addr = word_to_address(interp.stack.pop()?);
    let value = match kind {
        CallKind::Call | CallKind::CallCode => interp.stack.pop()?,
        CallKind::DelegateCall | CallKind::StaticCall => U256::ZERO,
    };
    let args_offset = as_usize(interp.stack.pop()?);
    let args_size = as_usize(interp.stack.pop()?);
    let ret_offset = as_usize(interp.stack.pop()?);
    let ret_size = as_usize(interp.stack.pop()?);

    if interp.depth + 1 >= MAX_CALL_DEPTH {
        interp.stack.push(U256::ZERO)?;
        return Ok(Action::Step);
    }

    let transfers_value = matches!(kind, CallKind::Call | CallKind::CallCode);
    if transfers_value && interp.state.balance_of(interp.tx.address) < value {
        interp.stack.push(U256::ZERO)?;
        return Ok(Action::Step);
    }

    let callee_address = match kind {
        CallKind::Call | CallKind::StaticCall => addr,
        CallKind::CallCode | CallKind::DelegateCall => interp.tx.address,
    };
    let callee_caller = match kind {
        CallKind::DelegateCall => interp.tx.caller,
        _ => interp.tx.address,
    };
    let callee_value = match kind {
        CallKind::Call | CallKind::CallCode => value,
        CallKind::DelegateCall => interp.tx.value,
        CallKind::StaticCall => U256::ZERO,
    };
    let writable = match kind {
        CallKind::StaticCall => false,
        _ => interp.writable,
    };

    let code = interp.state.code_of(addr);
    let calldata = interp.memory.load_range(args_offset, args_size);
    let callee_tx = Transaction {
        address: callee_address,
        caller: callee_caller,
        origin: interp.tx.origin,
        // The sub-frame inherits the top-level gas price, never the
        // `gas` operand just popped above.
        gas_price: interp.tx.gas_price,
        value: callee_value,
        data: Bytes::from(calldata),
    };

    let snapshot = interp.state.clone();
    if transfers_value && !value.is_zero() {
        interp.state.transfer(interp.tx.address, callee_address, value);
    }

    let outcome = crate::run_at_depth(
        code,
        callee_tx,
        interp.block.clone(),
        interp.state,
        writable,
        interp.depth + 1,
    );

    let copy_len = ret_size.min(outcome.return_data.len());
    interp
        .memory
        .store_range(ret_offset, &outcome.return_data[..copy_len]);
    interp.last_sub_return = outcome.return_data.clone();

    if outcome.success {
        interp.logs.extend(outcome.logs);
        interp.stack.push(U256::from(1))?;
    } else {
        // Restoring the pre-call snapshot undoes both the value transfer
        // above and anything the sub-frame itself wrote to state.
        *interp.state = snapshot;
        interp.stack.push(U256::ZERO)?;
    }
    Ok(Action::Step)
}

pub fn create(interp: &mut Interpreter) -> Result<Action, EvmError> {
    create_family(interp, false)
}

pub fn create2(interp: &mut Interpreter) -> Result<Action, EvmError> {
    create_family(interp, true)
}

/// Shared body for `CREATE`/`CREATE2`. Both consume `(value, offset,
/// size)`; `CREATE2` additionally consumes `salt` as its fourth and
/// last operand, popped only after the other three.
fn create_family(interp: &mut Interpreter, with_salt: bool) -> Result<Action, EvmError> {
    if !interp.writable {
        return Err(EvmError::StaticCallViolation);
    }

    let value = interp.stack.pop()?;
    let offset = as_usize(interp.stack.pop()?);
    let size = as_usize(interp.stack.pop()?);
    let salt = if with_salt {
        Some(interp.stack.pop()?)
    } else {
        None
    };

    if interp.depth + 1 >= MAX_CALL_DEPTH || interp.state.balance_of(interp.tx.address) < value {
        interp.stack.push(U256::ZERO)?;
        return Ok(Action::Step);
    }

    let init_code = interp.memory.load_range(offset, size);
    let creator = interp.tx.address;
    let nonce = interp.state.account(creator).map(|a| a.nonce).unwrap_or(0);

    // New-contract addresses are derived properly: `(caller, nonce)` for
    // CREATE and `(caller, salt, keccak(init_code))` for CREATE2.
    let new_address = match salt {
        None => creator.create(nonce),
        Some(salt) => {
            let salt_bytes = salt.to_be_bytes::<32>();
            let code_hash = alloy::primitives::keccak256(&init_code);
            creator.create2(salt_bytes, code_hash)
        }
    };

    interp.state.account_mut(creator).nonce = nonce + 1;
    // new_address must not already host a contract; real EVM fails the
    // create in that case, but taking the snapshot after the nonce bump
    // (so the bump survives a failed attempt) and giving the fresh
    // account empty code up front keeps the common case simple.
    interp.state.account_mut(new_address);

    let snapshot = interp.state.clone();
    if !value.is_zero() {
        interp.state.transfer(creator, new_address, value);
    }

    let init_tx = Transaction {
        address: new_address,
        caller: creator,
        origin: interp.tx.origin,
        gas_price: interp.tx.gas_price,
        value,
        data: Bytes::new(),
    };

    let outcome = crate::run_at_depth(
        Bytes::from(init_code),
        init_tx,
        interp.block.clone(),
        interp.state,
        true,
        interp.depth + 1,
    );

    interp.last_sub_return = outcome.return_data.clone();

    if outcome.success {
        interp.logs.extend(outcome.logs);
        interp.state.account_mut(new_address).code = outcome.return_data;
        interp.stack.push(crate::instructions::address_to_word(new_address))?;
    } else {
        *interp.state = snapshot;
        interp.stack.push(U256::ZERO)?;
    }
    Ok(Action::Step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitives::evm_types::{BlockEnv, EvmStorage};

    fn interp<'a>(code: &'static [u8], tx: Transaction, state: &'a mut EvmStorage) -> Interpreter<'a> {
        Interpreter::new(Bytes::from_static(code), tx, BlockEnv::default(), state, true, 0)
    }

    #[test]
    fn call_to_depth_limit_pushes_zero_without_running() {
        let mut state = EvmStorage::default();
        let mut i = interp(&[], Transaction::default(), &mut state);
        i.depth = crate::MAX_CALL_DEPTH - 1;
        i.stack.push(U256::ZERO).unwrap(); // retSize
        i.stack.push(U256::ZERO).unwrap(); // retOffset
        i.stack.push(U256::ZERO).unwrap(); // argsSize
        i.stack.push(U256::ZERO).unwrap(); // argsOffset
        i.stack.push(U256::ZERO).unwrap(); // value
        i.stack.push(U256::ZERO).unwrap(); // addr
        i.stack.push(U256::ZERO).unwrap(); // gas
        call(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::ZERO);
    }

    #[test]
    fn call_fails_under_static_context() {
        let mut state = EvmStorage::default();
        let mut i = Interpreter::new(
            Bytes::new(),
            Transaction::default(),
            BlockEnv::default(),
            &mut state,
            false,
            0,
        );
        i.stack.push(U256::ZERO).unwrap();
        i.stack.push(U256::ZERO).unwrap();
        i.stack.push(U256::ZERO).unwrap();
        i.stack.push(U256::ZERO).unwrap();
        i.stack.push(U256::ZERO).unwrap();
        i.stack.push(U256::ZERO).unwrap();
        i.stack.push(U256::ZERO).unwrap();
        assert!(matches!(
            call(&mut i),
            Err(EvmError::StaticCallViolation)
        ));
    }

    #[test]
    fn create_derives_address_from_caller_and_nonce() {
        let mut state = EvmStorage::default();
        let creator = Address::from([7u8; 20]);
        let tx = Transaction {
            address: creator,
            ..Default::default()
        };
        // initcode: PUSH1 0 PUSH1 0 RETURN -> deploys empty code
        let code: &'static [u8] = &[0x60, 0x00, 0x60, 0x00, 0xf3];
        let mut i = interp(code, tx, &mut state);
        i.stack.push(U256::from(code.len())).unwrap(); // size
        i.stack.push(U256::ZERO).unwrap(); // offset
        i.stack.push(U256::ZERO).unwrap(); // value
        i.memory.store_range(0, code);
        create(&mut i).unwrap();
        let pushed = i.stack.pop().unwrap();
        assert_eq!(word_to_address(pushed), creator.create(0));
        drop(i);
        assert_eq!(state.account(creator).unwrap().nonce, 1);
    }

    #[test]
    fn create2_pops_salt_last_after_value_offset_size() {
        let mut state = EvmStorage::default();
        let creator = Address::from([7u8; 20]);
        let tx = Transaction {
            address: creator,
            ..Default::default()
        };
        let code: &'static [u8] = &[0x60, 0x00, 0x60, 0x00, 0xf3];
        let mut i = interp(code, tx, &mut state);
        let salt = U256::from(99);
        // Pushed bottom-to-top: salt, size, offset, value — so value
        // pops first and salt pops last, matching CREATE2's operand order.
        i.stack.push(salt).unwrap();
        i.stack.push(U256::from(code.len())).unwrap(); // size
        i.stack.push(U256::ZERO).unwrap(); // offset
        i.stack.push(U256::ZERO).unwrap(); // value
        i.memory.store_range(0, code);
        create2(&mut i).unwrap();
        let pushed = i.stack.pop().unwrap();
        let expected = creator.create2(
            salt.to_be_bytes::<32>(),
            alloy::primitives::keccak256(code),
        );
        assert_eq!(word_to_address(pushed), expected);
    }
}
