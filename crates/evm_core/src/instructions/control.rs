//! Jump opcodes (`JUMP`, `JUMPI`, `JUMPDEST`) and `GAS`.

use alloy::primitives::U256;
use primitives::errors::EvmError;

use crate::{instructions::as_usize, Action, Interpreter};

/// Unconditional jump: fail unless `dest` is in the frame's precomputed
/// valid-destination set.
pub fn jump(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let dest = interp.stack.pop()?;
    jump_to(interp, dest)
}

/// `JUMPI(dest, cond)`: same validity check as `JUMP`, but only taken
/// when `cond != 0`; otherwise this is a no-op and `pc` advances
/// normally.
pub fn jumpi(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let dest = interp.stack.pop()?;
    let cond = interp.stack.pop()?;
    if cond.is_zero() {
        Ok(Action::Step)
    } else {
        jump_to(interp, dest)
    }
}

fn jump_to(interp: &mut Interpreter, dest: U256) -> Result<Action, EvmError> {
    let offset = as_usize(dest);
    if !interp.valid_jumpdests.contains(&offset) {
        return Err(EvmError::InvalidJump(dest));
    }
    interp.pc = offset;
    Ok(Action::Jumped)
}

/// `JUMPDEST` itself is inert at run time — it only matters to the
/// pre-pass in `crate::analyze_jumpdests`.
pub fn jumpdest(_interp: &mut Interpreter) -> Result<Action, EvmError> {
    Ok(Action::Step)
}

/// This interpreter treats gas as an unbounded resource, so `GAS` reports
/// a near-max sentinel rather than any real remaining-gas accounting.
pub fn gas(interp: &mut Interpreter) -> Result<Action, EvmError> {
    interp.stack.push(U256::MAX)?;
    Ok(Action::Step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Bytes;
    use primitives::evm_types::{BlockEnv, EvmStorage, Transaction};

    fn interp_with_code<'a>(code: &'static [u8], state: &'a mut EvmStorage) -> Interpreter<'a> {
        Interpreter::new(
            Bytes::from_static(code),
            Transaction::default(),
            BlockEnv::default(),
            state,
            true,
            0,
        )
    }

    #[test]
    fn jump_to_valid_dest_succeeds() {
        let mut state = EvmStorage::default();
        const JUMPDEST: u8 = 0x5b;
        let mut i = interp_with_code(&[0x00, JUMPDEST], &mut state);
        i.valid_jumpdests.insert(1);
        i.stack.push(U256::from(1)).unwrap();
        let action = jump(&mut i).unwrap();
        assert_eq!(action, Action::Jumped);
        assert_eq!(i.pc, 1);
    }

    #[test]
    fn jump_to_invalid_dest_errors() {
        let mut state = EvmStorage::default();
        let mut i = interp_with_code(&[0x00, 0x01], &mut state);
        i.stack.push(U256::from(1)).unwrap();
        assert!(matches!(jump(&mut i), Err(EvmError::InvalidJump(_))));
    }

    #[test]
    fn jumpi_not_taken_when_condition_zero() {
        let mut state = EvmStorage::default();
        let mut i = interp_with_code(&[0x00], &mut state);
        i.stack.push(U256::ZERO).unwrap();
        i.stack.push(U256::from(0)).unwrap();
        let action = jumpi(&mut i).unwrap();
        assert_eq!(action, Action::Step);
    }

    #[test]
    fn gas_reports_sentinel() {
        let mut state = EvmStorage::default();
        let mut i = interp_with_code(&[], &mut state);
        gas(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::MAX);
    }
}
