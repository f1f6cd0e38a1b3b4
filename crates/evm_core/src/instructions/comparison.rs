//! Comparison and logical-test opcodes (`LT`..`ISZERO`).

use alloy::primitives::U256;
use primitives::errors::EvmError;

use crate::{instructions::signed, Action, Interpreter};

fn push_bool(interp: &mut Interpreter, value: bool) -> Result<Action, EvmError> {
    interp
        .stack
        .push(if value { U256::from(1) } else { U256::ZERO })?;
    Ok(Action::Step)
}

pub fn lt(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    push_bool(interp, a < b)
}

pub fn gt(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    push_bool(interp, a > b)
}

/// Signed comparison: split each operand into (sign, magnitude) and
/// compare as `(neg, mag)` tuples with negative sorting below positive.
pub fn slt(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    let result = signed_less_than(a, b);
    push_bool(interp, result)
}

pub fn sgt(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    push_bool(interp, signed_less_than(b, a))
}

fn signed_less_than(a: U256, b: U256) -> bool {
    let neg_a = signed::is_negative(a);
    let neg_b = signed::is_negative(b);
    match (neg_a, neg_b) {
        (true, false) => true,
        (false, true) => false,
        _ => a < b,
    }
}

pub fn eq(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    let b = interp.stack.pop()?;
    push_bool(interp, a == b)
}

pub fn iszero(interp: &mut Interpreter) -> Result<Action, EvmError> {
    let a = interp.stack.pop()?;
    push_bool(interp, a.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Bytes;
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
    fn slt_negative_is_less_than_positive() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        let neg_one = signed::negate(U256::from(1));
        i.stack.push(U256::from(1)).unwrap();
        i.stack.push(neg_one).unwrap();
        slt(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::from(1));
    }

    #[test]
    fn sgt_both_negative_compares_magnitude() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        let neg_one = signed::negate(U256::from(1));
        let neg_two = signed::negate(U256::from(2));
        // a = -1, b = -2 -> a > b
        i.stack.push(neg_two).unwrap();
        i.stack.push(neg_one).unwrap();
        sgt(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::from(1));
    }

    #[test]
    fn iszero_on_zero_is_true() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(U256::ZERO).unwrap();
        iszero(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::from(1));
    }

    #[test]
    fn eq_compares_full_width() {
        let mut state = EvmStorage::default();
        let mut i = interp(&mut state);
        i.stack.push(U256::MAX).unwrap();
        i.stack.push(U256::MAX).unwrap();
        eq(&mut i).unwrap();
        assert_eq!(i.stack.pop().unwrap(), U256::from(1));
    }
}
