//! `LOG0`..`LOG4`.

use alloy::primitives::B256;
use primitives::{errors::EvmError, evm_types::LogRecord};

use crate::{
    instructions::as_usize,
    opcodes::{self},
    Action, Interpreter,
};

/// One handler covers `LOG0`..`LOG4`; the topic count is derived from the
/// dispatched opcode byte, the same trick `stack_ops::{push,dup,swap}`
/// use for their opcode families.
pub fn log(interp: &mut Interpreter) -> Result<Action, EvmError> {
    if !interp.writable {
        return Err(EvmError::StaticCallViolation);
    }
    let op = interp.code[interp.pc];
    let topic_count =
        opcodes::log_topic_count(op).expect("log handler dispatched for non-LOG op");

    let offset = as_usize(interp.stack.pop()?);
    let length = as_usize(interp.stack.pop()?);

    let mut topics = Vec::with_capacity(topic_count);
    for _ in 0..topic_count {
        let word = interp.stack.pop()?;
        topics.push(B256::from(word.to_be_bytes::<32>()));
    }

    let data = interp.memory.load_range(offset, length);
    interp.logs.push(LogRecord {
        address: interp.tx.address,
        data: data.into(),
        topics,
    });
    Ok(Action::Step)
}
