//! Typed failure modes for a single interpreter frame.
//!
//! Any [`EvmError`] terminates the frame that raised it with `success =
//! false`; it never unwinds past the CALL/CREATE opcode that spawned the
//! frame (see `evm_core::call`), which simply observes the failure and
//! pushes `0`.

use alloy::primitives::{Bytes, U256};

#[derive(Debug, Clone, thiserror::Error)]
pub enum EvmError {
    #[error("stack underflow")]
    StackUnderflow,

    #[error("stack overflow (limit 1024)")]
    StackOverflow,

    #[error("invalid jump destination: {0}")]
    InvalidJump(U256),

    #[error("invalid opcode: {0:#04x}")]
    InvalidOpcode(u8),

    #[error("state-mutating opcode used in a static context")]
    StaticCallViolation,

    #[error("execution reverted")]
    Revert(Bytes),
}

impl EvmError {
    /// The payload a `REVERT` carries back to the caller; every other
    /// error kind has none.
    pub fn revert_data(&self) -> Bytes {
        match self {
            EvmError::Revert(data) => data.clone(),
            _ => Bytes::new(),
        }
    }
}
