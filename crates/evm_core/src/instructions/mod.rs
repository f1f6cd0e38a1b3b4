//! Opcode handlers, grouped the way <https://www.evm.codes/> groups the
//! reference table: one module per opcode family. Every handler has the
//! signature `fn(&mut Interpreter) -> Result<Action, EvmError>` so the
//! dispatch table in `crate::jump_tables` can hold them as plain function
//! pointers.

pub mod arithmetic;
pub mod bitwise;
pub mod block;
pub mod comparison;
pub mod control;
pub mod environment;
pub mod log;
pub mod memory_ops;
mod signed;
pub mod stack_ops;
pub mod storage_ops;
pub mod system;

use alloy::primitives::{Address, U256};

/// Left-pad a 20-byte address into the 32-byte word every
/// address-returning opcode (`ADDRESS`, `ORIGIN`, `CALLER`, `COINBASE`, …)
/// pushes.
pub(crate) fn address_to_word(address: Address) -> U256 {
    let mut padded = [0u8; 32];
    padded[12..].copy_from_slice(address.as_slice());
    U256::from_be_bytes(padded)
}

/// Inverse of [`address_to_word`]: the low 20 bytes of a 32-byte word,
/// used wherever a stack operand names an account (`BALANCE`, the `addr`
/// operand of `CALL`/`CALLCODE`/`DELEGATECALL`/`STATICCALL`, …).
pub(crate) fn word_to_address(word: U256) -> Address {
    let bytes: [u8; 32] = word.to_be_bytes();
    Address::from_slice(&bytes[12..])
}

/// Narrow a stack word to a `usize` offset/length for memory and calldata
/// indexing. Values too large to fit saturate to `usize::MAX` rather than
/// panicking or wrapping — with no gas metering a hostile offset this
/// large would already be an impossible allocation, so the only contract
/// that matters is "never panic".
pub(crate) fn as_usize(word: U256) -> usize {
    if word > U256::from(usize::MAX) {
        usize::MAX
    } else {
        word.as_limbs()[0] as usize
    }
}
