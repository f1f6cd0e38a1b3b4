//! The environment a frame observes: the executing transaction, the
//! enclosing block, and the world state shared by reference across the
//! whole call tree.

use std::collections::HashMap;

use alloy::primitives::{Address, Bytes, U256};

/// Per-frame transaction context. Re-derived for every CALL/CALLCODE/
/// DELEGATECALL/STATICCALL/CREATE/CREATE2 sub-frame per the table in
/// `evm_core::call`; `gas_price` always carries the *top-level*
/// transaction's gas price, never the `gas` operand popped for a
/// CALL-family opcode (see the `GASPRICE` design note).
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    pub address: Address,
    pub caller: Address,
    pub origin: Address,
    pub gas_price: U256,
    pub value: U256,
    pub data: Bytes,
}

/// Block context, immutable and identical across every frame of one
/// top-level execution.
#[derive(Debug, Clone, Default)]
pub struct BlockEnv {
    pub base_fee: U256,
    pub coinbase: Address,
    pub timestamp: U256,
    pub number: U256,
    pub difficulty: U256,
    pub gas_limit: U256,
    pub chain_id: U256,
}

/// One account in the world state.
#[derive(Debug, Clone, Default)]
pub struct EvmAccount {
    pub balance: U256,
    pub nonce: u64,
    pub code: Bytes,
    pub storage: HashMap<U256, U256>,
}

/// One emitted `LOGn` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub address: Address,
    pub data: Bytes,
    pub topics: Vec<alloy::primitives::B256>,
}

/// World state: every account this execution can see, keyed by address.
/// Shared by mutable reference down the active frame chain so that an
/// SSTORE performed by a callee is observable by its caller once the
/// callee returns successfully (see `evm_core::call`'s snapshot/restore
/// contract for the failure case).
#[derive(Debug, Clone, Default)]
pub struct EvmStorage {
    pub data: HashMap<Address, EvmAccount>,
}
