//! The EVM opcode space. See <https://www.evm.codes/> for the reference
//! table this enum mirrors.

#![allow(non_camel_case_types)]

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    STOP = 0x00,
    ADD = 0x01,
    MUL = 0x02,
    SUB = 0x03,
    DIV = 0x04,
    SDIV = 0x05,
    MOD = 0x06,
    SMOD = 0x07,
    ADDMOD = 0x08,
    MULMOD = 0x09,
    EXP = 0x0a,
    SIGNEXTEND = 0x0b,

    LT = 0x10,
    GT = 0x11,
    SLT = 0x12,
    SGT = 0x13,
    EQ = 0x14,
    ISZERO = 0x15,
    AND = 0x16,
    OR = 0x17,
    XOR = 0x18,
    NOT = 0x19,
    BYTE = 0x1a,
    SHL = 0x1b,
    SHR = 0x1c,
    SAR = 0x1d,

    SHA3 = 0x20,

    ADDRESS = 0x30,
    BALANCE = 0x31,
    ORIGIN = 0x32,
    CALLER = 0x33,
    CALLVALUE = 0x34,
    CALLDATALOAD = 0x35,
    CALLDATASIZE = 0x36,
    CALLDATACOPY = 0x37,
    CODESIZE = 0x38,
    CODECOPY = 0x39,
    GASPRICE = 0x3a,
    EXTCODESIZE = 0x3b,
    EXTCODECOPY = 0x3c,
    RETURNDATASIZE = 0x3d,
    RETURNDATACOPY = 0x3e,
    EXTCODEHASH = 0x3f,

    BLOCKHASH = 0x40,
    COINBASE = 0x41,
    TIMESTAMP = 0x42,
    NUMBER = 0x43,
    DIFFICULTY = 0x44,
    GASLIMIT = 0x45,
    CHAINID = 0x46,
    SELFBALANCE = 0x47,
    BASEFEE = 0x48,

    POP = 0x50,
    MLOAD = 0x51,
    MSTORE = 0x52,
    MSTORE8 = 0x53,
    SLOAD = 0x54,
    SSTORE = 0x55,
    JUMP = 0x56,
    JUMPI = 0x57,
    PC = 0x58,
    MSIZE = 0x59,
    GAS = 0x5a,
    JUMPDEST = 0x5b,
    MCOPY = 0x5e,

    PUSH0 = 0x5f,
    PUSH1 = 0x60,
    PUSH32 = 0x7f,

    DUP1 = 0x80,
    DUP16 = 0x8f,

    SWAP1 = 0x90,
    SWAP16 = 0x9f,

    LOG0 = 0xa0,
    LOG4 = 0xa4,

    CREATE = 0xf0,
    CALL = 0xf1,
    CALLCODE = 0xf2,
    RETURN = 0xf3,
    DELEGATECALL = 0xf4,
    CREATE2 = 0xf5,
    STATICCALL = 0xfa,
    REVERT = 0xfd,
    INVALID = 0xfe,
    SELFDESTRUCT = 0xff,
}

/// `Some(n)` if `op` is `PUSH1..PUSH32`, where `n` is the number of
/// immediate bytes to consume (`PUSH0` takes none and is not a "push with
/// immediate").
pub fn push_immediate_len(op: u8) -> Option<usize> {
    if (Opcode::PUSH1 as u8..=Opcode::PUSH32 as u8).contains(&op) {
        Some((op - Opcode::PUSH1 as u8) as usize + 1)
    } else {
        None
    }
}

/// `Some(n)` if `op` is `DUP1..DUP16`.
pub fn dup_depth(op: u8) -> Option<usize> {
    if (Opcode::DUP1 as u8..=Opcode::DUP16 as u8).contains(&op) {
        Some((op - Opcode::DUP1 as u8) as usize + 1)
    } else {
        None
    }
}

/// `Some(n)` if `op` is `SWAP1..SWAP16`.
pub fn swap_depth(op: u8) -> Option<usize> {
    if (Opcode::SWAP1 as u8..=Opcode::SWAP16 as u8).contains(&op) {
        Some((op - Opcode::SWAP1 as u8) as usize + 1)
    } else {
        None
    }
}

/// `Some(n)` (0..=4) if `op` is `LOG0..LOG4`.
pub fn log_topic_count(op: u8) -> Option<usize> {
    if (Opcode::LOG0 as u8..=Opcode::LOG4 as u8).contains(&op) {
        Some((op - Opcode::LOG0 as u8) as usize)
    } else {
        None
    }
}

/// Human-readable mnemonic for tracing; falls back to a hex literal for
/// opcodes this interpreter treats as a no-op.
pub fn mnemonic(op: u8) -> &'static str {
    use Opcode::*;
    match op {
        x if x == STOP as u8 => "STOP",
        x if x == ADD as u8 => "ADD",
        x if x == MUL as u8 => "MUL",
        x if x == SUB as u8 => "SUB",
        x if x == DIV as u8 => "DIV",
        x if x == SDIV as u8 => "SDIV",
        x if x == MOD as u8 => "MOD",
        x if x == SMOD as u8 => "SMOD",
        x if x == ADDMOD as u8 => "ADDMOD",
        x if x == MULMOD as u8 => "MULMOD",
        x if x == EXP as u8 => "EXP",
        x if x == SIGNEXTEND as u8 => "SIGNEXTEND",
        x if x == LT as u8 => "LT",
        x if x == GT as u8 => "GT",
        x if x == SLT as u8 => "SLT",
        x if x == SGT as u8 => "SGT",
        x if x == EQ as u8 => "EQ",
        x if x == ISZERO as u8 => "ISZERO",
        x if x == AND as u8 => "AND",
        x if x == OR as u8 => "OR",
        x if x == XOR as u8 => "XOR",
        x if x == NOT as u8 => "NOT",
        x if x == BYTE as u8 => "BYTE",
        x if x == SHL as u8 => "SHL",
        x if x == SHR as u8 => "SHR",
        x if x == SAR as u8 => "SAR",
        x if x == SHA3 as u8 => "SHA3",
        x if x == ADDRESS as u8 => "ADDRESS",
        x if x == BALANCE as u8 => "BALANCE",
        x if x == ORIGIN as u8 => "ORIGIN",
        x if x == CALLER as u8 => "CALLER",
        x if x == CALLVALUE as u8 => "CALLVALUE",
        x if x == CALLDATALOAD as u8 => "CALLDATALOAD",
        x if x == CALLDATASIZE as u8 => "CALLDATASIZE",
        x if x == CALLDATACOPY as u8 => "CALLDATACOPY",
        x if x == CODESIZE as u8 => "CODESIZE",
        x if x == CODECOPY as u8 => "CODECOPY",
        x if x == GASPRICE as u8 => "GASPRICE",
        x if x == EXTCODESIZE as u8 => "EXTCODESIZE",
        x if x == EXTCODECOPY as u8 => "EXTCODECOPY",
        x if x == RETURNDATASIZE as u8 => "RETURNDATASIZE",
        x if x == RETURNDATACOPY as u8 => "RETURNDATACOPY",
        x if x == EXTCODEHASH as u8 => "EXTCODEHASH",
        x if x == BLOCKHASH as u8 => "BLOCKHASH",
        x if x == COINBASE as u8 => "COINBASE",
        x if x == TIMESTAMP as u8 => "TIMESTAMP",
        x if x == NUMBER as u8 => "NUMBER",
        x if x == DIFFICULTY as u8 => "DIFFICULTY",
        x if x == GASLIMIT as u8 => "GASLIMIT",
        x if x == CHAINID as u8 => "CHAINID",
        x if x == SELFBALANCE as u8 => "SELFBALANCE",
        x if x == BASEFEE as u8 => "BASEFEE",
        x if x == POP as u8 => "POP",
        x if x == MLOAD as u8 => "MLOAD",
        x if x == MSTORE as u8 => "MSTORE",
        x if x == MSTORE8 as u8 => "MSTORE8",
        x if x == SLOAD as u8 => "SLOAD",
        x if x == SSTORE as u8 => "SSTORE",
        x if x == JUMP as u8 => "JUMP",
        x if x == JUMPI as u8 => "JUMPI",
        x if x == PC as u8 => "PC",
        x if x == MSIZE as u8 => "MSIZE",
        x if x == GAS as u8 => "GAS",
        x if x == JUMPDEST as u8 => "JUMPDEST",
        x if x == MCOPY as u8 => "MCOPY",
        x if push_immediate_len(x).is_some() || x == PUSH0 as u8 => "PUSH",
        x if dup_depth(x).is_some() => "DUP",
        x if swap_depth(x).is_some() => "SWAP",
        x if log_topic_count(x).is_some() => "LOG",
        x if x == CREATE as u8 => "CREATE",
        x if x == CALL as u8 => "CALL",
        x if x == CALLCODE as u8 => "CALLCODE",
        x if x == RETURN as u8 => "RETURN",
        x if x == DELEGATECALL as u8 => "DELEGATECALL",
        x if x == CREATE2 as u8 => "CREATE2",
        x if x == STATICCALL as u8 => "STATICCALL",
        x if x == REVERT as u8 => "REVERT",
        x if x == INVALID as u8 => "INVALID",
        x if x == SELFDESTRUCT as u8 => "SELFDESTRUCT",
        _ => "UNKNOWN",
    }
}
