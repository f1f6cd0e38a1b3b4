//! Builds the 256-entry opcode dispatch table: a dense array of handler
//! function pointers indexed by opcode byte. Unmapped entries default to
//! a no-op, so unrecognized opcodes are silently skipped rather than
//! treated as invalid.

use crate::{
    call,
    instructions::{
        arithmetic, bitwise, block, comparison, control, environment, log, memory_ops, stack_ops,
        storage_ops, system,
    },
    opcodes::Opcode,
    Action, Interpreter, OpcodeHandler,
};
use primitives::errors::EvmError;

fn noop(_interp: &mut Interpreter) -> Result<Action, EvmError> {
    Ok(Action::Step)
}

pub fn build_jump_table() -> [OpcodeHandler; 256] {
    let mut table: [OpcodeHandler; 256] = [noop; 256];

    // Arithmetic
    table[Opcode::STOP as usize] = arithmetic::stop;
    table[Opcode::ADD as usize] = arithmetic::add;
    table[Opcode::MUL as usize] = arithmetic::mul;
    table[Opcode::SUB as usize] = arithmetic::sub;
    table[Opcode::DIV as usize] = arithmetic::div;
    table[Opcode::SDIV as usize] = arithmetic::sdiv;
    table[Opcode::MOD as usize] = arithmetic::modulo;
    table[Opcode::SMOD as usize] = arithmetic::smod;
    table[Opcode::ADDMOD as usize] = arithmetic::addmod;
    table[Opcode::MULMOD as usize] = arithmetic::mulmod;
    table[Opcode::EXP as usize] = arithmetic::exp;
    table[Opcode::SIGNEXTEND as usize] = arithmetic::signextend;

    // Comparison
    table[Opcode::LT as usize] = comparison::lt;
    table[Opcode::GT as usize] = comparison::gt;
    table[Opcode::SLT as usize] = comparison::slt;
    table[Opcode::SGT as usize] = comparison::sgt;
    table[Opcode::EQ as usize] = comparison::eq;
    table[Opcode::ISZERO as usize] = comparison::iszero;

    // Bitwise
    table[Opcode::AND as usize] = bitwise::and;
    table[Opcode::OR as usize] = bitwise::or;
    table[Opcode::XOR as usize] = bitwise::xor;
    table[Opcode::NOT as usize] = bitwise::not;
    table[Opcode::BYTE as usize] = bitwise::byte;
    table[Opcode::SHL as usize] = bitwise::shl;
    table[Opcode::SHR as usize] = bitwise::shr;
    table[Opcode::SAR as usize] = bitwise::sar;

    table[Opcode::SHA3 as usize] = system::sha3;

    // Environment accessors
    table[Opcode::ADDRESS as usize] = environment::address;
    table[Opcode::BALANCE as usize] = environment::balance;
    table[Opcode::ORIGIN as usize] = environment::origin;
    table[Opcode::CALLER as usize] = environment::caller;
    table[Opcode::CALLVALUE as usize] = environment::callvalue;
    table[Opcode::CALLDATALOAD as usize] = environment::calldataload;
    table[Opcode::CALLDATASIZE as usize] = environment::calldatasize;
    table[Opcode::CALLDATACOPY as usize] = environment::calldatacopy;
    table[Opcode::CODESIZE as usize] = environment::codesize;
    table[Opcode::CODECOPY as usize] = environment::codecopy;
    table[Opcode::GASPRICE as usize] = environment::gasprice;
    table[Opcode::EXTCODESIZE as usize] = environment::extcodesize;
    table[Opcode::EXTCODECOPY as usize] = environment::extcodecopy;
    table[Opcode::RETURNDATASIZE as usize] = environment::returndatasize;
    table[Opcode::RETURNDATACOPY as usize] = environment::returndatacopy;
    table[Opcode::EXTCODEHASH as usize] = environment::extcodehash;

    // Block context
    table[Opcode::BLOCKHASH as usize] = block::blockhash;
    table[Opcode::COINBASE as usize] = block::coinbase;
    table[Opcode::TIMESTAMP as usize] = block::timestamp;
    table[Opcode::NUMBER as usize] = block::number;
    table[Opcode::DIFFICULTY as usize] = block::difficulty;
    table[Opcode::GASLIMIT as usize] = block::gaslimit;
    table[Opcode::CHAINID as usize] = block::chainid;
    table[Opcode::SELFBALANCE as usize] = environment::selfbalance;
    table[Opcode::BASEFEE as usize] = block::basefee;

    // Stack / memory / storage / control
    table[Opcode::POP as usize] = stack_ops::pop;
    table[Opcode::MLOAD as usize] = memory_ops::mload;
    table[Opcode::MSTORE as usize] = memory_ops::mstore;
    table[Opcode::MSTORE8 as usize] = memory_ops::mstore8;
    table[Opcode::SLOAD as usize] = storage_ops::sload;
    table[Opcode::SSTORE as usize] = storage_ops::sstore;
    table[Opcode::JUMP as usize] = control::jump;
    table[Opcode::JUMPI as usize] = control::jumpi;
    table[Opcode::PC as usize] = stack_ops::pc;
    table[Opcode::MSIZE as usize] = memory_ops::msize;
    table[Opcode::GAS as usize] = control::gas;
    table[Opcode::JUMPDEST as usize] = control::jumpdest;
    table[Opcode::MCOPY as usize] = memory_ops::mcopy;

    table[Opcode::PUSH0 as usize] = stack_ops::push0;
    for op in Opcode::PUSH1 as usize..=Opcode::PUSH32 as usize {
        table[op] = stack_ops::push;
    }
    for op in Opcode::DUP1 as usize..=Opcode::DUP16 as usize {
        table[op] = stack_ops::dup;
    }
    for op in Opcode::SWAP1 as usize..=Opcode::SWAP16 as usize {
        table[op] = stack_ops::swap;
    }
    for op in Opcode::LOG0 as usize..=Opcode::LOG4 as usize {
        table[op] = log::log;
    }

    // Call/create engine
    table[Opcode::CREATE as usize] = call::create;
    table[Opcode::CALL as usize] = call::call;
    table[Opcode::CALLCODE as usize] = call::callcode;
    table[Opcode::RETURN as usize] = system::ret;
    table[Opcode::DELEGATECALL as usize] = call::delegatecall;
    table[Opcode::CREATE2 as usize] = call::create2;
    table[Opcode::STATICCALL as usize] = call::staticcall;
    table[Opcode::REVERT as usize] = system::revert;
    table[Opcode::INVALID as usize] = system::invalid;
    table[Opcode::SELFDESTRUCT as usize] = system::selfdestruct;

    table
}
