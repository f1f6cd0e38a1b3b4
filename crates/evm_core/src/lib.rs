//! The interpreter core: the `Interpreter` frame, the fetch/decode/dispatch
//! loop, and jump-destination analysis. Opcode semantics live under
//! `instructions/`; CALL/CREATE recursion lives in `call`.

pub mod call;
pub mod instructions;
pub mod jump_tables;
pub mod opcodes;

use std::collections::HashSet;

use alloy::primitives::{Bytes, U256};
use primitives::{
    errors::EvmError,
    evm_types::{BlockEnv, EvmStorage, LogRecord, Transaction},
    memory::Memory,
    stack::Stack,
};

/// A sub-call/creation tree deeper than this fails immediately, mirroring
/// the real EVM's recursion limit. Needed here specifically because this
/// interpreter runs sub-frames via genuine Rust call recursion rather than
/// an explicit work-list, so an unbounded CALL cycle would otherwise blow
/// the host stack instead of failing cleanly.
pub const MAX_CALL_DEPTH: usize = 1024;

/// What a handler tells the dispatch loop to do with `pc` once it
/// returns successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Advance `pc` by one — the default for most opcodes.
    Step,
    /// The handler already set `pc` to its final value for this step
    /// (`PUSH*`, which must skip its immediate bytes, and taken
    /// `JUMP`/`JUMPI`, which set `pc` to the destination); the dispatch
    /// loop must not also advance it.
    Jumped,
    /// Halt the frame cleanly. `interp.return_data` already holds the
    /// frame's return payload (empty for `STOP`/`SELFDESTRUCT`).
    Halt,
}

pub type OpcodeHandler = fn(&mut Interpreter) -> Result<Action, EvmError>;

/// The outcome of running one frame to completion, returned to whatever
/// invoked it (the top-level caller, or a CALL/CREATE handler one frame
/// up).
#[derive(Debug, Clone, Default)]
pub struct ExecutionOutcome {
    pub success: bool,
    pub stack: Vec<U256>,
    pub logs: Vec<LogRecord>,
    pub return_data: Bytes,
}

/// One activation of the interpreter: its own program counter, stack,
/// memory, and return buffer, operating against a world state shared by
/// mutable reference with every other frame on the active call chain.
pub struct Interpreter<'a> {
    pub code: Bytes,
    pub tx: Transaction,
    pub block: BlockEnv,
    pub state: &'a mut EvmStorage,
    pub writable: bool,
    pub pc: usize,
    pub stack: Stack,
    pub memory: Memory,
    pub logs: Vec<LogRecord>,
    pub return_data: Bytes,
    /// The byte-buffer return payload of the most recent CALL-family or
    /// CREATE-family sub-frame, read by `RETURNDATASIZE`/`RETURNDATACOPY`.
    /// Kept as raw bytes rather than a single word so a payload with
    /// leading zero bytes reports its true length.
    pub last_sub_return: Bytes,
    pub depth: usize,
    pub valid_jumpdests: HashSet<usize>,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        code: Bytes,
        tx: Transaction,
        block: BlockEnv,
        state: &'a mut EvmStorage,
        writable: bool,
        depth: usize,
    ) -> Self {
        let valid_jumpdests = analyze_jumpdests(&code);
        Interpreter {
            code,
            tx,
            block,
            state,
            writable,
            pc: 0,
            stack: Stack::new(),
            memory: Memory::new(),
            logs: Vec::new(),
            return_data: Bytes::new(),
            last_sub_return: Bytes::new(),
            depth,
            valid_jumpdests,
        }
    }

    fn finish_success(self) -> ExecutionOutcome {
        ExecutionOutcome {
            success: true,
            stack: self.stack.data,
            logs: self.logs,
            return_data: self.return_data,
        }
    }

    fn finish_failure(return_data: Bytes) -> ExecutionOutcome {
        ExecutionOutcome {
            success: false,
            stack: Vec::new(),
            logs: Vec::new(),
            return_data,
        }
    }
}

/// Walk `code` once, recording every offset that holds `JUMPDEST` and is
/// not embedded inside a `PUSH*` immediate. A `PUSHn` skips its `n`
/// immediate bytes, so a `JUMPDEST` byte value appearing inside one is
/// never treated as a valid destination.
pub fn analyze_jumpdests(code: &[u8]) -> HashSet<usize> {
    let mut dests = HashSet::new();
    let mut pc = 0usize;
    while pc < code.len() {
        let op = code[pc];
        if op == opcodes::Opcode::JUMPDEST as u8 {
            dests.insert(pc);
            pc += 1;
        } else if let Some(len) = opcodes::push_immediate_len(op) {
            pc += 1 + len;
        } else {
            pc += 1;
        }
    }
    dests
}

/// The one entry point: execute `code` against `(tx, block, state,
/// writable)` and return the resulting stack, logs, return payload, and
/// success flag. CALL/CREATE handlers call this again (via
/// `run_at_depth`) to execute a derived sub-frame.
pub fn run(
    code: Bytes,
    tx: Transaction,
    block: BlockEnv,
    state: &mut EvmStorage,
    writable: bool,
) -> ExecutionOutcome {
    run_at_depth(code, tx, block, state, writable, 0)
}

/// As [`run`], but at an explicit call depth — used internally so the
/// `MAX_CALL_DEPTH` check in `call` has a depth to compare the sub-frame
/// against.
pub fn run_at_depth(
    code: Bytes,
    tx: Transaction,
    block: BlockEnv,
    state: &mut EvmStorage,
    writable: bool,
    depth: usize,
) -> ExecutionOutcome {
    let mut interp = Interpreter::new(code, tx, block, state, writable, depth);
    let table = jump_tables::build_jump_table();

    loop {
        if interp.pc >= interp.code.len() {
            break;
        }
        let op = interp.code[interp.pc];
        tracing::trace!(
            pc = interp.pc,
            op = opcodes::mnemonic(op),
            stack_depth = interp.stack.len(),
            "step"
        );
        let handler = table[op as usize];
        match handler(&mut interp) {
            Ok(Action::Step) => interp.pc += 1,
            Ok(Action::Jumped) => {}
            Ok(Action::Halt) => return interp.finish_success(),
            Err(err) => {
                let return_data = err.revert_data();
                return Interpreter::finish_failure(return_data);
            }
        }
    }

    interp.finish_success()
}
