//! Jump table module for the Intcode virtual machine.
//!
//! Maps every opcode to the handler implementing it. The match is
//! exhaustive over [`OpCode`], so adding an opcode without a handler does not
//! compile.

pub mod control;
pub mod io;
pub mod numeric;

use crate::error::VmResult;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::op_code::OpCode;

/// A handler for a VM instruction.
pub type InstructionHandler = fn(&mut ExecutionEngine, &Instruction) -> VmResult<()>;

/// Gets the handler for an opcode.
pub fn handler(opcode: OpCode) -> InstructionHandler {
    match opcode {
        OpCode::ADD => numeric::add,
        OpCode::MUL => numeric::mul,
        OpCode::LT => numeric::lt,
        OpCode::EQ => numeric::eq,
        OpCode::INPUT => io::input,
        OpCode::OUTPUT => io::output,
        OpCode::JMPIF => control::jmpif,
        OpCode::JMPIFNOT => control::jmpifnot,
        OpCode::ARB => control::arb,
        OpCode::HALT => control::halt,
    }
}

/// Executes an instruction.
pub fn execute(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    handler(instruction.opcode())(engine, instruction)
}
