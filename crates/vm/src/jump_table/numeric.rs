//! Numeric operations for the Intcode virtual machine.
//!
//! All four instructions read two values and write one result to the
//! destination named by their third parameter.

use crate::error::{VmError, VmResult};
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;

/// Implements the ADD operation.
pub fn add(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    binary(engine, instruction, |a, b| a.checked_add(b))
}

/// Implements the MUL operation.
pub fn mul(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    binary(engine, instruction, |a, b| a.checked_mul(b))
}

/// Implements the LT operation.
pub fn lt(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    binary(engine, instruction, |a, b| Some(i64::from(a < b)))
}

/// Implements the EQ operation.
pub fn eq(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    binary(engine, instruction, |a, b| Some(i64::from(a == b)))
}

fn binary(
    engine: &mut ExecutionEngine,
    instruction: &Instruction,
    op: impl FnOnce(i64, i64) -> Option<i64>,
) -> VmResult<()> {
    let a = engine.read_operand(instruction, 0)?;
    let b = engine.read_operand(instruction, 1)?;
    let result = op(a, b).ok_or(VmError::ArithmeticOverflow {
        opcode: instruction.opcode().mnemonic(),
        pointer: instruction.pointer(),
    })?;
    engine.write_operand(instruction, 2, result)
}
