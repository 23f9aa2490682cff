//! Control operations for the Intcode virtual machine.

use crate::error::VmResult;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;

/// Implements the JMPIF operation.
pub fn jmpif(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    conditional_jump(engine, instruction, |value| value != 0)
}

/// Implements the JMPIFNOT operation.
pub fn jmpifnot(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    conditional_jump(engine, instruction, |value| value == 0)
}

/// Implements the ARB operation.
pub fn arb(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let delta = engine.read_operand(instruction, 0)?;
    engine.adjust_relative_base(delta, instruction.pointer())
}

/// Implements the HALT operation.
pub fn halt(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    engine.halt();
    Ok(())
}

fn conditional_jump(
    engine: &mut ExecutionEngine,
    instruction: &Instruction,
    condition: impl FnOnce(i64) -> bool,
) -> VmResult<()> {
    let value = engine.read_operand(instruction, 0)?;
    let target = engine.read_operand(instruction, 1)?;
    if condition(value) {
        engine.jump(target, instruction.pointer())?;
    }
    Ok(())
}
