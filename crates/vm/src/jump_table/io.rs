//! Device operations for the Intcode virtual machine.

use crate::error::VmResult;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;

/// Implements the INPUT operation.
pub fn input(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let address = engine.destination(instruction, 0)?;
    let value = engine.read_input(instruction.pointer())?;
    engine.memory_mut().set(address, value)
}

/// Implements the OUTPUT operation.
pub fn output(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let value = engine.read_operand(instruction, 0)?;
    engine.write_output(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::error::VmError;
    use crate::execution_engine::ExecutionEngine;

    #[test]
    fn test_input_writes_destination() {
        let mut engine = ExecutionEngine::new(&[3, 3, 99, 0]);
        engine.run([-17]).expect("program should halt");
        assert_eq!(engine.memory().peek(3), -17);
    }

    #[test]
    fn test_output_modes() {
        let mut engine = ExecutionEngine::new(&[4, 6, 104, 5, 99, 0, 8]);
        engine.run(None).expect("program should halt");
        assert_eq!(engine.take_output(), vec![8, 5]);
    }

    #[test]
    fn test_input_into_immediate_is_rejected_before_reading() {
        let mut engine = ExecutionEngine::new(&[103, 0, 99]);
        engine.push_input(1);
        assert_eq!(
            engine.run(None),
            Err(VmError::InvalidAddressingMode {
                pointer: 0,
                parameter: 0
            })
        );
        assert_eq!(engine.input().len(), 1);
    }
}
