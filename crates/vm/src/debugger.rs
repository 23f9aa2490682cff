//! Debugger for the Intcode virtual machine.
//!
//! Wraps an engine with a set of instruction-pointer breakpoints.

use crate::error::VmResult;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::vm_state::VMState;
use std::collections::BTreeSet;

/// Why [`Debugger::execute`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The instruction pointer reached a breakpoint. The instruction there has
    /// not executed yet.
    Breakpoint(usize),

    /// The program halted.
    Halted,
}

/// Represents a debugger for the VM.
#[derive(Debug)]
pub struct Debugger {
    engine: ExecutionEngine,
    breakpoints: BTreeSet<usize>,
}

impl Debugger {
    /// Creates a new debugger with the specified execution engine.
    pub fn new(engine: ExecutionEngine) -> Self {
        Self {
            engine,
            breakpoints: BTreeSet::new(),
        }
    }

    pub fn engine(&self) -> &ExecutionEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ExecutionEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> ExecutionEngine {
        self.engine
    }

    /// Adds a breakpoint. Returns false if one was already set there.
    pub fn add_breakpoint(&mut self, pointer: usize) -> bool {
        self.breakpoints.insert(pointer)
    }

    /// Removes a breakpoint. Returns false if none was set there.
    pub fn remove_breakpoint(&mut self, pointer: usize) -> bool {
        self.breakpoints.remove(&pointer)
    }

    pub fn has_breakpoint(&self, pointer: usize) -> bool {
        self.breakpoints.contains(&pointer)
    }

    /// Breakpoints in ascending order.
    pub fn breakpoints(&self) -> impl Iterator<Item = usize> + '_ {
        self.breakpoints.iter().copied()
    }

    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    /// Decodes the instruction the engine will execute next, without growing
    /// memory.
    pub fn current_instruction(&self) -> VmResult<Instruction> {
        Instruction::decode_at(
            self.engine.memory().as_slice(),
            self.engine.instruction_pointer(),
        )
    }

    /// Executes a single instruction and returns the resulting state.
    pub fn step_into(&mut self) -> VmResult<VMState> {
        self.engine.step()?;
        Ok(self.engine.state())
    }

    /// Executes until the instruction pointer lands on a breakpoint or the
    /// program halts.
    ///
    /// The instruction at the current pointer always executes, so calling
    /// `execute` again after stopping at a breakpoint moves past it.
    pub fn execute(&mut self) -> VmResult<StopReason> {
        if self.engine.state().is_halt() {
            return Ok(StopReason::Halted);
        }

        loop {
            self.engine.step()?;
            if self.engine.state().is_halt() {
                return Ok(StopReason::Halted);
            }

            let pointer = self.engine.instruction_pointer();
            if self.has_breakpoint(pointer) {
                log::debug!("breakpoint hit at pointer {}", pointer);
                return Ok(StopReason::Breakpoint(pointer));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VmError;
    use crate::op_code::OpCode;

    // out 1; out 2; out 3; halt
    const PROGRAM: [i64; 7] = [104, 1, 104, 2, 104, 3, 99];

    #[test]
    fn test_breakpoint_management() {
        let mut debugger = Debugger::new(ExecutionEngine::new(&PROGRAM));
        assert!(debugger.add_breakpoint(4));
        assert!(debugger.add_breakpoint(2));
        assert!(!debugger.add_breakpoint(4));
        assert!(debugger.has_breakpoint(2));
        assert_eq!(debugger.breakpoints().collect::<Vec<_>>(), vec![2, 4]);

        assert!(debugger.remove_breakpoint(2));
        assert!(!debugger.remove_breakpoint(2));
        debugger.clear_breakpoints();
        assert_eq!(debugger.breakpoints().count(), 0);
    }

    #[test]
    fn test_execute_stops_at_breakpoints() {
        let mut debugger = Debugger::new(ExecutionEngine::new(&PROGRAM));
        debugger.add_breakpoint(2);
        debugger.add_breakpoint(4);

        assert_eq!(debugger.execute(), Ok(StopReason::Breakpoint(2)));
        assert_eq!(debugger.engine().output().len(), 1);
        assert_eq!(
            debugger.current_instruction().map(|i| i.opcode()),
            Ok(OpCode::OUTPUT)
        );

        assert_eq!(debugger.execute(), Ok(StopReason::Breakpoint(4)));
        assert_eq!(debugger.execute(), Ok(StopReason::Halted));
        assert_eq!(debugger.engine_mut().take_output(), vec![1, 2, 3]);
        assert_eq!(debugger.execute(), Ok(StopReason::Halted));
    }

    #[test]
    fn test_breakpoint_at_start_is_skipped() {
        let mut debugger = Debugger::new(ExecutionEngine::new(&PROGRAM));
        debugger.add_breakpoint(0);
        assert_eq!(debugger.execute(), Ok(StopReason::Halted));
    }

    #[test]
    fn test_step_into() {
        let mut debugger = Debugger::new(ExecutionEngine::new(&[104, 5, 99]));
        assert_eq!(debugger.step_into(), Ok(VMState::RUNNING));
        assert_eq!(debugger.step_into(), Ok(VMState::HALT));
        assert_eq!(debugger.step_into(), Err(VmError::Halted));
        assert_eq!(debugger.into_engine().take_output(), vec![5]);
    }

    #[test]
    fn test_execute_propagates_faults() {
        let mut debugger = Debugger::new(ExecutionEngine::new(&[3, 0, 99]));
        assert_eq!(
            debugger.execute(),
            Err(VmError::InputExhausted { pointer: 0 })
        );
        assert!(debugger.engine().state().is_fault());
    }
}
