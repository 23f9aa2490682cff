//! Execution engine module for the Intcode virtual machine.
//!
//! The engine owns one program's memory, instruction pointer and relative
//! base, plus an input and an output device. It runs in three modes:
//!
//! - [`ExecutionEngine::step`] executes exactly one instruction;
//! - [`ExecutionEngine::run`] executes until the program halts;
//! - [`ExecutionEngine::into_coroutine`] suspends after every output.

use crate::addressing::Resolver;
use crate::coroutine::Coroutine;
use crate::device::{Device, QueueDevice};
use crate::error::{VmError, VmResult};
use crate::instruction::Instruction;
use crate::jump_table;
use crate::memory::Memory;
use crate::vm_state::VMState;
use intcode_config::ExecutionSettings;

/// Restrictions on the VM.
///
/// Unbounded by default; set a limit to turn a runaway program into a
/// [`VmError::StepLimitExceeded`] or [`VmError::MemoryLimitExceeded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionEngineLimits {
    /// The maximum number of instructions executed over the engine's lifetime.
    pub max_steps: Option<u64>,

    /// The maximum number of memory cells.
    pub max_memory_size: Option<usize>,
}

impl ExecutionEngineLimits {
    /// The default execution engine limits.
    pub const DEFAULT: Self = Self {
        max_steps: None,
        max_memory_size: None,
    };
}

impl Default for ExecutionEngineLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<ExecutionSettings> for ExecutionEngineLimits {
    fn from(settings: ExecutionSettings) -> Self {
        Self {
            max_steps: settings.max_steps,
            max_memory_size: settings.max_memory_size,
        }
    }
}

/// Control-flow flags raised by the instruction being executed.
///
/// Reset before every dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ExecutionFlags {
    /// A jump moved the instruction pointer; skip the default advance.
    pub jump: bool,

    /// A halt instruction executed.
    pub halt: bool,

    /// The value written by an output instruction.
    pub output: Option<i64>,
}

/// The execution engine for the Intcode VM.
#[derive(Debug)]
pub struct ExecutionEngine {
    /// The current state of the VM
    state: VMState,

    /// Program code and data
    memory: Memory,

    /// Address of the next instruction to decode
    instruction_pointer: usize,

    /// Offset added to relative-mode parameters
    relative_base: i64,

    input: Box<dyn Device>,

    output: Box<dyn Device>,

    flags: ExecutionFlags,

    /// Restrictions on the VM
    limits: ExecutionEngineLimits,

    /// Instructions executed so far
    steps: u64,
}

impl ExecutionEngine {
    /// Creates an engine over a copy of `program` with private queue devices.
    pub fn new(program: &[i64]) -> Self {
        Self::new_with_devices(program, None, None)
    }

    /// Creates an engine with the given devices; `None` selects a private
    /// queue.
    pub fn new_with_devices(
        program: &[i64],
        input: Option<Box<dyn Device>>,
        output: Option<Box<dyn Device>>,
    ) -> Self {
        Self::new_with_limits(program, input, output, ExecutionEngineLimits::default())
    }

    /// Creates an engine with the given devices and limits.
    pub fn new_with_limits(
        program: &[i64],
        input: Option<Box<dyn Device>>,
        output: Option<Box<dyn Device>>,
        limits: ExecutionEngineLimits,
    ) -> Self {
        Self {
            state: VMState::READY,
            memory: Memory::new(program).with_limit(limits.max_memory_size),
            instruction_pointer: 0,
            relative_base: 0,
            input: input.unwrap_or_else(|| Box::new(QueueDevice::new())),
            output: output.unwrap_or_else(|| Box::new(QueueDevice::new())),
            flags: ExecutionFlags::default(),
            limits,
            steps: 0,
        }
    }

    /// Returns the current state of the VM.
    pub fn state(&self) -> VMState {
        self.state
    }

    /// Sets the state of the VM.
    pub(crate) fn set_state(&mut self, state: VMState) {
        if self.state != state {
            log::debug!(
                "engine state {:?} -> {:?} at pointer {}",
                self.state,
                state,
                self.instruction_pointer
            );
            self.state = state;
        }
    }

    /// Called when an error causes the VM to enter the FAULT state.
    fn on_fault(&mut self, err: &VmError) {
        log::error!(
            "engine fault at pointer {} after {} steps: {}",
            self.instruction_pointer,
            self.steps,
            err
        );
        self.set_state(VMState::FAULT);
    }

    pub fn instruction_pointer(&self) -> usize {
        self.instruction_pointer
    }

    pub fn relative_base(&self) -> i64 {
        self.relative_base
    }

    /// Number of instructions executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn limits(&self) -> &ExecutionEngineLimits {
        &self.limits
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn input(&self) -> &dyn Device {
        self.input.as_ref()
    }

    pub fn input_mut(&mut self) -> &mut dyn Device {
        self.input.as_mut()
    }

    pub fn output(&self) -> &dyn Device {
        self.output.as_ref()
    }

    pub fn output_mut(&mut self) -> &mut dyn Device {
        self.output.as_mut()
    }

    /// Queues a value on the input device.
    pub fn push_input(&mut self, value: i64) {
        self.input.write(value);
    }

    /// Drains the output device, oldest value first.
    pub fn take_output(&mut self) -> Vec<i64> {
        std::iter::from_fn(|| self.output.read()).collect()
    }

    /// Value written by the most recent instruction, if it was an output.
    pub(crate) fn last_output(&self) -> Option<i64> {
        self.flags.output
    }

    /// Executes exactly one instruction.
    ///
    /// Fails with [`VmError::Halted`] or [`VmError::Faulted`] once the engine
    /// is in a terminal state. Any error raised by the instruction itself
    /// faults the engine.
    pub fn step(&mut self) -> VmResult<()> {
        match self.state {
            VMState::HALT => return Err(VmError::Halted),
            VMState::FAULT => return Err(VmError::Faulted),
            VMState::READY | VMState::SUSPENDED => self.set_state(VMState::RUNNING),
            VMState::RUNNING => {}
        }

        if let Err(err) = self.execute_next() {
            self.on_fault(&err);
            return Err(err);
        }

        Ok(())
    }

    /// Queues `initial_input`, then executes until the program halts.
    ///
    /// Every value the program reads must already be queued; running out is
    /// [`VmError::InputExhausted`].
    pub fn run<I>(&mut self, initial_input: I) -> VmResult<()>
    where
        I: IntoIterator<Item = i64>,
    {
        for value in initial_input {
            self.input.write(value);
        }
        if self.state.is_ready() {
            log::debug!(
                "engine starting with {} cells and {} queued inputs",
                self.memory.len(),
                self.input.len()
            );
        }

        while !self.state.is_halt() {
            self.step()?;
        }

        log::debug!(
            "engine halted at pointer {} after {} steps",
            self.instruction_pointer,
            self.steps
        );
        Ok(())
    }

    /// Executes until an output instruction runs, returning its value, or
    /// until the program halts, returning `None`.
    ///
    /// The engine is left [`VMState::SUSPENDED`] after an output.
    pub fn run_until_output(&mut self) -> VmResult<Option<i64>> {
        while !self.state.is_halt() {
            self.step()?;
            if let Some(value) = self.last_output() {
                self.set_state(VMState::SUSPENDED);
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Wraps the engine in a coroutine that yields every output value.
    pub fn into_coroutine(self) -> Coroutine {
        Coroutine::new(self)
    }

    /// Decodes and executes the instruction at the instruction pointer.
    fn execute_next(&mut self) -> VmResult<()> {
        self.flags = ExecutionFlags::default();

        if let Some(limit) = self.limits.max_steps {
            if self.steps >= limit {
                return Err(VmError::StepLimitExceeded { limit });
            }
        }

        let instruction = Instruction::decode(&mut self.memory, self.instruction_pointer)?;
        log::trace!(
            "{:>6}: {} {:?}",
            instruction.pointer(),
            instruction,
            instruction.parameters()
        );

        jump_table::execute(self, &instruction)?;
        self.steps += 1;

        if self.flags.halt {
            self.set_state(VMState::HALT);
        } else if !self.flags.jump {
            self.instruction_pointer = instruction.next_pointer();
        }

        Ok(())
    }

    fn resolver(&mut self, pointer: usize) -> Resolver<'_> {
        Resolver::new(&mut self.memory, self.relative_base, pointer)
    }

    /// Resolves parameter `index` of `instruction` to the value it reads.
    pub(crate) fn read_operand(&mut self, instruction: &Instruction, index: usize) -> VmResult<i64> {
        let (mode, parameter) = instruction.operand(index);
        self.resolver(instruction.pointer()).value(mode, parameter)
    }

    /// Resolves parameter `index` of `instruction` to the address it writes.
    pub(crate) fn destination(&mut self, instruction: &Instruction, index: usize) -> VmResult<usize> {
        let (mode, parameter) = instruction.operand(index);
        self.resolver(instruction.pointer())
            .address(mode, parameter, index)
    }

    /// Stores `value` at the destination named by parameter `index`.
    pub(crate) fn write_operand(
        &mut self,
        instruction: &Instruction,
        index: usize,
        value: i64,
    ) -> VmResult<()> {
        let address = self.destination(instruction, index)?;
        self.memory.set(address, value)
    }

    /// Moves the instruction pointer to `target`.
    pub(crate) fn jump(&mut self, target: i64, pointer: usize) -> VmResult<()> {
        self.instruction_pointer = usize::try_from(target).map_err(|_| VmError::NegativeAddress {
            address: target,
            pointer,
        })?;
        self.flags.jump = true;
        Ok(())
    }

    pub(crate) fn read_input(&mut self, pointer: usize) -> VmResult<i64> {
        self.input.read().ok_or(VmError::InputExhausted { pointer })
    }

    pub(crate) fn write_output(&mut self, value: i64) {
        self.output.write(value);
        self.flags.output = Some(value);
    }

    pub(crate) fn adjust_relative_base(&mut self, delta: i64, pointer: usize) -> VmResult<()> {
        self.relative_base =
            self.relative_base
                .checked_add(delta)
                .ok_or(VmError::ArithmeticOverflow {
                    opcode: "ARB",
                    pointer,
                })?;
        Ok(())
    }

    pub(crate) fn halt(&mut self) {
        self.flags.halt = true;
    }
}
