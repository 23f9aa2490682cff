//! Coroutine execution protocol.
//!
//! A [`Coroutine`] drives an engine one output at a time: every `resume`
//! queues the caller's input, then runs until an output instruction has
//! executed (the value is yielded) or the program halts. Suspension happens
//! only right after an output, and resumption is always caller-initiated, so
//! several coroutines can be driven round-robin to chain VM instances.
//!
//! The engine never blocks waiting for input. An `input` instruction that
//! finds the queue empty is a protocol violation by the driver and faults the
//! engine with [`VmError::InputExhausted`](crate::VmError::InputExhausted).

use crate::error::VmResult;
use crate::execution_engine::ExecutionEngine;
use crate::vm_state::VMState;

/// Result of resuming a coroutine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoroutineState {
    /// An output instruction produced this value; the engine is suspended.
    Yielded(i64),

    /// The program halted. Further resumes keep returning this.
    Complete,
}

impl CoroutineState {
    /// The yielded value, if any.
    pub fn value(self) -> Option<i64> {
        match self {
            CoroutineState::Yielded(value) => Some(value),
            CoroutineState::Complete => None,
        }
    }

    pub fn is_complete(self) -> bool {
        self == CoroutineState::Complete
    }
}

/// An engine driven one output at a time.
#[derive(Debug)]
pub struct Coroutine {
    engine: ExecutionEngine,
}

impl Coroutine {
    /// Wraps `engine`. Nothing executes until the first resume.
    pub fn new(engine: ExecutionEngine) -> Self {
        Self { engine }
    }

    /// Queues `input` (if any) and runs to the next output or to halt.
    pub fn resume(&mut self, input: Option<i64>) -> VmResult<CoroutineState> {
        self.resume_with(input)
    }

    /// Queues every value of `inputs` and runs to the next output or to halt.
    pub fn resume_with<I>(&mut self, inputs: I) -> VmResult<CoroutineState>
    where
        I: IntoIterator<Item = i64>,
    {
        if self.engine.state().is_halt() {
            if inputs.into_iter().next().is_some() {
                log::warn!("input passed to a completed coroutine was discarded");
            }
            return Ok(CoroutineState::Complete);
        }

        for value in inputs {
            self.engine.push_input(value);
        }

        match self.engine.run_until_output()? {
            Some(value) => {
                log::debug!(
                    "coroutine yielded {} at pointer {}",
                    value,
                    self.engine.instruction_pointer()
                );
                Ok(CoroutineState::Yielded(value))
            }
            None => Ok(CoroutineState::Complete),
        }
    }

    /// Returns true once the program has halted.
    pub fn is_complete(&self) -> bool {
        self.engine.state().is_halt()
    }

    pub fn state(&self) -> VMState {
        self.engine.state()
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
}

impl From<ExecutionEngine> for Coroutine {
    fn from(engine: ExecutionEngine) -> Self {
        Self::new(engine)
    }
}

/// Yields each output without supplying new input, until the program halts
/// or faults. A fault is yielded once, then iteration ends.
impl Iterator for Coroutine {
    type Item = VmResult<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.engine.state().is_terminal() {
            return None;
        }
        match self.resume(None) {
            Ok(CoroutineState::Yielded(value)) => Some(Ok(value)),
            Ok(CoroutineState::Complete) => None,
            Err(err) => Some(Err(err)),
        }
    }
}
