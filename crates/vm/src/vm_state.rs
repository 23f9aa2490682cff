//! VM state implementation.

/// Indicates the status of an execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VMState {
    /// Constructed; no instruction has executed yet.
    READY,

    /// Instructions are being executed.
    RUNNING,

    /// A coroutine has just yielded an output and is waiting to be resumed.
    SUSPENDED,

    /// A halt instruction executed. No further instructions run.
    HALT,

    /// A fatal error stopped execution. No further instructions run.
    FAULT,
}

impl VMState {
    #[inline]
    pub fn is_ready(self) -> bool {
        self == VMState::READY
    }

    #[inline]
    pub fn is_halt(self) -> bool {
        self == VMState::HALT
    }

    #[inline]
    pub fn is_fault(self) -> bool {
        self == VMState::FAULT
    }

    /// Returns true once the engine can execute nothing further.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, VMState::HALT | VMState::FAULT)
    }
}

impl Default for VMState {
    fn default() -> Self {
        VMState::READY
    }
}
