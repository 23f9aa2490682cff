//! Error types for the Intcode virtual machine.

use thiserror::Error;

/// Result type alias for VM operations.
pub type VmResult<T> = Result<T, VmError>;

/// Errors raised while decoding or executing an Intcode program.
///
/// Every variant is fatal: the engine that produced it moves to
/// [`VMState::FAULT`](crate::VMState::FAULT) and executes nothing further.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    /// The two low digits of the instruction word name no instruction.
    #[error("Unknown opcode {opcode} at instruction pointer {pointer}")]
    UnknownOpcode { opcode: i64, pointer: usize },

    /// A destination parameter was encoded in immediate mode.
    #[error("Parameter {parameter} of the instruction at {pointer} is a destination in immediate mode")]
    InvalidAddressingMode { pointer: usize, parameter: usize },

    /// A mode digit other than 0, 1 or 2.
    #[error("Unknown parameter mode {mode} for parameter {parameter} of the instruction at {pointer}")]
    UnknownParameterMode {
        mode: i64,
        pointer: usize,
        parameter: usize,
    },

    /// An input instruction ran against an empty input device.
    #[error("Input exhausted at instruction pointer {pointer}")]
    InputExhausted { pointer: usize },

    /// A resolved address or jump target is below zero.
    #[error("Negative address {address} at instruction pointer {pointer}")]
    NegativeAddress { address: i64, pointer: usize },

    /// Relative base plus offset does not fit in a signed 64-bit address.
    #[error("Relative address {base} + {offset} overflows at instruction pointer {pointer}")]
    AddressOverflow {
        base: i64,
        offset: i64,
        pointer: usize,
    },

    /// Signed 64-bit overflow in an arithmetic instruction.
    #[error("Arithmetic overflow in {opcode} at instruction pointer {pointer}")]
    ArithmeticOverflow { opcode: &'static str, pointer: usize },

    /// The configured instruction budget was used up.
    #[error("Step limit of {limit} instructions exceeded")]
    StepLimitExceeded { limit: u64 },

    /// Memory growth would pass the configured cell limit.
    #[error("Memory limit exceeded: {requested} cells requested, limit is {limit}")]
    MemoryLimitExceeded { requested: usize, limit: usize },

    /// The allocator could not back the requested number of cells.
    #[error("Out of memory: cannot allocate {requested} cells")]
    OutOfMemory { requested: usize },

    /// The engine has already halted.
    #[error("Engine has halted")]
    Halted,

    /// The engine has already faulted.
    #[error("Engine has faulted")]
    Faulted,

    /// Program text contained something other than a signed integer.
    #[error("Invalid program token {token:?} at position {position}")]
    InvalidProgram { position: usize, token: String },
}

impl VmError {
    /// Returns the instruction pointer the error was raised at, if it has one.
    pub fn pointer(&self) -> Option<usize> {
        match self {
            VmError::UnknownOpcode { pointer, .. }
            | VmError::InvalidAddressingMode { pointer, .. }
            | VmError::UnknownParameterMode { pointer, .. }
            | VmError::InputExhausted { pointer }
            | VmError::NegativeAddress { pointer, .. }
            | VmError::AddressOverflow { pointer, .. }
            | VmError::ArithmeticOverflow { pointer, .. } => Some(*pointer),
            _ => None,
        }
    }

    /// Returns true for errors raised while decoding rather than executing.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            VmError::UnknownOpcode { .. } | VmError::UnknownParameterMode { .. }
        )
    }
}
