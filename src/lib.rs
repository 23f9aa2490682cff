//! # Intcode-RS: an Intcode virtual machine in Rust
//!
//! Intcode programs are flat arrays of signed integers in which code and data
//! share one growable memory. This library provides:
//! - An execution engine with step, run-to-halt and coroutine modes
//! - Pluggable FIFO input and output devices
//! - Feedback pipelines that chain engines round-robin
//! - A breakpoint debugger and a static disassembler
//!
//! ## Quick Start
//!
//! ```rust
//! use intcode_rs::prelude::*;
//!
//! # fn main() -> Result<(), VmError> {
//! let program: Program = "1,9,10,3,2,3,11,0,99,30,40,50".parse()?;
//! let memory = intcode_rs::run_to_halt(&program, None)?.into_vec();
//! assert_eq!(memory[0], 3500);
//!
//! let outputs = intcode_rs::run_for_output(&[3, 0, 4, 0, 99], [42])?;
//! assert_eq!(outputs, vec![42]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`intcode_config`] - Shared constants and serde settings
//! - [`intcode_vm`] - Memory, decoder, instruction set and execution engine

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use intcode_config as config;
pub use intcode_vm as vm;

use intcode_vm::{ExecutionEngine, Memory, VmResult};

/// Common imports for Intcode development
pub mod prelude {
    pub use crate::config::{ExecutionSettings, RunnerConfig};
    pub use crate::vm::{
        Coroutine, CoroutineState, Debugger, Device, ExecutionEngine, ExecutionEngineLimits,
        Pipeline, Program, QueueDevice, SharedDevice, VMState, VmError, VmResult,
    };
}

/// Runs `program` to halt with `input` queued and returns the final memory.
pub fn run_to_halt<I>(program: &[i64], input: I) -> VmResult<Memory>
where
    I: IntoIterator<Item = i64>,
{
    let mut engine = ExecutionEngine::new(program);
    engine.run(input)?;
    Ok(engine.memory().clone())
}

/// Runs `program` to halt with `input` queued and returns its outputs.
pub fn run_for_output<I>(program: &[i64], input: I) -> VmResult<Vec<i64>>
where
    I: IntoIterator<Item = i64>,
{
    let mut engine = ExecutionEngine::new(program);
    engine.run(input)?;
    Ok(engine.take_output())
}

/// Intcode-RS library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
