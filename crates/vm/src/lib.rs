//! # Intcode Virtual Machine
//!
//! An interpreter for Intcode, a small register-less instruction set in
//! which code and data share one flat, growable array of signed 64-bit
//! integers.
//!
//! ## Architecture
//!
//! - **Memory**: flat cell array that zero-fills on out-of-range access
//! - **Addressing**: position, immediate and relative parameter modes
//! - **Instruction**: decodes opcode, mode digits and raw parameters
//! - **JumpTable**: one handler per opcode, dispatched by exhaustive match
//! - **Device**: FIFO input and output queues, optionally shared
//! - **ExecutionEngine**: state machine driving fetch, decode and execute
//! - **Coroutine**: suspends the engine after every output
//! - **Pipeline**: chains engines into a round-robin feedback loop
//!
//! ## Example
//!
//! ```rust
//! use intcode_vm::{ExecutionEngine, Program, VMState};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads one value, multiplies it by 3 and writes it back out.
//! let program: Program = "3,9,1002,9,3,9,4,9,99,0".parse()?;
//!
//! let mut engine = ExecutionEngine::new(&program);
//! engine.run([14])?;
//!
//! assert_eq!(engine.state(), VMState::HALT);
//! assert_eq!(engine.take_output(), vec![42]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Coroutines
//!
//! ```rust
//! use intcode_vm::{CoroutineState, ExecutionEngine};
//!
//! let mut coroutine = ExecutionEngine::new(&[104, 7, 99]).into_coroutine();
//! assert_eq!(coroutine.resume(None), Ok(CoroutineState::Yielded(7)));
//! assert_eq!(coroutine.resume(None), Ok(CoroutineState::Complete));
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

/// Parameter modes and address resolution
pub mod addressing;
/// Output-at-a-time execution
pub mod coroutine;
/// Breakpoints and single stepping
pub mod debugger;
/// Input and output queues
pub mod device;
/// Static program listings
pub mod disassembler;
/// VM error types and result handling
pub mod error;
/// Low-level VM execution engine
pub mod execution_engine;
/// VM instruction representation
pub mod instruction;
/// OpCode implementation and instruction dispatch
pub mod jump_table;
/// Growable program memory
pub mod memory;
/// VM opcode definitions and utilities
pub mod op_code;
/// Chained engines
pub mod pipeline;
/// Program text parsing
pub mod program;
/// Engine lifecycle states
pub mod vm_state;

pub use addressing::{ParameterMode, Resolver};
pub use coroutine::{Coroutine, CoroutineState};
pub use debugger::{Debugger, StopReason};
pub use device::{Device, QueueDevice, SharedDevice};
pub use disassembler::{disassemble, DisassembledLine, LineKind};
pub use error::{VmError, VmResult};
pub use execution_engine::{ExecutionEngine, ExecutionEngineLimits};
pub use instruction::Instruction;
pub use jump_table::InstructionHandler;
pub use memory::Memory;
pub use op_code::{OpCode, ParameterRole};
pub use pipeline::Pipeline;
pub use program::Program;
pub use vm_state::VMState;
