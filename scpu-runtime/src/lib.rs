//! # SCPU Runtime
//!
//! Execute SCPU programs on a small 8-bit register machine.
//!
//! ## Features
//!
//! - **Registers**: A, B, C, D and the result register RES, all 8-bit
//! - **Flags**: carry and zero, written by ADD/SUB/MUL/DIV
//! - **Control flow**: JMP/JZ/JNZ/JC/JNC to labels or instruction indices
//! - **Observers**: per-step snapshots, PRINT events, cooperative cancellation
//!
//! ## Example
//!
//! ```rust
//! use scpu_runtime::{VM, VMConfig};
//! use scpu_spec::{Program, Register};
//!
//! let program = Program::new(["LOAD 5 A", "LOAD 1 B", "ADD A B", "PRINT RES"]);
//! let mut vm = VM::with_program(program, VMConfig::default());
//! let outcome = vm.run().unwrap();
//!
//! assert!(outcome.completed());
//! assert_eq!(vm.state().read_reg(Register::Res), 6);
//! ```

pub mod error;
pub mod state;
pub mod alu;
pub mod execute;
pub mod observer;
pub mod cancel;
pub mod trace;
pub mod vm;

pub use state::{Flags, HaltReason, MachineState};
pub use alu::{AluError, AluOutput};
pub use observer::{NoopObserver, Observer, PrintRecord, Recorder, Snapshot};
pub use cancel::CancelToken;
pub use trace::TraceRenderer;
pub use vm::{RunOutcome, Step, VMConfig, VM, DEFAULT_MAX_STEPS};
pub use error::RuntimeError;

/// Simple execution helper
///
/// Runs a program with the default configuration and returns the PRINT
/// outputs.
pub fn run(program: scpu_spec::Program) -> Result<Vec<PrintRecord>, RuntimeError> {
    let mut vm = VM::with_program(program, VMConfig::default());
    Ok(vm.run()?.outputs)
}
