//! Virtual Machine for SCPU

use crate::cancel::CancelToken;
use crate::error::{Result, RuntimeError};
use crate::execute::execute;
use crate::observer::{NoopObserver, Observer, PrintRecord, Snapshot};
use crate::state::{HaltReason, MachineState};
use scpu_spec::{DecodeError, Instruction, Program};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default soft step budget per run
pub const DEFAULT_MAX_STEPS: u64 = 500;

/// VM configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VMConfig {
    /// Maximum number of steps before the run stops (not an error)
    pub max_steps: u64,

    /// Call [`Observer::on_step`] after every step
    pub trace: bool,

    /// Pause between steps, for human-paced tracing
    pub step_delay: Duration,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            trace: false,
            step_delay: Duration::ZERO,
        }
    }
}

impl VMConfig {
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }
}

/// Result of a single [`VM::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Index the instruction was fetched from
    pub pc: usize,
    pub instruction: Instruction,
    pub print: Option<PrintRecord>,
}

/// Result of a run that ended without a fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Steps executed in this run
    pub steps: u64,

    /// Reason for halting
    pub halt_reason: HaltReason,

    /// Values reported by PRINT, in execution order
    pub outputs: Vec<PrintRecord>,
}

impl RunOutcome {
    /// Ran off the end of the program
    pub fn completed(&self) -> bool {
        self.halt_reason == HaltReason::Completed
    }
}

/// SCPU Virtual Machine
///
/// Owns the register file, flags, program counter and the loaded program.
/// Independent instances share nothing.
#[derive(Debug, Clone, Default)]
pub struct VM {
    /// VM state (registers, flags, PC)
    state: MachineState,

    /// Loaded program
    program: Program,

    /// Per-line decode results, indexed like `program`
    decoded: Vec<std::result::Result<Instruction, DecodeError>>,

    /// Configuration
    config: VMConfig,
}

impl VM {
    /// Create a VM with zeroed registers and no program
    pub fn new(config: VMConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a VM and load `program`
    pub fn with_program(program: Program, config: VMConfig) -> Self {
        let mut vm = Self::new(config);
        vm.load_program(program);
        vm
    }

    /// Replace the loaded program and reset PC to 0.
    ///
    /// Registers and flags are kept: a program can pick up where the previous
    /// one left off. Build a new `VM` for a clean machine.
    ///
    /// Every line is decoded here, but a line that fails to decode only
    /// faults when it is fetched.
    pub fn load_program(&mut self, program: Program) {
        self.decoded = program.decode_all();
        tracing::debug!(
            lines = program.len(),
            labels = program.labels().len(),
            "program loaded"
        );
        self.program = program;
        self.state.pc = 0;
    }

    /// Fetch, advance PC, decode and execute one instruction
    pub fn step(&mut self) -> Result<Step> {
        let pc = self.state.pc;
        let len = self.program.len();
        let (line, decoded) = match (self.program.line(pc), self.decoded.get(pc)) {
            (Some(line), Some(decoded)) => (line, decoded),
            _ => return Err(RuntimeError::ProgramCounterOutOfRange { pc, len }),
        };

        // PC moves past the instruction before it runs; jumps overwrite it
        self.state.pc = pc + 1;

        let instruction = decoded.clone().map_err(|source| RuntimeError::Decode {
            pc,
            line: line.to_string(),
            source,
        })?;

        tracing::debug!(pc, line, "exec");
        let print = execute(&instruction, &mut self.state, pc, line)?;

        Ok(Step {
            pc,
            instruction,
            print,
        })
    }

    /// Run until the program ends or the step budget runs out
    pub fn run(&mut self) -> Result<RunOutcome> {
        self.run_with(&mut NoopObserver, &CancelToken::new())
    }

    /// Run, reporting to `observer`
    pub fn run_observed(&mut self, observer: &mut dyn Observer) -> Result<RunOutcome> {
        self.run_with(observer, &CancelToken::new())
    }

    /// Run, reporting to `observer` and stopping early if `cancel` is raised.
    ///
    /// Faults end the run immediately and are returned as-is; the machine
    /// state is left exactly as the fault found it.
    pub fn run_with(
        &mut self,
        observer: &mut dyn Observer,
        cancel: &CancelToken,
    ) -> Result<RunOutcome> {
        let max_steps = self.config.max_steps;
        let mut steps = 0u64;
        let mut outputs = Vec::new();

        let halt_reason = loop {
            if self.state.pc >= self.program.len() {
                break HaltReason::Completed;
            }
            if cancel.is_cancelled() {
                break HaltReason::Cancelled;
            }
            if steps >= max_steps {
                break HaltReason::StepLimit;
            }

            let step = match self.step() {
                Ok(step) => step,
                Err(err) => {
                    tracing::warn!(steps, %err, "run aborted");
                    return Err(err);
                }
            };
            steps += 1;

            if let Some(record) = step.print {
                observer.on_print(&record);
                outputs.push(record);
            }

            if self.config.trace {
                let snapshot = Snapshot::capture(&self.state, steps, max_steps);
                if observer.on_step(&snapshot).is_break() {
                    break HaltReason::ObserverStop;
                }
            }

            // Pace only between steps, never after the last one
            let more = self.state.pc < self.program.len() && steps < max_steps;
            if more && !self.config.step_delay.is_zero() {
                std::thread::sleep(self.config.step_delay);
            }
        };

        tracing::info!(steps, reason = %halt_reason, pc = self.state.pc, "run halted");
        observer.on_halt(
            &Snapshot::capture(&self.state, steps, max_steps),
            halt_reason,
        );

        Ok(RunOutcome {
            steps,
            halt_reason,
            outputs,
        })
    }

    /// Get current state (for debugging)
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn config(&self) -> &VMConfig {
        &self.config
    }
}
