//! Execution observers
//!
//! An [`Observer`] is handed a [`Snapshot`] after every executed step (when
//! tracing is enabled), every PRINT, and the final halt. Returning
//! [`ControlFlow::Break`] from [`Observer::on_step`] ends the run before the
//! next instruction is fetched.

use crate::state::{HaltReason, MachineState};
use scpu_spec::{Register, Word, NUM_REGISTERS};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

/// Full machine state after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Steps completed in this run (1-based after the first step)
    pub step: u64,
    /// Configured step budget
    pub max_steps: u64,
    /// A, B, C, D, RES
    pub registers: [Word; NUM_REGISTERS],
    pub pc: usize,
    pub carry: bool,
    pub zero: bool,
}

impl Snapshot {
    pub fn capture(state: &MachineState, step: u64, max_steps: u64) -> Self {
        Self {
            step,
            max_steps,
            registers: *state.registers(),
            pc: state.pc,
            carry: state.flags.carry,
            zero: state.flags.zero,
        }
    }

    #[inline]
    pub fn reg(&self, reg: Register) -> Word {
        self.registers[reg.index()]
    }
}

/// Value reported by a PRINT instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintRecord {
    /// Index of the PRINT instruction
    pub pc: usize,
    pub register: Register,
    pub value: Word,
}

/// Receives execution events from a running VM
pub trait Observer {
    /// Called after each completed step when tracing is enabled
    fn on_step(&mut self, _snapshot: &Snapshot) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Called for every executed PRINT
    fn on_print(&mut self, _record: &PrintRecord) {}

    /// Called once when a run stops without a fault
    fn on_halt(&mut self, _snapshot: &Snapshot, _reason: HaltReason) {}
}

/// Ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Keeps every event in memory
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub snapshots: Vec<Snapshot>,
    pub prints: Vec<PrintRecord>,
    pub halt: Option<HaltReason>,
    /// Ask the VM to stop once this many snapshots are recorded
    pub stop_after: Option<usize>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stopping_after(steps: usize) -> Self {
        Self {
            stop_after: Some(steps),
            ..Self::default()
        }
    }
}

impl Observer for Recorder {
    fn on_step(&mut self, snapshot: &Snapshot) -> ControlFlow<()> {
        self.snapshots.push(*snapshot);
        match self.stop_after {
            Some(limit) if self.snapshots.len() >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }

    fn on_print(&mut self, record: &PrintRecord) {
        self.prints.push(*record);
    }

    fn on_halt(&mut self, _snapshot: &Snapshot, reason: HaltReason) {
        self.halt = Some(reason);
    }
}
